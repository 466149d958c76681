//! Sets up `tracing` output for applications that embed the dashboard engine.
//!
//! The library itself only emits events. Call [init_tracing] once from the
//! host application's entry point to print them.

use tracing_subscriber::{
    EnvFilter, Layer, filter::LevelFilter, layer::SubscriberExt, util::SubscriberInitExt,
};

/// Install a global subscriber that pretty-prints events to stdout.
///
/// The `RUST_LOG` environment variable takes precedence over
/// `default_level`, e.g. `RUST_LOG=finboard=debug` shows pipeline progress.
///
/// Does nothing if a global subscriber is already installed.
pub fn init_tracing(default_level: LevelFilter) {
    let filter = EnvFilter::builder()
        .with_default_directive(default_level.into())
        .from_env_lossy();

    let result = tracing_subscriber::registry()
        .with(tracing_subscriber::fmt::layer().pretty().with_filter(filter))
        .try_init();

    if let Err(error) = result {
        tracing::debug!("tracing subscriber already installed: {error}");
    }
}
