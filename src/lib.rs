//! Finboard is the aggregation and period comparison engine behind a
//! personal finance dashboard.
//!
//! This library loads transactions from a JSON document, selects the
//! transactions in a time range, summarises them, compares the summary with
//! the period of equal length just before it and groups spending for the
//! recent transactions list and spending map. Rendering is left to the host
//! application, which can serialize a [DashboardSummary] straight to JSON.
//!
//! ```no_run
//! use finboard::{DashboardConfig, DashboardSummary, RangeKey, TransactionStore};
//!
//! let config = DashboardConfig::default();
//! let store = TransactionStore::load("transactions.json", config.invalid_records)?;
//! let summary = DashboardSummary::build_for_today(&store, RangeKey::parse("3m"), &config)?;
//!
//! println!("{}", summary.trends.expenses.label());
//! # Ok::<(), finboard::Error>(())
//! ```

#![warn(missing_docs)]

mod config;
mod dashboard;
mod error;
mod logging;
mod period;
mod store;
mod timezone;
mod transaction;

pub use config::{DashboardConfig, InvalidRecordPolicy};
pub use dashboard::{
    AggregateResult, CategoryTotal, DashboardSummary, Direction, LegendScale, LocationSpend,
    MerchantTotal, NONE_LABEL, Polarity, Sentiment, SummaryTrends, TopMerchant, Trend, aggregate,
    compare, group_by_location, legend_scale, percent_change, recent_transactions,
    savings_change, share_of_expenses,
};
pub use error::{Error, LOAD_FAILURE_MESSAGE};
pub use logging::init_tracing;
pub use period::{
    EPOCH, PeriodWindow, RangeKey, derive_previous_period, previous_window, select_current_period,
};
pub use store::TransactionStore;
pub use timezone::{get_local_offset, today_in};
pub use transaction::{Location, Transaction};
