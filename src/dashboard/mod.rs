//! Dashboard module
//!
//! Turns the loaded transactions into the data behind the summary cards,
//! trend indicators, charts and recent transactions list.

mod aggregation;
mod location;
mod recent;
mod summary;
mod trend;

pub use aggregation::{
    AggregateResult, CategoryTotal, MerchantTotal, NONE_LABEL, TopMerchant, aggregate,
    share_of_expenses,
};
pub use location::{LegendScale, LocationSpend, group_by_location, legend_scale};
pub use recent::recent_transactions;
pub use summary::DashboardSummary;
pub use trend::{
    Direction, Polarity, Sentiment, SummaryTrends, Trend, compare, percent_change, savings_change,
};
