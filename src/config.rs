//! Settings that control how the dashboard loads and summarises transactions.

use serde::Deserialize;

/// What to do with a transaction record that fails validation while loading.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum InvalidRecordPolicy {
    /// Drop the record, log a warning and count it as rejected.
    #[default]
    Skip,
    /// Fail the whole load with the record's error.
    Reject,
}

/// The config for building dashboard summaries.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct DashboardConfig {
    /// The maximum number of transactions in the recent transactions list.
    pub recent_transactions_limit: usize,
    /// The maximum number of transactions listed for each spending location.
    pub location_recent_limit: usize,
    /// How to handle records that fail validation while loading.
    pub invalid_records: InvalidRecordPolicy,
    /// The local timezone as a canonical timezone name, e.g. "Pacific/Auckland".
    ///
    /// Used to work out today's date when selecting the current period.
    pub local_timezone: String,
}

impl Default for DashboardConfig {
    fn default() -> Self {
        Self {
            recent_transactions_limit: 10,
            location_recent_limit: 3,
            invalid_records: InvalidRecordPolicy::Skip,
            local_timezone: "Etc/UTC".to_owned(),
        }
    }
}
