//! Defines the crate level error type and the message shown to dashboard users.

/// The message a dashboard shows in place of its widgets when loading fails.
pub const LOAD_FAILURE_MESSAGE: &str = "Error loading data. Please try again later.";

/// The errors that may occur while loading or summarising transactions.
#[derive(Debug, thiserror::Error, PartialEq)]
pub enum Error {
    /// The transaction file could not be read.
    ///
    /// Callers should pass in the path and the original error as a string.
    #[error("could not read transaction file \"{0}\": {1}")]
    ReadFile(String, String),

    /// The transaction document is not valid JSON or does not have the
    /// expected shape.
    #[error("could not parse transaction data: {0}")]
    InvalidJson(String),

    /// A record does not have the fields of a transaction, e.g. its amount
    /// is null or not a number.
    #[error("transaction {index} is not a valid record: {message}")]
    InvalidRecord {
        /// The position of the record in the source document.
        index: usize,
        /// The deserialization error as a string.
        message: String,
    },

    /// A transaction's date could not be parsed as an ISO date.
    #[error("transaction {index} has an invalid date \"{date}\"")]
    InvalidDate {
        /// The position of the record in the source document.
        index: usize,
        /// The date string as it appeared in the source document.
        date: String,
    },

    /// A transaction has an empty merchant name.
    #[error("transaction {0} has an empty merchant name")]
    EmptyMerchant(usize),

    /// A transaction has an empty category name.
    #[error("transaction {0} has an empty category name")]
    EmptyCategory(usize),

    /// An error occurred while getting the local timezone from a canonical timezone string.
    #[error("invalid timezone {0}")]
    InvalidTimezone(String),
}

impl Error {
    /// Whether the error means the transaction data could not be loaded at all.
    ///
    /// Load failures are terminal: the dashboard should show
    /// [LOAD_FAILURE_MESSAGE] and zeroed summary cards instead of any data.
    pub fn is_load_failure(&self) -> bool {
        matches!(
            self,
            Error::ReadFile(..)
                | Error::InvalidJson(_)
                | Error::InvalidRecord { .. }
                | Error::InvalidDate { .. }
                | Error::EmptyMerchant(_)
                | Error::EmptyCategory(_)
        )
    }

    /// The message to show to a dashboard user for this error.
    pub fn display_message(&self) -> String {
        match self {
            Error::InvalidTimezone(timezone) => format!(
                "Could not get local timezone \"{timezone}\". Check your settings and \
                ensure the timezone has been set to valid, canonical timezone string"
            ),
            error if error.is_load_failure() => LOAD_FAILURE_MESSAGE.to_owned(),
            _ => "An unexpected error occurred, check the logs for more details.".to_owned(),
        }
    }
}

impl From<serde_json::Error> for Error {
    fn from(value: serde_json::Error) -> Self {
        tracing::error!("could not parse transaction data: {value}");
        Error::InvalidJson(value.to_string())
    }
}
