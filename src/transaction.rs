//! Defines the transaction model and how raw JSON records become transactions.

use serde::{Deserialize, Serialize, Serializer};
use time::{
    Date, Time, UtcOffset, format_description::BorrowedFormatItem, macros::format_description,
};

use crate::Error;

const DATE_FORMAT: &[BorrowedFormatItem] = format_description!("[year]-[month]-[day]");
const TIME_FORMATS: [&[BorrowedFormatItem]; 3] = [
    format_description!("[hour]:[minute]:[second].[subsecond]"),
    format_description!("[hour]:[minute]:[second]"),
    format_description!("[hour]:[minute]"),
];
const OFFSET_FORMAT: &[BorrowedFormatItem] =
    format_description!("[offset_hour sign:mandatory]:[offset_minute]");

/// An expense or income, i.e. an event where money was either spent or earned.
///
/// Transactions are immutable once loaded. To create one in code, use
/// [Transaction::build].
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Transaction {
    /// When the transaction happened.
    #[serde(serialize_with = "serialize_date")]
    pub date: Date,
    /// The amount of money earned (positive) or spent (negative).
    pub amount: f64,
    /// Who the money was paid to or received from.
    pub merchant: String,
    /// The spending category, e.g. "Groceries".
    pub category: String,
    /// Where the transaction happened, if known.
    pub location: Option<Location>,
}

impl Transaction {
    /// Create a new transaction without a location.
    pub fn build(amount: f64, date: Date, merchant: &str, category: &str) -> Self {
        Self {
            date,
            amount,
            merchant: merchant.to_owned(),
            category: category.to_owned(),
            location: None,
        }
    }

    /// Set the location of the transaction.
    pub fn location(mut self, location: Location) -> Self {
        self.location = Some(location);
        self
    }

    /// Whether money was earned in this transaction.
    pub fn is_income(&self) -> bool {
        self.amount > 0.0
    }

    /// Whether money was spent in this transaction.
    ///
    /// A transaction with an amount of zero is neither income nor an expense.
    pub fn is_expense(&self) -> bool {
        self.amount < 0.0
    }

    /// Convert one element of the transaction document into a transaction.
    ///
    /// # Errors
    /// Returns [Error::InvalidRecord] if `value` does not have the fields of
    /// a transaction, otherwise the same errors as [Transaction::from_record].
    pub(crate) fn from_value(index: usize, value: serde_json::Value) -> Result<Self, Error> {
        let record: TransactionRecord =
            serde_json::from_value(value).map_err(|error| Error::InvalidRecord {
                index,
                message: error.to_string(),
            })?;

        Self::from_record(index, record)
    }

    /// Convert a record from the transaction document into a transaction.
    ///
    /// `index` is the position of the record in the document and is only
    /// used for error reporting.
    ///
    /// # Errors
    /// Returns:
    /// - [Error::InvalidDate] if the date is not an ISO date or date-time,
    /// - [Error::EmptyMerchant] or [Error::EmptyCategory] if either grouping
    ///   key is empty.
    fn from_record(index: usize, record: TransactionRecord) -> Result<Self, Error> {
        let date = parse_date(&record.date).ok_or_else(|| Error::InvalidDate {
            index,
            date: record.date.clone(),
        })?;

        if record.merchant.is_empty() {
            return Err(Error::EmptyMerchant(index));
        }

        if record.category.is_empty() {
            return Err(Error::EmptyCategory(index));
        }

        Ok(Self {
            date,
            amount: record.amount,
            merchant: record.merchant,
            category: record.category,
            location: record.location,
        })
    }
}

/// The place where a transaction happened.
///
/// `lat` and `lng` may be null in the source data, meaning the transaction
/// has no geographic data.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Location {
    /// Latitude in degrees.
    pub lat: Option<f64>,
    /// Longitude in degrees.
    pub lng: Option<f64>,
    /// The city name.
    #[serde(default)]
    pub city: Option<String>,
    /// The state or region name.
    #[serde(default)]
    pub state: Option<String>,
}

impl Location {
    /// The `(lat, lng)` pair, or `None` if either coordinate is missing.
    pub fn coordinates(&self) -> Option<(f64, f64)> {
        match (self.lat, self.lng) {
            (Some(lat), Some(lng)) => Some((lat, lng)),
            _ => None,
        }
    }
}

/// A transaction as it appears in the source document, before validation.
#[derive(Debug, Deserialize)]
struct TransactionRecord {
    date: String,
    amount: f64,
    merchant: String,
    category: String,
    #[serde(default)]
    location: Option<Location>,
}

/// Serializes a date as an ISO string, e.g. "2024-01-31".
pub(crate) fn serialize_date<S>(date: &Date, serializer: S) -> Result<S::Ok, S::Error>
where
    S: Serializer,
{
    let text = date.format(DATE_FORMAT).map_err(serde::ser::Error::custom)?;
    serializer.serialize_str(&text)
}

/// Parses an ISO date, or the date part of an ISO date-time.
///
/// The time of a date-time must still be valid, e.g. "2024-01-15T25:00" is
/// rejected.
fn parse_date(text: &str) -> Option<Date> {
    let (date_part, time_part) = match text.get(10..11) {
        Some("T") | Some(" ") => (&text[..10], Some(&text[11..])),
        _ => (text, None),
    };

    let date = Date::parse(date_part, DATE_FORMAT).ok()?;

    match time_part {
        Some(time_part) if !is_valid_time(time_part) => None,
        _ => Some(date),
    }
}

/// Whether `text` is a time of day with an optional "Z" or "+hh:mm" suffix.
fn is_valid_time(text: &str) -> bool {
    let time = match text.strip_suffix('Z') {
        Some(time) => time,
        None => strip_offset(text).unwrap_or(text),
    };

    TIME_FORMATS
        .iter()
        .any(|format| Time::parse(time, *format).is_ok())
}

fn strip_offset(text: &str) -> Option<&str> {
    let split = text.len().checked_sub(6)?;
    let (time, offset) = (text.get(..split)?, text.get(split..)?);

    UtcOffset::parse(offset, OFFSET_FORMAT).ok().map(|_| time)
}
