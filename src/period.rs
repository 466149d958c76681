//! Selects the transactions in the current period and in the previous period
//! used for trend comparisons.

use serde::{Deserialize, Serialize};
use time::{Date, Duration, macros::date};

use crate::transaction::{Transaction, serialize_date};

/// The start of the "all time" range.
pub const EPOCH: Date = date!(1970 - 01 - 01);

/// The time range selected on the dashboard.
///
/// Unrecognised values fall back to [RangeKey::All].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "String", into = "&'static str")]
pub enum RangeKey {
    /// The last calendar month.
    OneMonth,
    /// The last three calendar months.
    ThreeMonths,
    /// The last six calendar months.
    SixMonths,
    /// The last calendar year.
    OneYear,
    /// Every transaction.
    #[default]
    All,
}

impl RangeKey {
    /// Parse a range key such as `"3m"`, falling back to [RangeKey::All].
    pub fn parse(value: &str) -> Self {
        match value {
            "1m" => Self::OneMonth,
            "3m" => Self::ThreeMonths,
            "6m" => Self::SixMonths,
            "1y" => Self::OneYear,
            _ => Self::All,
        }
    }

    /// The short form of the key, e.g. `"3m"`.
    pub fn as_query_value(self) -> &'static str {
        match self {
            Self::OneMonth => "1m",
            Self::ThreeMonths => "3m",
            Self::SixMonths => "6m",
            Self::OneYear => "1y",
            Self::All => "all",
        }
    }

    /// A human readable name for the range.
    pub fn label(self) -> &'static str {
        match self {
            Self::OneMonth => "Last month",
            Self::ThreeMonths => "Last 3 months",
            Self::SixMonths => "Last 6 months",
            Self::OneYear => "Last year",
            Self::All => "All time",
        }
    }

    /// The earliest date included in the range when the current date is `today`.
    pub fn start_date(self, today: Date) -> Date {
        match self {
            Self::OneMonth => subtract_months(today, 1),
            Self::ThreeMonths => subtract_months(today, 3),
            Self::SixMonths => subtract_months(today, 6),
            Self::OneYear => subtract_months(today, 12),
            Self::All => EPOCH,
        }
    }
}

impl From<&str> for RangeKey {
    fn from(value: &str) -> Self {
        Self::parse(value)
    }
}

impl From<String> for RangeKey {
    fn from(value: String) -> Self {
        Self::parse(&value)
    }
}

impl From<RangeKey> for &'static str {
    fn from(value: RangeKey) -> Self {
        value.as_query_value()
    }
}

/// A half-open date range, `[start, end)`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct PeriodWindow {
    /// The first date in the window.
    #[serde(serialize_with = "serialize_date")]
    pub start: Date,
    /// The first date after the window.
    #[serde(serialize_with = "serialize_date")]
    pub end: Date,
}

impl PeriodWindow {
    /// Whether `date` falls inside the window.
    pub fn contains(&self, date: Date) -> bool {
        self.start <= date && date < self.end
    }

    /// The length of the window.
    pub fn duration(&self) -> Duration {
        self.end - self.start
    }

    /// A label such as "1 Jan 2024 - 1 Feb 2024". The end date is not part of the window.
    pub fn label(&self) -> String {
        format!(
            "{} - {}",
            format_date_label(self.start),
            format_date_label(self.end)
        )
    }
}

/// Selects the transactions in the range `range_key` as seen from `today`.
///
/// Every transaction on or after the range's start date is returned in its
/// original order. The range has no upper bound, so transactions dated after
/// `today` are always included.
pub fn select_current_period(
    all: &[Transaction],
    range_key: RangeKey,
    today: Date,
) -> Vec<&Transaction> {
    let start_date = range_key.start_date(today);

    all.iter()
        .filter(|transaction| transaction.date >= start_date)
        .collect()
}

/// The window immediately before `current` with the same length.
///
/// The window ends at the earliest date in `current` and is as long as the
/// span between its earliest and latest dates. Returns `None` if `current` is
/// empty since there is no date range to mirror.
pub fn previous_window(current: &[&Transaction]) -> Option<PeriodWindow> {
    let min_date = current.iter().map(|transaction| transaction.date).min()?;
    let max_date = current.iter().map(|transaction| transaction.date).max()?;

    let duration = max_date - min_date;
    let start = min_date.checked_sub(duration).unwrap_or(Date::MIN);

    Some(PeriodWindow {
        start,
        end: min_date,
    })
}

/// Selects the transactions in the period before `current`.
///
/// The window comes from [previous_window] and is matched against `all`, the
/// full, unfiltered transaction list. Returns an empty list when `current` is
/// empty.
pub fn derive_previous_period<'a>(
    all: &'a [Transaction],
    current: &[&Transaction],
) -> Vec<&'a Transaction> {
    let Some(window) = previous_window(current) else {
        return Vec::new();
    };

    all.iter()
        .filter(|transaction| window.contains(transaction.date))
        .collect()
}

/// Moves `date` back by `months` calendar months.
///
/// The day is clamped to the last day of the target month, e.g. 31 March
/// minus one month is the last day of February.
fn subtract_months(date: Date, months: u8) -> Date {
    let whole_years = i32::from(months / 12);
    let remainder = months % 12;
    let wraps_year = u8::from(date.month()) <= remainder;

    let year = date.year() - whole_years - i32::from(wraps_year);
    let month = date.month().nth_prev(remainder);
    let day = date.day().min(month.length(year));

    Date::from_calendar_date(year, month, day).unwrap_or(Date::MIN)
}

fn format_date_label(date: Date) -> String {
    let month = date.month().to_string();
    format!("{} {} {}", date.day(), &month[..3], date.year())
}
