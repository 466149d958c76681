//! Percentage changes between the current and previous period.
//!
//! A trend carries the rounded percentage, which way it moved and whether that
//! is good news. For expense-like metrics a rise is bad news.

use serde::Serialize;

use crate::dashboard::aggregation::AggregateResult;

/// Which way a metric moved.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Direction {
    /// The metric increased.
    Up,
    /// The metric decreased.
    Down,
    /// The metric did not change, or there was nothing to compare against.
    Flat,
}

/// Whether a change is favourable.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Sentiment {
    /// The change is good news.
    Positive,
    /// The change is bad news.
    Negative,
    /// There was no change.
    Neutral,
}

/// How a metric's direction maps to a sentiment.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Polarity {
    /// More is better, e.g. income and savings.
    Ordinary,
    /// Less is better, e.g. spending.
    ExpenseLike,
}

/// The change of one metric relative to the previous period.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Trend {
    /// The percentage change rounded to one decimal place.
    pub percent: f64,
    /// Which way the metric moved.
    pub direction: Direction,
    /// Whether the move is favourable.
    pub sentiment: Sentiment,
}

impl Trend {
    /// A trend with no change.
    pub fn flat() -> Self {
        Self {
            percent: 0.0,
            direction: Direction::Flat,
            sentiment: Sentiment::Neutral,
        }
    }

    fn from_percent(percent: f64, polarity: Polarity) -> Self {
        let direction = if percent > 0.0 {
            Direction::Up
        } else if percent < 0.0 {
            Direction::Down
        } else {
            return Self::flat();
        };

        let sentiment = match (direction, polarity) {
            (Direction::Up, Polarity::Ordinary) | (Direction::Down, Polarity::ExpenseLike) => {
                Sentiment::Positive
            }
            _ => Sentiment::Negative,
        };

        Self {
            percent,
            direction,
            sentiment,
        }
    }

    /// The size of the change as shown next to the trend arrow, e.g. "12.5%".
    ///
    /// Whole numbers drop the decimal place, e.g. "50%".
    pub fn label(&self) -> String {
        format!("{}%", self.percent.abs())
    }
}

/// The trends shown on the summary cards.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct SummaryTrends {
    /// Change in total income.
    pub income: Trend,
    /// Change in total expenses. A rise is negative.
    pub expenses: Trend,
    /// Change in net savings.
    pub savings: Trend,
}

impl SummaryTrends {
    /// Flat trends for all metrics, e.g. when there is no data.
    pub fn flat() -> Self {
        Self {
            income: Trend::flat(),
            expenses: Trend::flat(),
            savings: Trend::flat(),
        }
    }
}

/// The percentage change from `previous` to `current`.
///
/// A `previous` value of zero gives a flat 0% trend rather than an infinite
/// change.
pub fn percent_change(current: f64, previous: f64, polarity: Polarity) -> Trend {
    if previous == 0.0 {
        return Trend::flat();
    }

    let percent = round_to_one_decimal((current - previous) / previous * 100.0);
    Trend::from_percent(percent, polarity)
}

/// The percentage change in net savings from `previous` to `current`.
///
/// Divides by the magnitude of `previous`, so moving from a loss of 100 to a
/// loss of 50 is reported as +50%.
pub fn savings_change(current: f64, previous: f64) -> Trend {
    if previous == 0.0 {
        return Trend::flat();
    }

    let percent = round_to_one_decimal((current - previous) / previous.abs() * 100.0);
    Trend::from_percent(percent, Polarity::Ordinary)
}

/// Compares the summary metrics of the current and previous periods.
pub fn compare(current: &AggregateResult, previous: &AggregateResult) -> SummaryTrends {
    SummaryTrends {
        income: percent_change(
            current.total_income,
            previous.total_income,
            Polarity::Ordinary,
        ),
        expenses: percent_change(
            current.total_expenses,
            previous.total_expenses,
            Polarity::ExpenseLike,
        ),
        savings: savings_change(current.net_savings, previous.net_savings),
    }
}

/// Rounds half away from zero to one decimal place, avoiding "-0".
pub(crate) fn round_to_one_decimal(value: f64) -> f64 {
    let rounded = (value * 10.0).round() / 10.0;
    if rounded == 0.0 { 0.0 } else { rounded }
}

#[cfg(test)]
mod tests {
    use time::macros::date;

    use super::{
        Direction, Polarity, Sentiment, SummaryTrends, Trend, compare, percent_change,
        round_to_one_decimal, savings_change,
    };
    use crate::{dashboard::aggregation::aggregate, transaction::Transaction};

    #[test]
    fn income_increase_is_positive() {
        assert_eq!(
            percent_change(150.0, 100.0, Polarity::Ordinary),
            Trend {
                percent: 50.0,
                direction: Direction::Up,
                sentiment: Sentiment::Positive
            }
        );
    }

    #[test]
    fn spending_decrease_is_positive() {
        assert_eq!(
            percent_change(80.0, 100.0, Polarity::ExpenseLike),
            Trend {
                percent: -20.0,
                direction: Direction::Down,
                sentiment: Sentiment::Positive
            }
        );
    }

    #[test]
    fn spending_increase_is_negative() {
        let trend = percent_change(125.0, 100.0, Polarity::ExpenseLike);

        assert_eq!(trend.direction, Direction::Up);
        assert_eq!(trend.sentiment, Sentiment::Negative);
    }

    #[test]
    fn income_decrease_is_negative() {
        let trend = percent_change(90.0, 100.0, Polarity::Ordinary);

        assert_eq!(trend.percent, -10.0);
        assert_eq!(trend.direction, Direction::Down);
        assert_eq!(trend.sentiment, Sentiment::Negative);
    }

    #[test]
    fn zero_baseline_is_flat() {
        assert_eq!(percent_change(100.0, 0.0, Polarity::Ordinary), Trend::flat());
        assert_eq!(
            percent_change(100.0, 0.0, Polarity::ExpenseLike),
            Trend::flat()
        );
        assert_eq!(savings_change(-40.0, 0.0), Trend::flat());
    }

    #[test]
    fn no_change_is_flat_and_neutral() {
        let trend = percent_change(100.0, 100.0, Polarity::ExpenseLike);

        assert_eq!(trend, Trend::flat());
    }

    #[test]
    fn tiny_changes_round_to_flat() {
        let trend = percent_change(99.96, 100.0, Polarity::Ordinary);

        assert_eq!(trend, Trend::flat());
        assert!(trend.percent.is_sign_positive());
    }

    #[test]
    fn percent_rounds_half_away_from_zero() {
        assert_eq!(round_to_one_decimal(12.25), 12.3);
        assert_eq!(round_to_one_decimal(-12.25), -12.3);
        assert_eq!(round_to_one_decimal(33.333), 33.3);
        assert_eq!(round_to_one_decimal(-0.04), 0.0);
    }

    #[test]
    fn savings_change_divides_by_magnitude() {
        // Loss of 100 shrinking to a loss of 50 is an improvement.
        let trend = savings_change(-50.0, -100.0);
        assert_eq!(trend.percent, 50.0);
        assert_eq!(trend.direction, Direction::Up);
        assert_eq!(trend.sentiment, Sentiment::Positive);

        let trend = savings_change(-150.0, -100.0);
        assert_eq!(trend.percent, -50.0);
        assert_eq!(trend.sentiment, Sentiment::Negative);
    }

    #[test]
    fn label_shows_magnitude() {
        assert_eq!(percent_change(150.0, 100.0, Polarity::Ordinary).label(), "50%");
        assert_eq!(
            percent_change(87.5, 100.0, Polarity::ExpenseLike).label(),
            "12.5%"
        );
        assert_eq!(Trend::flat().label(), "0%");
    }

    #[test]
    fn compare_uses_expense_polarity_for_expenses() {
        let day = date!(2024 - 02 - 01);
        let previous = [
            Transaction::build(1000.0, day, "Acme Corp", "Salary"),
            Transaction::build(-400.0, day, "Landlord", "Rent"),
        ];
        let current = [
            Transaction::build(1100.0, day, "Acme Corp", "Salary"),
            Transaction::build(-300.0, day, "Landlord", "Rent"),
        ];

        let trends = compare(&aggregate(&current), &aggregate(&previous));

        assert_eq!(trends.income.percent, 10.0);
        assert_eq!(trends.income.sentiment, Sentiment::Positive);
        assert_eq!(trends.expenses.percent, -25.0);
        assert_eq!(trends.expenses.sentiment, Sentiment::Positive);
        // Savings went from 600 to 800.
        assert_eq!(trends.savings.percent, 33.3);
        assert_eq!(trends.savings.direction, Direction::Up);
    }

    #[test]
    fn compare_against_empty_previous_period_is_flat() {
        let current = [Transaction::build(
            -20.0,
            date!(2024 - 02 - 01),
            "Cafe",
            "Dining",
        )];
        let previous: [Transaction; 0] = [];

        let trends = compare(&aggregate(&current), &aggregate(&previous));

        assert_eq!(trends, SummaryTrends::flat());
    }

    #[test]
    fn serializes_enums_in_lowercase() {
        let json = serde_json::to_value(percent_change(80.0, 100.0, Polarity::ExpenseLike)).unwrap();

        assert_eq!(json["direction"], "down");
        assert_eq!(json["sentiment"], "positive");
    }
}
