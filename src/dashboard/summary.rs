//! Builds everything the dashboard displays for one selected time range.

use serde::Serialize;
use time::Date;

use crate::{
    Error,
    config::DashboardConfig,
    dashboard::{
        aggregation::{AggregateResult, aggregate},
        location::{LegendScale, LocationSpend, group_by_location, legend_scale},
        recent::recent_transactions,
        trend::{SummaryTrends, compare},
    },
    period::{
        PeriodWindow, RangeKey, derive_previous_period, previous_window, select_current_period,
    },
    store::TransactionStore,
    timezone::today_in,
    transaction::{Transaction, serialize_date},
};

/// All data needed to render the dashboard for one time range.
///
/// Built fresh for every change of range and borrowed from the store, so
/// there is no cached state to invalidate.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DashboardSummary<'a> {
    /// The selected range.
    pub range: RangeKey,
    /// The date the range was measured back from.
    #[serde(serialize_with = "serialize_date")]
    pub today: Date,
    /// The transactions in the selected range, in store order.
    pub current: Vec<&'a Transaction>,
    /// The window used for the trend comparison, `None` if `current` is empty.
    pub previous_window: Option<PeriodWindow>,
    /// The transactions in the previous window, taken from the full store.
    pub previous: Vec<&'a Transaction>,
    /// Summary metrics for the selected range.
    pub totals: AggregateResult,
    /// Summary metrics for the previous window.
    pub previous_totals: AggregateResult,
    /// How the selected range compares with the previous window.
    pub trends: SummaryTrends,
    /// The newest transactions in the selected range, newest first.
    pub recent: Vec<&'a Transaction>,
    /// Spending grouped by location for the map.
    pub locations: Vec<LocationSpend<'a>>,
    /// The map legend, `None` if no expenses have coordinates.
    pub legend: Option<LegendScale>,
}

impl<'a> DashboardSummary<'a> {
    /// Builds the dashboard data for `range` as seen from `today`.
    ///
    /// An empty range is not an error: the summary has zero totals, flat
    /// trends and no previous window, and [DashboardSummary::is_empty]
    /// returns `true`.
    pub fn build(
        store: &'a TransactionStore,
        range: RangeKey,
        today: Date,
        config: &DashboardConfig,
    ) -> Self {
        let all = store.transactions();

        let current = select_current_period(all, range, today);
        let window = previous_window(&current);
        let previous = derive_previous_period(all, &current);

        tracing::debug!(
            "Selected {} transactions for range {} (previous window {window:?} has {})",
            current.len(),
            range.as_query_value(),
            previous.len()
        );

        let totals = aggregate(current.iter().copied());
        let previous_totals = aggregate(previous.iter().copied());
        let trends = compare(&totals, &previous_totals);

        let recent =
            recent_transactions(current.iter().copied(), config.recent_transactions_limit);
        let locations =
            group_by_location(current.iter().copied(), config.location_recent_limit);
        let legend = legend_scale(&locations);

        Self {
            range,
            today,
            current,
            previous_window: window,
            previous,
            totals,
            previous_totals,
            trends,
            recent,
            locations,
            legend,
        }
    }

    /// Builds the dashboard data for `range` as seen from today's date in the
    /// configured timezone.
    ///
    /// # Errors
    /// Returns [Error::InvalidTimezone] if `config.local_timezone` is not a
    /// canonical timezone name.
    pub fn build_for_today(
        store: &'a TransactionStore,
        range: RangeKey,
        config: &DashboardConfig,
    ) -> Result<Self, Error> {
        let today = today_in(&config.local_timezone)?;

        Ok(Self::build(store, range, today, config))
    }

    /// Whether the selected range has no transactions.
    pub fn is_empty(&self) -> bool {
        self.current.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use time::{Duration, macros::date};

    use super::DashboardSummary;
    use crate::{
        Error,
        config::DashboardConfig,
        dashboard::{
            aggregation::NONE_LABEL,
            trend::{Direction, Sentiment, SummaryTrends},
        },
        period::{PeriodWindow, RangeKey},
        store::TransactionStore,
        transaction::{Location, Transaction},
    };

    const TODAY: time::Date = date!(2024 - 06 - 30);

    fn sf() -> Location {
        Location {
            lat: Some(37.77),
            lng: Some(-122.42),
            city: Some("San Francisco".to_owned()),
            state: Some("CA".to_owned()),
        }
    }

    fn create_test_store() -> TransactionStore {
        TransactionStore::new(vec![
            // Previous window for "1m" is 2024-05-02 up to 2024-06-01.
            Transaction::build(1000.0, date!(2024 - 05 - 05), "Acme Corp", "Salary"),
            Transaction::build(-200.0, date!(2024 - 05 - 10), "Landlord", "Rent"),
            // Current period for "1m" is 2024-05-30 onwards.
            Transaction::build(1200.0, date!(2024 - 06 - 01), "Acme Corp", "Salary"),
            Transaction::build(-150.0, date!(2024 - 06 - 05), "Landlord", "Rent").location(sf()),
            Transaction::build(-40.0, date!(2024 - 06 - 20), "Whole Foods", "Groceries")
                .location(sf()),
            Transaction::build(-30.0, date!(2024 - 07 - 01), "Whole Foods", "Groceries"),
        ])
    }

    #[test]
    fn builds_summary_for_last_month() {
        let store = create_test_store();
        let config = DashboardConfig::default();

        let summary = DashboardSummary::build(&store, RangeKey::OneMonth, TODAY, &config);

        assert!(!summary.is_empty());
        assert_eq!(summary.current.len(), 4);
        assert_eq!(summary.totals.total_income, 1200.0);
        assert_eq!(summary.totals.total_expenses, 220.0);
        assert_eq!(summary.totals.net_savings, 980.0);
        assert_eq!(summary.totals.top_category.category, "Rent");
        assert_eq!(summary.totals.top_merchant.merchant, "Landlord");
    }

    #[test]
    fn previous_period_mirrors_current_span() {
        let store = create_test_store();
        let config = DashboardConfig::default();

        let summary = DashboardSummary::build(&store, RangeKey::OneMonth, TODAY, &config);

        // Current spans 2024-06-01 to 2024-07-01, i.e. 30 days.
        assert_eq!(
            summary.previous_window,
            Some(PeriodWindow {
                start: date!(2024 - 06 - 01) - Duration::days(30),
                end: date!(2024 - 06 - 01),
            })
        );
        assert_eq!(summary.previous.len(), 2);
        assert_eq!(summary.previous_totals.total_income, 1000.0);
        assert_eq!(summary.previous_totals.total_expenses, 200.0);
    }

    #[test]
    fn trends_compare_with_previous_period() {
        let store = create_test_store();
        let config = DashboardConfig::default();

        let summary = DashboardSummary::build(&store, RangeKey::OneMonth, TODAY, &config);

        assert_eq!(summary.trends.income.percent, 20.0);
        assert_eq!(summary.trends.income.sentiment, Sentiment::Positive);
        assert_eq!(summary.trends.expenses.percent, 10.0);
        assert_eq!(summary.trends.expenses.direction, Direction::Up);
        assert_eq!(summary.trends.expenses.sentiment, Sentiment::Negative);
        // Savings went from 800 to 980.
        assert_eq!(summary.trends.savings.percent, 22.5);
    }

    #[test]
    fn recent_and_locations_use_current_period() {
        let store = create_test_store();
        let config = DashboardConfig {
            recent_transactions_limit: 2,
            location_recent_limit: 1,
            ..DashboardConfig::default()
        };

        let summary = DashboardSummary::build(&store, RangeKey::OneMonth, TODAY, &config);

        let recent: Vec<_> = summary.recent.iter().map(|t| t.date).collect();
        assert_eq!(recent, [date!(2024 - 07 - 01), date!(2024 - 06 - 20)]);

        assert_eq!(summary.locations.len(), 1);
        let location = &summary.locations[0];
        assert_eq!(location.total_amount, 190.0);
        assert_eq!(location.recent.len(), 1);
        assert_eq!(location.recent[0].merchant, "Whole Foods");
        assert_eq!(summary.legend.map(|scale| scale.max), Some(190.0));
    }

    #[test]
    fn empty_range_gives_empty_summary() {
        let store = TransactionStore::new(vec![Transaction::build(
            -10.0,
            date!(2020 - 01 - 01),
            "Cafe",
            "Dining",
        )]);
        let config = DashboardConfig::default();

        let summary = DashboardSummary::build(&store, RangeKey::OneMonth, TODAY, &config);

        assert!(summary.is_empty());
        assert_eq!(summary.previous_window, None);
        assert!(summary.previous.is_empty());
        assert_eq!(summary.totals.net_savings, 0.0);
        assert_eq!(summary.totals.top_category.category, NONE_LABEL);
        assert_eq!(summary.trends, SummaryTrends::flat());
        assert!(summary.recent.is_empty());
        assert!(summary.locations.is_empty());
        assert_eq!(summary.legend, None);
    }

    #[test]
    fn all_range_includes_everything() {
        let store = create_test_store();
        let config = DashboardConfig::default();

        let summary = DashboardSummary::build(&store, RangeKey::All, TODAY, &config);

        assert_eq!(summary.current.len(), store.len());
        // The span starts at the earliest transaction, so nothing precedes it.
        assert!(summary.previous.is_empty());
        assert_eq!(summary.trends, SummaryTrends::flat());
    }

    #[test]
    fn build_for_today_rejects_unknown_timezone() {
        let store = create_test_store();
        let config = DashboardConfig {
            local_timezone: "Nowhere/Special".to_owned(),
            ..DashboardConfig::default()
        };

        let result = DashboardSummary::build_for_today(&store, RangeKey::All, &config);

        assert_eq!(
            result,
            Err(Error::InvalidTimezone("Nowhere/Special".to_owned()))
        );
    }

    #[test]
    fn build_for_today_uses_configured_timezone() {
        let store = create_test_store();
        let config = DashboardConfig::default();

        let summary = DashboardSummary::build_for_today(&store, RangeKey::All, &config).unwrap();

        assert_eq!(summary.current.len(), store.len());
    }

    #[test]
    fn serializes_to_json_for_renderers() {
        let store = create_test_store();
        let config = DashboardConfig::default();

        let summary = DashboardSummary::build(&store, RangeKey::OneMonth, TODAY, &config);
        let json = serde_json::to_value(&summary).unwrap();

        assert_eq!(json["range"], "1m");
        assert_eq!(json["today"], "2024-06-30");
        assert_eq!(json["previous_window"]["end"], "2024-06-01");
        assert_eq!(json["totals"]["top_category"]["category"], "Rent");
        assert_eq!(json["trends"]["expenses"]["sentiment"], "negative");
        assert_eq!(json["recent"][0]["date"], "2024-07-01");
    }
}
