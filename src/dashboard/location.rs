//! Groups spending by location for the spending map.
//!
//! Only expenses with both coordinates count. Transactions without
//! geographic data are ignored rather than treated as errors.

use std::{cmp::Ordering, collections::HashMap};

use serde::Serialize;

use crate::{dashboard::recent::recent_transactions, transaction::Transaction};

/// The spending at one pair of coordinates.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LocationSpend<'a> {
    /// Latitude in degrees.
    pub lat: f64,
    /// Longitude in degrees.
    pub lng: f64,
    /// The city of the first transaction seen at this location.
    pub city: Option<String>,
    /// The state of the first transaction seen at this location.
    pub state: Option<String>,
    /// The summed absolute amount of the expenses at this location.
    pub total_amount: f64,
    /// The expenses at this location in input order.
    pub transactions: Vec<&'a Transaction>,
    /// The newest expenses at this location, newest first.
    pub recent: Vec<&'a Transaction>,
}

impl LocationSpend<'_> {
    /// A label such as "San Francisco, CA".
    pub fn label(&self) -> String {
        match (&self.city, &self.state) {
            (Some(city), Some(state)) => format!("{city}, {state}"),
            (Some(place), None) | (None, Some(place)) => place.clone(),
            (None, None) => format!("{:.4}, {:.4}", self.lat, self.lng),
        }
    }
}

/// The amounts shown on the spending map's legend.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct LegendScale {
    /// The smallest location total.
    pub min: f64,
    /// The median location total.
    pub median: f64,
    /// The largest location total.
    pub max: f64,
}

/// Groups expenses by exact `(lat, lng)`, in the order each location first appears.
///
/// Each group lists at most `recent_limit` of its newest expenses in
/// [LocationSpend::recent].
pub fn group_by_location<'a>(
    transactions: impl IntoIterator<Item = &'a Transaction>,
    recent_limit: usize,
) -> Vec<LocationSpend<'a>> {
    let mut groups: Vec<LocationSpend<'a>> = Vec::new();
    let mut index_by_key: HashMap<(u64, u64), usize> = HashMap::new();

    for transaction in transactions {
        if !transaction.is_expense() {
            continue;
        }

        let Some(location) = &transaction.location else {
            continue;
        };
        let Some((lat, lng)) = location.coordinates() else {
            continue;
        };

        // Adding zero folds -0.0 into 0.0 so both land in the same group.
        let key = ((lat + 0.0).to_bits(), (lng + 0.0).to_bits());
        let index = *index_by_key.entry(key).or_insert_with(|| {
            groups.push(LocationSpend {
                lat,
                lng,
                city: location.city.clone(),
                state: location.state.clone(),
                total_amount: 0.0,
                transactions: Vec::new(),
                recent: Vec::new(),
            });
            groups.len() - 1
        });

        let group = &mut groups[index];
        group.total_amount += transaction.amount.abs();
        group.transactions.push(transaction);
    }

    for group in &mut groups {
        group.recent = recent_transactions(group.transactions.iter().copied(), recent_limit);
    }

    groups
}

/// The min, median and max location totals, or `None` when there are no locations.
///
/// The median of an even number of totals is the mean of the middle two.
pub fn legend_scale(groups: &[LocationSpend]) -> Option<LegendScale> {
    let mut totals: Vec<f64> = groups.iter().map(|group| group.total_amount).collect();
    totals.sort_by(|a, b| a.partial_cmp(b).unwrap_or(Ordering::Equal));

    let min = *totals.first()?;
    let max = *totals.last()?;
    let middle = totals.len() / 2;
    let median = if totals.len() % 2 == 0 {
        (totals[middle - 1] + totals[middle]) / 2.0
    } else {
        totals[middle]
    };

    Some(LegendScale { min, median, max })
}
