//! Transaction data aggregation for the summary cards and charts.
//!
//! Provides a single pass over a list of transactions that totals income and
//! expenses, groups expenses by category and merchant, and picks the top
//! category and merchant. Chart tooltips use [CategoryTotal::top_merchants]
//! and [share_of_expenses].

use std::{cmp::Ordering, collections::HashMap};

use serde::Serialize;

use crate::{dashboard::trend::round_to_one_decimal, transaction::Transaction};

/// The name shown for the top category or merchant when there are no expenses.
pub const NONE_LABEL: &str = "None";

/// The total amount spent in one category.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CategoryTotal {
    /// The category name.
    pub category: String,
    /// The summed absolute amount of the category's expenses.
    pub amount: f64,
    /// The spending at each merchant within the category, in the order first seen.
    pub merchants: Vec<TopMerchant>,
}

impl CategoryTotal {
    fn empty(category: &str) -> Self {
        Self {
            category: category.to_owned(),
            amount: 0.0,
            merchants: Vec::new(),
        }
    }

    /// The `n` merchants with the most spending in this category, largest first.
    ///
    /// Merchants with equal amounts keep the order they first appeared in.
    pub fn top_merchants(&self, n: usize) -> Vec<&TopMerchant> {
        let mut ranked: Vec<_> = self.merchants.iter().collect();
        ranked.sort_by(|a, b| descending(a.amount, b.amount));
        ranked.truncate(n);
        ranked
    }
}

/// The spending at one merchant.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MerchantTotal {
    /// The merchant name.
    pub merchant: String,
    /// The number of expenses at the merchant.
    pub count: usize,
    /// The summed absolute amount of the merchant's expenses.
    pub total_amount: f64,
    /// The distinct categories of the merchant's expenses, in the order first seen.
    pub categories: Vec<String>,
}

/// A merchant and the amount spent there.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TopMerchant {
    /// The merchant name.
    pub merchant: String,
    /// The summed absolute amount of the merchant's expenses.
    pub amount: f64,
}

/// Summary metrics for a list of transactions.
///
/// Category and merchant totals are only built from expenses and are listed in
/// the order each key first appears in the input.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AggregateResult {
    /// The sum of all positive amounts.
    pub total_income: f64,
    /// The sum of the absolute values of all negative amounts.
    pub total_expenses: f64,
    /// `total_income - total_expenses`, negative when more was spent than earned.
    pub net_savings: f64,
    /// The number of transactions aggregated, including zero amounts.
    pub transaction_count: usize,
    /// The number of transactions with a positive amount.
    pub income_count: usize,
    /// The number of transactions with a negative amount.
    pub expense_count: usize,
    /// Expenses per category.
    pub category_totals: Vec<CategoryTotal>,
    /// Expenses per merchant.
    pub merchant_totals: Vec<MerchantTotal>,
    /// The category with the largest total, or [NONE_LABEL] with zero.
    pub top_category: CategoryTotal,
    /// The merchant with the largest total, or [NONE_LABEL] with zero.
    pub top_merchant: TopMerchant,
}

impl AggregateResult {
    /// Whether no transactions were aggregated.
    pub fn is_empty(&self) -> bool {
        self.transaction_count == 0
    }

    /// The total spent in `category`, if it has any expenses.
    pub fn category_total(&self, category: &str) -> Option<f64> {
        self.category_totals
            .iter()
            .find(|total| total.category == category)
            .map(|total| total.amount)
    }

    /// The spending at `merchant`, if it has any expenses.
    pub fn merchant_total(&self, merchant: &str) -> Option<&MerchantTotal> {
        self.merchant_totals
            .iter()
            .find(|total| total.merchant == merchant)
    }

    /// Categories sorted by amount, largest first.
    ///
    /// Categories with equal amounts keep the order they first appeared in.
    pub fn categories_by_amount(&self) -> Vec<&CategoryTotal> {
        let mut ranked: Vec<_> = self.category_totals.iter().collect();
        ranked.sort_by(|a, b| descending(a.amount, b.amount));
        ranked
    }

    /// The `n` merchants with the most spending in `category`, largest first.
    ///
    /// Empty if the category has no expenses.
    pub fn top_merchants_for(&self, category: &str, n: usize) -> Vec<&TopMerchant> {
        self.category_totals
            .iter()
            .find(|total| total.category == category)
            .map(|total| total.top_merchants(n))
            .unwrap_or_default()
    }

    /// The percentage of total expenses that `amount` makes up.
    ///
    /// See [share_of_expenses].
    pub fn share_of_expenses(&self, amount: f64) -> f64 {
        share_of_expenses(amount, self.total_expenses)
    }

    /// Merchants sorted by total amount, largest first.
    ///
    /// Merchants with equal amounts keep the order they first appeared in.
    pub fn merchants_by_amount(&self) -> Vec<&MerchantTotal> {
        let mut ranked: Vec<_> = self.merchant_totals.iter().collect();
        ranked.sort_by(|a, b| descending(a.total_amount, b.total_amount));
        ranked
    }
}

/// Aggregates `transactions` into summary metrics.
///
/// Amounts greater than zero count as income, amounts less than zero count as
/// expenses and zero amounts count as neither. Never fails: an empty input
/// gives zero totals, no groups and [NONE_LABEL] for the top category and
/// merchant.
pub fn aggregate<'a, I>(transactions: I) -> AggregateResult
where
    I: IntoIterator<Item = &'a Transaction>,
{
    let mut total_income = 0.0;
    let mut total_expenses = 0.0;
    let mut transaction_count = 0;
    let mut income_count = 0;
    let mut expense_count = 0;

    let mut category_totals: Vec<CategoryTotal> = Vec::new();
    let mut category_index: HashMap<&str, usize> = HashMap::new();
    let mut merchant_totals: Vec<MerchantTotal> = Vec::new();
    let mut merchant_index: HashMap<&str, usize> = HashMap::new();

    for transaction in transactions {
        transaction_count += 1;

        if transaction.is_income() {
            income_count += 1;
            total_income += transaction.amount;
            continue;
        }

        if !transaction.is_expense() {
            continue;
        }

        let amount = transaction.amount.abs();
        expense_count += 1;
        total_expenses += amount;

        let category = &transaction.category;
        let merchant = &transaction.merchant;

        let index = *category_index.entry(category.as_str()).or_insert_with(|| {
            category_totals.push(CategoryTotal::empty(category));
            category_totals.len() - 1
        });
        let category_total = &mut category_totals[index];
        category_total.amount += amount;
        match category_total
            .merchants
            .iter_mut()
            .find(|total| &total.merchant == merchant)
        {
            Some(total) => total.amount += amount,
            None => category_total.merchants.push(TopMerchant {
                merchant: merchant.clone(),
                amount,
            }),
        }

        let index = *merchant_index.entry(merchant.as_str()).or_insert_with(|| {
            merchant_totals.push(MerchantTotal {
                merchant: merchant.clone(),
                count: 0,
                total_amount: 0.0,
                categories: Vec::new(),
            });
            merchant_totals.len() - 1
        });
        let merchant_total = &mut merchant_totals[index];
        merchant_total.count += 1;
        merchant_total.total_amount += amount;
        if !merchant_total.categories.contains(category) {
            merchant_total.categories.push(category.clone());
        }
    }

    let top_category = find_top(category_totals.iter().map(|total| total.amount))
        .map(|index| category_totals[index].clone())
        .unwrap_or_else(|| CategoryTotal::empty(NONE_LABEL));

    let top_merchant = find_top(merchant_totals.iter().map(|total| total.total_amount))
        .map(|index| TopMerchant {
            merchant: merchant_totals[index].merchant.clone(),
            amount: merchant_totals[index].total_amount,
        })
        .unwrap_or_else(|| TopMerchant {
            merchant: NONE_LABEL.to_owned(),
            amount: 0.0,
        });

    AggregateResult {
        total_income,
        total_expenses,
        net_savings: total_income - total_expenses,
        transaction_count,
        income_count,
        expense_count,
        category_totals,
        merchant_totals,
        top_category,
        top_merchant,
    }
}

/// The percentage of `total_expenses` that `amount` makes up, rounded to one
/// decimal place.
///
/// Returns zero when `total_expenses` is zero.
pub fn share_of_expenses(amount: f64, total_expenses: f64) -> f64 {
    if total_expenses == 0.0 {
        0.0
    } else {
        round_to_one_decimal(amount / total_expenses * 100.0)
    }
}

/// The index of the largest amount, scanning in order.
///
/// Only a strictly greater amount replaces the running maximum, so the first
/// entry to reach the maximum wins ties. Entries must beat zero to count.
fn find_top(amounts: impl Iterator<Item = f64>) -> Option<usize> {
    let mut top: Option<(usize, f64)> = None;

    for (index, amount) in amounts.enumerate() {
        let current_max = top.map(|(_, max)| max).unwrap_or(0.0);

        if amount > current_max {
            top = Some((index, amount));
        }
    }

    top.map(|(index, _)| index)
}

fn descending(a: f64, b: f64) -> Ordering {
    b.partial_cmp(&a).unwrap_or(Ordering::Equal)
}
