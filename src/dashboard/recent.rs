//! The recent transactions list.

use crate::transaction::Transaction;

/// The newest `limit` transactions, newest first.
///
/// Transactions on the same date keep their original relative order.
pub fn recent_transactions<'a>(
    transactions: impl IntoIterator<Item = &'a Transaction>,
    limit: usize,
) -> Vec<&'a Transaction> {
    let mut sorted: Vec<&Transaction> = transactions.into_iter().collect();
    sorted.sort_by(|a, b| b.date.cmp(&a.date));
    sorted.truncate(limit);
    sorted
}
