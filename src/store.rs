//! The in-memory, read-only collection of every loaded transaction.

use std::{fs, path::Path};

use serde::Deserialize;
use serde_json::Value;

use crate::{Error, config::InvalidRecordPolicy, transaction::Transaction};

/// The accepted shapes of a transaction document.
///
/// Records stay as raw JSON values so that one malformed record is handled
/// by the invalid record policy instead of failing the whole document.
#[derive(Deserialize)]
#[serde(untagged)]
enum TransactionDocument {
    /// `[...]`
    Bare(Vec<Value>),
    /// `{"transactions": [...]}`
    Wrapped { transactions: Vec<Value> },
}

impl TransactionDocument {
    fn into_records(self) -> Vec<Value> {
        match self {
            TransactionDocument::Bare(transactions) => transactions,
            TransactionDocument::Wrapped { transactions } => transactions,
        }
    }
}

/// Holds every transaction loaded for the session.
///
/// The transactions are never modified after loading. Filtering borrows from
/// the store, so the full list is always available for finding the previous
/// period.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TransactionStore {
    transactions: Vec<Transaction>,
    rejected: usize,
}

impl TransactionStore {
    /// Create a store from transactions that have already been validated.
    pub fn new(transactions: Vec<Transaction>) -> Self {
        Self {
            transactions,
            rejected: 0,
        }
    }

    /// Parse a transaction document.
    ///
    /// `text` may be either `{"transactions": [...]}` or a bare array of
    /// transactions. Records that fail validation are handled according to
    /// `policy`.
    ///
    /// # Errors
    /// Returns:
    /// - [Error::InvalidJson] if `text` is not a transaction document, i.e.
    ///   neither an array nor an object with a `transactions` array,
    /// - the first record's validation error if `policy` is
    ///   [InvalidRecordPolicy::Reject].
    pub fn from_json(text: &str, policy: InvalidRecordPolicy) -> Result<Self, Error> {
        let document: TransactionDocument = serde_json::from_str(text)?;
        let records = document.into_records();

        let mut transactions = Vec::with_capacity(records.len());
        let mut rejected = 0;

        for (index, record) in records.into_iter().enumerate() {
            match Transaction::from_value(index, record) {
                Ok(transaction) => transactions.push(transaction),
                Err(error) => match policy {
                    InvalidRecordPolicy::Skip => {
                        tracing::warn!("Skipping invalid transaction record: {error}");
                        rejected += 1;
                    }
                    InvalidRecordPolicy::Reject => {
                        tracing::error!("Rejecting transaction data: {error}");
                        return Err(error);
                    }
                },
            }
        }

        tracing::debug!(
            "Loaded {} transactions ({rejected} rejected)",
            transactions.len()
        );

        Ok(Self {
            transactions,
            rejected,
        })
    }

    /// Read and parse the transaction document at `path`.
    ///
    /// # Errors
    /// Returns [Error::ReadFile] if the file cannot be read, otherwise the
    /// same errors as [TransactionStore::from_json].
    pub fn load(path: impl AsRef<Path>, policy: InvalidRecordPolicy) -> Result<Self, Error> {
        let path = path.as_ref();
        let text = fs::read_to_string(path)
            .inspect_err(|error| {
                tracing::error!("Error reading transaction data from {path:?}: {error}")
            })
            .map_err(|error| Error::ReadFile(path.display().to_string(), error.to_string()))?;

        Self::from_json(&text, policy)
    }

    /// All transactions in the order they were loaded.
    pub fn transactions(&self) -> &[Transaction] {
        &self.transactions
    }

    /// The number of records dropped while loading.
    pub fn rejected(&self) -> usize {
        self.rejected
    }

    /// The number of loaded transactions.
    pub fn len(&self) -> usize {
        self.transactions.len()
    }

    /// Whether no transactions were loaded.
    pub fn is_empty(&self) -> bool {
        self.transactions.is_empty()
    }
}
