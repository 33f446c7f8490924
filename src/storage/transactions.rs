//! Transaction repository for JSON storage
//!
//! Manages loading and saving one user's transactions to transactions.json

use std::collections::HashMap;
use std::path::PathBuf;
use std::sync::RwLock;

use chrono::NaiveDate;

use crate::error::SpendwiseError;
use crate::models::{Category, Transaction, TransactionId};

use super::file_io::{read_json, write_json_atomic};
use super::{read_lock_err, write_lock_err};

/// Serializable transaction data structure
#[derive(Debug, Clone, Default, serde::Serialize, serde::Deserialize)]
struct TransactionData {
    transactions: Vec<Transaction>,
}

/// Repository for transaction persistence with a category index
pub struct TransactionRepository {
    path: PathBuf,
    data: RwLock<HashMap<TransactionId, Transaction>>,
    /// Index: lowercased category name -> transaction ids
    by_category: RwLock<HashMap<String, Vec<TransactionId>>>,
}

fn category_key(category: &Category) -> String {
    category.name().to_lowercase()
}

/// Newest first; ties broken by creation time
fn sort_newest_first(transactions: &mut [Transaction]) {
    transactions.sort_by(|a, b| b.date.cmp(&a.date).then(b.created_at.cmp(&a.created_at)));
}

impl TransactionRepository {
    pub fn new(path: PathBuf) -> Self {
        Self {
            path,
            data: RwLock::new(HashMap::new()),
            by_category: RwLock::new(HashMap::new()),
        }
    }

    /// Load transactions from disk and build the index
    pub fn load(&self) -> Result<(), SpendwiseError> {
        let file_data: TransactionData = read_json(&self.path)?;

        let mut data = self.data.write().map_err(write_lock_err)?;
        let mut by_category = self.by_category.write().map_err(write_lock_err)?;

        data.clear();
        by_category.clear();

        for txn in file_data.transactions {
            by_category
                .entry(category_key(&txn.category))
                .or_default()
                .push(txn.id);
            data.insert(txn.id, txn);
        }

        Ok(())
    }

    /// Save transactions to disk
    pub fn save(&self) -> Result<(), SpendwiseError> {
        let data = self.data.read().map_err(read_lock_err)?;

        let mut transactions: Vec<_> = data.values().cloned().collect();
        sort_newest_first(&mut transactions);

        write_json_atomic(&self.path, &TransactionData { transactions })
    }

    pub fn get(&self, id: TransactionId) -> Result<Option<Transaction>, SpendwiseError> {
        let data = self.data.read().map_err(read_lock_err)?;
        Ok(data.get(&id).cloned())
    }

    /// Get all transactions, newest first
    pub fn get_all(&self) -> Result<Vec<Transaction>, SpendwiseError> {
        let data = self.data.read().map_err(read_lock_err)?;

        let mut transactions: Vec<_> = data.values().cloned().collect();
        sort_newest_first(&mut transactions);
        Ok(transactions)
    }

    /// Get transactions for a category (case-insensitive), newest first
    pub fn get_by_category(&self, category: &Category) -> Result<Vec<Transaction>, SpendwiseError> {
        let data = self.data.read().map_err(read_lock_err)?;
        let by_category = self.by_category.read().map_err(read_lock_err)?;

        let ids = by_category
            .get(&category_key(category))
            .map(|v| v.as_slice())
            .unwrap_or(&[]);
        let mut transactions: Vec<_> = ids.iter().filter_map(|id| data.get(id).cloned()).collect();
        sort_newest_first(&mut transactions);
        Ok(transactions)
    }

    /// Get transactions with `start <= date <= end`, newest first
    pub fn get_by_date_range(
        &self,
        start: NaiveDate,
        end: NaiveDate,
    ) -> Result<Vec<Transaction>, SpendwiseError> {
        let all = self.get_all()?;
        Ok(all
            .into_iter()
            .filter(|t| t.date >= start && t.date <= end)
            .collect())
    }

    /// Find a transaction by full or short ID
    pub fn find(&self, identifier: &str) -> Result<Option<Transaction>, SpendwiseError> {
        let data = self.data.read().map_err(read_lock_err)?;
        let mut matches = data.values().filter(|t| t.id.matches(identifier));
        let first = matches.next().cloned();
        if matches.next().is_some() {
            return Err(SpendwiseError::Validation(format!(
                "Transaction ID '{}' is ambiguous; use more characters",
                identifier
            )));
        }
        Ok(first)
    }

    /// Insert or update a transaction
    pub fn upsert(&self, txn: Transaction) -> Result<(), SpendwiseError> {
        let mut data = self.data.write().map_err(write_lock_err)?;
        let mut by_category = self.by_category.write().map_err(write_lock_err)?;

        if let Some(old) = data.get(&txn.id) {
            if let Some(ids) = by_category.get_mut(&category_key(&old.category)) {
                ids.retain(|&id| id != txn.id);
            }
        }

        by_category
            .entry(category_key(&txn.category))
            .or_default()
            .push(txn.id);
        data.insert(txn.id, txn);
        Ok(())
    }

    /// Delete a transaction, returning it if it existed
    pub fn delete(&self, id: TransactionId) -> Result<Option<Transaction>, SpendwiseError> {
        let mut data = self.data.write().map_err(write_lock_err)?;
        let mut by_category = self.by_category.write().map_err(write_lock_err)?;

        let removed = data.remove(&id);
        if let Some(txn) = &removed {
            if let Some(ids) = by_category.get_mut(&category_key(&txn.category)) {
                ids.retain(|&tid| tid != id);
            }
        }
        Ok(removed)
    }

    /// Drop every transaction from memory (call `save` to persist)
    pub fn clear(&self) -> Result<(), SpendwiseError> {
        self.data.write().map_err(write_lock_err)?.clear();
        self.by_category.write().map_err(write_lock_err)?.clear();
        Ok(())
    }

    pub fn count(&self) -> Result<usize, SpendwiseError> {
        let data = self.data.read().map_err(read_lock_err)?;
        Ok(data.len())
    }

    /// Whether any transaction uses `category`
    pub fn category_in_use(&self, category: &Category) -> Result<bool, SpendwiseError> {
        let by_category = self.by_category.read().map_err(read_lock_err)?;
        Ok(by_category
            .get(&category_key(category))
            .is_some_and(|ids| !ids.is_empty()))
    }
}
