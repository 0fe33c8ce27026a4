//! Transaction repository for JSON storage
//!
//! Manages loading and saving transactions to transactions.json, with a
//! per-user index for history queries.

use std::collections::HashMap;
use std::path::PathBuf;
use std::sync::RwLock;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::error::{DayBudgetError, DayBudgetResult};
use crate::models::{Category, Transaction, TransactionId, UserId};

use super::file_io::{read_json, write_json_atomic};

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
struct TransactionData {
    transactions: Vec<Transaction>,
}

/// Filter for transaction history queries
#[derive(Debug, Clone, Copy)]
pub struct TransactionQuery {
    pub user_id: UserId,
    pub category: Option<Category>,
    /// Inclusive
    pub start: Option<NaiveDate>,
    /// Inclusive
    pub end: Option<NaiveDate>,
}

impl TransactionQuery {
    pub fn for_user(user_id: UserId) -> Self {
        Self {
            user_id,
            category: None,
            start: None,
            end: None,
        }
    }

    pub fn category(mut self, category: Category) -> Self {
        self.category = Some(category);
        self
    }

    pub fn between(mut self, start: NaiveDate, end: NaiveDate) -> Self {
        self.start = Some(start);
        self.end = Some(end);
        self
    }

    fn matches(&self, txn: &Transaction) -> bool {
        txn.user_id == self.user_id
            && self.category.map_or(true, |c| txn.category == c)
            && self.start.map_or(true, |s| txn.date >= s)
            && self.end.map_or(true, |e| txn.date <= e)
    }
}

/// Repository for transaction persistence
pub struct TransactionRepository {
    path: PathBuf,
    data: RwLock<HashMap<TransactionId, Transaction>>,
    /// Index: user_id -> transaction_ids
    by_user: RwLock<HashMap<UserId, Vec<TransactionId>>>,
}

impl TransactionRepository {
    pub fn new(path: PathBuf) -> Self {
        Self {
            path,
            data: RwLock::new(HashMap::new()),
            by_user: RwLock::new(HashMap::new()),
        }
    }

    /// Load transactions from disk and build the index
    pub fn load(&self) -> DayBudgetResult<()> {
        let file_data: TransactionData = read_json(&self.path)?;

        let mut data = self.data.write().map_err(|e| {
            DayBudgetError::Storage(format!("Failed to acquire write lock: {}", e))
        })?;
        let mut by_user = self.by_user.write().map_err(|e| {
            DayBudgetError::Storage(format!("Failed to acquire write lock: {}", e))
        })?;

        data.clear();
        by_user.clear();

        for txn in file_data.transactions {
            by_user.entry(txn.user_id).or_default().push(txn.id);
            data.insert(txn.id, txn);
        }

        Ok(())
    }

    /// Save transactions to disk, oldest first
    pub fn save(&self) -> DayBudgetResult<()> {
        let data = self.data.read().map_err(|e| {
            DayBudgetError::Storage(format!("Failed to acquire read lock: {}", e))
        })?;

        let mut transactions: Vec<_> = data.values().cloned().collect();
        sort_chronological(&mut transactions);

        write_json_atomic(&self.path, &TransactionData { transactions })
    }

    pub fn get(&self, id: TransactionId) -> DayBudgetResult<Option<Transaction>> {
        let data = self.data.read().map_err(|e| {
            DayBudgetError::Storage(format!("Failed to acquire read lock: {}", e))
        })?;

        Ok(data.get(&id).cloned())
    }

    /// Transactions matching a query, oldest first
    pub fn query(&self, query: &TransactionQuery) -> DayBudgetResult<Vec<Transaction>> {
        let data = self.data.read().map_err(|e| {
            DayBudgetError::Storage(format!("Failed to acquire read lock: {}", e))
        })?;
        let by_user = self.by_user.read().map_err(|e| {
            DayBudgetError::Storage(format!("Failed to acquire read lock: {}", e))
        })?;

        let ids = by_user
            .get(&query.user_id)
            .map(|v| v.as_slice())
            .unwrap_or(&[]);
        let mut transactions: Vec<_> = ids
            .iter()
            .filter_map(|id| data.get(id))
            .filter(|txn| query.matches(txn))
            .cloned()
            .collect();
        sort_chronological(&mut transactions);
        Ok(transactions)
    }

    /// Insert a batch of new transactions
    pub fn insert_many(&self, transactions: Vec<Transaction>) -> DayBudgetResult<usize> {
        let mut data = self.data.write().map_err(|e| {
            DayBudgetError::Storage(format!("Failed to acquire write lock: {}", e))
        })?;
        let mut by_user = self.by_user.write().map_err(|e| {
            DayBudgetError::Storage(format!("Failed to acquire write lock: {}", e))
        })?;

        let mut inserted = 0;
        for txn in transactions {
            if data.contains_key(&txn.id) {
                continue;
            }
            by_user.entry(txn.user_id).or_default().push(txn.id);
            data.insert(txn.id, txn);
            inserted += 1;
        }
        Ok(inserted)
    }

    pub fn insert(&self, txn: Transaction) -> DayBudgetResult<()> {
        self.insert_many(vec![txn]).map(|_| ())
    }

    pub fn count(&self) -> DayBudgetResult<usize> {
        let data = self.data.read().map_err(|e| {
            DayBudgetError::Storage(format!("Failed to acquire read lock: {}", e))
        })?;
        Ok(data.len())
    }
}

fn sort_chronological(transactions: &mut [Transaction]) {
    transactions.sort_by(|a, b| {
        a.date
            .cmp(&b.date)
            .then(a.created_at.cmp(&b.created_at))
            .then(a.id.cmp(&b.id))
    });
}
