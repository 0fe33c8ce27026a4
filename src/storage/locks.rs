//! Keyed locks for redistribution
//!
//! Redistribution of one `(user, category, month)` is a read-compute-write
//! cycle; holding the key's lock for the whole cycle serializes runs for
//! the same key while runs for other keys proceed in parallel.

use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use crate::error::{DayBudgetError, DayBudgetResult};
use crate::models::{Category, MonthPeriod, UserId};

/// Identifies one redistribution stream
pub type RedistributionKey = (UserId, Category, MonthPeriod);

/// Registry of per-key mutexes
#[derive(Debug, Default)]
pub struct RedistributionLocks {
    locks: Mutex<HashMap<RedistributionKey, Arc<Mutex<()>>>>,
}

impl RedistributionLocks {
    pub fn new() -> Self {
        Self::default()
    }

    /// Run `f` while holding the lock for `key`
    pub fn with_lock<F, R>(&self, key: RedistributionKey, f: F) -> DayBudgetResult<R>
    where
        F: FnOnce() -> DayBudgetResult<R>,
    {
        let lock = {
            let mut locks = self.locks.lock().map_err(|e| {
                DayBudgetError::Storage(format!("Failed to acquire lock registry: {}", e))
            })?;
            Arc::clone(locks.entry(key).or_default())
        };

        let _guard = lock.lock().map_err(|e| {
            DayBudgetError::Storage(format!(
                "Failed to acquire redistribution lock for {} {} {}: {}",
                key.0, key.1, key.2, e
            ))
        })?;
        f()
    }

    /// Number of keys seen so far
    pub fn len(&self) -> usize {
        self.locks.lock().map(|l| l.len()).unwrap_or(0)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
