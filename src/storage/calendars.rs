//! Calendar repository for JSON storage
//!
//! One calendar per user-month. Read-modify-write goes through
//! [`CalendarRepository::update`], which holds the write lock for the
//! whole closure so concurrent writers cannot interleave.

use std::collections::HashMap;
use std::path::PathBuf;
use std::sync::RwLock;

use serde::{Deserialize, Serialize};

use crate::error::{DayBudgetError, DayBudgetResult};
use crate::models::{MonthCalendar, MonthPeriod, UserId};

use super::file_io::{read_json, write_json_atomic};

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
struct CalendarData {
    calendars: Vec<MonthCalendar>,
}

/// Repository for calendar persistence
pub struct CalendarRepository {
    path: PathBuf,
    data: RwLock<HashMap<(UserId, MonthPeriod), MonthCalendar>>,
}

impl CalendarRepository {
    pub fn new(path: PathBuf) -> Self {
        Self {
            path,
            data: RwLock::new(HashMap::new()),
        }
    }

    /// Load calendars from disk
    pub fn load(&self) -> DayBudgetResult<()> {
        let file_data: CalendarData = read_json(&self.path)?;

        let mut data = self.data.write().map_err(|e| {
            DayBudgetError::Storage(format!("Failed to acquire write lock: {}", e))
        })?;

        data.clear();
        for calendar in file_data.calendars {
            data.insert((calendar.user_id, calendar.period), calendar);
        }

        Ok(())
    }

    /// Save calendars to disk
    pub fn save(&self) -> DayBudgetResult<()> {
        let data = self.data.read().map_err(|e| {
            DayBudgetError::Storage(format!("Failed to acquire read lock: {}", e))
        })?;

        let mut calendars: Vec<MonthCalendar> = data.values().cloned().collect();
        calendars.sort_by_key(|c| (c.user_id, c.period));

        write_json_atomic(&self.path, &CalendarData { calendars })
    }

    pub fn get(&self, user_id: UserId, period: MonthPeriod) -> DayBudgetResult<Option<MonthCalendar>> {
        let data = self.data.read().map_err(|e| {
            DayBudgetError::Storage(format!("Failed to acquire read lock: {}", e))
        })?;

        Ok(data.get(&(user_id, period)).cloned())
    }

    /// Get a calendar, or a not-found error
    pub fn get_required(&self, user_id: UserId, period: MonthPeriod) -> DayBudgetResult<MonthCalendar> {
        self.get(user_id, period)?
            .ok_or_else(|| DayBudgetError::calendar_not_found(format!("{}:{}", user_id, period)))
    }

    /// Insert or replace a calendar
    pub fn upsert(&self, calendar: MonthCalendar) -> DayBudgetResult<()> {
        let mut data = self.data.write().map_err(|e| {
            DayBudgetError::Storage(format!("Failed to acquire write lock: {}", e))
        })?;

        data.insert((calendar.user_id, calendar.period), calendar);
        Ok(())
    }

    /// Apply a change to a stored calendar atomically
    ///
    /// The closure works on a copy; the copy replaces the stored calendar
    /// only if the closure succeeds.
    pub fn update<F, R>(&self, user_id: UserId, period: MonthPeriod, f: F) -> DayBudgetResult<R>
    where
        F: FnOnce(&mut MonthCalendar) -> DayBudgetResult<R>,
    {
        let mut data = self.data.write().map_err(|e| {
            DayBudgetError::Storage(format!("Failed to acquire write lock: {}", e))
        })?;

        let stored = data
            .get(&(user_id, period))
            .ok_or_else(|| DayBudgetError::calendar_not_found(format!("{}:{}", user_id, period)))?;

        let mut working = stored.clone();
        let result = f(&mut working)?;
        data.insert((user_id, period), working);
        Ok(result)
    }

    /// Replace a calendar with one derived from the stored version (if
    /// any), under a single write lock
    pub fn replace_with<F>(&self, user_id: UserId, period: MonthPeriod, f: F) -> DayBudgetResult<MonthCalendar>
    where
        F: FnOnce(Option<&MonthCalendar>) -> DayBudgetResult<MonthCalendar>,
    {
        let mut data = self.data.write().map_err(|e| {
            DayBudgetError::Storage(format!("Failed to acquire write lock: {}", e))
        })?;

        let calendar = f(data.get(&(user_id, period)))?;
        data.insert((user_id, period), calendar.clone());
        Ok(calendar)
    }
}
