//! Calendar month representation
//!
//! A plan and its calendar always cover exactly one calendar month.

use chrono::{Datelike, Duration, NaiveDate};
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::error::{DayBudgetError, DayBudgetResult};

/// Earliest supported year
pub const MIN_YEAR: i32 = 1970;
/// Latest supported year
pub const MAX_YEAR: i32 = 2199;

/// A calendar month (e.g., "2025-01")
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct MonthPeriod {
    year: i32,
    month: u32,
}

impl MonthPeriod {
    /// Create a month period, validating the supported range
    pub fn new(year: i32, month: u32) -> DayBudgetResult<Self> {
        if !(1..=12).contains(&month) {
            return Err(DayBudgetError::InvalidCalendarPeriod(format!(
                "month {} is not between 1 and 12",
                month
            )));
        }
        if !(MIN_YEAR..=MAX_YEAR).contains(&year) {
            return Err(DayBudgetError::InvalidCalendarPeriod(format!(
                "year {} is outside {}..={}",
                year, MIN_YEAR, MAX_YEAR
            )));
        }
        Ok(Self { year, month })
    }

    /// The month containing the given date
    pub fn containing(date: NaiveDate) -> DayBudgetResult<Self> {
        Self::new(date.year(), date.month())
    }

    /// The current local month
    pub fn current() -> DayBudgetResult<Self> {
        Self::containing(chrono::Local::now().date_naive())
    }

    pub fn year(&self) -> i32 {
        self.year
    }

    pub fn month(&self) -> u32 {
        self.month
    }

    /// First day of the month
    pub fn start_date(&self) -> NaiveDate {
        NaiveDate::from_ymd_opt(self.year, self.month, 1).unwrap_or(NaiveDate::MIN)
    }

    /// Last day of the month (inclusive)
    pub fn end_date(&self) -> NaiveDate {
        self.next().start_date() - Duration::days(1)
    }

    /// Number of days in the month
    pub fn num_days(&self) -> u32 {
        self.end_date().day()
    }

    /// The date for a 1-based day of the month, if it exists
    pub fn date_of(&self, day: u32) -> Option<NaiveDate> {
        NaiveDate::from_ymd_opt(self.year, self.month, day)
    }

    /// Check if a date falls within this month
    pub fn contains(&self, date: NaiveDate) -> bool {
        date.year() == self.year && date.month() == self.month
    }

    /// Get the next month
    pub fn next(&self) -> Self {
        if self.month == 12 {
            Self {
                year: self.year + 1,
                month: 1,
            }
        } else {
            Self {
                year: self.year,
                month: self.month + 1,
            }
        }
    }

    /// Get the previous month
    pub fn prev(&self) -> Self {
        if self.month == 1 {
            Self {
                year: self.year - 1,
                month: 12,
            }
        } else {
            Self {
                year: self.year,
                month: self.month - 1,
            }
        }
    }

    /// Parse a "YYYY-MM" string
    pub fn parse(s: &str) -> DayBudgetResult<Self> {
        let s = s.trim();
        let parts: Vec<&str> = s.split('-').collect();
        if parts.len() != 2 {
            return Err(DayBudgetError::InvalidCalendarPeriod(format!(
                "expected YYYY-MM, got '{}'",
                s
            )));
        }

        let year: i32 = parts[0].parse().map_err(|_| {
            DayBudgetError::InvalidCalendarPeriod(format!("invalid year in '{}'", s))
        })?;
        let month: u32 = parts[1].parse().map_err(|_| {
            DayBudgetError::InvalidCalendarPeriod(format!("invalid month in '{}'", s))
        })?;

        Self::new(year, month)
    }
}

impl fmt::Display for MonthPeriod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:04}-{:02}", self.year, self.month)
    }
}
