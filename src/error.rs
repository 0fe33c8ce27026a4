//! Custom error types for daybudget
//!
//! This module defines the error hierarchy for the engine and its storage
//! layer using thiserror for ergonomic error definitions.
//!
//! Over-commitment (fixed expenses plus savings exceeding income) is not an
//! error: it is reported as a flag on the computed plan.

use chrono::NaiveDate;
use thiserror::Error;

/// The main error type for daybudget operations
#[derive(Error, Debug)]
pub enum DayBudgetError {
    /// Income was negative or not a finite number
    #[error("Invalid income: {0}")]
    InvalidIncome(String),

    /// A declared spending frequency was negative or not finite
    #[error("Invalid frequency for '{category}': {reason}")]
    InvalidFrequency { category: String, reason: String },

    /// Month, year, or month length outside the supported range
    #[error("Invalid calendar period: {0}")]
    InvalidCalendarPeriod(String),

    /// Redistribution requested for a date outside the calendar's month
    #[error("Redistribution date {date} is outside the plan month {period}")]
    OutOfRangeRedistribution { date: NaiveDate, period: String },

    /// Configuration-related errors
    #[error("Configuration error: {0}")]
    Config(String),

    /// File I/O errors
    #[error("I/O error: {0}")]
    Io(String),

    /// JSON serialization/deserialization errors
    #[error("JSON error: {0}")]
    Json(String),

    /// Validation errors for inputs and data models
    #[error("Validation error: {0}")]
    Validation(String),

    /// Entity not found errors
    #[error("{entity_type} not found: {identifier}")]
    NotFound {
        entity_type: &'static str,
        identifier: String,
    },

    /// Storage errors
    #[error("Storage error: {0}")]
    Storage(String),

    /// Import errors
    #[error("Import error: {0}")]
    Import(String),
}

impl DayBudgetError {
    /// Create an invalid frequency error for a category
    pub fn invalid_frequency(category: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::InvalidFrequency {
            category: category.into(),
            reason: reason.into(),
        }
    }

    /// Create a "not found" error for a persisted calendar
    pub fn calendar_not_found(identifier: impl Into<String>) -> Self {
        Self::NotFound {
            entity_type: "Calendar",
            identifier: identifier.into(),
        }
    }

    /// Create a "not found" error for a persisted plan
    pub fn plan_not_found(identifier: impl Into<String>) -> Self {
        Self::NotFound {
            entity_type: "Plan",
            identifier: identifier.into(),
        }
    }

    /// Check if this is a "not found" error
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound { .. })
    }

    /// Check if this is a validation error of any kind
    pub fn is_validation(&self) -> bool {
        matches!(
            self,
            Self::Validation(_)
                | Self::InvalidIncome(_)
                | Self::InvalidFrequency { .. }
                | Self::InvalidCalendarPeriod(_)
                | Self::OutOfRangeRedistribution { .. }
        )
    }
}

impl From<std::io::Error> for DayBudgetError {
    fn from(err: std::io::Error) -> Self {
        Self::Io(err.to_string())
    }
}

impl From<serde_json::Error> for DayBudgetError {
    fn from(err: serde_json::Error) -> Self {
        Self::Json(err.to_string())
    }
}

/// Result type alias for daybudget operations
pub type DayBudgetResult<T> = Result<T, DayBudgetError>;
