//! CLI command handlers
//!
//! This module contains the implementation of CLI commands,
//! bridging the clap argument parsing with the service layer.

pub mod history;
pub mod plan;
pub mod spend;

pub use history::{handle_history_command, HistoryCommands};
pub use plan::{handle_adjust_command, handle_calendar_command, handle_plan_command};
pub use spend::{handle_events_command, handle_redistribute_command, handle_spend_command};

use chrono::NaiveDate;

use crate::error::{DayBudgetError, DayBudgetResult};
use crate::models::MonthPeriod;

/// Parse a `YYYY-MM-DD` date, defaulting to the local date
pub fn parse_date_or_today(date: Option<&str>) -> DayBudgetResult<NaiveDate> {
    match date {
        Some(s) => NaiveDate::parse_from_str(s, "%Y-%m-%d").map_err(|_| {
            DayBudgetError::Validation(format!("Invalid date '{}', expected YYYY-MM-DD", s))
        }),
        None => Ok(chrono::Local::now().date_naive()),
    }
}

/// Parse a `YYYY-MM` month, defaulting to the month containing `today`
pub fn parse_month_or(month: Option<&str>, today: NaiveDate) -> DayBudgetResult<MonthPeriod> {
    match month {
        Some(s) => MonthPeriod::parse(s),
        None => MonthPeriod::containing(today),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_helpers() {
        let today = NaiveDate::from_ymd_opt(2025, 4, 11).unwrap();
        assert_eq!(
            parse_month_or(None, today).unwrap(),
            MonthPeriod::new(2025, 4).unwrap()
        );
        assert_eq!(
            parse_month_or(Some("2025-02"), today).unwrap(),
            MonthPeriod::new(2025, 2).unwrap()
        );
        assert_eq!(
            parse_date_or_today(Some("2025-04-05")).unwrap().to_string(),
            "2025-04-05"
        );
        assert!(parse_date_or_today(Some("April 5")).is_err());
    }
}
