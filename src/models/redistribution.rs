//! Redistribution events
//!
//! One event per category per redistribution run. Events are an
//! append-only audit trail used to explain why planned amounts moved; they
//! are never replayed to rebuild a calendar.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

use super::{Category, EventId, Money, MonthPeriod, UserId};

/// What a redistribution run did to a category
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RedistributionOutcome {
    /// Remaining days were re-spread
    Redistributed,
    /// Overspending drove every remaining day to zero
    Exhausted,
    /// No remaining days; variance recorded only
    TrueUp,
}

impl fmt::Display for RedistributionOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RedistributionOutcome::Redistributed => write!(f, "redistributed"),
            RedistributionOutcome::Exhausted => write!(f, "exhausted"),
            RedistributionOutcome::TrueUp => write!(f, "true-up"),
        }
    }
}

/// Change applied to one remaining day
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DayDelta {
    pub date: NaiveDate,
    pub delta: Money,
}

/// Record of one redistribution run for one category
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RedistributionEvent {
    pub id: EventId,
    pub user_id: UserId,
    pub period: MonthPeriod,
    pub category: Category,

    /// The day the run was triggered for
    pub triggered_on: NaiveDate,

    /// Wall-clock time of the run
    pub triggered_at: DateTime<Utc>,

    /// Planned-to-date minus spent-to-date; positive means underspent
    pub variance: Money,

    pub planned_to_date: Money,
    pub spent_to_date: Money,

    /// Planned total over the remaining days before the run
    pub previous_remaining: Money,

    /// Planned total over the remaining days after the run
    pub new_remaining: Money,

    /// Non-zero per-day changes, in date order
    pub deltas: Vec<DayDelta>,

    pub outcome: RedistributionOutcome,
}

impl RedistributionEvent {
    /// Net change applied across all remaining days
    pub fn net_delta(&self) -> Money {
        self.deltas.iter().map(|d| d.delta).sum()
    }

    /// One-line human-readable summary
    pub fn summary(&self) -> String {
        format!(
            "[{}] {} {} on {}: variance {}, remaining {} -> {} ({} days changed)",
            self.triggered_at.format("%Y-%m-%d %H:%M:%S UTC"),
            self.category,
            self.outcome,
            self.triggered_on,
            self.variance,
            self.previous_remaining,
            self.new_remaining,
            self.deltas.len()
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_net_delta_and_summary() {
        let date = NaiveDate::from_ymd_opt(2025, 1, 11).unwrap();
        let event = RedistributionEvent {
            id: EventId::new(),
            user_id: UserId::new(),
            period: MonthPeriod::new(2025, 1).unwrap(),
            category: Category::DiningOut,
            triggered_on: date,
            triggered_at: Utc::now(),
            variance: Money::from_cents(-10_000),
            planned_to_date: Money::from_cents(30_000),
            spent_to_date: Money::from_cents(40_000),
            previous_remaining: Money::from_cents(60_000),
            new_remaining: Money::from_cents(50_000),
            deltas: vec![
                DayDelta {
                    date,
                    delta: Money::from_cents(-500),
                },
                DayDelta {
                    date: date.succ_opt().unwrap(),
                    delta: Money::from_cents(-500),
                },
            ],
            outcome: RedistributionOutcome::Redistributed,
        };

        assert_eq!(event.net_delta().cents(), -1000);
        let summary = event.summary();
        assert!(summary.contains("dining_out redistributed"));
        assert!(summary.contains("variance -100.00"));
    }
}
