//! Append-only log of redistribution events

use std::path::PathBuf;

use crate::error::DayBudgetResult;
use crate::models::{MonthPeriod, RedistributionEvent, UserId};

use super::file_io::{append_jsonl, read_jsonl};

/// JSONL file of [`RedistributionEvent`]s
pub struct RedistributionLog {
    path: PathBuf,
}

impl RedistributionLog {
    pub fn new(path: PathBuf) -> Self {
        Self { path }
    }

    pub fn append(&self, events: &[RedistributionEvent]) -> DayBudgetResult<()> {
        append_jsonl(&self.path, events)
    }

    pub fn read_all(&self) -> DayBudgetResult<Vec<RedistributionEvent>> {
        read_jsonl(&self.path)
    }

    /// Events for one user-month, in the order they were written
    pub fn for_period(
        &self,
        user_id: UserId,
        period: MonthPeriod,
    ) -> DayBudgetResult<Vec<RedistributionEvent>> {
        Ok(self
            .read_all()?
            .into_iter()
            .filter(|e| e.user_id == user_id && e.period == period)
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Category, EventId, Money, RedistributionOutcome};
    use chrono::Utc;
    use tempfile::TempDir;

    fn event(user_id: UserId, period: MonthPeriod) -> RedistributionEvent {
        RedistributionEvent {
            id: EventId::new(),
            user_id,
            period,
            category: Category::Coffee,
            triggered_on: period.start_date(),
            triggered_at: Utc::now(),
            variance: Money::zero(),
            planned_to_date: Money::zero(),
            spent_to_date: Money::zero(),
            previous_remaining: Money::from_cents(1_000),
            new_remaining: Money::from_cents(1_000),
            deltas: Vec::new(),
            outcome: RedistributionOutcome::Redistributed,
        }
    }

    #[test]
    fn test_filter_by_period() {
        let temp_dir = TempDir::new().unwrap();
        let log = RedistributionLog::new(temp_dir.path().join("redistribution.log"));
        let user = UserId::new();
        let jan = MonthPeriod::new(2025, 1).unwrap();

        log.append(&[event(user, jan), event(user, jan.next())]).unwrap();
        log.append(&[event(UserId::new(), jan)]).unwrap();

        assert_eq!(log.read_all().unwrap().len(), 3);
        assert_eq!(log.for_period(user, jan).unwrap().len(), 1);
    }
}
