//! Calendar building
//!
//! Turns a [`MonthlyBudgetPlan`] into a day-by-day [`MonthCalendar`]:
//! fixed expenses land in full on their due day, discretionary amounts are
//! spread evenly with remainder cents going to the first days of the month.

use std::collections::{BTreeMap, BTreeSet};

use tracing::debug;

use crate::error::{DayBudgetError, DayBudgetResult};
use crate::models::{
    CalendarDay, Category, CategoryKind, Money, MonthCalendar, MonthPeriod, MonthlyBudgetPlan,
    UserId,
};

/// Due day used when a fixed expense has no hint
pub const DEFAULT_DUE_DAY: u32 = 1;

/// Builds month calendars from plans
#[derive(Debug, Clone, Copy, Default)]
pub struct CalendarBuilder;

impl CalendarBuilder {
    pub fn new() -> Self {
        Self
    }

    /// Build a fresh calendar with nothing spent
    pub fn build(
        &self,
        user_id: UserId,
        plan: &MonthlyBudgetPlan,
        period: MonthPeriod,
        due_days: &BTreeMap<Category, u32>,
    ) -> DayBudgetResult<MonthCalendar> {
        let num_days = period.num_days();
        if !(28..=31).contains(&num_days) {
            return Err(DayBudgetError::InvalidCalendarPeriod(format!(
                "{} has {} days",
                period, num_days
            )));
        }

        let mut days = Vec::with_capacity(num_days as usize);
        for day in 1..=num_days {
            let date = period.date_of(day).ok_or_else(|| {
                DayBudgetError::InvalidCalendarPeriod(format!("{} has no day {}", period, day))
            })?;
            days.push(CalendarDay::new(date));
        }

        let mut kinds = BTreeMap::new();
        let mut monthly_totals = BTreeMap::new();

        for (category, amount) in &plan.fixed_expenses {
            let due = due_days.get(category).copied().unwrap_or(DEFAULT_DUE_DAY);
            if due == 0 {
                return Err(DayBudgetError::Validation(format!(
                    "due day for '{}' must be between 1 and 31",
                    category
                )));
            }
            let index = due.min(num_days) as usize - 1;
            days[index].add_planned(*category, *amount);

            kinds.insert(*category, CategoryKind::Fixed);
            monthly_totals.insert(*category, *amount);
        }

        for (category, amount) in &plan.discretionary_breakdown {
            for (day, share) in days.iter_mut().zip(amount.split_evenly(num_days as usize)) {
                day.add_planned(*category, share);
            }

            kinds.insert(*category, CategoryKind::Discretionary);
            monthly_totals.insert(*category, *amount);
        }

        for day in &mut days {
            day.recompute_total();
        }

        debug!(%period, categories = kinds.len(), "built calendar");

        Ok(MonthCalendar {
            user_id,
            period,
            days,
            kinds,
            monthly_totals,
            exhausted: BTreeSet::new(),
        })
    }

    /// Regenerate planned amounts for an existing calendar
    ///
    /// Every recorded spend is carried over. Exhausted flags are cleared
    /// because the monthly totals have been recomputed.
    pub fn rebuild(
        &self,
        existing: &MonthCalendar,
        plan: &MonthlyBudgetPlan,
        due_days: &BTreeMap<Category, u32>,
    ) -> DayBudgetResult<MonthCalendar> {
        let mut calendar = self.build(existing.user_id, plan, existing.period, due_days)?;

        for (fresh, old) in calendar.days.iter_mut().zip(&existing.days) {
            fresh.spent = old.spent.clone();
        }

        let carried: Money = calendar.days.iter().map(|d| d.spent_total()).sum();
        debug!(period = %calendar.period, spent = %carried, "rebuilt calendar, kept spend");
        Ok(calendar)
    }
}
