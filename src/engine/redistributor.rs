//! Mid-month redistribution
//!
//! When actual spend drifts from plan, the unspent (or overspent) part of a
//! discretionary category's monthly total is re-spread across the days
//! that are still open. Closed days are never rewritten.
//!
//! Spent-to-date always runs through today, so a spend recorded today
//! counts in the redistribution it triggers. Today itself stays open for
//! re-planning unless `close_today` is set.
//!
//! The new remaining total is anchored to the category's original monthly
//! total: `max(0, monthly_total - spent_to_date)`. Running the
//! redistributor twice on the same data yields the same calendar.

use std::collections::BTreeMap;

use chrono::{Duration, NaiveDate, Utc};
use tracing::{debug, info};

use crate::error::{DayBudgetError, DayBudgetResult};
use crate::models::{
    Category, CategoryKind, DayDelta, EventId, Money, MonthCalendar, RedistributionEvent,
    RedistributionOutcome,
};

/// Re-spreads discretionary categories over the open days of a month
#[derive(Debug, Clone, Copy, Default)]
pub struct Redistributor {
    close_today: bool,
}

impl Redistributor {
    /// `close_today` treats today as already closed: only later days are
    /// re-planned
    pub fn new(close_today: bool) -> Self {
        Self { close_today }
    }

    pub fn close_today(&self) -> bool {
        self.close_today
    }

    /// First date still open for re-planning
    pub fn cutoff(&self, today: NaiveDate) -> NaiveDate {
        if self.close_today {
            today + Duration::days(1)
        } else {
            today
        }
    }

    /// Spend per category through `today`, read from the calendar itself
    pub fn spent_to_date(
        &self,
        calendar: &MonthCalendar,
        today: NaiveDate,
    ) -> BTreeMap<Category, Money> {
        calendar.spent_to_date(today + Duration::days(1))
    }

    /// Spend on one category through `today`
    pub fn spent_on(&self, calendar: &MonthCalendar, category: Category, today: NaiveDate) -> Money {
        calendar.spent_before(category, today + Duration::days(1))
    }

    /// Redistribute every discretionary category that is not exhausted
    pub fn redistribute(
        &self,
        calendar: &mut MonthCalendar,
        today: NaiveDate,
        spent_to_date: &BTreeMap<Category, Money>,
    ) -> DayBudgetResult<Vec<RedistributionEvent>> {
        check_in_month(calendar, today)?;

        let categories: Vec<Category> = calendar.categories().collect();
        let mut events = Vec::new();
        for category in categories {
            let spent = spent_to_date.get(&category).copied().unwrap_or_default();
            if let Some(event) = self.redistribute_category(calendar, category, today, spent)? {
                events.push(event);
            }
        }
        Ok(events)
    }

    /// Redistribute a single category
    ///
    /// Returns `None` for fixed, exhausted, or unknown categories.
    pub fn redistribute_category(
        &self,
        calendar: &mut MonthCalendar,
        category: Category,
        today: NaiveDate,
        spent_to_date: Money,
    ) -> DayBudgetResult<Option<RedistributionEvent>> {
        check_in_month(calendar, today)?;

        match calendar.kind_of(category) {
            Some(CategoryKind::Discretionary) => {}
            Some(CategoryKind::Fixed) => {
                debug!(%category, "fixed category is anchored to its due day, skipping");
                return Ok(None);
            }
            None => {
                debug!(%category, "category is not planned this month, skipping");
                return Ok(None);
            }
        }
        if calendar.is_exhausted(category) {
            debug!(%category, "category already exhausted this month, skipping");
            return Ok(None);
        }

        let cutoff = self.cutoff(today);
        let planned_to_date = calendar.planned_before(category, cutoff);
        let variance = planned_to_date - spent_to_date;

        let open: Vec<usize> = calendar
            .days
            .iter()
            .enumerate()
            .filter(|(_, d)| d.date >= cutoff)
            .map(|(i, _)| i)
            .collect();
        let previous_remaining: Money = open
            .iter()
            .map(|i| calendar.days[*i].planned_for(category))
            .sum();

        let mut event = RedistributionEvent {
            id: EventId::new(),
            user_id: calendar.user_id,
            period: calendar.period,
            category,
            triggered_on: today,
            triggered_at: Utc::now(),
            variance,
            planned_to_date,
            spent_to_date,
            previous_remaining,
            new_remaining: previous_remaining,
            deltas: Vec::new(),
            outcome: RedistributionOutcome::TrueUp,
        };

        if open.is_empty() {
            info!(%category, %variance, "no open days left, recording true-up");
            return Ok(Some(event));
        }

        let new_remaining = (calendar.monthly_total(category) - spent_to_date).clamp_non_negative();
        let shares = new_remaining.split_evenly(open.len());

        for (index, share) in open.iter().zip(shares) {
            let day = &mut calendar.days[*index];
            let before = day.planned_for(category);
            if before != share {
                day.set_planned(category, share);
                event.deltas.push(DayDelta {
                    date: day.date,
                    delta: share - before,
                });
            }
        }

        event.new_remaining = new_remaining;
        event.outcome = if variance.is_negative() && new_remaining.is_zero() {
            calendar.exhausted.insert(category);
            RedistributionOutcome::Exhausted
        } else {
            RedistributionOutcome::Redistributed
        };

        info!(
            %category,
            %variance,
            previous = %previous_remaining,
            new = %new_remaining,
            outcome = %event.outcome,
            "redistributed category"
        );
        Ok(Some(event))
    }
}

fn check_in_month(calendar: &MonthCalendar, date: NaiveDate) -> DayBudgetResult<()> {
    if !calendar.period.contains(date) {
        return Err(DayBudgetError::OutOfRangeRedistribution {
            date,
            period: calendar.period.to_string(),
        });
    }
    Ok(())
}
