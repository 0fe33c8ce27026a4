//! Calendar of daily planned and spent amounts
//!
//! A [`MonthCalendar`] holds one [`CalendarDay`] per date of a month. The
//! same typed records flow from the builder through storage into the
//! redistributor.

use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};

use super::{Category, CategoryKind, Money, MonthPeriod, UserId};
use crate::error::{DayBudgetError, DayBudgetResult};

/// Planned and spent amounts for one user-date
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CalendarDay {
    pub date: NaiveDate,

    /// Planned amount per category
    #[serde(default)]
    pub planned: BTreeMap<Category, Money>,

    /// Recorded spend per category
    #[serde(default)]
    pub spent: BTreeMap<Category, Money>,

    /// Sum of planned amounts across categories
    #[serde(default)]
    pub total: Money,
}

impl CalendarDay {
    /// An empty day with nothing planned or spent
    pub fn new(date: NaiveDate) -> Self {
        Self {
            date,
            planned: BTreeMap::new(),
            spent: BTreeMap::new(),
            total: Money::zero(),
        }
    }

    /// Day of month (1-based)
    pub fn day(&self) -> u32 {
        self.date.day()
    }

    pub fn planned_for(&self, category: Category) -> Money {
        self.planned.get(&category).copied().unwrap_or_default()
    }

    pub fn spent_for(&self, category: Category) -> Money {
        self.spent.get(&category).copied().unwrap_or_default()
    }

    /// Overwrite the planned amount for a category and refresh the total
    pub fn set_planned(&mut self, category: Category, amount: Money) {
        self.planned.insert(category, amount);
        self.recompute_total();
    }

    /// Add to the planned amount for a category and refresh the total
    pub fn add_planned(&mut self, category: Category, amount: Money) {
        *self.planned.entry(category).or_default() += amount;
        self.recompute_total();
    }

    /// Increment recorded spend for a category
    pub fn add_spent(&mut self, category: Category, amount: Money) {
        *self.spent.entry(category).or_default() += amount;
    }

    /// Total recorded spend across categories
    pub fn spent_total(&self) -> Money {
        self.spent.values().sum()
    }

    pub fn recompute_total(&mut self) {
        self.total = self.planned.values().sum();
    }
}

/// The full calendar of one user-month
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MonthCalendar {
    pub user_id: UserId,

    pub period: MonthPeriod,

    /// Days in date order; index = day of month - 1
    pub days: Vec<CalendarDay>,

    /// Whether each planned category is anchored or spread
    pub kinds: BTreeMap<Category, CategoryKind>,

    /// Monthly total each category was planned with
    pub monthly_totals: BTreeMap<Category, Money>,

    /// Categories redistributed down to zero for the rest of the month
    #[serde(default)]
    pub exhausted: BTreeSet<Category>,
}

impl MonthCalendar {
    pub fn num_days(&self) -> usize {
        self.days.len()
    }

    /// Look up the day for a date in this month
    pub fn day(&self, date: NaiveDate) -> Option<&CalendarDay> {
        if !self.period.contains(date) {
            return None;
        }
        self.days.get(date.day() as usize - 1)
    }

    pub fn day_mut(&mut self, date: NaiveDate) -> Option<&mut CalendarDay> {
        if !self.period.contains(date) {
            return None;
        }
        self.days.get_mut(date.day() as usize - 1)
    }

    /// Categories with a plan in this calendar, in category order
    pub fn categories(&self) -> impl Iterator<Item = Category> + '_ {
        self.kinds.keys().copied()
    }

    pub fn kind_of(&self, category: Category) -> Option<CategoryKind> {
        self.kinds.get(&category).copied()
    }

    pub fn monthly_total(&self, category: Category) -> Money {
        self.monthly_totals.get(&category).copied().unwrap_or_default()
    }

    pub fn is_exhausted(&self, category: Category) -> bool {
        self.exhausted.contains(&category)
    }

    /// Sum of planned amounts for a category over the whole month
    pub fn planned_total(&self, category: Category) -> Money {
        self.days.iter().map(|d| d.planned_for(category)).sum()
    }

    /// Sum of recorded spend for a category over the whole month
    pub fn spent_total(&self, category: Category) -> Money {
        self.days.iter().map(|d| d.spent_for(category)).sum()
    }

    /// Sum of planned amounts for a category on days before `date`
    pub fn planned_before(&self, category: Category, date: NaiveDate) -> Money {
        self.days
            .iter()
            .filter(|d| d.date < date)
            .map(|d| d.planned_for(category))
            .sum()
    }

    /// Sum of recorded spend for a category on days before `date`
    pub fn spent_before(&self, category: Category, date: NaiveDate) -> Money {
        self.days
            .iter()
            .filter(|d| d.date < date)
            .map(|d| d.spent_for(category))
            .sum()
    }

    /// Per-category recorded spend on days before `date`
    pub fn spent_to_date(&self, date: NaiveDate) -> BTreeMap<Category, Money> {
        self.categories()
            .map(|c| (c, self.spent_before(c, date)))
            .collect()
    }

    /// Record spend against a day of this month
    pub fn record_spend(
        &mut self,
        date: NaiveDate,
        category: Category,
        amount: Money,
    ) -> DayBudgetResult<()> {
        if amount.is_negative() {
            return Err(DayBudgetError::Validation(format!(
                "spend amount must not be negative (got {})",
                amount
            )));
        }
        let period = self.period;
        let day = self.day_mut(date).ok_or_else(|| {
            DayBudgetError::Validation(format!("{} is not in calendar month {}", date, period))
        })?;
        day.add_spent(category, amount);
        Ok(())
    }
}
