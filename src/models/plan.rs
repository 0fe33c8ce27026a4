//! Monthly budget plan
//!
//! The output of the category allocator. A plan is created once per
//! onboarding or recompute event and superseded, never mutated.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use super::{Category, CategoryWeightMap, IncomeTier, Money};

/// Where the discretionary weights of a plan came from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WeightSource {
    /// Proportional to the user's declared spending frequencies
    DeclaredFrequencies,
    /// Declared frequencies adjusted from transaction history
    BehaviorAdjusted,
    /// All frequencies were zero; the income tier's default split was used
    TierDefaults,
    /// No discretionary categories were declared; everything went to "other"
    CatchAll,
    /// Nothing to distribute
    Empty,
}

/// Monthly budget plan for one user-month
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MonthlyBudgetPlan {
    /// Monthly income plus any additional income
    pub total_income: Money,

    /// Fixed obligations per category
    pub fixed_expenses: BTreeMap<Category, Money>,

    pub fixed_total: Money,

    pub savings_goal: Money,

    /// Income left after fixed expenses and savings, never negative
    pub discretionary_total: Money,

    /// Planned monthly amount per discretionary category
    pub discretionary_breakdown: BTreeMap<Category, Money>,

    /// Weights the breakdown was computed from
    pub weights: CategoryWeightMap,

    pub weight_source: WeightSource,

    /// Income tier used for fallback defaults
    pub user_class: IncomeTier,

    /// Fixed expenses plus savings exceed income
    pub over_committed: bool,
}

impl MonthlyBudgetPlan {
    /// Planned monthly amount for a category (fixed or discretionary)
    pub fn amount_for(&self, category: Category) -> Money {
        self.fixed_expenses
            .get(&category)
            .or_else(|| self.discretionary_breakdown.get(&category))
            .copied()
            .unwrap_or_default()
    }

    /// Sum of the discretionary breakdown
    pub fn discretionary_allocated(&self) -> Money {
        self.discretionary_breakdown.values().sum()
    }

    /// Fixed + savings + discretionary reconcile exactly with income.
    ///
    /// Always true for plans that are not over-committed.
    pub fn is_balanced(&self) -> bool {
        self.fixed_total + self.savings_goal + self.discretionary_allocated() == self.total_income
    }

    /// Amount by which fixed expenses and savings exceed income
    pub fn shortfall(&self) -> Money {
        (self.fixed_total + self.savings_goal - self.total_income).clamp_non_negative()
    }
}
