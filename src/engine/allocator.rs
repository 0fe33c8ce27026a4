//! Category allocation
//!
//! Splits a monthly income into fixed obligations, savings, and a
//! discretionary pool, then divides the pool across discretionary
//! categories by declared spending frequency.
//!
//! The allocator is exact in cents: after rounding each category's share,
//! the leftover drift is reconciled onto the largest-weight category so the
//! breakdown always sums to the discretionary total.

use std::collections::BTreeMap;

use tracing::{debug, warn};

use crate::config::RegionProfiles;
use crate::error::{DayBudgetError, DayBudgetResult};
use crate::models::{
    AllocationInput, Category, CategoryWeightMap, IncomeTier, Money, MonthlyBudgetPlan,
    WeightSource,
};

/// Allocates income across categories
#[derive(Debug, Clone, Default)]
pub struct CategoryAllocator {
    profiles: RegionProfiles,
}

impl CategoryAllocator {
    pub fn new(profiles: RegionProfiles) -> Self {
        Self { profiles }
    }

    /// Compute a monthly plan
    ///
    /// `adjusted` is a behavior-adjusted weight map; when given (and
    /// normalized) it replaces the weights derived from frequencies or
    /// tier defaults.
    pub fn allocate(
        &self,
        input: &AllocationInput,
        tier: IncomeTier,
        adjusted: Option<&CategoryWeightMap>,
    ) -> DayBudgetResult<MonthlyBudgetPlan> {
        validate(input)?;

        let fixed_total: Money = input.fixed_expenses.values().sum();
        let remaining = input.income - fixed_total - input.savings_goal;
        let over_committed = remaining.is_negative();
        let discretionary_total = remaining.clamp_non_negative();

        if over_committed {
            warn!(
                income = %input.income,
                fixed = %fixed_total,
                savings = %input.savings_goal,
                "fixed expenses and savings exceed income"
            );
        }

        let (mut weights, mut weight_source) =
            self.base_weights(input, tier, discretionary_total);

        if let Some(adjusted) = adjusted {
            if adjusted.is_normalized() && !weights.is_empty() {
                weights = adjusted.clone();
                weight_source = WeightSource::BehaviorAdjusted;
            } else {
                warn!("ignoring behavior-adjusted weights that are empty or not normalized");
            }
        }

        let discretionary_breakdown = split_by_weight(discretionary_total, &weights);

        debug!(
            %discretionary_total,
            categories = discretionary_breakdown.len(),
            source = ?weight_source,
            "allocated discretionary pool"
        );

        Ok(MonthlyBudgetPlan {
            total_income: input.income,
            fixed_expenses: input.fixed_expenses.clone(),
            fixed_total,
            savings_goal: input.savings_goal,
            discretionary_total,
            discretionary_breakdown,
            weights,
            weight_source,
            user_class: tier,
            over_committed,
        })
    }

    fn base_weights(
        &self,
        input: &AllocationInput,
        tier: IncomeTier,
        discretionary_total: Money,
    ) -> (CategoryWeightMap, WeightSource) {
        if input.frequencies.is_empty() {
            if discretionary_total.is_zero() {
                return (CategoryWeightMap::new(), WeightSource::Empty);
            }
            return (
                [(Category::Other, 1.0)].into_iter().collect(),
                WeightSource::CatchAll,
            );
        }

        let rates = input
            .frequencies
            .iter()
            .map(|(category, frequency)| (*category, frequency.monthly_rate()));

        match CategoryWeightMap::from_scores(rates) {
            Some(weights) => (weights, WeightSource::DeclaredFrequencies),
            None => {
                let table = self.profiles.get(input.region.as_deref()).defaults_for(tier);
                let weights = table
                    .restricted_to(input.frequencies.keys().copied())
                    .unwrap_or(table);
                warn!(%tier, "all declared frequencies are zero, using tier default weights");
                (weights, WeightSource::TierDefaults)
            }
        }
    }
}

fn validate(input: &AllocationInput) -> DayBudgetResult<()> {
    if input.income.is_negative() {
        return Err(DayBudgetError::InvalidIncome(format!(
            "income must not be negative (got {})",
            input.income
        )));
    }
    for (category, amount) in &input.fixed_expenses {
        if amount.is_negative() {
            return Err(DayBudgetError::Validation(format!(
                "fixed expense '{}' must not be negative (got {})",
                category, amount
            )));
        }
        if input.frequencies.contains_key(category) {
            return Err(DayBudgetError::Validation(format!(
                "category '{}' cannot be both fixed and discretionary",
                category
            )));
        }
    }
    if input.savings_goal.is_negative() {
        return Err(DayBudgetError::Validation(format!(
            "savings goal must not be negative (got {})",
            input.savings_goal
        )));
    }
    for (category, frequency) in &input.frequencies {
        frequency.validate(category.key())?;
    }
    Ok(())
}

/// Split `total` across `weights`, rounding each share to the cent and
/// reconciling drift onto the largest weight
pub fn split_by_weight(total: Money, weights: &CategoryWeightMap) -> BTreeMap<Category, Money> {
    let mut amounts: BTreeMap<Category, Money> = weights
        .iter()
        .map(|(category, weight)| (category, total.scale(weight)))
        .collect();
    if amounts.is_empty() {
        return amounts;
    }

    let allocated: Money = amounts.values().sum();
    let mut drift = total - allocated;
    if drift.is_zero() {
        return amounts;
    }

    // Largest weight first; stable sort keeps category order on ties
    let mut order: Vec<(Category, f64)> = weights.iter().collect();
    order.sort_by(|a, b| b.1.partial_cmp(&a.1).unwrap_or(std::cmp::Ordering::Equal));

    for (category, _) in order {
        let Some(amount) = amounts.get_mut(&category) else {
            continue;
        };
        if drift.is_positive() {
            *amount += drift;
            drift = Money::zero();
        } else {
            // A negative drift never drives an amount below zero
            let take = if amount.cents() >= -drift.cents() {
                -drift
            } else {
                *amount
            };
            *amount -= take;
            drift += take;
        }
        if drift.is_zero() {
            break;
        }
    }

    amounts
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::SpendingFrequency;

    fn allocator() -> CategoryAllocator {
        CategoryAllocator::new(RegionProfiles::builtin())
    }

    fn money(major: f64) -> Money {
        Money::from_major(major).unwrap()
    }

    fn input_with(frequencies: &[(Category, SpendingFrequency)]) -> AllocationInput {
        let mut fixed = BTreeMap::new();
        fixed.insert(Category::Rent, money(1200.0));
        fixed.insert(Category::Utilities, money(150.0));
        AllocationInput {
            income: money(5000.0),
            fixed_expenses: fixed,
            savings_goal: money(500.0),
            frequencies: frequencies.iter().copied().collect(),
            region: None,
            due_days: BTreeMap::new(),
        }
    }

    #[test]
    fn test_pool_and_conservation() {
        let input = input_with(&[
            (Category::Coffee, SpendingFrequency::per_week(3.0)),
            (Category::DiningOut, SpendingFrequency::per_month(7.0)),
            (Category::Travel, SpendingFrequency::per_year(1.0)),
        ]);
        let plan = allocator()
            .allocate(&input, IncomeTier::Middle, None)
            .unwrap();

        assert_eq!(plan.fixed_total, money(1350.0));
        assert_eq!(plan.discretionary_total, money(3150.0));
        assert_eq!(plan.discretionary_allocated(), plan.discretionary_total);
        assert!(plan.is_balanced());
        assert!(!plan.over_committed);
        assert_eq!(plan.weight_source, WeightSource::DeclaredFrequencies);
    }

    #[test]
    fn test_zero_frequencies_use_tier_defaults() {
        let input = input_with(&[
            (Category::Groceries, SpendingFrequency::per_month(0.0)),
            (Category::Coffee, SpendingFrequency::per_week(0.0)),
        ]);
        let plan = allocator()
            .allocate(&input, IncomeTier::Middle, None)
            .unwrap();

        assert_eq!(plan.weight_source, WeightSource::TierDefaults);
        assert_eq!(plan.discretionary_allocated(), money(3150.0));
        // Restricted to the declared categories that appear in the table
        assert_eq!(plan.discretionary_breakdown.len(), 2);
        assert!(plan.weights.is_normalized());
    }

    #[test]
    fn test_zero_frequencies_outside_table_use_whole_table() {
        let input = input_with(&[(Category::Hobbies, SpendingFrequency::per_month(0.0))]);
        let plan = allocator()
            .allocate(&input, IncomeTier::Low, None)
            .unwrap();

        assert_eq!(plan.weight_source, WeightSource::TierDefaults);
        assert!(plan.discretionary_breakdown.len() > 1);
        assert_eq!(plan.discretionary_allocated(), money(3150.0));
    }

    #[test]
    fn test_empty_set_goes_to_catch_all() {
        let plan = allocator()
            .allocate(&input_with(&[]), IncomeTier::Middle, None)
            .unwrap();

        assert_eq!(plan.weight_source, WeightSource::CatchAll);
        assert_eq!(plan.discretionary_breakdown[&Category::Other], money(3150.0));
    }

    #[test]
    fn test_over_committed_is_flagged() {
        let mut input = input_with(&[(Category::Coffee, SpendingFrequency::per_week(5.0))]);
        input.savings_goal = money(4000.0);
        let plan = allocator()
            .allocate(&input, IncomeTier::Middle, None)
            .unwrap();

        assert!(plan.over_committed);
        assert_eq!(plan.discretionary_total, Money::zero());
        assert_eq!(plan.discretionary_breakdown[&Category::Coffee], Money::zero());
        assert_eq!(plan.shortfall(), money(350.0));
    }

    #[test]
    fn test_negative_frequency_rejected() {
        let input = input_with(&[(Category::Coffee, SpendingFrequency::per_week(-1.0))]);
        assert!(matches!(
            allocator().allocate(&input, IncomeTier::Middle, None),
            Err(DayBudgetError::InvalidFrequency { .. })
        ));
    }

    #[test]
    fn test_fixed_and_discretionary_overlap_rejected() {
        let input = input_with(&[(Category::Rent, SpendingFrequency::per_month(1.0))]);
        assert!(matches!(
            allocator().allocate(&input, IncomeTier::Middle, None),
            Err(DayBudgetError::Validation(_))
        ));
    }

    #[test]
    fn test_adjusted_weights_replace_declared() {
        let input = input_with(&[
            (Category::Coffee, SpendingFrequency::per_month(1.0)),
            (Category::DiningOut, SpendingFrequency::per_month(1.0)),
        ]);
        let adjusted =
            CategoryWeightMap::from_scores([(Category::Coffee, 0.25), (Category::DiningOut, 0.75)])
                .unwrap();
        let plan = allocator()
            .allocate(&input, IncomeTier::Middle, Some(&adjusted))
            .unwrap();

        assert_eq!(plan.weight_source, WeightSource::BehaviorAdjusted);
        assert_eq!(plan.discretionary_breakdown[&Category::DiningOut], money(2362.5));
        assert!(plan.is_balanced());
    }

    #[test]
    fn test_drift_goes_to_largest_weight() {
        let weights = CategoryWeightMap::from_scores([
            (Category::Coffee, 1.0),
            (Category::DiningOut, 1.0),
            (Category::Travel, 1.0),
        ])
        .unwrap();
        let split = split_by_weight(Money::from_cents(100), &weights);
        // 33 + 33 + 33 = 99; the tie resolves to the first category in order
        assert_eq!(split[&Category::DiningOut].cents(), 34);
        assert_eq!(split[&Category::Coffee].cents(), 33);
        assert_eq!(split.values().sum::<Money>().cents(), 100);
    }

    #[test]
    fn test_negative_drift_never_goes_below_zero() {
        let weights: CategoryWeightMap = Category::all()
            .iter()
            .take(10)
            .map(|c| (*c, 0.1))
            .collect();
        let split = split_by_weight(Money::from_cents(5), &weights);
        assert!(split.values().all(|m| !m.is_negative()));
        assert_eq!(split.values().sum::<Money>().cents(), 5);
    }
}
