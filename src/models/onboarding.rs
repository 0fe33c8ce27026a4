//! Onboarding answers and the typed allocator input derived from them
//!
//! Onboarding data arrives as loosely-typed answers: decimal amounts and
//! free-text category names. [`OnboardingProfile::to_allocation_input`]
//! validates and converts them once, at the boundary, so the engine only
//! ever sees [`Money`] and [`Category`].

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use super::{Category, Money, SpendingFrequency};
use crate::error::{DayBudgetError, DayBudgetResult};

/// A frequency answer, either structured or as text ("5 times/week")
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum FrequencyAnswer {
    Structured(SpendingFrequency),
    Text(String),
}

impl FrequencyAnswer {
    fn resolve(&self, category: &str) -> DayBudgetResult<SpendingFrequency> {
        let frequency = match self {
            FrequencyAnswer::Structured(f) => *f,
            FrequencyAnswer::Text(text) => SpendingFrequency::parse(text).ok_or_else(|| {
                DayBudgetError::invalid_frequency(
                    category,
                    format!("could not understand '{}'", text),
                )
            })?,
        };
        frequency.validate(category)?;
        Ok(frequency)
    }
}

/// Raw onboarding/profile answers
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct OnboardingProfile {
    pub monthly_income: f64,

    #[serde(default)]
    pub additional_income: f64,

    /// Fixed obligations by category name
    #[serde(default)]
    pub fixed_expenses: BTreeMap<String, f64>,

    #[serde(default)]
    pub savings_goal_amount: f64,

    /// Declared spending frequency by discretionary category name
    #[serde(default)]
    pub spending_frequencies: BTreeMap<String, FrequencyAnswer>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub region: Option<String>,

    /// Due day of month for fixed expenses, by category name
    #[serde(default)]
    pub due_days: BTreeMap<String, u32>,
}

/// Validated, typed input to the category allocator
#[derive(Debug, Clone, PartialEq, Default)]
pub struct AllocationInput {
    /// Monthly income plus additional income
    pub income: Money,
    pub fixed_expenses: BTreeMap<Category, Money>,
    pub savings_goal: Money,
    pub frequencies: BTreeMap<Category, SpendingFrequency>,
    pub region: Option<String>,
    pub due_days: BTreeMap<Category, u32>,
}

impl OnboardingProfile {
    /// Total income (monthly + additional) as a decimal, validated
    pub fn total_income(&self) -> DayBudgetResult<f64> {
        for (label, value) in [
            ("monthly income", self.monthly_income),
            ("additional income", self.additional_income),
        ] {
            if !value.is_finite() {
                return Err(DayBudgetError::InvalidIncome(format!(
                    "{} must be a finite number",
                    label
                )));
            }
            if value < 0.0 {
                return Err(DayBudgetError::InvalidIncome(format!(
                    "{} must not be negative (got {})",
                    label, value
                )));
            }
        }
        Ok(self.monthly_income + self.additional_income)
    }

    /// Validate the answers and convert them to typed allocator input
    pub fn to_allocation_input(&self) -> DayBudgetResult<AllocationInput> {
        let income_major = self.total_income()?;
        let income = Money::from_major(income_major).ok_or_else(|| {
            DayBudgetError::InvalidIncome(format!("{} is out of range", income_major))
        })?;

        let mut fixed_expenses: BTreeMap<Category, Money> = BTreeMap::new();
        for (name, amount) in &self.fixed_expenses {
            let money = non_negative_money(*amount, &format!("fixed expense '{}'", name))?;
            *fixed_expenses.entry(Category::from_name(name)).or_default() += money;
        }

        let savings_goal = non_negative_money(self.savings_goal_amount, "savings goal")?;

        let mut rates: BTreeMap<Category, Vec<SpendingFrequency>> = BTreeMap::new();
        for (name, answer) in &self.spending_frequencies {
            let frequency = answer.resolve(name)?;
            rates
                .entry(Category::from_name(name))
                .or_default()
                .push(frequency);
        }
        let frequencies = rates
            .into_iter()
            .map(|(category, list)| {
                let merged = if list.len() == 1 {
                    list[0]
                } else {
                    SpendingFrequency::per_month(list.iter().map(|f| f.monthly_rate()).sum())
                };
                (category, merged)
            })
            .collect();

        let mut due_days = BTreeMap::new();
        for (name, day) in &self.due_days {
            due_days.entry(Category::from_name(name)).or_insert(*day);
        }

        Ok(AllocationInput {
            income,
            fixed_expenses,
            savings_goal,
            frequencies,
            region: self.region.clone(),
            due_days,
        })
    }
}

fn non_negative_money(amount: f64, label: &str) -> DayBudgetResult<Money> {
    if !amount.is_finite() || amount < 0.0 {
        return Err(DayBudgetError::Validation(format!(
            "{} must be a non-negative number (got {})",
            label, amount
        )));
    }
    Money::from_major(amount)
        .ok_or_else(|| DayBudgetError::Validation(format!("{} is out of range", label)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::FrequencyUnit;

    fn profile_json() -> &'static str {
        r#"{
            "monthly_income": 4500,
            "additional_income": 500,
            "fixed_expenses": {"rent": 1200, "Utilities": 150},
            "savings_goal_amount": 500,
            "spending_frequencies": {
                "dining out": {"count": 15, "unit": "month"},
                "coffee": "10 times/week",
                "travel": {"count": 3, "unit": "year"}
            },
            "region": "urban",
            "due_days": {"rent": 1, "utilities": 15}
        }"#
    }

    #[test]
    fn test_conversion() {
        let profile: OnboardingProfile = serde_json::from_str(profile_json()).unwrap();
        let input = profile.to_allocation_input().unwrap();

        assert_eq!(input.income.cents(), 500_000);
        assert_eq!(input.fixed_expenses[&Category::Rent].cents(), 120_000);
        assert_eq!(input.fixed_expenses[&Category::Utilities].cents(), 15_000);
        assert_eq!(input.savings_goal.cents(), 50_000);
        assert_eq!(
            input.frequencies[&Category::Coffee],
            SpendingFrequency::new(10.0, FrequencyUnit::Week)
        );
        assert_eq!(input.frequencies[&Category::DiningOut].monthly_rate(), 15.0);
        assert_eq!(input.due_days[&Category::Utilities], 15);
        assert_eq!(input.region.as_deref(), Some("urban"));
    }

    #[test]
    fn test_negative_income_rejected() {
        let profile = OnboardingProfile {
            monthly_income: -1.0,
            ..Default::default()
        };
        assert!(matches!(
            profile.to_allocation_input(),
            Err(DayBudgetError::InvalidIncome(_))
        ));

        let profile = OnboardingProfile {
            monthly_income: f64::NAN,
            ..Default::default()
        };
        assert!(matches!(
            profile.total_income(),
            Err(DayBudgetError::InvalidIncome(_))
        ));
    }

    #[test]
    fn test_bad_frequency_text() {
        let mut profile = OnboardingProfile {
            monthly_income: 3000.0,
            ..Default::default()
        };
        profile
            .spending_frequencies
            .insert("coffee".into(), FrequencyAnswer::Text("sometimes".into()));
        assert!(matches!(
            profile.to_allocation_input(),
            Err(DayBudgetError::InvalidFrequency { .. })
        ));
    }

    #[test]
    fn test_unknown_categories_merge_into_other() {
        let mut profile = OnboardingProfile {
            monthly_income: 3000.0,
            ..Default::default()
        };
        profile.spending_frequencies.insert(
            "pets".into(),
            FrequencyAnswer::Structured(SpendingFrequency::per_week(1.0)),
        );
        profile.spending_frequencies.insert(
            "books".into(),
            FrequencyAnswer::Structured(SpendingFrequency::per_month(2.0)),
        );
        let input = profile.to_allocation_input().unwrap();
        assert_eq!(input.frequencies.len(), 1);
        assert_eq!(input.frequencies[&Category::Other].monthly_rate(), 6.0);
    }

    #[test]
    fn test_negative_fixed_expense_rejected() {
        let mut profile = OnboardingProfile {
            monthly_income: 3000.0,
            ..Default::default()
        };
        profile.fixed_expenses.insert("rent".into(), -5.0);
        assert!(matches!(
            profile.to_allocation_input(),
            Err(DayBudgetError::Validation(_))
        ));
    }
}
