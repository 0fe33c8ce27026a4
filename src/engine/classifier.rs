//! Income classification
//!
//! Maps a monthly income to an [`IncomeTier`]. Thresholds are the tier
//! base bounds scaled by the region's cost-of-living multiplier; a value
//! exactly on a boundary belongs to the higher tier.

use tracing::debug;

use crate::config::RegionProfiles;
use crate::error::{DayBudgetError, DayBudgetResult};
use crate::models::{IncomeTier, Money};

/// Classifies incomes against region-scaled tier thresholds
#[derive(Debug, Clone, Default)]
pub struct IncomeClassifier {
    profiles: RegionProfiles,
}

impl IncomeClassifier {
    pub fn new(profiles: RegionProfiles) -> Self {
        Self { profiles }
    }

    /// Lower bound of each tier for a region, lowest tier first
    pub fn thresholds(&self, region: Option<&str>) -> Vec<(IncomeTier, Money)> {
        let multiplier = self.profiles.get(region).cost_multiplier;
        IncomeTier::all()
            .iter()
            .map(|tier| (*tier, tier.base_lower_bound().scale(multiplier)))
            .collect()
    }

    /// Classify a monthly income given in cents
    pub fn classify(&self, income: Money, region: Option<&str>) -> DayBudgetResult<IncomeTier> {
        if income.is_negative() {
            return Err(DayBudgetError::InvalidIncome(format!(
                "monthly income must not be negative (got {})",
                income
            )));
        }

        let tier = self
            .thresholds(region)
            .into_iter()
            .rev()
            .find(|(_, lower)| income >= *lower)
            .map(|(tier, _)| tier)
            .unwrap_or(IncomeTier::Low);

        debug!(%income, region = region.unwrap_or("default"), %tier, "classified income");
        Ok(tier)
    }

    /// Classify a monthly income given as a decimal amount
    pub fn classify_amount(&self, income: f64, region: Option<&str>) -> DayBudgetResult<IncomeTier> {
        if !income.is_finite() {
            return Err(DayBudgetError::InvalidIncome(
                "monthly income must be a finite number".into(),
            ));
        }
        if income < 0.0 {
            return Err(DayBudgetError::InvalidIncome(format!(
                "monthly income must not be negative (got {})",
                income
            )));
        }
        let cents = Money::from_major(income)
            .ok_or_else(|| DayBudgetError::InvalidIncome(format!("{} is out of range", income)))?;
        self.classify(cents, region)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn classifier() -> IncomeClassifier {
        IncomeClassifier::new(RegionProfiles::builtin())
    }

    #[test]
    fn test_base_tiers() {
        let c = classifier();
        assert_eq!(c.classify_amount(0.0, None).unwrap(), IncomeTier::Low);
        assert_eq!(c.classify_amount(2999.99, None).unwrap(), IncomeTier::Low);
        assert_eq!(c.classify_amount(4999.99, None).unwrap(), IncomeTier::LowerMiddle);
        assert_eq!(c.classify_amount(5000.0, None).unwrap(), IncomeTier::Middle);
        assert_eq!(c.classify_amount(11_999.99, None).unwrap(), IncomeTier::UpperMiddle);
        assert_eq!(c.classify_amount(250_000.0, None).unwrap(), IncomeTier::High);
    }

    #[test]
    fn test_boundary_goes_to_upper_tier() {
        let c = classifier();
        assert_eq!(c.classify_amount(3000.0, None).unwrap(), IncomeTier::LowerMiddle);
        assert_eq!(c.classify_amount(8000.0, None).unwrap(), IncomeTier::UpperMiddle);
        assert_eq!(c.classify_amount(12_000.0, None).unwrap(), IncomeTier::High);
    }

    #[test]
    fn test_region_scales_thresholds() {
        let c = classifier();
        // 1.3 x 3000 = 3900
        assert_eq!(
            c.classify_amount(3500.0, Some("urban_high_cost")).unwrap(),
            IncomeTier::Low
        );
        assert_eq!(
            c.classify_amount(3900.0, Some("urban_high_cost")).unwrap(),
            IncomeTier::LowerMiddle
        );
        // 0.85 x 3000 = 2550
        assert_eq!(c.classify_amount(2600.0, Some("rural")).unwrap(), IncomeTier::LowerMiddle);
    }

    #[test]
    fn test_unknown_region_uses_base() {
        let c = classifier();
        assert_eq!(
            c.classify_amount(3000.0, Some("nowhere")).unwrap(),
            IncomeTier::LowerMiddle
        );
    }

    #[test]
    fn test_invalid_income() {
        let c = classifier();
        assert!(matches!(
            c.classify_amount(-1.0, None),
            Err(DayBudgetError::InvalidIncome(_))
        ));
        assert!(matches!(
            c.classify_amount(f64::NAN, None),
            Err(DayBudgetError::InvalidIncome(_))
        ));
        assert!(matches!(
            c.classify(Money::from_cents(-1), None),
            Err(DayBudgetError::InvalidIncome(_))
        ));
    }
}
