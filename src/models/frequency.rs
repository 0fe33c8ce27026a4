//! Declared spending frequencies
//!
//! Onboarding asks how often the user spends in each discretionary category
//! ("12 times/month", "5 times/week", "3 times/year"). The allocator only
//! needs the monthly rate.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::error::{DayBudgetError, DayBudgetResult};

/// Weeks counted per month when normalizing weekly frequencies
pub const WEEKS_PER_MONTH: f64 = 4.0;
/// Months per year when normalizing yearly frequencies
pub const MONTHS_PER_YEAR: f64 = 12.0;

/// The cadence a frequency count is expressed in
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum FrequencyUnit {
    Week,
    #[default]
    Month,
    Year,
}

impl FrequencyUnit {
    /// Parse a unit word ("week", "wk", "weekly", "month", "mo", "yr", ...)
    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "w" | "wk" | "week" | "weeks" | "weekly" => Some(Self::Week),
            "m" | "mo" | "month" | "months" | "monthly" => Some(Self::Month),
            "y" | "yr" | "year" | "years" | "yearly" | "annually" => Some(Self::Year),
            _ => None,
        }
    }
}

impl fmt::Display for FrequencyUnit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FrequencyUnit::Week => write!(f, "week"),
            FrequencyUnit::Month => write!(f, "month"),
            FrequencyUnit::Year => write!(f, "year"),
        }
    }
}

/// How many times per unit the user spends in a category
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SpendingFrequency {
    pub count: f64,
    #[serde(default)]
    pub unit: FrequencyUnit,
}

impl SpendingFrequency {
    pub fn new(count: f64, unit: FrequencyUnit) -> Self {
        Self { count, unit }
    }

    pub fn per_week(count: f64) -> Self {
        Self::new(count, FrequencyUnit::Week)
    }

    pub fn per_month(count: f64) -> Self {
        Self::new(count, FrequencyUnit::Month)
    }

    pub fn per_year(count: f64) -> Self {
        Self::new(count, FrequencyUnit::Year)
    }

    /// Check the count is finite and non-negative
    pub fn validate(&self, category: &str) -> DayBudgetResult<()> {
        if !self.count.is_finite() {
            return Err(DayBudgetError::invalid_frequency(
                category,
                "count must be a finite number",
            ));
        }
        if self.count < 0.0 {
            return Err(DayBudgetError::invalid_frequency(
                category,
                format!("count must not be negative (got {})", self.count),
            ));
        }
        Ok(())
    }

    /// Occurrences per month: weekly × 4, monthly × 1, yearly ÷ 12
    pub fn monthly_rate(&self) -> f64 {
        match self.unit {
            FrequencyUnit::Week => self.count * WEEKS_PER_MONTH,
            FrequencyUnit::Month => self.count,
            FrequencyUnit::Year => self.count / MONTHS_PER_YEAR,
        }
    }

    /// Parse text such as "12 times/month", "5/week", "3 per year", "2x wk"
    pub fn parse(s: &str) -> Option<Self> {
        let lower = s.trim().to_lowercase();
        let (count_part, unit_part) = if let Some((left, right)) = lower.split_once('/') {
            (left.to_string(), right.to_string())
        } else if let Some((left, right)) = lower.split_once(" per ") {
            (left.to_string(), right.to_string())
        } else if let Some((left, right)) = lower.split_once(" a ") {
            (left.to_string(), right.to_string())
        } else {
            (lower.clone(), "month".to_string())
        };

        let count_str = count_part
            .trim()
            .trim_end_matches("times")
            .trim_end_matches("time")
            .trim_end_matches('x')
            .trim();
        let count: f64 = count_str.parse().ok()?;
        let unit = FrequencyUnit::parse(&unit_part)?;

        Some(Self::new(count, unit))
    }
}

impl fmt::Display for SpendingFrequency {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} times/{}", self.count, self.unit)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_monthly_rate() {
        assert_eq!(SpendingFrequency::per_week(10.0).monthly_rate(), 40.0);
        assert_eq!(SpendingFrequency::per_month(15.0).monthly_rate(), 15.0);
        assert_eq!(SpendingFrequency::per_year(3.0).monthly_rate(), 0.25);
    }

    #[test]
    fn test_validate() {
        assert!(SpendingFrequency::per_month(0.0).validate("coffee").is_ok());
        assert!(matches!(
            SpendingFrequency::per_month(-1.0).validate("coffee"),
            Err(DayBudgetError::InvalidFrequency { .. })
        ));
        assert!(SpendingFrequency::per_month(f64::NAN).validate("coffee").is_err());
    }

    #[test]
    fn test_parse_text() {
        assert_eq!(
            SpendingFrequency::parse("12 times/month"),
            Some(SpendingFrequency::per_month(12.0))
        );
        assert_eq!(
            SpendingFrequency::parse("5 times/week"),
            Some(SpendingFrequency::per_week(5.0))
        );
        assert_eq!(
            SpendingFrequency::parse("3 per year"),
            Some(SpendingFrequency::per_year(3.0))
        );
        assert_eq!(SpendingFrequency::parse("2x/wk"), Some(SpendingFrequency::per_week(2.0)));
        assert_eq!(SpendingFrequency::parse("4"), Some(SpendingFrequency::per_month(4.0)));
        assert_eq!(SpendingFrequency::parse("often"), None);
        assert_eq!(SpendingFrequency::parse("3/fortnight"), None);
    }

    #[test]
    fn test_deserialize_default_unit() {
        let freq: SpendingFrequency = serde_json::from_str(r#"{"count": 3}"#).unwrap();
        assert_eq!(freq.unit, FrequencyUnit::Month);
        let freq: SpendingFrequency =
            serde_json::from_str(r#"{"count": 3, "unit": "year"}"#).unwrap();
        assert_eq!(freq.monthly_rate(), 0.25);
    }
}
