//! Regional profiles
//!
//! A region profile carries a cost-of-living multiplier that scales the
//! income-tier thresholds, and the per-tier default category split used
//! when a user gives no usable frequency answers.
//!
//! Profiles are passed explicitly to the classifier and allocator; there is
//! no module-level table. `profiles.json` in the config directory, when
//! present, replaces the built-in set.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::Path;

use crate::error::{DayBudgetError, DayBudgetResult};
use crate::models::{Category, CategoryWeightMap, IncomeTier};

/// Region code used when none is given or the given one is unknown
pub const DEFAULT_REGION: &str = "default";

/// Settings for one region
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RegionProfile {
    /// Scales every income-tier threshold (1.0 = no change)
    #[serde(default = "default_multiplier")]
    pub cost_multiplier: f64,

    /// Default discretionary split per income tier
    #[serde(default = "builtin_tier_defaults")]
    pub tier_defaults: BTreeMap<IncomeTier, CategoryWeightMap>,
}

fn default_multiplier() -> f64 {
    1.0
}

impl RegionProfile {
    pub fn with_multiplier(cost_multiplier: f64) -> Self {
        Self {
            cost_multiplier,
            tier_defaults: builtin_tier_defaults(),
        }
    }

    /// Default split for a tier, falling back to the built-in table
    pub fn defaults_for(&self, tier: IncomeTier) -> CategoryWeightMap {
        self.tier_defaults
            .get(&tier)
            .cloned()
            .unwrap_or_else(|| builtin_weights(tier))
    }
}

impl Default for RegionProfile {
    fn default() -> Self {
        Self::with_multiplier(1.0)
    }
}

/// Lookup from region code to profile
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RegionProfiles(BTreeMap<String, RegionProfile>);

impl RegionProfiles {
    /// The built-in profiles
    pub fn builtin() -> Self {
        let mut map = BTreeMap::new();
        map.insert(DEFAULT_REGION.to_string(), RegionProfile::with_multiplier(1.0));
        map.insert("urban_high_cost".to_string(), RegionProfile::with_multiplier(1.3));
        map.insert("urban".to_string(), RegionProfile::with_multiplier(1.1));
        map.insert("rural".to_string(), RegionProfile::with_multiplier(0.85));
        Self(map)
    }

    /// Build a profile set from explicit entries (used by tests and callers
    /// that manage their own tables)
    pub fn from_entries<I>(entries: I) -> Self
    where
        I: IntoIterator<Item = (String, RegionProfile)>,
    {
        Self(entries.into_iter().collect())
    }

    /// Load profiles from a JSON file, or the built-in set if it is absent
    pub fn load_or_builtin(path: &Path) -> DayBudgetResult<Self> {
        if !path.exists() {
            return Ok(Self::builtin());
        }

        let contents = std::fs::read_to_string(path)
            .map_err(|e| DayBudgetError::Io(format!("Failed to read profiles file: {}", e)))?;
        let profiles: RegionProfiles = serde_json::from_str(&contents).map_err(|e| {
            DayBudgetError::Config(format!("Failed to parse profiles file: {}", e))
        })?;
        profiles.validate()?;
        Ok(profiles)
    }

    /// Check every multiplier is positive and every default split sums to 1
    pub fn validate(&self) -> DayBudgetResult<()> {
        for (code, profile) in &self.0 {
            if !profile.cost_multiplier.is_finite() || profile.cost_multiplier <= 0.0 {
                return Err(DayBudgetError::Config(format!(
                    "region '{}' has invalid cost multiplier {}",
                    code, profile.cost_multiplier
                )));
            }
            for (tier, weights) in &profile.tier_defaults {
                if !weights.is_normalized() {
                    return Err(DayBudgetError::Config(format!(
                        "region '{}' tier {} default weights do not sum to 1",
                        code, tier
                    )));
                }
            }
        }
        Ok(())
    }

    /// Profile for a region code; unknown or missing codes get the default
    pub fn get(&self, region: Option<&str>) -> RegionProfile {
        region
            .and_then(|code| self.0.get(code))
            .or_else(|| self.0.get(DEFAULT_REGION))
            .cloned()
            .unwrap_or_default()
    }

    pub fn codes(&self) -> impl Iterator<Item = &str> {
        self.0.keys().map(String::as_str)
    }
}

impl Default for RegionProfiles {
    fn default() -> Self {
        Self::builtin()
    }
}

/// Built-in default split for every tier
pub fn builtin_tier_defaults() -> BTreeMap<IncomeTier, CategoryWeightMap> {
    IncomeTier::all()
        .iter()
        .map(|tier| (*tier, builtin_weights(*tier)))
        .collect()
}

/// Built-in default discretionary split for one tier
///
/// Lower tiers weight essentials (groceries, transport, health); higher
/// tiers shift toward dining, entertainment, and travel.
pub fn builtin_weights(tier: IncomeTier) -> CategoryWeightMap {
    use Category::*;
    let table: &[(Category, f64)] = match tier {
        IncomeTier::Low => &[
            (Groceries, 0.35),
            (Transport, 0.20),
            (DiningOut, 0.10),
            (Coffee, 0.05),
            (Entertainment, 0.08),
            (Clothing, 0.07),
            (Health, 0.10),
            (Other, 0.05),
        ],
        IncomeTier::LowerMiddle => &[
            (Groceries, 0.30),
            (Transport, 0.18),
            (DiningOut, 0.12),
            (Coffee, 0.06),
            (Entertainment, 0.10),
            (Clothing, 0.08),
            (Health, 0.08),
            (Travel, 0.03),
            (Other, 0.05),
        ],
        IncomeTier::Middle => &[
            (Groceries, 0.25),
            (Transport, 0.15),
            (DiningOut, 0.15),
            (Coffee, 0.06),
            (Entertainment, 0.12),
            (Clothing, 0.09),
            (Health, 0.06),
            (Travel, 0.07),
            (Other, 0.05),
        ],
        IncomeTier::UpperMiddle => &[
            (Groceries, 0.20),
            (Transport, 0.12),
            (DiningOut, 0.17),
            (Coffee, 0.06),
            (Entertainment, 0.14),
            (Clothing, 0.10),
            (Health, 0.05),
            (Travel, 0.11),
            (Other, 0.05),
        ],
        IncomeTier::High => &[
            (Groceries, 0.15),
            (Transport, 0.10),
            (DiningOut, 0.18),
            (Coffee, 0.05),
            (Entertainment, 0.15),
            (Clothing, 0.12),
            (Health, 0.05),
            (Travel, 0.15),
            (Other, 0.05),
        ],
    };

    // Renormalizing absorbs float error in the hand-written table
    CategoryWeightMap::from_scores(table.iter().copied()).unwrap_or_default()
}
