//! Behavioral adjustments
//!
//! Derived transiently from a window of transaction history and applied to
//! a category weight map; never persisted on their own.

use serde::{Deserialize, Serialize};
use std::fmt;

use super::Category;

/// A spending pattern detected in transaction history
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BehaviorPattern {
    /// A category takes a consistently larger share than planned
    CategoryDominance,
    /// Spending concentrates on weekends
    WeekendSpender,
}

impl fmt::Display for BehaviorPattern {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BehaviorPattern::CategoryDominance => write!(f, "category_dominance"),
            BehaviorPattern::WeekendSpender => write!(f, "weekend_spender"),
        }
    }
}

/// A weight nudge applied to one category
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BehavioralAdjustment {
    pub pattern: BehaviorPattern,
    pub category: Category,

    /// Weight actually added to the category
    pub weight_delta: f64,

    /// Share of observed spend in the window
    pub observed_share: f64,

    /// Planned weight before the nudge
    pub planned_share: f64,
}
