//! Income tiers
//!
//! A coarse classification of monthly income used to pick default category
//! weights when a user has no usable spending-frequency answers.

use serde::{Deserialize, Serialize};
use std::fmt;

use super::Money;

/// Income tier, ordered from lowest to highest
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum IncomeTier {
    Low,
    LowerMiddle,
    Middle,
    UpperMiddle,
    High,
}

impl IncomeTier {
    /// All tiers, lowest first
    pub fn all() -> &'static [IncomeTier] {
        &[
            IncomeTier::Low,
            IncomeTier::LowerMiddle,
            IncomeTier::Middle,
            IncomeTier::UpperMiddle,
            IncomeTier::High,
        ]
    }

    /// Inclusive lower bound of this tier before any regional scaling
    pub fn base_lower_bound(&self) -> Money {
        match self {
            IncomeTier::Low => Money::zero(),
            IncomeTier::LowerMiddle => Money::from_dollars_cents(3_000, 0),
            IncomeTier::Middle => Money::from_dollars_cents(5_000, 0),
            IncomeTier::UpperMiddle => Money::from_dollars_cents(8_000, 0),
            IncomeTier::High => Money::from_dollars_cents(12_000, 0),
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            IncomeTier::Low => "Low",
            IncomeTier::LowerMiddle => "Lower-middle",
            IncomeTier::Middle => "Middle",
            IncomeTier::UpperMiddle => "Upper-middle",
            IncomeTier::High => "High",
        }
    }
}

impl fmt::Display for IncomeTier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.label())
    }
}
