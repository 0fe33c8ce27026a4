//! Category weight maps
//!
//! Weights are built fresh for each computation and never persisted on
//! their own; a plan records the weights it was computed from.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use super::Category;

/// Tolerance used when checking that weights sum to one
pub const WEIGHT_EPSILON: f64 = 1e-9;

/// Mapping from discretionary category to a weight in [0, 1]
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CategoryWeightMap(BTreeMap<Category, f64>);

impl CategoryWeightMap {
    pub fn new() -> Self {
        Self(BTreeMap::new())
    }

    /// Build a normalized map from raw non-negative scores.
    ///
    /// Returns `None` when the scores sum to zero.
    pub fn from_scores<I>(scores: I) -> Option<Self>
    where
        I: IntoIterator<Item = (Category, f64)>,
    {
        let mut map = BTreeMap::new();
        for (category, score) in scores {
            *map.entry(category).or_insert(0.0) += score.max(0.0);
        }
        let total: f64 = map.values().sum();
        if total <= 0.0 || !total.is_finite() {
            return None;
        }
        for weight in map.values_mut() {
            *weight /= total;
        }
        Some(Self(map))
    }

    pub fn get(&self, category: Category) -> f64 {
        self.0.get(&category).copied().unwrap_or(0.0)
    }

    pub fn contains(&self, category: Category) -> bool {
        self.0.contains_key(&category)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn total(&self) -> f64 {
        self.0.values().sum()
    }

    pub fn iter(&self) -> impl Iterator<Item = (Category, f64)> + '_ {
        self.0.iter().map(|(c, w)| (*c, *w))
    }

    pub fn categories(&self) -> impl Iterator<Item = Category> + '_ {
        self.0.keys().copied()
    }

    /// The category holding the largest weight; ties go to the first in
    /// category order.
    pub fn largest(&self) -> Option<Category> {
        let mut best: Option<(Category, f64)> = None;
        for (category, weight) in self.iter() {
            match best {
                Some((_, w)) if weight <= w => {}
                _ => best = Some((category, weight)),
            }
        }
        best.map(|(c, _)| c)
    }

    /// Raise one category's weight by up to `delta`, taking the increase
    /// proportionally from every other category so the total stays 1.0.
    ///
    /// Returns the delta actually applied (bounded by `1 - weight`, and zero
    /// when the other categories hold no weight to give).
    pub fn nudge(&mut self, category: Category, delta: f64) -> f64 {
        let current = self.get(category);
        let others: f64 = self
            .0
            .iter()
            .filter(|(c, _)| **c != category)
            .map(|(_, w)| *w)
            .sum();
        let applied = delta.max(0.0).min(1.0 - current).min(others);
        if applied <= 0.0 {
            return 0.0;
        }

        let scale = (others - applied) / others;
        for (c, weight) in self.0.iter_mut() {
            if *c == category {
                *weight += applied;
            } else {
                *weight *= scale;
            }
        }
        applied
    }

    /// Keep only the given categories and renormalize.
    ///
    /// Returns `None` if nothing with positive weight remains.
    pub fn restricted_to<I>(&self, categories: I) -> Option<Self>
    where
        I: IntoIterator<Item = Category>,
    {
        Self::from_scores(
            categories
                .into_iter()
                .filter(|c| self.contains(*c))
                .map(|c| (c, self.get(c))),
        )
    }

    pub fn is_normalized(&self) -> bool {
        !self.0.is_empty() && (self.total() - 1.0).abs() < WEIGHT_EPSILON
    }
}

impl FromIterator<(Category, f64)> for CategoryWeightMap {
    fn from_iter<T: IntoIterator<Item = (Category, f64)>>(iter: T) -> Self {
        Self(iter.into_iter().collect())
    }
}
