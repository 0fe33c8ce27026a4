//! Behavior-based weight adjustment
//!
//! Looks at a trailing window of transactions and nudges category weights
//! toward observed habits when a pattern is stable across the window:
//!
//! - **Category dominance**: a category's observed share of spend beats
//!   its planned share by more than the threshold, overall and in most
//!   periods of the window.
//! - **Weekend spending**: most spend lands on Saturday or Sunday in most
//!   periods; categories that drive it get half an increment.
//!
//! With too little history the weights come back unchanged.

use std::collections::{BTreeMap, BTreeSet};

use chrono::{Datelike, Duration, NaiveDate, Weekday};
use serde::Serialize;
use tracing::debug;

use crate::config::BehaviorSettings;
use crate::models::{
    BehaviorPattern, BehavioralAdjustment, Category, CategoryWeightMap, Money, Transaction,
};

/// Share of spend per day of week, Monday first
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize)]
pub struct WeekdayProfile {
    pub shares: [f64; 7],
}

impl WeekdayProfile {
    pub fn share(&self, weekday: Weekday) -> f64 {
        self.shares[weekday.num_days_from_monday() as usize]
    }

    pub fn weekend_share(&self) -> f64 {
        self.share(Weekday::Sat) + self.share(Weekday::Sun)
    }
}

/// Result of a behavior analysis
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BehaviorReport {
    /// Adjusted weights, summing to 1.0
    pub weights: CategoryWeightMap,
    pub adjustments: Vec<BehavioralAdjustment>,
    pub weekday_profile: WeekdayProfile,
    /// Transactions inside the window for categories being weighted
    pub transactions_considered: usize,
    /// False when the history was too thin to act on
    pub sufficient_history: bool,
}

impl BehaviorReport {
    pub fn is_unchanged(&self) -> bool {
        self.adjustments.is_empty()
    }
}

/// Spend totals gathered over the window
#[derive(Default)]
struct Tally {
    total: Money,
    by_category: BTreeMap<Category, Money>,
    weekend_by_category: BTreeMap<Category, Money>,
    by_weekday: [Money; 7],
    periods: Vec<PeriodTally>,
}

#[derive(Default, Clone)]
struct PeriodTally {
    total: Money,
    weekend: Money,
    by_category: BTreeMap<Category, Money>,
}

impl PeriodTally {
    fn share_of(&self, category: Category) -> Option<f64> {
        if !self.total.is_positive() {
            return None;
        }
        let amount = self.by_category.get(&category).copied().unwrap_or_default();
        Some(ratio(amount, self.total))
    }
}

fn ratio(part: Money, whole: Money) -> f64 {
    if whole.is_zero() {
        0.0
    } else {
        part.cents() as f64 / whole.cents() as f64
    }
}

fn is_weekend(date: NaiveDate) -> bool {
    matches!(date.weekday(), Weekday::Sat | Weekday::Sun)
}

/// Adjusts category weights from transaction history
#[derive(Debug, Clone, Default)]
pub struct BehaviorAdjuster {
    settings: BehaviorSettings,
}

impl BehaviorAdjuster {
    pub fn new(settings: BehaviorSettings) -> Self {
        Self { settings }
    }

    pub fn settings(&self) -> &BehaviorSettings {
        &self.settings
    }

    /// First day of the window ending on `as_of`
    pub fn window_start(&self, as_of: NaiveDate) -> NaiveDate {
        let days = i64::from(self.settings.window_days.max(1));
        as_of - Duration::days(days - 1)
    }

    /// Analyze history and return adjusted weights
    pub fn adjust(
        &self,
        transactions: &[Transaction],
        weights: &CategoryWeightMap,
        as_of: NaiveDate,
    ) -> BehaviorReport {
        let start = self.window_start(as_of);
        let relevant: Vec<&Transaction> = transactions
            .iter()
            .filter(|t| t.date >= start && t.date <= as_of)
            .filter(|t| t.amount.is_positive() && weights.contains(t.category))
            .collect();

        let tally = self.tally(&relevant, start);
        let weekday_profile = WeekdayProfile {
            shares: tally.by_weekday.map(|amount| ratio(amount, tally.total)),
        };

        let mut report = BehaviorReport {
            weights: weights.clone(),
            adjustments: Vec::new(),
            weekday_profile,
            transactions_considered: relevant.len(),
            sufficient_history: false,
        };

        if relevant.len() < self.settings.min_transactions || !tally.total.is_positive() {
            debug!(
                considered = relevant.len(),
                required = self.settings.min_transactions,
                "not enough history to adjust weights"
            );
            return report;
        }
        report.sufficient_history = true;

        let mut nudged = BTreeSet::new();
        self.apply_dominance(&tally, weights, &mut report, &mut nudged);
        self.apply_weekend(&tally, weights, &mut report, &nudged);

        debug!(adjustments = report.adjustments.len(), "behavior analysis complete");
        report
    }

    fn tally(&self, transactions: &[&Transaction], start: NaiveDate) -> Tally {
        let window = i64::from(self.settings.window_days.max(1));
        let periods = self.settings.periods.max(1);
        let mut tally = Tally {
            periods: vec![PeriodTally::default(); periods],
            ..Default::default()
        };

        for txn in transactions {
            let offset = (txn.date - start).num_days();
            let index = ((offset * periods as i64) / window).clamp(0, periods as i64 - 1) as usize;
            let weekend = is_weekend(txn.date);

            tally.total += txn.amount;
            *tally.by_category.entry(txn.category).or_default() += txn.amount;
            tally.by_weekday[txn.date.weekday().num_days_from_monday() as usize] += txn.amount;
            if weekend {
                *tally.weekend_by_category.entry(txn.category).or_default() += txn.amount;
            }

            let period = &mut tally.periods[index];
            period.total += txn.amount;
            *period.by_category.entry(txn.category).or_default() += txn.amount;
            if weekend {
                period.weekend += txn.amount;
            }
        }

        tally
    }

    fn apply_dominance(
        &self,
        tally: &Tally,
        planned: &CategoryWeightMap,
        report: &mut BehaviorReport,
        nudged: &mut BTreeSet<Category>,
    ) {
        let threshold = self.settings.share_threshold;

        for (category, planned_share) in planned.iter() {
            let amount = tally.by_category.get(&category).copied().unwrap_or_default();
            let observed = ratio(amount, tally.total);
            if observed - planned_share <= threshold {
                continue;
            }

            let stable = tally
                .periods
                .iter()
                .filter_map(|p| p.share_of(category))
                .filter(|share| share - planned_share > threshold)
                .count();
            if stable < self.settings.stable_periods {
                continue;
            }

            let current = report.weights.get(category);
            let delta = self.settings.increment.min(1.0 - current);
            let applied = report.weights.nudge(category, delta);
            if applied > 0.0 {
                nudged.insert(category);
                report.adjustments.push(BehavioralAdjustment {
                    pattern: BehaviorPattern::CategoryDominance,
                    category,
                    weight_delta: applied,
                    observed_share: observed,
                    planned_share,
                });
            }
        }
    }

    fn apply_weekend(
        &self,
        tally: &Tally,
        planned: &CategoryWeightMap,
        report: &mut BehaviorReport,
        nudged: &BTreeSet<Category>,
    ) {
        let threshold = self.settings.weekend_threshold;
        let weekend_periods = tally
            .periods
            .iter()
            .filter(|p| p.total.is_positive() && ratio(p.weekend, p.total) >= threshold)
            .count();
        if weekend_periods < self.settings.stable_periods {
            return;
        }

        for (category, planned_share) in planned.iter() {
            if nudged.contains(&category) {
                continue;
            }
            let Some(amount) = tally.by_category.get(&category).copied() else {
                continue;
            };
            let weekend = tally
                .weekend_by_category
                .get(&category)
                .copied()
                .unwrap_or_default();
            let observed = ratio(amount, tally.total);
            if ratio(weekend, amount) < threshold || observed <= planned_share {
                continue;
            }

            let applied = report
                .weights
                .nudge(category, self.settings.increment / 2.0);
            if applied > 0.0 {
                report.adjustments.push(BehavioralAdjustment {
                    pattern: BehaviorPattern::WeekendSpender,
                    category,
                    weight_delta: applied,
                    observed_share: observed,
                    planned_share,
                });
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::UserId;

    const EPS: f64 = 1e-9;

    fn as_of() -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, 3, 31).unwrap()
    }

    fn txn(user: UserId, y: i32, m: u32, d: u32, category: Category, cents: i64) -> Transaction {
        Transaction::new(
            user,
            NaiveDate::from_ymd_opt(y, m, d).unwrap(),
            category,
            Money::from_cents(cents),
        )
    }

    fn even_weights() -> CategoryWeightMap {
        CategoryWeightMap::from_scores([(Category::Groceries, 1.0), (Category::Entertainment, 1.0)])
            .unwrap()
    }

    /// Four transactions in each of the three 20-day periods: entertainment
    /// on Saturday and Sunday, groceries on Monday and Tuesday
    fn history(entertainment_cents: i64, groceries_cents: i64) -> Vec<Transaction> {
        let user = UserId::new();
        let weeks = [(2, [1, 2, 3, 4]), (2, [22, 23, 24, 25]), (3, [15, 16, 17, 18])];
        let mut out = Vec::new();
        for (month, days) in weeks {
            out.push(txn(user, 2025, month, days[0], Category::Entertainment, entertainment_cents));
            out.push(txn(user, 2025, month, days[1], Category::Entertainment, entertainment_cents));
            out.push(txn(user, 2025, month, days[2], Category::Groceries, groceries_cents));
            out.push(txn(user, 2025, month, days[3], Category::Groceries, groceries_cents));
        }
        out
    }

    #[test]
    fn test_window_start() {
        let adjuster = BehaviorAdjuster::default();
        assert_eq!(
            adjuster.window_start(as_of()),
            NaiveDate::from_ymd_opt(2025, 1, 31).unwrap()
        );
    }

    #[test]
    fn test_insufficient_history_is_noop() {
        let adjuster = BehaviorAdjuster::default();
        let history: Vec<Transaction> = history(7_000, 3_000).into_iter().take(9).collect();
        let report = adjuster.adjust(&history, &even_weights(), as_of());

        assert!(!report.sufficient_history);
        assert!(report.is_unchanged());
        assert_eq!(report.weights, even_weights());
    }

    #[test]
    fn test_dominant_category_is_nudged() {
        let adjuster = BehaviorAdjuster::default();
        let report = adjuster.adjust(&history(7_000, 3_000), &even_weights(), as_of());

        assert_eq!(report.adjustments.len(), 1);
        let adjustment = &report.adjustments[0];
        assert_eq!(adjustment.pattern, BehaviorPattern::CategoryDominance);
        assert_eq!(adjustment.category, Category::Entertainment);
        assert!((adjustment.observed_share - 0.7).abs() < EPS);
        assert!((report.weights.get(Category::Entertainment) - 0.55).abs() < EPS);
        assert!((report.weights.get(Category::Groceries) - 0.45).abs() < EPS);
        assert!(report.weights.is_normalized());
    }

    #[test]
    fn test_weekend_spender_gets_half_increment() {
        let adjuster = BehaviorAdjuster::default();
        // 53% entertainment: above plan, under the dominance threshold
        let report = adjuster.adjust(&history(2_650, 2_350), &even_weights(), as_of());

        assert_eq!(report.adjustments.len(), 1);
        let adjustment = &report.adjustments[0];
        assert_eq!(adjustment.pattern, BehaviorPattern::WeekendSpender);
        assert_eq!(adjustment.category, Category::Entertainment);
        assert!((adjustment.weight_delta - 0.025).abs() < EPS);
        assert!((report.weekday_profile.weekend_share() - 0.53).abs() < EPS);
        assert!(report.weights.is_normalized());
    }

    #[test]
    fn test_balanced_history_is_unchanged() {
        let adjuster = BehaviorAdjuster::default();
        let report = adjuster.adjust(&history(2_500, 2_500), &even_weights(), as_of());

        assert!(report.sufficient_history);
        assert!(report.is_unchanged());
        assert_eq!(report.weights, even_weights());
    }

    #[test]
    fn test_transactions_outside_window_or_weights_ignored() {
        let adjuster = BehaviorAdjuster::default();
        let mut history = history(7_000, 3_000);
        let user = UserId::new();
        history.push(txn(user, 2024, 12, 1, Category::Groceries, 1_000_000));
        history.push(txn(user, 2025, 3, 1, Category::Travel, 1_000_000));

        let report = adjuster.adjust(&history, &even_weights(), as_of());
        assert_eq!(report.transactions_considered, 12);
        assert_eq!(report.adjustments[0].category, Category::Entertainment);
    }
}
