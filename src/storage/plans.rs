//! Plan repository for JSON storage
//!
//! Plans are superseded, never edited: every computed plan is appended and
//! the newest one for a user-month is current.

use std::collections::{BTreeMap, HashMap};
use std::path::PathBuf;
use std::sync::RwLock;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::{DayBudgetError, DayBudgetResult};
use crate::models::{Category, MonthPeriod, MonthlyBudgetPlan, UserId, CATEGORY_SET_VERSION};

use super::file_io::{read_json, write_json_atomic};

/// A stored plan with the inputs needed to rebuild its calendar
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlanRecord {
    pub user_id: UserId,
    pub period: MonthPeriod,
    pub plan: MonthlyBudgetPlan,
    #[serde(default)]
    pub due_days: BTreeMap<Category, u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub region: Option<String>,
    /// Category set the plan was computed against
    #[serde(default = "default_category_set_version")]
    pub category_set_version: u32,
    pub created_at: DateTime<Utc>,
}

fn default_category_set_version() -> u32 {
    CATEGORY_SET_VERSION
}

impl PlanRecord {
    pub fn new(
        user_id: UserId,
        period: MonthPeriod,
        plan: MonthlyBudgetPlan,
        due_days: BTreeMap<Category, u32>,
        region: Option<String>,
    ) -> Self {
        Self {
            user_id,
            period,
            plan,
            due_days,
            region,
            category_set_version: CATEGORY_SET_VERSION,
            created_at: Utc::now(),
        }
    }

    /// Audit identifier, e.g. "usr-1a2b3c4d:2025-01"
    pub fn key(&self) -> String {
        format!("{}:{}", self.user_id, self.period)
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
struct PlanData {
    plans: Vec<PlanRecord>,
}

type PlanKey = (UserId, MonthPeriod);

/// Repository for plan persistence
pub struct PlanRepository {
    path: PathBuf,
    data: RwLock<HashMap<PlanKey, Vec<PlanRecord>>>,
}

impl PlanRepository {
    pub fn new(path: PathBuf) -> Self {
        Self {
            path,
            data: RwLock::new(HashMap::new()),
        }
    }

    /// Load plans from disk
    pub fn load(&self) -> DayBudgetResult<()> {
        let file_data: PlanData = read_json(&self.path)?;

        let mut data = self.data.write().map_err(|e| {
            DayBudgetError::Storage(format!("Failed to acquire write lock: {}", e))
        })?;

        data.clear();
        for record in file_data.plans {
            data.entry((record.user_id, record.period))
                .or_default()
                .push(record);
        }
        for history in data.values_mut() {
            history.sort_by_key(|r| r.created_at);
        }

        Ok(())
    }

    /// Save plans to disk
    pub fn save(&self) -> DayBudgetResult<()> {
        let data = self.data.read().map_err(|e| {
            DayBudgetError::Storage(format!("Failed to acquire read lock: {}", e))
        })?;

        let mut plans: Vec<PlanRecord> = data.values().flatten().cloned().collect();
        plans.sort_by(|a, b| {
            (a.user_id, a.period, a.created_at).cmp(&(b.user_id, b.period, b.created_at))
        });

        write_json_atomic(&self.path, &PlanData { plans })
    }

    /// The current plan for a user-month
    pub fn current(&self, user_id: UserId, period: MonthPeriod) -> DayBudgetResult<Option<PlanRecord>> {
        let data = self.data.read().map_err(|e| {
            DayBudgetError::Storage(format!("Failed to acquire read lock: {}", e))
        })?;

        Ok(data
            .get(&(user_id, period))
            .and_then(|history| history.last())
            .cloned())
    }

    /// Every plan computed for a user-month, oldest first
    pub fn history(&self, user_id: UserId, period: MonthPeriod) -> DayBudgetResult<Vec<PlanRecord>> {
        let data = self.data.read().map_err(|e| {
            DayBudgetError::Storage(format!("Failed to acquire read lock: {}", e))
        })?;

        Ok(data.get(&(user_id, period)).cloned().unwrap_or_default())
    }

    /// Append a plan, superseding the current one; returns the plan it replaced
    pub fn push(&self, record: PlanRecord) -> DayBudgetResult<Option<PlanRecord>> {
        let mut data = self.data.write().map_err(|e| {
            DayBudgetError::Storage(format!("Failed to acquire write lock: {}", e))
        })?;

        let history = data.entry((record.user_id, record.period)).or_default();
        let previous = history.last().cloned();
        history.push(record);
        Ok(previous)
    }

    /// Months with a plan for a user, oldest first
    pub fn periods(&self, user_id: UserId) -> DayBudgetResult<Vec<MonthPeriod>> {
        let data = self.data.read().map_err(|e| {
            DayBudgetError::Storage(format!("Failed to acquire read lock: {}", e))
        })?;

        let mut periods: Vec<MonthPeriod> = data
            .keys()
            .filter(|(user, _)| *user == user_id)
            .map(|(_, period)| *period)
            .collect();
        periods.sort();
        Ok(periods)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{CategoryWeightMap, IncomeTier, Money, WeightSource};
    use tempfile::TempDir;

    fn plan(income_cents: i64) -> MonthlyBudgetPlan {
        MonthlyBudgetPlan {
            total_income: Money::from_cents(income_cents),
            fixed_expenses: BTreeMap::new(),
            fixed_total: Money::zero(),
            savings_goal: Money::zero(),
            discretionary_total: Money::from_cents(income_cents),
            discretionary_breakdown: BTreeMap::new(),
            weights: CategoryWeightMap::new(),
            weight_source: WeightSource::Empty,
            user_class: IncomeTier::Low,
            over_committed: false,
        }
    }

    #[test]
    fn test_push_supersedes_and_persists() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("plans.json");
        let repo = PlanRepository::new(path.clone());
        let user = UserId::new();
        let period = MonthPeriod::new(2025, 1).unwrap();

        assert!(repo
            .push(PlanRecord::new(user, period, plan(100), BTreeMap::new(), None))
            .unwrap()
            .is_none());
        let replaced = repo
            .push(PlanRecord::new(user, period, plan(200), BTreeMap::new(), None))
            .unwrap();
        assert_eq!(replaced.unwrap().plan.total_income.cents(), 100);
        repo.save().unwrap();

        let reloaded = PlanRepository::new(path);
        reloaded.load().unwrap();
        let current = reloaded.current(user, period).unwrap().unwrap();
        assert_eq!(current.plan.total_income.cents(), 200);
        assert_eq!(reloaded.history(user, period).unwrap().len(), 2);
        assert_eq!(reloaded.periods(user).unwrap(), vec![period]);
    }

    #[test]
    fn test_missing_plan() {
        let temp_dir = TempDir::new().unwrap();
        let repo = PlanRepository::new(temp_dir.path().join("plans.json"));
        repo.load().unwrap();
        assert!(repo
            .current(UserId::new(), MonthPeriod::new(2025, 1).unwrap())
            .unwrap()
            .is_none());
    }
}
