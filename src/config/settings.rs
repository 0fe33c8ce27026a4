//! User settings for daybudget
//!
//! Manages display preferences, the redistribution trigger mode, and the
//! behavior-adjuster tunables.

use serde::{Deserialize, Serialize};

use super::paths::DayBudgetPaths;
use crate::error::DayBudgetError;
use crate::models::UserId;

/// When redistribution runs
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum RedistributionMode {
    /// Right after each recorded spend, for the spend's category
    #[default]
    OnTransaction,
    /// Only when explicitly requested (e.g., a nightly job)
    Batch,
}

/// Redistribution settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RedistributionSettings {
    #[serde(default)]
    pub mode: RedistributionMode,

    /// Treat "today" as already closed out: its spend counts toward
    /// spent-to-date and only later days are re-planned
    #[serde(default)]
    pub close_today: bool,
}

impl Default for RedistributionSettings {
    fn default() -> Self {
        Self {
            mode: RedistributionMode::default(),
            close_today: false,
        }
    }
}

/// Behavior adjuster tunables
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BehaviorSettings {
    /// Length of the trailing history window in days
    #[serde(default = "default_window_days")]
    pub window_days: u32,

    /// Minimum transactions in the window before any nudge is made
    #[serde(default = "default_min_transactions")]
    pub min_transactions: usize,

    /// Number of equal periods the window is split into
    #[serde(default = "default_periods")]
    pub periods: usize,

    /// Periods in which a pattern must hold to count as stable
    #[serde(default = "default_stable_periods")]
    pub stable_periods: usize,

    /// Observed share must exceed planned share by more than this
    #[serde(default = "default_share_threshold")]
    pub share_threshold: f64,

    /// Weight added to a dominant category
    #[serde(default = "default_increment")]
    pub increment: f64,

    /// Fraction of spend on weekends that marks a weekend spender
    #[serde(default = "default_weekend_threshold")]
    pub weekend_threshold: f64,
}

fn default_window_days() -> u32 {
    60
}

fn default_min_transactions() -> usize {
    10
}

fn default_periods() -> usize {
    3
}

fn default_stable_periods() -> usize {
    2
}

fn default_share_threshold() -> f64 {
    0.05
}

fn default_increment() -> f64 {
    0.05
}

fn default_weekend_threshold() -> f64 {
    0.5
}

impl Default for BehaviorSettings {
    fn default() -> Self {
        Self {
            window_days: default_window_days(),
            min_transactions: default_min_transactions(),
            periods: default_periods(),
            stable_periods: default_stable_periods(),
            share_threshold: default_share_threshold(),
            increment: default_increment(),
            weekend_threshold: default_weekend_threshold(),
        }
    }
}

/// User settings for daybudget
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Settings {
    /// Schema version for migration support
    #[serde(default = "default_schema_version")]
    pub schema_version: u32,

    /// The local user this installation plans for
    #[serde(default)]
    pub user_id: UserId,

    /// Default currency symbol
    #[serde(default = "default_currency")]
    pub currency_symbol: String,

    /// Date format preference (strftime format)
    #[serde(default = "default_date_format")]
    pub date_format: String,

    /// Default region code for onboarding answers that omit one
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub default_region: Option<String>,

    #[serde(default)]
    pub redistribution: RedistributionSettings,

    #[serde(default)]
    pub behavior: BehaviorSettings,
}

fn default_schema_version() -> u32 {
    1
}

fn default_currency() -> String {
    "$".to_string()
}

fn default_date_format() -> String {
    "%Y-%m-%d".to_string()
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            schema_version: default_schema_version(),
            user_id: UserId::new(),
            currency_symbol: default_currency(),
            date_format: default_date_format(),
            default_region: None,
            redistribution: RedistributionSettings::default(),
            behavior: BehaviorSettings::default(),
        }
    }
}

impl Settings {
    /// Load settings from disk, or create default settings if file doesn't exist
    pub fn load_or_create(paths: &DayBudgetPaths) -> Result<Self, DayBudgetError> {
        let settings_path = paths.settings_file();

        if settings_path.exists() {
            let contents = std::fs::read_to_string(&settings_path).map_err(|e| {
                DayBudgetError::Io(format!("Failed to read settings file: {}", e))
            })?;

            let settings: Settings = serde_json::from_str(&contents).map_err(|e| {
                DayBudgetError::Config(format!("Failed to parse settings file: {}", e))
            })?;

            Ok(settings)
        } else {
            // Don't save yet - let caller decide when to persist
            Ok(Settings::default())
        }
    }

    /// Save settings to disk
    pub fn save(&self, paths: &DayBudgetPaths) -> Result<(), DayBudgetError> {
        paths.ensure_directories()?;

        let contents = serde_json::to_string_pretty(self).map_err(|e| {
            DayBudgetError::Config(format!("Failed to serialize settings: {}", e))
        })?;

        std::fs::write(paths.settings_file(), contents)
            .map_err(|e| DayBudgetError::Io(format!("Failed to write settings file: {}", e)))?;

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_default_settings() {
        let settings = Settings::default();
        assert_eq!(settings.redistribution.mode, RedistributionMode::OnTransaction);
        assert!(!settings.redistribution.close_today);
        assert_eq!(settings.behavior.window_days, 60);
        assert_eq!(settings.behavior.min_transactions, 10);
    }

    #[test]
    fn test_save_and_load() {
        let temp_dir = TempDir::new().unwrap();
        let paths = DayBudgetPaths::with_base_dir(temp_dir.path().to_path_buf());

        let mut settings = Settings::default();
        settings.redistribution.mode = RedistributionMode::Batch;
        settings.behavior.increment = 0.1;
        settings.save(&paths).unwrap();

        let loaded = Settings::load_or_create(&paths).unwrap();
        assert_eq!(loaded.redistribution.mode, RedistributionMode::Batch);
        assert_eq!(loaded.behavior.increment, 0.1);
        assert_eq!(loaded.user_id, settings.user_id);
    }

    #[test]
    fn test_partial_file_uses_defaults() {
        let settings: Settings =
            serde_json::from_str(r#"{"redistribution": {"mode": "batch"}}"#).unwrap();
        assert_eq!(settings.redistribution.mode, RedistributionMode::Batch);
        assert_eq!(settings.behavior.share_threshold, 0.05);
        assert_eq!(settings.currency_symbol, "$");
    }
}
