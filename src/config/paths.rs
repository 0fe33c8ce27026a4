//! Path management for daybudget
//!
//! ## Path Resolution Order
//!
//! 1. `DAYBUDGET_DATA_DIR` environment variable (if set)
//! 2. The platform config directory (`~/.config/daybudget` on Linux,
//!    `~/Library/Application Support/daybudget` on macOS, `%APPDATA%` on
//!    Windows)

use std::path::PathBuf;

use directories::ProjectDirs;

use crate::error::DayBudgetError;

/// Environment variable overriding the base directory
pub const DATA_DIR_ENV: &str = "DAYBUDGET_DATA_DIR";

/// Manages all paths used by daybudget
#[derive(Debug, Clone)]
pub struct DayBudgetPaths {
    base_dir: PathBuf,
}

impl DayBudgetPaths {
    /// Resolve the base directory from the environment or platform defaults
    ///
    /// # Errors
    ///
    /// Returns an error if no home directory can be determined.
    pub fn new() -> Result<Self, DayBudgetError> {
        let base_dir = if let Ok(custom) = std::env::var(DATA_DIR_ENV) {
            PathBuf::from(custom)
        } else {
            ProjectDirs::from("", "", "daybudget")
                .map(|dirs| dirs.config_dir().to_path_buf())
                .ok_or_else(|| {
                    DayBudgetError::Config("Could not determine a home directory".into())
                })?
        };

        Ok(Self { base_dir })
    }

    /// Create paths with a custom base directory (useful for testing)
    pub fn with_base_dir(base_dir: PathBuf) -> Self {
        Self { base_dir }
    }

    pub fn base_dir(&self) -> &PathBuf {
        &self.base_dir
    }

    /// Directory holding the JSON data files
    pub fn data_dir(&self) -> PathBuf {
        self.base_dir.join("data")
    }

    pub fn settings_file(&self) -> PathBuf {
        self.base_dir.join("config.json")
    }

    /// Optional region profile overrides
    pub fn profiles_file(&self) -> PathBuf {
        self.base_dir.join("profiles.json")
    }

    pub fn audit_log(&self) -> PathBuf {
        self.base_dir.join("audit.log")
    }

    /// Append-only log of redistribution events
    pub fn redistribution_log(&self) -> PathBuf {
        self.base_dir.join("redistribution.log")
    }

    pub fn plans_file(&self) -> PathBuf {
        self.data_dir().join("plans.json")
    }

    pub fn calendars_file(&self) -> PathBuf {
        self.data_dir().join("calendars.json")
    }

    pub fn transactions_file(&self) -> PathBuf {
        self.data_dir().join("transactions.json")
    }

    /// Ensure the base and data directories exist
    pub fn ensure_directories(&self) -> Result<(), DayBudgetError> {
        std::fs::create_dir_all(&self.base_dir)
            .map_err(|e| DayBudgetError::Io(format!("Failed to create base directory: {}", e)))?;

        std::fs::create_dir_all(self.data_dir())
            .map_err(|e| DayBudgetError::Io(format!("Failed to create data directory: {}", e)))?;

        Ok(())
    }

    /// Check if daybudget has been initialized (config file exists)
    pub fn is_initialized(&self) -> bool {
        self.settings_file().exists()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_custom_base_dir() {
        let temp_dir = TempDir::new().unwrap();
        let paths = DayBudgetPaths::with_base_dir(temp_dir.path().to_path_buf());

        assert_eq!(paths.base_dir(), temp_dir.path());
        assert_eq!(paths.data_dir(), temp_dir.path().join("data"));
        assert_eq!(
            paths.calendars_file(),
            temp_dir.path().join("data").join("calendars.json")
        );
    }

    #[test]
    fn test_ensure_directories() {
        let temp_dir = TempDir::new().unwrap();
        let paths = DayBudgetPaths::with_base_dir(temp_dir.path().join("nested"));

        assert!(!paths.is_initialized());
        paths.ensure_directories().unwrap();
        assert!(paths.data_dir().exists());
    }
}
