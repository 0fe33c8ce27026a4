//! Append-only audit log
//!
//! One JSON object per line, flushed on every write.

use std::path::PathBuf;

use crate::error::DayBudgetResult;
use crate::storage::file_io::{append_jsonl, read_jsonl};

use super::entry::AuditEntry;

/// Writes audit entries to the audit log file
pub struct AuditLogger {
    log_path: PathBuf,
}

impl AuditLogger {
    pub fn new(log_path: PathBuf) -> Self {
        Self { log_path }
    }

    /// Append a single entry
    pub fn log(&self, entry: &AuditEntry) -> DayBudgetResult<()> {
        append_jsonl(&self.log_path, std::slice::from_ref(entry))
    }

    /// Append several entries with a single flush
    pub fn log_batch(&self, entries: &[AuditEntry]) -> DayBudgetResult<()> {
        append_jsonl(&self.log_path, entries)
    }

    /// All entries, oldest first
    pub fn read_all(&self) -> DayBudgetResult<Vec<AuditEntry>> {
        read_jsonl(&self.log_path)
    }

    /// The most recent `count` entries, oldest first
    pub fn read_recent(&self, count: usize) -> DayBudgetResult<Vec<AuditEntry>> {
        let mut entries = self.read_all()?;
        let start = entries.len().saturating_sub(count);
        Ok(entries.split_off(start))
    }
}
