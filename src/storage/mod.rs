//! Storage layer for daybudget
//!
//! JSON file repositories with atomic writes, append-only JSONL logs for
//! audit entries and redistribution events, and the keyed lock registry
//! that serializes redistribution.

pub mod calendars;
pub mod file_io;
pub mod locks;
pub mod plans;
pub mod redistribution_log;
pub mod transactions;

pub use calendars::CalendarRepository;
pub use file_io::{read_json, write_json_atomic};
pub use locks::{RedistributionKey, RedistributionLocks};
pub use plans::{PlanRecord, PlanRepository};
pub use redistribution_log::RedistributionLog;
pub use transactions::{TransactionQuery, TransactionRepository};

use serde::Serialize;

use crate::audit::{generate_diff, AuditEntry, AuditLogger, EntityType, Operation};
use crate::config::paths::DayBudgetPaths;
use crate::error::DayBudgetResult;

/// Main storage coordinator that provides access to all repositories
pub struct Storage {
    pub plans: PlanRepository,
    pub calendars: CalendarRepository,
    pub transactions: TransactionRepository,
    pub events: RedistributionLog,
    pub locks: RedistributionLocks,
    audit: AuditLogger,
}

impl Storage {
    /// Create a storage instance, creating directories as needed
    pub fn new(paths: DayBudgetPaths) -> DayBudgetResult<Self> {
        paths.ensure_directories()?;

        Ok(Self {
            plans: PlanRepository::new(paths.plans_file()),
            calendars: CalendarRepository::new(paths.calendars_file()),
            transactions: TransactionRepository::new(paths.transactions_file()),
            events: RedistributionLog::new(paths.redistribution_log()),
            locks: RedistributionLocks::new(),
            audit: AuditLogger::new(paths.audit_log()),
        })
    }

    pub fn audit(&self) -> &AuditLogger {
        &self.audit
    }

    /// Load all data from disk
    pub fn load_all(&self) -> DayBudgetResult<()> {
        self.plans.load()?;
        self.calendars.load()?;
        self.transactions.load()?;
        Ok(())
    }

    /// Audit a newly created entity
    pub fn log_create<T: Serialize>(
        &self,
        entity_type: EntityType,
        entity_id: impl Into<String>,
        entity_name: Option<String>,
        entity: &T,
    ) -> DayBudgetResult<()> {
        self.audit
            .log(&AuditEntry::create(entity_type, entity_id, entity_name, entity))
    }

    /// Audit an update, summarizing the top-level fields that changed
    pub fn log_update<T: Serialize>(
        &self,
        entity_type: EntityType,
        entity_id: impl Into<String>,
        entity_name: Option<String>,
        before: &T,
        after: &T,
    ) -> DayBudgetResult<()> {
        let diff = match (serde_json::to_value(before), serde_json::to_value(after)) {
            (Ok(b), Ok(a)) => generate_diff(&b, &a),
            _ => None,
        };
        self.audit.log(&AuditEntry::update(
            entity_type,
            entity_id,
            entity_name,
            before,
            after,
            diff,
        ))
    }

    /// Audit a change recorded only as a summary
    pub fn log_summary(
        &self,
        operation: Operation,
        entity_type: EntityType,
        entity_id: impl Into<String>,
        summary: impl Into<String>,
    ) -> DayBudgetResult<()> {
        self.audit
            .log(&AuditEntry::summary(operation, entity_type, entity_id, summary))
    }
}
