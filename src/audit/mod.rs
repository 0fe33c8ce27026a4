//! Audit logging
//!
//! Plan, calendar, and transaction writes are recorded in an append-only
//! JSONL log (`audit.log`) with before/after snapshots or a change
//! summary.

mod diff;
mod entry;
mod logger;

pub use diff::generate_diff;
pub use entry::{AuditEntry, EntityType, Operation};
pub use logger::AuditLogger;
