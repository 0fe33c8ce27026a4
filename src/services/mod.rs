//! Service layer for daybudget
//!
//! Services own all I/O around the engine: they load inputs from storage,
//! run the engine, persist results, and write the audit trail.

pub mod import;
pub mod planning;
pub mod spending;

pub use import::{ImportResult, ImportService};
pub use planning::{PlanOutcome, PlanningService};
pub use spending::{SpendOutcome, SpendingService};
