//! Display formatting for terminal output
//!
//! Formats plans, calendars, redistribution events, behavior reports and
//! transaction history as plain text and tables.

pub mod behavior;
pub mod calendar;
pub mod events;
pub mod plan;
pub mod transaction;

pub use behavior::format_behavior_report;
pub use calendar::format_calendar;
pub use events::format_event_list;
pub use plan::format_plan;
pub use transaction::format_transaction_list;
