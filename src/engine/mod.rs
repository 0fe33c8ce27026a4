//! The budget engine
//!
//! Pure computation over the data models: no file or network I/O, no
//! global state. Region profiles and behavior tunables are injected.
//!
//! - [`IncomeClassifier`]: income to tier
//! - [`CategoryAllocator`]: income to a monthly plan
//! - [`CalendarBuilder`]: plan to a day-by-day calendar
//! - [`Redistributor`]: re-spreads a category after actual spend
//! - [`BehaviorAdjuster`]: nudges weights toward observed habits

pub mod allocator;
pub mod behavior;
pub mod builder;
pub mod classifier;
pub mod redistributor;

pub use allocator::{split_by_weight, CategoryAllocator};
pub use behavior::{BehaviorAdjuster, BehaviorReport, WeekdayProfile};
pub use builder::{CalendarBuilder, DEFAULT_DUE_DAY};
pub use classifier::IncomeClassifier;
pub use redistributor::Redistributor;
