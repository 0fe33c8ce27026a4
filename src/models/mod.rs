//! Core data models for daybudget
//!
//! Money, categories, plans, calendars, and the records the engine reads
//! and produces.

pub mod adjustment;
pub mod calendar;
pub mod category;
pub mod frequency;
pub mod ids;
pub mod money;
pub mod onboarding;
pub mod period;
pub mod plan;
pub mod redistribution;
pub mod tier;
pub mod transaction;
pub mod weights;

pub use adjustment::{BehaviorPattern, BehavioralAdjustment};
pub use calendar::{CalendarDay, MonthCalendar};
pub use category::{Category, CategoryKind, CATEGORY_SET_VERSION};
pub use frequency::{FrequencyUnit, SpendingFrequency};
pub use ids::{EventId, TransactionId, UserId};
pub use money::Money;
pub use onboarding::{AllocationInput, FrequencyAnswer, OnboardingProfile};
pub use period::MonthPeriod;
pub use plan::{MonthlyBudgetPlan, WeightSource};
pub use redistribution::{DayDelta, RedistributionEvent, RedistributionOutcome};
pub use tier::IncomeTier;
pub use transaction::Transaction;
pub use weights::CategoryWeightMap;
