//! Configuration module for daybudget
//!
//! - Platform-aware path resolution
//! - User settings persistence
//! - Regional profiles injected into the classifier and allocator

pub mod paths;
pub mod profiles;
pub mod settings;

pub use paths::DayBudgetPaths;
pub use profiles::{RegionProfile, RegionProfiles};
pub use settings::{BehaviorSettings, RedistributionMode, RedistributionSettings, Settings};
