//! daybudget - day-by-day budget calendar engine
//!
//! This library turns a user's monthly income, fixed obligations, savings
//! goal and declared spending habits into a per-day budget calendar, and
//! keeps that calendar honest as real spending comes in.
//!
//! # Architecture
//!
//! The crate is organized into the following modules:
//!
//! - `engine`: The pure computations (income classifier, category
//!   allocator, calendar builder, redistributor, behavior adjuster)
//! - `models`: Core data models (money, categories, plans, calendars, etc.)
//! - `config`: Paths, settings, and regional profiles
//! - `storage`: JSON file storage layer and per-category locks
//! - `services`: Planning, spending, and import workflows over storage
//! - `audit`: Audit logging system
//! - `cli`, `display`: Command handlers and terminal formatting
//! - `error`: Custom error types
//!
//! # Example
//!
//! ```rust,ignore
//! use daybudget::config::{DayBudgetPaths, RegionProfiles, Settings};
//! use daybudget::services::PlanningService;
//! use daybudget::storage::Storage;
//!
//! let paths = DayBudgetPaths::new()?;
//! let settings = Settings::load_or_create(&paths)?;
//! let storage = Storage::new(paths)?;
//! storage.load_all()?;
//!
//! let planning = PlanningService::new(&storage, &settings, RegionProfiles::builtin());
//! let outcome = planning.plan_month(&profile, period, false, today)?;
//! ```

pub mod audit;
pub mod cli;
pub mod config;
pub mod display;
pub mod engine;
pub mod error;
pub mod logging;
pub mod models;
pub mod services;
pub mod storage;

pub use error::{DayBudgetError, DayBudgetResult};
