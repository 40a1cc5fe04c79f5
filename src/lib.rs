//! budget-tracker - 50/30/20 personal budgeting from the terminal
//!
//! Monthly income is split into needs (50%), wants (30%) and savings (the
//! rest). Expenses are logged as actual or planned against needs or wants;
//! savings is whatever income is left. From that the crate derives what
//! remains per bucket and a month-by-month forecast for the year.
//!
//! # Architecture
//!
//! The crate is organized into the following modules:
//!
//! - `config`: Path resolution and application preferences
//! - `error`: Custom error types
//! - `models`: Expenses, settings, money and the derived budget records
//! - `engine`: Pure budget derivations (allocation, spending, forecast)
//! - `storage`: JSON document storage with atomic writes
//! - `services`: Business logic on top of storage
//! - `auth`: Session and allow-list gate
//! - `display`: Terminal formatting
//! - `cli`: Command handlers for the `budget` binary
//!
//! # Example
//!
//! ```rust,ignore
//! use budget_tracker::config::BudgetPaths;
//! use budget_tracker::services::BudgetService;
//! use budget_tracker::storage::Storage;
//!
//! let storage = Storage::new(BudgetPaths::new()?)?;
//! storage.load_all();
//! let forecast = BudgetService::new(&storage).forecast(None)?;
//! ```

pub mod auth;
pub mod cli;
pub mod config;
pub mod display;
pub mod engine;
pub mod error;
pub mod models;
pub mod services;
pub mod storage;

pub use error::{BudgetError, BudgetResult};
