//! Configuration module for budget-tracker
//!
//! - XDG-compliant path resolution
//! - Application preferences (currency format, logging, access control)

pub mod paths;
pub mod settings;

pub use paths::BudgetPaths;
pub use settings::{AppSettings, CurrencyFormat, SymbolPosition};
