//! Service layer for budget-tracker
//!
//! The service layer sits between the CLI and storage: it validates input,
//! writes mutations through, and feeds stored data to the engine.

pub mod budget;
pub mod expense;
pub mod settings;

pub use budget::{BudgetOverview, BudgetService};
pub use expense::ExpenseService;
pub use settings::SettingsService;
