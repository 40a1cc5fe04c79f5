//! Budget engine
//!
//! Pure functions over income, expenses and a month. Nothing here reads the
//! clock or touches storage; services pass the current month in.

pub mod allocation;
pub mod fixed;
pub mod forecast;
pub mod remaining;
pub mod spending;

pub use allocation::allocate;
pub use fixed::{fixed_entries, fixed_expenses_for_month, FixedEntry};
pub use forecast::{classify_health, spending_rates, yearly_forecast};
pub use remaining::{category_progress, monthly_summary, remaining_budget, residual_savings};
pub use spending::{category_spending, expenses_by_category, expenses_for_month, planned_spending};
