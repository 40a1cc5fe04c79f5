//! Core data models for budget-tracker
//!
//! Stored records (expenses, budget settings), the value types they are
//! built from (money, months, IDs), and the derived budget records.

pub mod budget;
pub mod category;
pub mod expense;
pub mod ids;
pub mod money;
pub mod month;
pub mod settings;

pub use budget::{
    BudgetHealth, CategoryProgress, CategorySpending, MonthlyBudget, MonthlyProjection,
    MonthlySummary, ProjectedSpending, RemainingBudget, SpendingRates, YearlyForecast,
};
pub use category::{BudgetBucket, CategoryParseError, ExpenseCategory};
pub use expense::{Expense, ExpenseUpdate, ExpenseValidationError, NewExpense};
pub use ids::{ExpenseId, FixedExpenseId};
pub use money::{Money, MoneyParseError};
pub use month::{MonthParseError, YearMonth};
pub use settings::{
    BudgetSettings, BudgetSettingsUpdate, FixedExpense, FixedExpenses, Recurrence,
    SettingsValidationError,
};
