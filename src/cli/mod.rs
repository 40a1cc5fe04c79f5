//! CLI command handlers
//!
//! This module contains the implementation of CLI commands,
//! bridging the clap argument parsing with the service layer.

pub mod auth;
pub mod budget;
pub mod expense;
pub mod settings;

pub use auth::{handle_auth_command, AuthCommands};
pub use budget::{handle_budget_command, BudgetCommands};
pub use expense::{handle_expense_command, ExpenseCommands};
pub use settings::{handle_settings_command, SettingsCommands};

use chrono::NaiveDate;
use serde::Serialize;

use crate::error::{BudgetError, BudgetResult};
use crate::models::{ExpenseCategory, Money, Recurrence, YearMonth};

/// Parse an amount like `12.50`, `12,50` or `1.234,56 €`
pub fn parse_amount(input: &str) -> BudgetResult<Money> {
    let amount = Money::parse(input).map_err(|e| BudgetError::Validation(e.to_string()))?;
    if amount.is_negative() {
        return Err(BudgetError::Validation(format!(
            "Amount cannot be negative: {}",
            input
        )));
    }
    Ok(amount)
}

/// Parse a `YYYY-MM-DD` date
pub fn parse_date(input: &str) -> BudgetResult<NaiveDate> {
    NaiveDate::parse_from_str(input.trim(), "%Y-%m-%d").map_err(|_| {
        BudgetError::Validation(format!("Invalid date '{}', expected YYYY-MM-DD", input))
    })
}

/// Parse a `YYYY-MM` month
pub fn parse_month(input: &str) -> BudgetResult<YearMonth> {
    YearMonth::parse(input).map_err(|e| BudgetError::Validation(e.to_string()))
}

/// Parse `needs` or `wants`
pub fn parse_category(input: &str) -> BudgetResult<ExpenseCategory> {
    input
        .parse()
        .map_err(|e: crate::models::CategoryParseError| BudgetError::Validation(e.to_string()))
}

/// Parse `monthly` or a number of days
pub fn parse_recurrence(input: &str) -> BudgetResult<Recurrence> {
    input.parse().map_err(BudgetError::Validation)
}

/// Print a value as pretty JSON
pub fn print_json<T: Serialize>(value: &T) -> BudgetResult<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_amount() {
        assert_eq!(parse_amount("12,50").unwrap(), Money::from_cents(1250));
        assert!(parse_amount("-3").unwrap_err().is_validation());
        assert!(parse_amount("lots").is_err());
        assert!(parse_amount("100000000000000000").unwrap_err().is_validation());
        assert!(parse_amount("12.-5").is_err());
    }

    #[test]
    fn test_parse_category_refuses_savings() {
        assert_eq!(parse_category("Wants").unwrap(), ExpenseCategory::Wants);
        let err = parse_category("savings").unwrap_err();
        assert!(err.is_validation());
    }

    #[test]
    fn test_parse_date_and_month() {
        assert!(parse_date("2024-06-31").is_err());
        assert_eq!(parse_month("2024-06").unwrap().month(), 6);
        assert!(parse_month("2024-13").is_err());
    }

    #[test]
    fn test_parse_recurrence() {
        assert_eq!(parse_recurrence("monthly").unwrap(), Recurrence::Monthly);
        assert_eq!(parse_recurrence("14").unwrap(), Recurrence::EveryDays(14));
        assert!(parse_recurrence("0").is_err());
    }
}
