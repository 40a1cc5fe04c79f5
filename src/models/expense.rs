//! Expense model
//!
//! An expense is either *actual* (it happened, and counts against the
//! month's spending) or *planned* (expected in some `plannedMonth`).
//! Field names on the wire are camelCase.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fmt;

use super::category::ExpenseCategory;
use super::ids::ExpenseId;
use super::money::Money;
use super::month::YearMonth;

fn is_false(value: &bool) -> bool {
    !*value
}

/// A single expense record
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Expense {
    pub id: ExpenseId,

    /// When it happened (actual) or when it was entered (planned)
    pub date: NaiveDate,

    pub amount: Money,

    pub category: ExpenseCategory,

    #[serde(default)]
    pub description: String,

    /// Recurring expense generated from the budget settings
    #[serde(default, skip_serializing_if = "is_false")]
    pub is_fixed: bool,

    /// Absent or false means planned
    #[serde(default)]
    pub is_actual: bool,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub planned_month: Option<YearMonth>,
}

/// An expense that hasn't been given an ID yet
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewExpense {
    pub date: NaiveDate,
    pub amount: Money,
    pub category: ExpenseCategory,
    pub description: String,
    pub is_fixed: bool,
    pub is_actual: bool,
    pub planned_month: Option<YearMonth>,
}

impl NewExpense {
    /// An expense that already happened on `date`
    pub fn actual(
        date: NaiveDate,
        amount: Money,
        category: ExpenseCategory,
        description: impl Into<String>,
    ) -> Self {
        Self {
            date,
            amount,
            category,
            description: description.into(),
            is_fixed: false,
            is_actual: true,
            planned_month: None,
        }
    }

    /// An expense expected in `month`, entered on `today`
    pub fn planned(
        month: YearMonth,
        today: NaiveDate,
        amount: Money,
        category: ExpenseCategory,
        description: impl Into<String>,
    ) -> Self {
        Self {
            date: today,
            amount,
            category,
            description: description.into(),
            is_fixed: false,
            is_actual: false,
            planned_month: Some(month),
        }
    }

    /// Mark as a recurring fixed expense
    pub fn fixed(mut self) -> Self {
        self.is_fixed = true;
        self
    }

    /// Attach an ID
    pub fn into_expense(self, id: ExpenseId) -> Expense {
        Expense {
            id,
            date: self.date,
            amount: self.amount,
            category: self.category,
            description: self.description,
            is_fixed: self.is_fixed,
            is_actual: self.is_actual,
            planned_month: self.planned_month,
        }
    }
}

impl Expense {
    pub fn is_planned(&self) -> bool {
        !self.is_actual
    }

    /// Dated within `month`
    pub fn is_dated_in(&self, month: YearMonth) -> bool {
        month.contains(self.date)
    }

    /// Dated within `month` or planned for it
    pub fn belongs_to(&self, month: YearMonth) -> bool {
        self.is_dated_in(month) || self.planned_month == Some(month)
    }

    /// Counts as actual spending in `month`
    pub fn is_spent_in(&self, month: YearMonth) -> bool {
        self.is_actual && self.is_dated_in(month)
    }

    /// Counts as planned spending in `month`
    pub fn is_planned_in(&self, month: YearMonth) -> bool {
        !self.is_actual && self.belongs_to(month)
    }

    /// Validate the record
    pub fn validate(&self) -> Result<(), ExpenseValidationError> {
        if self.amount.is_negative() {
            return Err(ExpenseValidationError::NegativeAmount(self.amount));
        }

        if self.is_planned() && self.planned_month.is_none() {
            return Err(ExpenseValidationError::PlannedWithoutMonth);
        }

        Ok(())
    }

    /// Validate only the amount; used for legacy records being edited
    pub fn validate_amount(&self) -> Result<(), ExpenseValidationError> {
        if self.amount.is_negative() {
            return Err(ExpenseValidationError::NegativeAmount(self.amount));
        }
        Ok(())
    }
}

impl fmt::Display for Expense {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} {} {} ({})",
            self.date, self.description, self.amount, self.category
        )
    }
}

/// A partial update merged into an existing expense
///
/// `None` leaves a field untouched. `planned_month` is tri-state:
/// `Some(None)` clears it.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ExpenseUpdate {
    pub date: Option<NaiveDate>,
    pub amount: Option<Money>,
    pub category: Option<ExpenseCategory>,
    pub description: Option<String>,
    pub is_fixed: Option<bool>,
    pub is_actual: Option<bool>,
    pub planned_month: Option<Option<YearMonth>>,
}

impl ExpenseUpdate {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn date(mut self, date: NaiveDate) -> Self {
        self.date = Some(date);
        self
    }

    pub fn amount(mut self, amount: Money) -> Self {
        self.amount = Some(amount);
        self
    }

    pub fn category(mut self, category: ExpenseCategory) -> Self {
        self.category = Some(category);
        self
    }

    pub fn description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    pub fn actual(mut self, is_actual: bool) -> Self {
        self.is_actual = Some(is_actual);
        self
    }

    pub fn planned_month(mut self, month: Option<YearMonth>) -> Self {
        self.planned_month = Some(month);
        self
    }

    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }

    /// Whether the update changes actual/planned status or the planned month
    pub fn touches_status(&self) -> bool {
        self.is_actual.is_some() || self.planned_month.is_some()
    }

    /// Merge into `expense`; the ID never changes
    pub fn apply(&self, expense: &mut Expense) {
        if let Some(date) = self.date {
            expense.date = date;
        }
        if let Some(amount) = self.amount {
            expense.amount = amount;
        }
        if let Some(category) = self.category {
            expense.category = category;
        }
        if let Some(description) = &self.description {
            expense.description = description.clone();
        }
        if let Some(is_fixed) = self.is_fixed {
            expense.is_fixed = is_fixed;
        }
        if let Some(is_actual) = self.is_actual {
            expense.is_actual = is_actual;
        }
        if let Some(planned_month) = self.planned_month {
            expense.planned_month = planned_month;
        }
    }
}

/// Validation errors for expenses
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ExpenseValidationError {
    NegativeAmount(Money),
    PlannedWithoutMonth,
}

impl fmt::Display for ExpenseValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NegativeAmount(amount) => {
                write!(f, "Expense amount cannot be negative ({})", amount)
            }
            Self::PlannedWithoutMonth => {
                write!(f, "A planned expense needs a planned month (YYYY-MM)")
            }
        }
    }
}

impl std::error::Error for ExpenseValidationError {}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn june() -> YearMonth {
        YearMonth::new(2024, 6).unwrap()
    }

    #[test]
    fn test_actual_expense() {
        let expense = NewExpense::actual(
            date(2024, 6, 3),
            Money::from_units(40),
            ExpenseCategory::Wants,
            "Cinema",
        )
        .into_expense(ExpenseId::from_string("1"));

        assert!(expense.is_actual);
        assert!(expense.is_spent_in(june()));
        assert!(!expense.is_planned_in(june()));
        assert!(expense.validate().is_ok());
    }

    #[test]
    fn test_planned_expense_belongs_to_entry_and_planned_month() {
        let december = YearMonth::new(2024, 12).unwrap();
        let expense = NewExpense::planned(
            december,
            date(2024, 6, 10),
            Money::from_units(300),
            ExpenseCategory::Wants,
            "Gifts",
        )
        .into_expense(ExpenseId::from_string("2"));

        assert!(expense.is_planned_in(december));
        assert!(expense.is_planned_in(june()));
        assert!(!expense.is_spent_in(june()));
        assert!(expense.validate().is_ok());
    }

    #[test]
    fn test_validate_rejects_planned_without_month() {
        let mut expense = NewExpense::actual(
            date(2024, 6, 3),
            Money::from_units(40),
            ExpenseCategory::Needs,
            "Groceries",
        )
        .into_expense(ExpenseId::from_string("3"));
        expense.is_actual = false;

        assert_eq!(
            expense.validate(),
            Err(ExpenseValidationError::PlannedWithoutMonth)
        );
    }

    #[test]
    fn test_validate_rejects_negative_amount() {
        let expense = NewExpense::actual(
            date(2024, 6, 3),
            Money::from_units(-1),
            ExpenseCategory::Needs,
            "Refund",
        )
        .into_expense(ExpenseId::from_string("4"));

        assert!(matches!(
            expense.validate(),
            Err(ExpenseValidationError::NegativeAmount(_))
        ));
    }

    #[test]
    fn test_update_only_touches_given_fields() {
        let original = NewExpense::actual(
            date(2024, 6, 3),
            Money::from_units(50),
            ExpenseCategory::Needs,
            "Pharmacy",
        )
        .into_expense(ExpenseId::from_string("5"));

        let mut updated = original.clone();
        ExpenseUpdate::new()
            .amount(Money::from_units(75))
            .apply(&mut updated);

        assert_eq!(updated.amount, Money::from_units(75));
        updated.amount = original.amount;
        assert_eq!(updated, original);
    }

    #[test]
    fn test_update_can_clear_planned_month() {
        let mut expense = NewExpense::planned(
            june(),
            date(2024, 6, 1),
            Money::from_units(10),
            ExpenseCategory::Wants,
            "Book",
        )
        .into_expense(ExpenseId::from_string("6"));

        let update = ExpenseUpdate::new().actual(true).planned_month(None);
        assert!(update.touches_status());
        update.apply(&mut expense);

        assert!(expense.is_actual);
        assert_eq!(expense.planned_month, None);
    }

    #[test]
    fn test_deserialize_legacy_record() {
        let json = r#"{
            "id": "1718000000000",
            "date": "2024-06-01",
            "amount": 12.5,
            "category": "needs",
            "description": "Bread"
        }"#;
        let expense: Expense = serde_json::from_str(json).unwrap();

        assert_eq!(expense.amount.cents(), 1250);
        assert!(!expense.is_actual);
        assert!(!expense.is_fixed);
        assert_eq!(expense.planned_month, None);
    }

    #[test]
    fn test_serialize_camel_case() {
        let expense = NewExpense::planned(
            june(),
            date(2024, 6, 1),
            Money::from_units(10),
            ExpenseCategory::Wants,
            "Book",
        )
        .into_expense(ExpenseId::from_string("7"));

        let json = serde_json::to_value(&expense).unwrap();
        assert_eq!(json["isActual"], false);
        assert_eq!(json["plannedMonth"], "2024-06");
        assert!(json.get("isFixed").is_none());
    }
}
