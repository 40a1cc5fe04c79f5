//! Budget settings: monthly income and recurring fixed expenses
//!
//! Stored under the `budget-tracker-settings` key. Field names on the wire
//! are camelCase.

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;

use super::category::ExpenseCategory;
use super::ids::FixedExpenseId;
use super::money::Money;

/// How often a fixed expense recurs
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Recurrence {
    /// Once a month, on the 1st
    Monthly,
    /// Every `n` days, counted from the 1st of each month
    EveryDays(u32),
}

impl fmt::Display for Recurrence {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Monthly => write!(f, "monthly"),
            Self::EveryDays(days) => write!(f, "every {} days", days),
        }
    }
}

impl std::str::FromStr for Recurrence {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        if s.eq_ignore_ascii_case("monthly") {
            return Ok(Self::Monthly);
        }
        match s.parse::<u32>() {
            Ok(0) => Err("Recurrence interval must be at least one day".to_string()),
            Ok(days) => Ok(Self::EveryDays(days)),
            Err(_) => Err(format!(
                "Invalid recurrence '{}', expected 'monthly' or a number of days",
                s
            )),
        }
    }
}

// Wire form is either the string "monthly" or a bare day count.
#[derive(Serialize, Deserialize)]
#[serde(untagged)]
enum RawRecurrence {
    Days(u32),
    Named(String),
}

impl Serialize for Recurrence {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Self::Monthly => RawRecurrence::Named("monthly".to_string()).serialize(serializer),
            Self::EveryDays(days) => RawRecurrence::Days(*days).serialize(serializer),
        }
    }
}

impl<'de> Deserialize<'de> for Recurrence {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        match RawRecurrence::deserialize(deserializer)? {
            RawRecurrence::Days(0) => Err(serde::de::Error::custom(
                "recurrence interval must be at least one day",
            )),
            RawRecurrence::Days(days) => Ok(Self::EveryDays(days)),
            RawRecurrence::Named(name) if name == "monthly" => Ok(Self::Monthly),
            RawRecurrence::Named(name) => Err(serde::de::Error::custom(format!(
                "unknown recurrence '{}'",
                name
            ))),
        }
    }
}

/// The two built-in fixed expenses
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FixedExpenses {
    #[serde(default)]
    pub mortgage: Money,
    #[serde(default)]
    pub car_payment: Money,
}

impl Default for FixedExpenses {
    fn default() -> Self {
        Self {
            mortgage: Money::from_units(1200),
            car_payment: Money::from_units(237),
        }
    }
}

/// A user-defined recurring expense
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FixedExpense {
    pub id: FixedExpenseId,
    pub name: String,
    pub value: Money,
    pub category: ExpenseCategory,
    pub recurrence: Recurrence,
}

impl FixedExpense {
    pub fn new(
        name: impl Into<String>,
        value: Money,
        category: ExpenseCategory,
        recurrence: Recurrence,
    ) -> Self {
        Self {
            id: FixedExpenseId::generate(),
            name: name.into(),
            value,
            category,
            recurrence,
        }
    }
}

/// Income and fixed expenses the budget is derived from
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BudgetSettings {
    pub monthly_income: Money,

    #[serde(default)]
    pub fixed_expenses: FixedExpenses,

    #[serde(default)]
    pub custom_fixed_expenses: Vec<FixedExpense>,
}

impl Default for BudgetSettings {
    fn default() -> Self {
        Self {
            monthly_income: Money::from_units(3000),
            fixed_expenses: FixedExpenses::default(),
            custom_fixed_expenses: Vec::new(),
        }
    }
}

impl BudgetSettings {
    /// Validate the settings
    pub fn validate(&self) -> Result<(), SettingsValidationError> {
        if self.monthly_income.is_negative() {
            return Err(SettingsValidationError::NegativeIncome);
        }
        if self.fixed_expenses.mortgage.is_negative() {
            return Err(SettingsValidationError::NegativeFixedExpense("mortgage".into()));
        }
        if self.fixed_expenses.car_payment.is_negative() {
            return Err(SettingsValidationError::NegativeFixedExpense(
                "car payment".into(),
            ));
        }
        for fixed in &self.custom_fixed_expenses {
            if fixed.name.trim().is_empty() {
                return Err(SettingsValidationError::EmptyName);
            }
            if fixed.value.is_negative() {
                return Err(SettingsValidationError::NegativeFixedExpense(
                    fixed.name.clone(),
                ));
            }
        }
        Ok(())
    }

    /// Find a custom fixed expense by ID or (case-insensitive) name
    pub fn find_fixed(&self, identifier: &str) -> Option<&FixedExpense> {
        self.custom_fixed_expenses.iter().find(|f| {
            f.id.as_str() == identifier || f.name.eq_ignore_ascii_case(identifier.trim())
        })
    }
}

/// A partial settings update; `None` leaves a field untouched
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BudgetSettingsUpdate {
    pub monthly_income: Option<Money>,
    pub fixed_expenses: Option<FixedExpenses>,
    pub custom_fixed_expenses: Option<Vec<FixedExpense>>,
}

impl BudgetSettingsUpdate {
    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }

    pub fn apply(self, settings: &mut BudgetSettings) {
        if let Some(income) = self.monthly_income {
            settings.monthly_income = income;
        }
        if let Some(fixed) = self.fixed_expenses {
            settings.fixed_expenses = fixed;
        }
        if let Some(custom) = self.custom_fixed_expenses {
            settings.custom_fixed_expenses = custom;
        }
    }
}

/// Validation errors for budget settings
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SettingsValidationError {
    NegativeIncome,
    NegativeFixedExpense(String),
    EmptyName,
}

impl fmt::Display for SettingsValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NegativeIncome => write!(f, "Monthly income cannot be negative"),
            Self::NegativeFixedExpense(name) => {
                write!(f, "Fixed expense '{}' cannot be negative", name)
            }
            Self::EmptyName => write!(f, "Fixed expense name cannot be empty"),
        }
    }
}

impl std::error::Error for SettingsValidationError {}
