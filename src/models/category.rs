//! Expense categories and budget buckets
//!
//! Expenses are logged as either needs or wants. Savings is a budget bucket
//! but never an expense category: it's whatever income is left over.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Category an expense is logged against
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ExpenseCategory {
    Needs,
    Wants,
}

impl ExpenseCategory {
    pub fn all() -> &'static [ExpenseCategory] {
        &[ExpenseCategory::Needs, ExpenseCategory::Wants]
    }

    pub fn name(&self) -> &'static str {
        match self {
            Self::Needs => "Needs",
            Self::Wants => "Wants",
        }
    }

    pub fn bucket(&self) -> BudgetBucket {
        match self {
            Self::Needs => BudgetBucket::Needs,
            Self::Wants => BudgetBucket::Wants,
        }
    }
}

impl fmt::Display for ExpenseCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Needs => write!(f, "needs"),
            Self::Wants => write!(f, "wants"),
        }
    }
}

impl FromStr for ExpenseCategory {
    type Err = CategoryParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "needs" | "need" => Ok(Self::Needs),
            "wants" | "want" => Ok(Self::Wants),
            "savings" | "saving" => Err(CategoryParseError::Savings),
            other => Err(CategoryParseError::Unknown(other.to_string())),
        }
    }
}

/// One of the three 50/30/20 buckets
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BudgetBucket {
    Needs,
    Wants,
    Savings,
}

impl BudgetBucket {
    pub fn all() -> &'static [BudgetBucket] {
        &[BudgetBucket::Needs, BudgetBucket::Wants, BudgetBucket::Savings]
    }

    /// Target share of income, in percent
    pub fn target_percent(&self) -> u32 {
        match self {
            Self::Needs => 50,
            Self::Wants => 30,
            Self::Savings => 20,
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            Self::Needs => "Needs",
            Self::Wants => "Wants",
            Self::Savings => "Savings",
        }
    }
}

/// Error type for category parsing
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CategoryParseError {
    /// Savings is calculated from income, not logged
    Savings,
    Unknown(String),
}

impl fmt::Display for CategoryParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Savings => write!(
                f,
                "Savings is calculated from income and cannot be logged as an expense"
            ),
            Self::Unknown(s) => write!(f, "Unknown category '{}', expected needs or wants", s),
        }
    }
}

impl std::error::Error for CategoryParseError {}
