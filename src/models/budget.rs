//! Derived budget records
//!
//! Everything here is recomputed from income and expenses on every read and
//! never persisted. Serialize is derived for `--json` output only.

use serde::Serialize;
use std::fmt;

use super::category::{BudgetBucket, ExpenseCategory};
use super::money::Money;
use super::month::YearMonth;

/// The 50/30/20 split of one month's income
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct MonthlyBudget {
    pub needs: Money,
    pub wants: Money,
    /// Remainder after needs and wants, absorbs rounding
    pub savings: Money,
    /// Monthly income
    pub total: Money,
}

impl MonthlyBudget {
    pub fn for_bucket(&self, bucket: BudgetBucket) -> Money {
        match bucket {
            BudgetBucket::Needs => self.needs,
            BudgetBucket::Wants => self.wants,
            BudgetBucket::Savings => self.savings,
        }
    }

    pub fn for_category(&self, category: ExpenseCategory) -> Money {
        self.for_bucket(category.bucket())
    }
}

/// Per-category sums of expense amounts
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub struct CategorySpending {
    pub needs: Money,
    pub wants: Money,
}

impl CategorySpending {
    pub fn get(&self, category: ExpenseCategory) -> Money {
        match category {
            ExpenseCategory::Needs => self.needs,
            ExpenseCategory::Wants => self.wants,
        }
    }

    pub fn add(&mut self, category: ExpenseCategory, amount: Money) {
        match category {
            ExpenseCategory::Needs => self.needs += amount,
            ExpenseCategory::Wants => self.wants += amount,
        }
    }

    pub fn total(&self) -> Money {
        self.needs + self.wants
    }
}

/// What is left of each bucket this month
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct RemainingBudget {
    pub needs: Money,
    pub wants: Money,
    /// Income minus actual needs and wants spending
    pub savings: Money,
    /// Same figure as `savings`
    pub total: Money,
}

/// Progress of one bucket against its budget
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CategoryProgress {
    #[serde(serialize_with = "serialize_bucket")]
    pub bucket: BudgetBucket,
    pub budgeted: Money,
    /// For savings: the residual actually left over
    pub spent: Money,
    pub planned: Money,
    pub remaining: Money,
    pub percent_used: f64,
    pub over_budget: bool,
}

fn serialize_bucket<S: serde::Serializer>(
    bucket: &BudgetBucket,
    serializer: S,
) -> Result<S::Ok, S::Error> {
    serializer.serialize_str(&bucket.name().to_ascii_lowercase())
}

/// Headline figures for a month
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MonthlySummary {
    pub month: YearMonth,
    pub income: Money,
    pub total_spent: Money,
    pub percent_of_income_spent: f64,
    /// Income left after actual spending
    pub savings: Money,
    pub savings_rate: f64,
    /// Savings rate reaches the 20% target
    pub on_track: bool,
}

/// Qualitative health of a month's projected spending
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum BudgetHealth {
    /// At most 95% of income
    Good,
    /// Above 95% and up to 105%
    Warning,
    /// Above 105%
    Danger,
}

impl BudgetHealth {
    pub fn symbol(&self) -> &'static str {
        match self {
            Self::Good => "✓",
            Self::Warning | Self::Danger => "⚠",
        }
    }
}

impl fmt::Display for BudgetHealth {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Good => write!(f, "good"),
            Self::Warning => write!(f, "warning"),
            Self::Danger => write!(f, "danger"),
        }
    }
}

/// Projected amounts for the three buckets in one month
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub struct ProjectedSpending {
    pub needs: Money,
    pub wants: Money,
    pub savings: Money,
}

impl ProjectedSpending {
    pub fn total(&self) -> Money {
        self.needs + self.wants + self.savings
    }
}

/// Ratios applied to the nominal budget to project a month
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct SpendingRates {
    pub needs: f64,
    pub wants: f64,
    pub savings: f64,
}

impl SpendingRates {
    /// Used when the current month has no actual spending yet
    pub const DEFAULT: SpendingRates = SpendingRates {
        needs: 0.85,
        wants: 0.70,
        savings: 0.90,
    };
}

/// One month of a yearly forecast
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MonthlyProjection {
    pub month: YearMonth,
    pub income: Money,
    pub projected: ProjectedSpending,
    pub cumulative_savings: Money,
    pub health: BudgetHealth,
    /// Built from actual spending rather than rates
    pub is_current: bool,
}

/// Twelve monthly projections plus yearly aggregates
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct YearlyForecast {
    pub year: i32,
    pub rates: SpendingRates,
    pub months: Vec<MonthlyProjection>,
    pub annual_income: Money,
    pub projected_annual_spending: Money,
    pub year_end_savings: Money,
    /// Year-end savings as a share of annual income (0.0-1.0)
    pub savings_rate: f64,
    /// 20% of annual income
    pub savings_target: Money,
    /// `year_end_savings - savings_target`
    pub savings_gap: Money,
    pub meets_target: bool,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_category_spending_accumulates() {
        let mut spending = CategorySpending::default();
        spending.add(ExpenseCategory::Needs, Money::from_units(100));
        spending.add(ExpenseCategory::Needs, Money::from_units(50));
        spending.add(ExpenseCategory::Wants, Money::from_units(20));

        assert_eq!(spending.get(ExpenseCategory::Needs), Money::from_units(150));
        assert_eq!(spending.total(), Money::from_units(170));
    }

    #[test]
    fn test_budget_health_serializes_lowercase() {
        assert_eq!(serde_json::to_string(&BudgetHealth::Warning).unwrap(), "\"warning\"");
        assert_eq!(BudgetHealth::Danger.to_string(), "danger");
    }

    #[test]
    fn test_projected_total_includes_savings() {
        let projected = ProjectedSpending {
            needs: Money::from_units(1275),
            wants: Money::from_units(630),
            savings: Money::from_units(540),
        };
        assert_eq!(projected.total(), Money::from_units(2445));
    }
}
