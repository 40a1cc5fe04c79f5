//! Remaining budget and per-bucket progress

use crate::models::{
    BudgetBucket, CategoryProgress, CategorySpending, Money, MonthlyBudget, MonthlySummary,
    RemainingBudget, YearMonth,
};

/// Savings target as a percentage of income
pub const SAVINGS_TARGET_PERCENT: f64 = 20.0;

/// Income left after actual needs and wants spending
pub fn residual_savings(budget: &MonthlyBudget, spending: &CategorySpending) -> Money {
    budget.total - spending.needs - spending.wants
}

/// Budget minus actual spending per category
///
/// Savings isn't budgeted-then-tracked: both `savings` and `total` are the
/// residual income, not the nominal 20% figure.
pub fn remaining_budget(budget: &MonthlyBudget, spending: &CategorySpending) -> RemainingBudget {
    let savings = residual_savings(budget, spending);
    RemainingBudget {
        needs: budget.needs - spending.needs,
        wants: budget.wants - spending.wants,
        savings,
        total: savings,
    }
}

/// `part / whole * 100`, or 0 when `whole` is zero
pub fn percent_of(part: Money, whole: Money) -> f64 {
    part.ratio_to(whole) * 100.0
}

/// Progress rows for needs, wants and savings
///
/// Over budget is a warning state only. For savings, `spent` is the
/// residual and the row is "over" when the residual falls below the target.
pub fn category_progress(
    budget: &MonthlyBudget,
    spending: &CategorySpending,
    planned: &CategorySpending,
) -> Vec<CategoryProgress> {
    BudgetBucket::all()
        .iter()
        .map(|&bucket| {
            let budgeted = budget.for_bucket(bucket);
            match bucket {
                BudgetBucket::Needs | BudgetBucket::Wants => {
                    let (spent, planned) = match bucket {
                        BudgetBucket::Needs => (spending.needs, planned.needs),
                        _ => (spending.wants, planned.wants),
                    };
                    CategoryProgress {
                        bucket,
                        budgeted,
                        spent,
                        planned,
                        remaining: budgeted - spent,
                        percent_used: percent_of(spent, budgeted),
                        over_budget: spent > budgeted,
                    }
                }
                BudgetBucket::Savings => {
                    let saved = residual_savings(budget, spending);
                    CategoryProgress {
                        bucket,
                        budgeted,
                        spent: saved,
                        planned: Money::zero(),
                        remaining: saved - budgeted,
                        percent_used: percent_of(saved, budgeted),
                        over_budget: saved < budgeted,
                    }
                }
            }
        })
        .collect()
}

/// Headline figures for `month`
pub fn monthly_summary(
    month: YearMonth,
    budget: &MonthlyBudget,
    spending: &CategorySpending,
) -> MonthlySummary {
    let total_spent = spending.total();
    let savings = residual_savings(budget, spending);
    let savings_rate = percent_of(savings, budget.total);

    MonthlySummary {
        month,
        income: budget.total,
        total_spent,
        percent_of_income_spent: percent_of(total_spent, budget.total),
        savings,
        savings_rate,
        on_track: budget.total.is_positive() && savings_rate >= SAVINGS_TARGET_PERCENT,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::allocate;

    fn spending(needs: i64, wants: i64) -> CategorySpending {
        CategorySpending {
            needs: Money::from_units(needs),
            wants: Money::from_units(wants),
        }
    }

    #[test]
    fn test_remaining_budget() {
        let budget = allocate(Money::from_units(3000));
        let remaining = remaining_budget(&budget, &spending(100, 0));

        assert_eq!(remaining.needs, Money::from_units(1400));
        assert_eq!(remaining.wants, Money::from_units(900));
        assert_eq!(remaining.savings, Money::from_units(2900));
        assert_eq!(remaining.total, remaining.savings);
    }

    #[test]
    fn test_remaining_goes_negative_when_overspent() {
        let budget = allocate(Money::from_units(3000));
        let remaining = remaining_budget(&budget, &spending(1600, 1000));

        assert_eq!(remaining.needs, Money::from_units(-100));
        assert_eq!(remaining.wants, Money::from_units(-100));
        assert_eq!(remaining.savings, Money::from_units(400));
    }

    #[test]
    fn test_category_progress_flags_over_budget() {
        let budget = allocate(Money::from_units(3000));
        let rows = category_progress(&budget, &spending(1600, 450), &spending(0, 120));

        let needs = &rows[0];
        assert_eq!(needs.bucket, BudgetBucket::Needs);
        assert!(needs.over_budget);
        assert_eq!(needs.remaining, Money::from_units(-100));

        let wants = &rows[1];
        assert!(!wants.over_budget);
        assert_eq!(wants.planned, Money::from_units(120));
        assert!((wants.percent_used - 50.0).abs() < 1e-9);

        let savings = &rows[2];
        assert_eq!(savings.spent, Money::from_units(950));
        assert!(!savings.over_budget);
    }

    #[test]
    fn test_percentages_with_zero_income() {
        let budget = allocate(Money::zero());
        let rows = category_progress(&budget, &spending(10, 0), &CategorySpending::default());
        assert_eq!(rows[0].percent_used, 0.0);

        let summary = monthly_summary(YearMonth::current(), &budget, &spending(10, 0));
        assert_eq!(summary.savings_rate, 0.0);
        assert!(!summary.on_track);
    }

    #[test]
    fn test_monthly_summary() {
        let budget = allocate(Money::from_units(3000));
        let month = YearMonth::parse("2024-06").unwrap();
        let summary = monthly_summary(month, &budget, &spending(1500, 600));

        assert_eq!(summary.total_spent, Money::from_units(2100));
        assert_eq!(summary.savings, Money::from_units(900));
        assert!((summary.savings_rate - 30.0).abs() < 1e-9);
        assert!((summary.percent_of_income_spent - 70.0).abs() < 1e-9);
        assert!(summary.on_track);
    }
}
