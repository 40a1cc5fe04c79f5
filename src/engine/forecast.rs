//! Yearly forecast
//!
//! Projects each month of a year from the nominal 50/30/20 budget. The
//! anchor month (today's) uses actual spending; every other month applies
//! spending rates derived from it.

use crate::models::{
    BudgetHealth, CategorySpending, Money, MonthlyBudget, MonthlyProjection, ProjectedSpending,
    SpendingRates, YearMonth, YearlyForecast,
};

use super::remaining::residual_savings;

/// Above this share of income (in percent) a month is a warning
pub const WARNING_PERCENT: i64 = 95;
/// Above this share of income (in percent) a month is in danger
pub const DANGER_PERCENT: i64 = 105;

/// Rates applied to the nominal budget for non-current months
///
/// With no actual spending yet the defaults apply. Otherwise each rate is
/// actual over nominal, with the residual standing in for savings. Rates
/// above 1.0 are kept as-is.
pub fn spending_rates(budget: &MonthlyBudget, current: &CategorySpending) -> SpendingRates {
    if current.total().is_zero() {
        return SpendingRates::DEFAULT;
    }

    SpendingRates {
        needs: current.needs.ratio_to(budget.needs),
        wants: current.wants.ratio_to(budget.wants),
        savings: residual_savings(budget, current).ratio_to(budget.savings),
    }
}

/// Classify projected outgoings against income
///
/// Compared in cents so the 95% and 105% boundaries are exact. Zero income
/// is treated as ratio 0.
pub fn classify_health(total: Money, income: Money) -> BudgetHealth {
    if income.is_zero() {
        return BudgetHealth::Good;
    }

    let scaled_total = i128::from(total.cents()) * 100;
    let income = i128::from(income.cents());

    if scaled_total > income * i128::from(DANGER_PERCENT) {
        BudgetHealth::Danger
    } else if scaled_total > income * i128::from(WARNING_PERCENT) {
        BudgetHealth::Warning
    } else {
        BudgetHealth::Good
    }
}

fn project_month(
    budget: &MonthlyBudget,
    current: &CategorySpending,
    rates: &SpendingRates,
    is_current: bool,
) -> ProjectedSpending {
    if is_current {
        ProjectedSpending {
            needs: current.needs,
            wants: current.wants,
            savings: residual_savings(budget, current),
        }
    } else {
        ProjectedSpending {
            needs: budget.needs.scale_round(rates.needs),
            wants: budget.wants.scale_round(rates.wants),
            savings: budget.savings.scale_round(rates.savings),
        }
    }
}

/// Twelve monthly projections for `year` plus yearly aggregates
///
/// `anchor` is the month `current` was measured in; it only counts as the
/// current month when it falls inside `year`.
pub fn yearly_forecast(
    budget: &MonthlyBudget,
    current: &CategorySpending,
    anchor: YearMonth,
    year: i32,
) -> YearlyForecast {
    let rates = spending_rates(budget, current);
    let income = budget.total;

    let mut cumulative_savings = Money::zero();
    let months: Vec<MonthlyProjection> = YearMonth::months_of_year(year)
        .into_iter()
        .map(|month| {
            let is_current = month == anchor;
            let projected = project_month(budget, current, &rates, is_current);
            cumulative_savings += projected.savings;

            MonthlyProjection {
                month,
                income,
                projected,
                cumulative_savings,
                health: classify_health(projected.total(), income),
                is_current,
            }
        })
        .collect();

    let annual_income = income.times(12);
    let projected_annual_spending: Money = months.iter().map(|m| m.projected.total()).sum();
    let year_end_savings = cumulative_savings;
    let savings_target = Money::from_cents(annual_income.cents() / 5);

    YearlyForecast {
        year,
        rates,
        months,
        annual_income,
        projected_annual_spending,
        year_end_savings,
        savings_rate: year_end_savings.ratio_to(annual_income),
        savings_target,
        savings_gap: year_end_savings - savings_target,
        meets_target: annual_income.is_positive()
            && i128::from(year_end_savings.cents()) * 5 >= i128::from(annual_income.cents()),
    }
}
