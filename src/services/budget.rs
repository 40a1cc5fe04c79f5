//! Budget service
//!
//! Ties stored income and expenses to the engine: the monthly overview,
//! the headline summary and the yearly forecast.

use chrono::{Datelike, Local, NaiveDate};
use serde::Serialize;

use crate::engine;
use crate::error::BudgetResult;
use crate::models::{
    CategoryProgress, CategorySpending, MonthlyBudget, MonthlySummary, RemainingBudget,
    YearMonth, YearlyForecast,
};
use crate::storage::Storage;

/// Service for budget derivation
pub struct BudgetService<'a> {
    storage: &'a Storage,
    today: NaiveDate,
}

/// Everything shown for one month
#[derive(Debug, Clone, Serialize)]
pub struct BudgetOverview {
    pub month: YearMonth,
    pub budget: MonthlyBudget,
    pub spending: CategorySpending,
    pub planned: CategorySpending,
    pub remaining: RemainingBudget,
    pub progress: Vec<CategoryProgress>,
    pub summary: MonthlySummary,
}

impl<'a> BudgetService<'a> {
    /// Create a new budget service using the local date
    pub fn new(storage: &'a Storage) -> Self {
        Self::with_today(storage, Local::now().date_naive())
    }

    /// Create a service with a fixed "today" (useful for testing)
    pub fn with_today(storage: &'a Storage, today: NaiveDate) -> Self {
        Self { storage, today }
    }

    pub fn current_month(&self) -> YearMonth {
        YearMonth::from_date(self.today)
    }

    /// The 50/30/20 split of the configured income
    pub fn monthly_budget(&self) -> BudgetResult<MonthlyBudget> {
        let settings = self.storage.settings.get()?;
        Ok(engine::allocate(settings.monthly_income))
    }

    /// Budget, spending, remaining and progress for `month`
    pub fn overview(&self, month: YearMonth) -> BudgetResult<BudgetOverview> {
        let budget = self.monthly_budget()?;
        let expenses = self.storage.expenses.get_all()?;
        let spending = engine::category_spending(&expenses, month);
        let planned = engine::planned_spending(&expenses, month);

        Ok(BudgetOverview {
            month,
            budget,
            spending,
            planned,
            remaining: engine::remaining_budget(&budget, &spending),
            progress: engine::category_progress(&budget, &spending, &planned),
            summary: engine::monthly_summary(month, &budget, &spending),
        })
    }

    /// Headline figures for `month`
    pub fn summary(&self, month: YearMonth) -> BudgetResult<MonthlySummary> {
        let budget = self.monthly_budget()?;
        let spending = engine::category_spending(&self.storage.expenses.get_all()?, month);
        Ok(engine::monthly_summary(month, &budget, &spending))
    }

    /// Forecast `year` (default: this year) from this month's spending
    pub fn forecast(&self, year: Option<i32>) -> BudgetResult<YearlyForecast> {
        let anchor = self.current_month();
        let year = year.unwrap_or_else(|| self.today.year());

        let budget = self.monthly_budget()?;
        let current = engine::category_spending(&self.storage.expenses.get_all()?, anchor);

        let forecast = engine::yearly_forecast(&budget, &current, anchor, year);
        tracing::debug!(year, rates = ?forecast.rates, "computed forecast");
        Ok(forecast)
    }
}
