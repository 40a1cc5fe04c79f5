//! Expense service
//!
//! Create, update, delete and toggle expenses, plus the month and category
//! listings. Every mutation is written through to disk immediately.

use chrono::{Local, NaiveDate};

use crate::engine;
use crate::error::{BudgetError, BudgetResult};
use crate::models::{
    CategorySpending, Expense, ExpenseCategory, ExpenseId, ExpenseUpdate, NewExpense, YearMonth,
};
use crate::storage::Storage;

/// Service for expense management
pub struct ExpenseService<'a> {
    storage: &'a Storage,
    today: NaiveDate,
}

impl<'a> ExpenseService<'a> {
    /// Create a new expense service using the local date
    pub fn new(storage: &'a Storage) -> Self {
        Self::with_today(storage, Local::now().date_naive())
    }

    /// Create a service with a fixed "today" (useful for testing)
    pub fn with_today(storage: &'a Storage, today: NaiveDate) -> Self {
        Self { storage, today }
    }

    pub fn today(&self) -> NaiveDate {
        self.today
    }

    pub fn current_month(&self) -> YearMonth {
        YearMonth::from_date(self.today)
    }

    /// Add an expense under a freshly generated ID
    pub fn add(&self, new_expense: NewExpense) -> BudgetResult<Expense> {
        let expense = new_expense.into_expense(ExpenseId::generate());

        expense
            .validate()
            .map_err(|e| BudgetError::Validation(e.to_string()))?;

        self.storage.expenses.push(expense.clone())?;
        self.storage.expenses.save()?;

        tracing::info!(id = %expense.id, amount = %expense.amount, category = %expense.category, "added expense");
        Ok(expense)
    }

    /// Merge a partial update into the expense with this ID
    ///
    /// An unknown ID is not an error: nothing changes and `None` comes
    /// back. The planned-month rule is only checked when the update touches
    /// the expense's status, so legacy records stay editable.
    pub fn update(&self, id: &ExpenseId, update: ExpenseUpdate) -> BudgetResult<Option<Expense>> {
        let Some(mut expense) = self.storage.expenses.get(id)? else {
            tracing::debug!(%id, "update of unknown expense ignored");
            return Ok(None);
        };

        update.apply(&mut expense);

        let validation = if update.touches_status() {
            expense.validate()
        } else {
            expense.validate_amount()
        };
        validation.map_err(|e| BudgetError::Validation(e.to_string()))?;

        self.storage.expenses.replace(expense.clone())?;
        self.storage.expenses.save()?;

        tracing::info!(%id, "updated expense");
        Ok(Some(expense))
    }

    /// Delete the expense with this ID; an unknown ID changes nothing
    pub fn delete(&self, id: &ExpenseId) -> BudgetResult<Option<Expense>> {
        let removed = self.storage.expenses.remove(id)?;

        match &removed {
            Some(_) => {
                self.storage.expenses.save()?;
                tracing::info!(%id, "deleted expense");
            }
            None => tracing::debug!(%id, "delete of unknown expense ignored"),
        }

        Ok(removed)
    }

    /// Flip an expense between actual and planned
    ///
    /// Becoming actual dates it today. Becoming planned keeps the date and
    /// plans it for the date's month unless it already has a planned month.
    pub fn toggle_status(&self, id: &ExpenseId) -> BudgetResult<Option<Expense>> {
        let Some(expense) = self.storage.expenses.get(id)? else {
            return Ok(None);
        };

        let update = if expense.is_actual {
            let planned_month = expense
                .planned_month
                .unwrap_or_else(|| YearMonth::from_date(expense.date));
            ExpenseUpdate::new()
                .actual(false)
                .planned_month(Some(planned_month))
        } else {
            ExpenseUpdate::new().actual(true).date(self.today)
        };

        self.update(id, update)
    }

    /// Get an expense by ID
    pub fn get(&self, id: &ExpenseId) -> BudgetResult<Option<Expense>> {
        self.storage.expenses.get(id)
    }

    /// Find an expense by full ID or a unique ID prefix
    pub fn find(&self, identifier: &str) -> BudgetResult<Option<Expense>> {
        let identifier = identifier.trim();
        if identifier.is_empty() {
            return Ok(None);
        }

        if let Some(expense) = self.storage.expenses.get(&ExpenseId::from_string(identifier))? {
            return Ok(Some(expense));
        }

        let matches: Vec<_> = self
            .storage
            .expenses
            .get_all()?
            .into_iter()
            .filter(|e| e.id.as_str().starts_with(identifier))
            .collect();

        match matches.len() {
            0 => Ok(None),
            1 => Ok(matches.into_iter().next()),
            n => Err(BudgetError::Validation(format!(
                "ID prefix '{}' matches {} expenses",
                identifier, n
            ))),
        }
    }

    /// All expenses in stored order
    pub fn list_all(&self) -> BudgetResult<Vec<Expense>> {
        self.storage.expenses.get_all()
    }

    /// Expenses dated in `month`, newest first
    pub fn list_month(&self, month: YearMonth) -> BudgetResult<Vec<Expense>> {
        Ok(engine::expenses_for_month(&self.storage.expenses.get_all()?, month))
    }

    /// Expenses dated in the current month, newest first
    pub fn list_current_month(&self) -> BudgetResult<Vec<Expense>> {
        self.list_month(self.current_month())
    }

    /// Expenses of one category dated in or planned for `month`
    pub fn list_by_category(
        &self,
        category: ExpenseCategory,
        month: YearMonth,
    ) -> BudgetResult<Vec<Expense>> {
        Ok(engine::expenses_by_category(
            &self.storage.expenses.get_all()?,
            category,
            month,
        ))
    }

    /// Actual spending in `month`
    pub fn spending(&self, month: YearMonth) -> BudgetResult<CategorySpending> {
        Ok(engine::category_spending(&self.storage.expenses.get_all()?, month))
    }

    /// Planned spending for `month`
    pub fn planned(&self, month: YearMonth) -> BudgetResult<CategorySpending> {
        Ok(engine::planned_spending(&self.storage.expenses.get_all()?, month))
    }
}
