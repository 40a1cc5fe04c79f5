//! Spending aggregation over an expense list

use crate::models::{CategorySpending, Expense, ExpenseCategory, YearMonth};

/// Sum of *actual* expenses dated in `month`, per category
///
/// Only records with `is_actual == true` count. Order doesn't matter and
/// duplicate IDs are summed as separate records.
pub fn category_spending(expenses: &[Expense], month: YearMonth) -> CategorySpending {
    sum_by_category(expenses.iter().filter(|e| e.is_spent_in(month)))
}

/// Sum of *planned* expenses for `month`, per category
///
/// A planned expense counts when it is dated in the month or its
/// `planned_month` is the month. Actual expenses never count, even with a
/// leftover `planned_month`.
pub fn planned_spending(expenses: &[Expense], month: YearMonth) -> CategorySpending {
    sum_by_category(expenses.iter().filter(|e| e.is_planned_in(month)))
}

/// All expenses dated in `month`, newest first
pub fn expenses_for_month(expenses: &[Expense], month: YearMonth) -> Vec<Expense> {
    let mut selected: Vec<_> = expenses
        .iter()
        .filter(|e| e.is_dated_in(month))
        .cloned()
        .collect();
    selected.sort_by(|a, b| b.date.cmp(&a.date));
    selected
}

/// Expenses of one category dated in or planned for `month`
pub fn expenses_by_category(
    expenses: &[Expense],
    category: ExpenseCategory,
    month: YearMonth,
) -> Vec<Expense> {
    expenses
        .iter()
        .filter(|e| e.category == category && e.belongs_to(month))
        .cloned()
        .collect()
}

fn sum_by_category<'a>(expenses: impl Iterator<Item = &'a Expense>) -> CategorySpending {
    expenses.fold(CategorySpending::default(), |mut acc, expense| {
        acc.add(expense.category, expense.amount);
        acc
    })
}
