//! Materialising fixed expenses into expense records

use crate::models::{
    BudgetSettings, Expense, ExpenseCategory, ExpenseId, Money, NewExpense, Recurrence, YearMonth,
};

/// ID key of the built-in mortgage entry
pub const MORTGAGE_KEY: &str = "mortgage";
/// ID key of the built-in car payment entry
pub const CAR_PAYMENT_KEY: &str = "car";

/// One configured fixed expense, built-in or custom
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FixedEntry {
    /// Prefix of every generated expense ID
    pub key: String,
    pub name: String,
    pub value: Money,
    pub category: ExpenseCategory,
    pub recurrence: Recurrence,
}

/// Every fixed expense in `settings`, built-ins first
pub fn fixed_entries(settings: &BudgetSettings) -> Vec<FixedEntry> {
    let mut entries = vec![
        FixedEntry {
            key: MORTGAGE_KEY.to_string(),
            name: "Mortgage Payment".to_string(),
            value: settings.fixed_expenses.mortgage,
            category: ExpenseCategory::Needs,
            recurrence: Recurrence::Monthly,
        },
        FixedEntry {
            key: CAR_PAYMENT_KEY.to_string(),
            name: "Car Payment".to_string(),
            value: settings.fixed_expenses.car_payment,
            category: ExpenseCategory::Needs,
            recurrence: Recurrence::Monthly,
        },
    ];

    entries.extend(settings.custom_fixed_expenses.iter().map(|fixed| FixedEntry {
        key: fixed.id.to_string(),
        name: fixed.name.clone(),
        value: fixed.value,
        category: fixed.category,
        recurrence: fixed.recurrence,
    }));

    entries
}

/// Actual, fixed expense records for every occurrence in `month`
///
/// Monthly entries land on the 1st with ID `<key>-YYYY-MM`. Interval
/// entries land on day 1, 1+n, 1+2n... with ID `<key>-YYYY-MM-DD`.
/// Zero-valued entries produce nothing.
pub fn fixed_expenses_for_month(settings: &BudgetSettings, month: YearMonth) -> Vec<Expense> {
    let mut expenses = Vec::new();

    for entry in fixed_entries(settings) {
        if entry.value.is_zero() {
            continue;
        }

        match entry.recurrence {
            Recurrence::Monthly => {
                let id = ExpenseId::from_string(format!("{}-{}", entry.key, month));
                expenses.push(occurrence(&entry, id, month.first_day()));
            }
            Recurrence::EveryDays(interval) => {
                let step = interval.max(1) as usize;
                for day in (1..=month.days()).step_by(step) {
                    if let Some(date) = month.day(day) {
                        let id = ExpenseId::from_string(format!(
                            "{}-{}",
                            entry.key,
                            date.format("%Y-%m-%d")
                        ));
                        expenses.push(occurrence(&entry, id, date));
                    }
                }
            }
        }
    }

    expenses
}

fn occurrence(entry: &FixedEntry, id: ExpenseId, date: chrono::NaiveDate) -> Expense {
    NewExpense::actual(date, entry.value, entry.category, entry.name.clone())
        .fixed()
        .into_expense(id)
}
