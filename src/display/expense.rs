//! Expense display formatting

use tabled::settings::Style;
use tabled::{Table, Tabled};

use super::{truncate, DisplayFormat};
use crate::models::{Expense, Money};

#[derive(Tabled)]
struct ExpenseRow {
    #[tabled(rename = "ID")]
    id: String,
    #[tabled(rename = "Date")]
    date: String,
    #[tabled(rename = "Description")]
    description: String,
    #[tabled(rename = "Category")]
    category: String,
    #[tabled(rename = "Status")]
    status: String,
    #[tabled(rename = "Amount")]
    amount: String,
}

fn status_label(expense: &Expense) -> String {
    let mut label = if expense.is_actual {
        "actual".to_string()
    } else {
        match expense.planned_month {
            Some(month) => format!("planned {}", month),
            None => "planned".to_string(),
        }
    };
    if expense.is_fixed {
        label.push_str(" (fixed)");
    }
    label
}

/// Format a list of expenses as a table
pub fn format_expense_table(expenses: &[Expense], format: &DisplayFormat) -> String {
    if expenses.is_empty() {
        return "No expenses found.\n".to_string();
    }

    let rows = expenses.iter().map(|e| ExpenseRow {
        id: e.id.short().to_string(),
        date: format.date(e.date),
        description: truncate(&e.description, 30),
        category: e.category.name().to_string(),
        status: status_label(e),
        amount: format.money(e.amount),
    });

    let mut table = Table::new(rows);
    table.with(Style::rounded());

    let total: Money = expenses.iter().map(|e| e.amount).sum();
    format!("{}\nTotal: {}\n", table, format.money(total))
}

/// Format one expense in full
pub fn format_expense_details(expense: &Expense, format: &DisplayFormat) -> String {
    let mut output = String::new();

    output.push_str(&format!("Expense:     {}\n", expense.id));
    output.push_str(&format!("Date:        {}\n", format.date(expense.date)));
    output.push_str(&format!("Amount:      {}\n", format.money(expense.amount)));
    output.push_str(&format!("Category:    {}\n", expense.category.name()));
    if !expense.description.is_empty() {
        output.push_str(&format!("Description: {}\n", expense.description));
    }
    output.push_str(&format!("Status:      {}\n", status_label(expense)));

    output
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{ExpenseCategory, ExpenseId, NewExpense, YearMonth};
    use chrono::NaiveDate;

    fn rent() -> Expense {
        NewExpense::actual(
            NaiveDate::from_ymd_opt(2024, 6, 1).unwrap(),
            Money::from_units(1200),
            ExpenseCategory::Needs,
            "Mortgage",
        )
        .fixed()
        .into_expense(ExpenseId::from_string("mortgage-2024-06"))
    }

    #[test]
    fn test_empty_table() {
        let output = format_expense_table(&[], &DisplayFormat::default());
        assert!(output.contains("No expenses"));
    }

    #[test]
    fn test_table_lists_rows_and_total() {
        let planned = NewExpense::planned(
            YearMonth::parse("2024-07").unwrap(),
            NaiveDate::from_ymd_opt(2024, 6, 3).unwrap(),
            Money::from_cents(4999),
            ExpenseCategory::Wants,
            "Concert",
        )
        .into_expense(ExpenseId::from_string("a1b2c3d4e5"));

        let output = format_expense_table(&[rent(), planned], &DisplayFormat::default());
        assert!(output.contains("mortgage"));
        assert!(output.contains("actual (fixed)"));
        assert!(output.contains("planned 2024-07"));
        assert!(output.contains("1.200,00 €"));
        assert!(output.contains("Total: 1.249,99 €"));
    }

    #[test]
    fn test_details() {
        let output = format_expense_details(&rent(), &DisplayFormat::default());
        assert!(output.contains("mortgage-2024-06"));
        assert!(output.contains("Category:    Needs"));
    }
}
