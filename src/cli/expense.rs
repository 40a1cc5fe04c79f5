//! Expense CLI commands
//!
//! Implements CLI commands for recording, planning and editing expenses.

use clap::Subcommand;

use super::{parse_amount, parse_category, parse_date, parse_month, print_json};
use crate::display::{format_expense_details, format_expense_table, DisplayFormat};
use crate::error::{BudgetError, BudgetResult};
use crate::models::{Expense, ExpenseUpdate, NewExpense};
use crate::services::ExpenseService;
use crate::storage::Storage;

/// Expense subcommands
#[derive(Subcommand)]
pub enum ExpenseCommands {
    /// Record an expense that already happened
    Add {
        /// Amount (e.g. 12.50 or 12,50)
        amount: String,
        /// What it was for
        description: String,
        /// needs or wants
        #[arg(short, long, default_value = "needs")]
        category: String,
        /// Date (YYYY-MM-DD), defaults to today
        #[arg(short, long)]
        date: Option<String>,
    },
    /// Plan an expense for a month
    Plan {
        /// Amount (e.g. 12.50 or 12,50)
        amount: String,
        /// What it is for
        description: String,
        /// needs or wants
        #[arg(short, long, default_value = "needs")]
        category: String,
        /// Month it is expected in (YYYY-MM), defaults to this month
        #[arg(short, long)]
        month: Option<String>,
    },
    /// List expenses dated in a month
    List {
        /// Month (YYYY-MM), defaults to this month
        #[arg(short, long)]
        month: Option<String>,
        /// List every expense regardless of month
        #[arg(long)]
        all: bool,
        /// Output JSON
        #[arg(long)]
        json: bool,
    },
    /// Show expense details
    Show {
        /// Expense ID or unique ID prefix
        id: String,
    },
    /// Edit an expense
    Edit {
        /// Expense ID or unique ID prefix
        id: String,
        #[arg(short, long)]
        amount: Option<String>,
        #[arg(long)]
        description: Option<String>,
        #[arg(short, long)]
        category: Option<String>,
        /// Date (YYYY-MM-DD)
        #[arg(short, long)]
        date: Option<String>,
        /// Planned month (YYYY-MM)
        #[arg(short, long)]
        month: Option<String>,
        /// Allow editing a fixed expense
        #[arg(short, long)]
        force: bool,
    },
    /// Delete an expense
    Delete {
        /// Expense ID or unique ID prefix
        id: String,
        /// Allow deleting a fixed expense
        #[arg(short, long)]
        force: bool,
    },
    /// Switch an expense between actual and planned
    Toggle {
        /// Expense ID or unique ID prefix
        id: String,
    },
    /// List one category's expenses for a month, planned ones included
    Category {
        /// needs or wants
        category: String,
        /// Month (YYYY-MM), defaults to this month
        #[arg(short, long)]
        month: Option<String>,
    },
}

/// Handle an expense command
pub fn handle_expense_command(
    storage: &Storage,
    format: &DisplayFormat,
    cmd: ExpenseCommands,
) -> BudgetResult<()> {
    let service = ExpenseService::new(storage);

    match cmd {
        ExpenseCommands::Add {
            amount,
            description,
            category,
            date,
        } => {
            let date = match date {
                Some(d) => parse_date(&d)?,
                None => service.today(),
            };
            let expense = service.add(NewExpense::actual(
                date,
                parse_amount(&amount)?,
                parse_category(&category)?,
                description,
            ))?;

            println!(
                "Added {} expense: {} {}",
                expense.category,
                expense.description,
                format.money(expense.amount)
            );
            println!("  ID: {}", expense.id);
        }

        ExpenseCommands::Plan {
            amount,
            description,
            category,
            month,
        } => {
            let month = match month {
                Some(m) => parse_month(&m)?,
                None => service.current_month(),
            };
            let expense = service.add(NewExpense::planned(
                month,
                service.today(),
                parse_amount(&amount)?,
                parse_category(&category)?,
                description,
            ))?;

            println!(
                "Planned {} expense for {} {}: {} {}",
                expense.category,
                month.name(),
                month.year(),
                expense.description,
                format.money(expense.amount)
            );
            println!("  ID: {}", expense.id);
        }

        ExpenseCommands::List { month, all, json } => {
            let expenses = if all {
                service.list_all()?
            } else {
                match month {
                    Some(m) => service.list_month(parse_month(&m)?)?,
                    None => service.list_current_month()?,
                }
            };

            if json {
                print_json(&expenses)?;
            } else {
                print!("{}", format_expense_table(&expenses, format));
            }
        }

        ExpenseCommands::Show { id } => {
            let expense = find(&service, &id)?;
            print!("{}", format_expense_details(&expense, format));
        }

        ExpenseCommands::Edit {
            id,
            amount,
            description,
            category,
            date,
            month,
            force,
        } => {
            let expense = find(&service, &id)?;
            guard_fixed(&expense, force, "edit")?;

            let mut update = ExpenseUpdate::new();
            if let Some(amount) = amount {
                update = update.amount(parse_amount(&amount)?);
            }
            if let Some(description) = description {
                update = update.description(description);
            }
            if let Some(category) = category {
                update = update.category(parse_category(&category)?);
            }
            if let Some(date) = date {
                update = update.date(parse_date(&date)?);
            }
            if let Some(month) = month {
                update = update.planned_month(Some(parse_month(&month)?));
            }

            if update.is_empty() {
                println!("Nothing to change. Use --amount, --description, --category, --date or --month.");
                return Ok(());
            }

            match service.update(&expense.id, update)? {
                Some(updated) => {
                    println!("Updated expense {}", updated.id);
                    print!("{}", format_expense_details(&updated, format));
                }
                None => println!("Expense {} no longer exists", expense.id),
            }
        }

        ExpenseCommands::Delete { id, force } => {
            let expense = find(&service, &id)?;
            guard_fixed(&expense, force, "delete")?;

            if service.delete(&expense.id)?.is_some() {
                println!(
                    "Deleted expense: {} {}",
                    expense.description,
                    format.money(expense.amount)
                );
            }
        }

        ExpenseCommands::Toggle { id } => {
            let expense = find(&service, &id)?;
            if let Some(toggled) = service.toggle_status(&expense.id)? {
                if toggled.is_actual {
                    println!(
                        "Marked as actual on {}: {}",
                        format.date(toggled.date),
                        toggled.description
                    );
                } else {
                    let month = toggled
                        .planned_month
                        .map(|m| m.to_string())
                        .unwrap_or_default();
                    println!("Marked as planned for {}: {}", month, toggled.description);
                }
            }
        }

        ExpenseCommands::Category { category, month } => {
            let category = parse_category(&category)?;
            let month = match month {
                Some(m) => parse_month(&m)?,
                None => service.current_month(),
            };

            let expenses = service.list_by_category(category, month)?;
            println!("{} for {} {}", category.name(), month.name(), month.year());
            print!("{}", format_expense_table(&expenses, format));
        }
    }

    Ok(())
}

fn find(service: &ExpenseService<'_>, id: &str) -> BudgetResult<Expense> {
    service
        .find(id)?
        .ok_or_else(|| BudgetError::expense_not_found(id))
}

/// Fixed expenses come from the settings; changing them needs --force
fn guard_fixed(expense: &Expense, force: bool, action: &str) -> BudgetResult<()> {
    if expense.is_fixed && !force {
        return Err(BudgetError::Validation(format!(
            "'{}' is a fixed expense; use --force to {} it anyway",
            expense.description, action
        )));
    }
    Ok(())
}
