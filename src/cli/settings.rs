//! Budget settings CLI commands
//!
//! Income, the built-in fixed expenses and custom recurring expenses.

use clap::Subcommand;

use super::{parse_amount, parse_category, parse_month, parse_recurrence, print_json};
use crate::display::{format_budget_settings, format_expense_table, DisplayFormat};
use crate::error::BudgetResult;
use crate::models::{BudgetSettingsUpdate, FixedExpense, YearMonth};
use crate::services::SettingsService;
use crate::storage::Storage;

/// Settings subcommands
#[derive(Subcommand)]
pub enum SettingsCommands {
    /// Show income, its split and the fixed expenses
    Show {
        /// Output JSON
        #[arg(long)]
        json: bool,
    },
    /// Change income or the built-in fixed expenses
    Set {
        /// Monthly income
        #[arg(short, long)]
        income: Option<String>,
        /// Monthly mortgage payment
        #[arg(long)]
        mortgage: Option<String>,
        /// Monthly car payment
        #[arg(long)]
        car: Option<String>,
    },
    /// Add a recurring fixed expense
    FixedAdd {
        /// Name, e.g. "Gym"
        name: String,
        /// Amount per occurrence
        amount: String,
        /// needs or wants
        #[arg(short, long, default_value = "needs")]
        category: String,
        /// "monthly" or a number of days between occurrences
        #[arg(short, long, default_value = "monthly")]
        every: String,
    },
    /// Remove a recurring fixed expense
    FixedRemove {
        /// Name or ID
        fixed: String,
    },
    /// Create this month's fixed expense records
    Sync {
        /// Month (YYYY-MM), defaults to this month
        #[arg(short, long)]
        month: Option<String>,
    },
}

/// Handle a settings command
pub fn handle_settings_command(
    storage: &Storage,
    format: &DisplayFormat,
    cmd: SettingsCommands,
) -> BudgetResult<()> {
    let service = SettingsService::new(storage);

    match cmd {
        SettingsCommands::Show { json } => {
            let settings = service.get()?;
            if json {
                print_json(&settings)?;
            } else {
                print!("{}", format_budget_settings(&settings, format));
            }
        }

        SettingsCommands::Set {
            income,
            mortgage,
            car,
        } => {
            let mut update = BudgetSettingsUpdate {
                monthly_income: income.as_deref().map(parse_amount).transpose()?,
                ..Default::default()
            };

            if mortgage.is_some() || car.is_some() {
                let mut fixed = service.get()?.fixed_expenses;
                if let Some(mortgage) = mortgage {
                    fixed.mortgage = parse_amount(&mortgage)?;
                }
                if let Some(car) = car {
                    fixed.car_payment = parse_amount(&car)?;
                }
                update.fixed_expenses = Some(fixed);
            }

            if update.is_empty() {
                println!("Nothing to change. Use --income, --mortgage or --car.");
                return Ok(());
            }

            let settings = service.update(update)?;
            println!("Settings updated.");
            print!("{}", format_budget_settings(&settings, format));
        }

        SettingsCommands::FixedAdd {
            name,
            amount,
            category,
            every,
        } => {
            let fixed = service.add_fixed(FixedExpense::new(
                name.trim(),
                parse_amount(&amount)?,
                parse_category(&category)?,
                parse_recurrence(&every)?,
            ))?;

            println!(
                "Added fixed expense '{}': {} {}",
                fixed.name,
                format.money(fixed.value),
                fixed.recurrence
            );
            println!("Run 'budget settings sync' to add it to this month.");
        }

        SettingsCommands::FixedRemove { fixed } => {
            let removed = service.remove_fixed(&fixed)?;
            println!("Removed fixed expense '{}'", removed.name);
        }

        SettingsCommands::Sync { month } => {
            let month = match month {
                Some(m) => parse_month(&m)?,
                None => YearMonth::current(),
            };

            let added = service.sync_fixed_expenses(month)?;
            if added.is_empty() {
                println!("Fixed expenses for {} are up to date.", month);
            } else {
                println!("Added {} fixed expense(s) for {}:", added.len(), month);
                print!("{}", format_expense_table(&added, format));
            }
        }
    }

    Ok(())
}
