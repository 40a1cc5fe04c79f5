//! Budget CLI commands
//!
//! Overview, summary and forecast of the 50/30/20 budget.

use clap::Subcommand;

use super::{parse_month, print_json};
use crate::display::{format_forecast, format_overview, format_summary, DisplayFormat};
use crate::error::BudgetResult;
use crate::services::BudgetService;
use crate::storage::Storage;

/// Budget subcommands
#[derive(Subcommand)]
pub enum BudgetCommands {
    /// Show the month's allocation, spending and what's left
    Overview {
        /// Month (YYYY-MM), defaults to this month
        #[arg(short, long)]
        month: Option<String>,
        /// Output JSON
        #[arg(long)]
        json: bool,
    },
    /// Show spending and savings rate for a month
    Summary {
        /// Month (YYYY-MM), defaults to this month
        #[arg(short, long)]
        month: Option<String>,
        /// Output JSON
        #[arg(long)]
        json: bool,
    },
    /// Project the year month by month
    Forecast {
        /// Year, defaults to this year
        #[arg(short, long)]
        year: Option<i32>,
        /// Output JSON
        #[arg(long)]
        json: bool,
    },
}

/// Handle a budget command
pub fn handle_budget_command(
    storage: &Storage,
    format: &DisplayFormat,
    cmd: BudgetCommands,
) -> BudgetResult<()> {
    let service = BudgetService::new(storage);

    match cmd {
        BudgetCommands::Overview { month, json } => {
            let month = match month {
                Some(m) => parse_month(&m)?,
                None => service.current_month(),
            };
            let overview = service.overview(month)?;

            if json {
                print_json(&overview)?;
            } else {
                print!("{}", format_overview(&overview, format));
            }
        }

        BudgetCommands::Summary { month, json } => {
            let month = match month {
                Some(m) => parse_month(&m)?,
                None => service.current_month(),
            };
            let summary = service.summary(month)?;

            if json {
                print_json(&summary)?;
            } else {
                println!("Summary for {} {}", month.name(), month.year());
                print!("{}", format_summary(&summary, format));
            }
        }

        BudgetCommands::Forecast { year, json } => {
            let forecast = service.forecast(year)?;

            if json {
                print_json(&forecast)?;
            } else {
                print!("{}", format_forecast(&forecast, format));
            }
        }
    }

    Ok(())
}
