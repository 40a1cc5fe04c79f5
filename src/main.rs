use std::path::PathBuf;

use anyhow::{bail, Result};
use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use budget_tracker::auth::{AuthGate, LocalAuthProvider};
use budget_tracker::cli::{
    handle_auth_command, handle_budget_command, handle_expense_command, handle_settings_command,
    AuthCommands, BudgetCommands, ExpenseCommands, SettingsCommands,
};
use budget_tracker::config::paths::DATA_DIR_ENV;
use budget_tracker::config::{AppSettings, BudgetPaths};
use budget_tracker::display::{format_app_config, DisplayFormat};
use budget_tracker::models::YearMonth;
use budget_tracker::storage::{init, json_file_valid, Storage};

#[derive(Parser)]
#[command(
    name = "budget",
    version,
    about = "50/30/20 budgeting from the terminal",
    long_about = "Split your monthly income into needs (50%), wants (30%) and \
                  savings (20%), log what you spend, and see where the year \
                  is heading."
)]
struct Cli {
    /// Directory holding config and data
    #[arg(long, global = true, env = DATA_DIR_ENV)]
    data_dir: Option<PathBuf>,

    /// Debug logging (overridden by RUST_LOG)
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Expense management commands
    #[command(subcommand, alias = "exp")]
    Expense(ExpenseCommands),

    #[command(flatten)]
    Budget(BudgetCommands),

    /// Income and fixed expense settings
    #[command(subcommand)]
    Settings(SettingsCommands),

    /// Sign in and out
    #[command(subcommand)]
    Auth(AuthCommands),

    /// Initialize a new budget
    Init,

    /// Show current configuration and paths
    Config,
}

impl Commands {
    /// Commands that read or change budget data
    fn touches_data(&self) -> bool {
        matches!(
            self,
            Commands::Expense(_) | Commands::Budget(_) | Commands::Settings(_)
        )
    }
}

fn init_logging(verbose: bool, configured_level: &str) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        let level = if verbose { "debug" } else { configured_level };
        EnvFilter::new(format!("budget_tracker={level},budget={level}"))
    });

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let paths = match cli.data_dir {
        Some(dir) => BudgetPaths::with_base_dir(dir),
        None => BudgetPaths::new()?,
    };
    let settings = AppSettings::load_or_create(&paths)?;
    init_logging(cli.verbose, &settings.log_level);
    tracing::debug!(base_dir = %paths.base_dir().display(), "resolved paths");

    let Some(command) = cli.command else {
        println!("budget - 50/30/20 budgeting from the terminal");
        println!();
        println!("Run 'budget --help' for usage information.");
        println!("Run 'budget overview' to see this month's budget.");
        return Ok(());
    };

    if command.touches_data() && settings.require_auth {
        let gate = AuthGate::new(LocalAuthProvider::new(paths.clone(), &settings));
        if !gate.is_authenticated() {
            tracing::warn!("refused data command without an allowed session");
            bail!("Sign in with an allowed email first: budget auth login <email>");
        }
    }

    let format = DisplayFormat::from_settings(&settings);
    let storage = Storage::new(paths.clone())?;
    storage.load_all();

    if command.touches_data() && init::needs_initialization(&storage)? {
        init::initialize_storage(&storage, YearMonth::current())?;
    }

    match command {
        Commands::Expense(cmd) => handle_expense_command(&storage, &format, cmd)?,
        Commands::Budget(cmd) => handle_budget_command(&storage, &format, cmd)?,
        Commands::Settings(cmd) => handle_settings_command(&storage, &format, cmd)?,
        Commands::Auth(cmd) => {
            handle_auth_command(LocalAuthProvider::new(paths.clone(), &settings), cmd)?
        }
        Commands::Init => {
            println!("Initializing budget-tracker at: {}", paths.base_dir().display());
            let seeded = init::initialize_storage(&storage, YearMonth::current())?;
            if !paths.config_file().exists() {
                settings.save(&paths)?;
            }

            if seeded {
                let budget_settings = storage.settings.get()?;
                println!("Initialization complete!");
                println!();
                println!(
                    "Monthly income is set to {}; this month's mortgage and car",
                    format.money(budget_settings.monthly_income)
                );
                println!("payment have been recorded as fixed expenses.");
                println!();
                println!("Run 'budget settings set --income <amount>' to change the income.");
            } else {
                println!("Already initialized.");
            }
        }
        Commands::Config => {
            println!("budget-tracker configuration");
            println!("============================");
            print!("{}", format_app_config(&settings, &paths));
            println!();
            for (label, file) in [
                ("Expenses", paths.expenses_file()),
                ("Settings", paths.budget_settings_file()),
            ] {
                let state = if !file.exists() {
                    "not created"
                } else if json_file_valid(&file) {
                    "ok"
                } else {
                    "unreadable"
                };
                println!("{:<10} {} ({})", label, file.display(), state);
            }
        }
    }

    Ok(())
}
