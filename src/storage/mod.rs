//! Storage layer for budget-tracker
//!
//! Two JSON documents keyed by logical name, written atomically: the
//! expense list and the budget settings.

pub mod expenses;
pub mod file_io;
pub mod init;
pub mod settings;

pub use expenses::ExpenseRepository;
pub use file_io::{backup_file, json_file_valid, read_json, write_json_atomic};
pub use init::initialize_storage;
pub use settings::SettingsRepository;

use crate::config::paths::BudgetPaths;
use crate::error::BudgetError;

/// Main storage coordinator that provides access to all repositories
pub struct Storage {
    paths: BudgetPaths,
    pub expenses: ExpenseRepository,
    pub settings: SettingsRepository,
}

impl Storage {
    /// Create a new Storage instance
    pub fn new(paths: BudgetPaths) -> Result<Self, BudgetError> {
        paths.ensure_directories()?;

        Ok(Self {
            expenses: ExpenseRepository::new(paths.expenses_file()),
            settings: SettingsRepository::new(paths.budget_settings_file()),
            paths,
        })
    }

    /// Get the paths configuration
    pub fn paths(&self) -> &BudgetPaths {
        &self.paths
    }

    /// Load all data from disk
    ///
    /// A document that can't be read leaves its repository empty (or at
    /// the default settings) and logs a warning; the app stays usable.
    /// An unreadable expense document is copied aside before it is first
    /// overwritten.
    pub fn load_all(&self) {
        if let Err(e) = self.expenses.load() {
            tracing::warn!(error = %e, "failed to load expenses, starting empty");
        }
        if let Err(e) = self.settings.load() {
            tracing::warn!(error = %e, "failed to load budget settings, using defaults");
        }
    }

    /// Save all data to disk
    pub fn save_all(&self) -> Result<(), BudgetError> {
        self.expenses.save()?;
        self.settings.save()?;
        Ok(())
    }

    /// Check if storage has been initialized (has stored settings)
    pub fn is_initialized(&self) -> bool {
        self.paths.is_initialized()
    }
}
