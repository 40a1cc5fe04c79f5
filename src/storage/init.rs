//! Storage initialization
//!
//! Handles first-run setup: default settings plus the built-in fixed
//! expenses for the current month.

use crate::engine::fixed_expenses_for_month;
use crate::error::BudgetError;
use crate::models::{BudgetSettings, YearMonth};

use super::Storage;

/// Seed a fresh installation
///
/// Only runs when no settings document is stored yet. Returns whether
/// anything was seeded.
pub fn initialize_storage(storage: &Storage, month: YearMonth) -> Result<bool, BudgetError> {
    if !needs_initialization(storage)? {
        return Ok(false);
    }

    let settings = BudgetSettings::default();
    let mut seeded = 0;
    for expense in fixed_expenses_for_month(&settings, month) {
        if !storage.expenses.contains(&expense.id)? {
            storage.expenses.push(expense)?;
            seeded += 1;
        }
    }

    storage.settings.set(settings)?;
    storage.settings.save()?;
    storage.expenses.save()?;

    tracing::info!(%month, seeded, "initialized budget storage");
    Ok(true)
}

/// Check if storage needs initialization
///
/// A settings document that exists but can't be read is not a fresh
/// install; it is left for the user to repair.
pub fn needs_initialization(storage: &Storage) -> Result<bool, BudgetError> {
    Ok(!storage.settings.is_stored()? && !storage.settings.is_degraded())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::BudgetPaths;
    use crate::models::ExpenseId;
    use tempfile::TempDir;

    #[test]
    fn test_first_run_seeds_settings_and_fixed_expenses() {
        let temp_dir = TempDir::new().unwrap();
        let paths = BudgetPaths::with_base_dir(temp_dir.path().to_path_buf());
        let storage = Storage::new(paths.clone()).unwrap();
        let month = YearMonth::parse("2024-06").unwrap();

        assert!(needs_initialization(&storage).unwrap());
        assert!(initialize_storage(&storage, month).unwrap());

        assert!(paths.budget_settings_file().exists());
        assert!(storage
            .expenses
            .contains(&ExpenseId::from_string("mortgage-2024-06"))
            .unwrap());
        assert!(storage
            .expenses
            .contains(&ExpenseId::from_string("car-2024-06"))
            .unwrap());
    }

    #[test]
    fn test_second_run_is_a_no_op() {
        let temp_dir = TempDir::new().unwrap();
        let paths = BudgetPaths::with_base_dir(temp_dir.path().to_path_buf());
        let storage = Storage::new(paths).unwrap();
        let month = YearMonth::parse("2024-06").unwrap();

        initialize_storage(&storage, month).unwrap();
        assert!(!initialize_storage(&storage, month.next()).unwrap());
        assert_eq!(storage.expenses.count().unwrap(), 2);
    }

    #[test]
    fn test_unreadable_settings_are_not_reseeded() {
        let temp_dir = TempDir::new().unwrap();
        let paths = BudgetPaths::with_base_dir(temp_dir.path().to_path_buf());
        let storage = Storage::new(paths.clone()).unwrap();
        std::fs::write(paths.budget_settings_file(), "{\"monthlyIncome\": ").unwrap();
        storage.load_all();

        assert!(!needs_initialization(&storage).unwrap());
        assert!(!initialize_storage(&storage, YearMonth::parse("2024-06").unwrap()).unwrap());
        assert_eq!(storage.expenses.count().unwrap(), 0);
        assert_eq!(
            std::fs::read_to_string(paths.budget_settings_file()).unwrap(),
            "{\"monthlyIncome\": "
        );
    }
}
