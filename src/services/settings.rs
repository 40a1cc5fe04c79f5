//! Budget settings service
//!
//! Income and fixed expenses, and turning fixed expenses into expense
//! records for a month.

use crate::engine::fixed_expenses_for_month;
use crate::error::{BudgetError, BudgetResult};
use crate::models::{BudgetSettings, BudgetSettingsUpdate, Expense, FixedExpense, YearMonth};
use crate::storage::Storage;

/// Service for budget settings management
pub struct SettingsService<'a> {
    storage: &'a Storage,
}

impl<'a> SettingsService<'a> {
    /// Create a new settings service
    pub fn new(storage: &'a Storage) -> Self {
        Self { storage }
    }

    /// Current settings (defaults when none are stored)
    pub fn get(&self) -> BudgetResult<BudgetSettings> {
        self.storage.settings.get()
    }

    /// Merge top-level fields into the stored settings
    pub fn update(&self, update: BudgetSettingsUpdate) -> BudgetResult<BudgetSettings> {
        let mut settings = self.get()?;
        update.apply(&mut settings);
        self.store(settings)
    }

    /// Add a custom fixed expense; names must be unique
    pub fn add_fixed(&self, fixed: FixedExpense) -> BudgetResult<FixedExpense> {
        let mut settings = self.get()?;

        if settings.find_fixed(&fixed.name).is_some() {
            return Err(BudgetError::Duplicate {
                entity_type: "Fixed expense",
                identifier: fixed.name.clone(),
            });
        }

        settings.custom_fixed_expenses.push(fixed.clone());
        self.store(settings)?;

        tracing::info!(id = %fixed.id, name = %fixed.name, "added fixed expense");
        Ok(fixed)
    }

    /// Remove a custom fixed expense by ID or name
    ///
    /// Expense records already generated from it are kept.
    pub fn remove_fixed(&self, identifier: &str) -> BudgetResult<FixedExpense> {
        let mut settings = self.get()?;

        let removed = settings
            .find_fixed(identifier)
            .cloned()
            .ok_or_else(|| BudgetError::fixed_expense_not_found(identifier))?;

        settings.custom_fixed_expenses.retain(|f| f.id != removed.id);
        self.store(settings)?;

        tracing::info!(id = %removed.id, name = %removed.name, "removed fixed expense");
        Ok(removed)
    }

    /// Create the fixed expense records for `month` that don't exist yet
    ///
    /// Idempotent: an existing ID is never touched, so edits made to a
    /// generated record survive. Returns the records that were added.
    pub fn sync_fixed_expenses(&self, month: YearMonth) -> BudgetResult<Vec<Expense>> {
        let settings = self.get()?;

        let mut added = Vec::new();
        for expense in fixed_expenses_for_month(&settings, month) {
            if !self.storage.expenses.contains(&expense.id)? {
                self.storage.expenses.push(expense.clone())?;
                added.push(expense);
            }
        }

        if !added.is_empty() {
            self.storage.expenses.save()?;
        }

        tracing::info!(%month, added = added.len(), "synced fixed expenses");
        Ok(added)
    }

    fn store(&self, settings: BudgetSettings) -> BudgetResult<BudgetSettings> {
        settings
            .validate()
            .map_err(|e| BudgetError::Validation(e.to_string()))?;

        self.storage.settings.set(settings.clone())?;
        self.storage.settings.save()?;
        Ok(settings)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::BudgetPaths;
    use crate::models::{ExpenseCategory, ExpenseId, FixedExpenses, Money, Recurrence};
    use tempfile::TempDir;

    fn create_test_storage() -> (TempDir, Storage) {
        let temp_dir = TempDir::new().unwrap();
        let paths = BudgetPaths::with_base_dir(temp_dir.path().to_path_buf());
        let storage = Storage::new(paths).unwrap();
        (temp_dir, storage)
    }

    fn june() -> YearMonth {
        YearMonth::parse("2024-06").unwrap()
    }

    #[test]
    fn test_update_merges_top_level_fields() {
        let (_temp_dir, storage) = create_test_storage();
        let service = SettingsService::new(&storage);

        let settings = service
            .update(BudgetSettingsUpdate {
                monthly_income: Some(Money::from_units(4000)),
                ..Default::default()
            })
            .unwrap();

        assert_eq!(settings.monthly_income, Money::from_units(4000));
        assert_eq!(settings.fixed_expenses, FixedExpenses::default());
        assert!(storage.paths().budget_settings_file().exists());
    }

    #[test]
    fn test_update_rejects_negative_income() {
        let (_temp_dir, storage) = create_test_storage();
        let service = SettingsService::new(&storage);

        let result = service.update(BudgetSettingsUpdate {
            monthly_income: Some(Money::from_units(-1)),
            ..Default::default()
        });

        assert!(result.unwrap_err().is_validation());
        assert_eq!(service.get().unwrap(), BudgetSettings::default());
    }

    #[test]
    fn test_add_and_remove_fixed() {
        let (_temp_dir, storage) = create_test_storage();
        let service = SettingsService::new(&storage);

        let gym = service
            .add_fixed(FixedExpense::new(
                "Gym",
                Money::from_units(35),
                ExpenseCategory::Wants,
                Recurrence::Monthly,
            ))
            .unwrap();

        let duplicate = service.add_fixed(FixedExpense::new(
            "gym",
            Money::from_units(35),
            ExpenseCategory::Wants,
            Recurrence::Monthly,
        ));
        assert!(matches!(duplicate, Err(BudgetError::Duplicate { .. })));

        assert_eq!(service.remove_fixed("GYM").unwrap(), gym);
        assert!(service.remove_fixed("Gym").unwrap_err().is_not_found());
    }

    #[test]
    fn test_sync_is_idempotent_and_keeps_edits() {
        let (_temp_dir, storage) = create_test_storage();
        let service = SettingsService::new(&storage);

        let first = service.sync_fixed_expenses(june()).unwrap();
        assert_eq!(first.len(), 2);

        let mortgage_id = ExpenseId::from_string("mortgage-2024-06");
        let mut edited = storage.expenses.get(&mortgage_id).unwrap().unwrap();
        edited.amount = Money::from_units(1250);
        storage.expenses.replace(edited).unwrap();

        let second = service.sync_fixed_expenses(june()).unwrap();
        assert!(second.is_empty());
        assert_eq!(storage.expenses.count().unwrap(), 2);
        assert_eq!(
            storage.expenses.get(&mortgage_id).unwrap().unwrap().amount,
            Money::from_units(1250)
        );
    }

    #[test]
    fn test_sync_includes_custom_entries() {
        let (_temp_dir, storage) = create_test_storage();
        let service = SettingsService::new(&storage);
        let mut streaming = FixedExpense::new(
            "Streaming",
            Money::from_cents(1299),
            ExpenseCategory::Wants,
            Recurrence::Monthly,
        );
        streaming.id = "streaming".into();
        service.add_fixed(streaming).unwrap();

        let added = service.sync_fixed_expenses(june()).unwrap();
        let ids: Vec<_> = added.iter().map(|e| e.id.as_str()).collect();
        assert_eq!(ids, vec!["mortgage-2024-06", "car-2024-06", "streaming-2024-06"]);
    }
}
