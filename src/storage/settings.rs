//! Budget settings repository
//!
//! Manages loading and saving the settings document
//! (`budget-tracker-settings.json`). Until a document is stored, reads
//! return the defaults. A document that can't be parsed is copied aside
//! before it is first overwritten.

use std::path::PathBuf;
use std::sync::RwLock;

use crate::error::BudgetError;
use crate::models::BudgetSettings;

use super::file_io::{backup_file, read_json_optional, write_json_atomic};

/// Repository for budget settings persistence
pub struct SettingsRepository {
    path: PathBuf,
    data: RwLock<Option<BudgetSettings>>,
    /// Set when the document on disk could not be parsed
    degraded: RwLock<bool>,
}

impl SettingsRepository {
    /// Create a new settings repository
    pub fn new(path: PathBuf) -> Self {
        Self {
            path,
            data: RwLock::new(None),
            degraded: RwLock::new(false),
        }
    }

    /// Load settings from disk
    pub fn load(&self) -> Result<(), BudgetError> {
        let result = read_json_optional::<BudgetSettings, _>(&self.path);

        *self
            .degraded
            .write()
            .map_err(|e| BudgetError::Storage(format!("Failed to acquire write lock: {}", e)))? =
            result.is_err();

        let mut data = self
            .data
            .write()
            .map_err(|e| BudgetError::Storage(format!("Failed to acquire write lock: {}", e)))?;
        match result {
            Ok(stored) => {
                *data = stored;
                Ok(())
            }
            Err(e) => {
                *data = None;
                Err(e)
            }
        }
    }

    /// Whether the last load could not parse the document
    pub fn is_degraded(&self) -> bool {
        self.degraded.read().map(|d| *d).unwrap_or(true)
    }

    /// Save settings to disk; nothing is written until settings were set
    pub fn save(&self) -> Result<(), BudgetError> {
        let data = self
            .data
            .read()
            .map_err(|e| BudgetError::Storage(format!("Failed to acquire read lock: {}", e)))?;

        let Some(settings) = data.as_ref() else {
            return Ok(());
        };

        let mut degraded = self
            .degraded
            .write()
            .map_err(|e| BudgetError::Storage(format!("Failed to acquire write lock: {}", e)))?;
        if *degraded {
            let backup = backup_file(&self.path)?;
            tracing::warn!(backup = %backup.display(), "kept unreadable settings document");
            *degraded = false;
        }

        write_json_atomic(&self.path, settings)
    }

    /// Current settings, or the defaults when none are stored
    pub fn get(&self) -> Result<BudgetSettings, BudgetError> {
        let data = self
            .data
            .read()
            .map_err(|e| BudgetError::Storage(format!("Failed to acquire read lock: {}", e)))?;

        Ok(data.clone().unwrap_or_default())
    }

    /// Replace the settings
    pub fn set(&self, settings: BudgetSettings) -> Result<(), BudgetError> {
        let mut data = self
            .data
            .write()
            .map_err(|e| BudgetError::Storage(format!("Failed to acquire write lock: {}", e)))?;

        *data = Some(settings);
        Ok(())
    }

    /// Whether a settings document has been loaded or set
    pub fn is_stored(&self) -> Result<bool, BudgetError> {
        let data = self
            .data
            .read()
            .map_err(|e| BudgetError::Storage(format!("Failed to acquire read lock: {}", e)))?;

        Ok(data.is_some())
    }
}
