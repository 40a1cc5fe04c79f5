//! Expense repository for JSON storage
//!
//! Manages loading and saving expenses to `budget-tracker-expenses.json`.
//! The document is `{"version": 1, "expenses": [...]}`; older installs
//! stored a bare array, which is still read.

use std::path::PathBuf;
use std::sync::RwLock;

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::BudgetError;
use crate::models::{Expense, ExpenseId};

use super::file_io::{backup_file, read_json_optional, write_json_atomic};

/// Current expense document schema
pub const EXPENSES_SCHEMA_VERSION: u32 = 1;

/// Serializable expense document
#[derive(Debug, Clone, Serialize, Deserialize)]
struct ExpenseData {
    version: u32,
    expenses: Vec<Value>,
}

/// Repository for expense persistence
///
/// Keeps insertion order; new expenses are appended. Records this build
/// can't read are kept as raw JSON and written back untouched.
pub struct ExpenseRepository {
    path: PathBuf,
    data: RwLock<Vec<Expense>>,
    unreadable: RwLock<Vec<Value>>,
    /// Set when the document on disk could not be parsed at all
    degraded: RwLock<bool>,
}

impl ExpenseRepository {
    /// Create a new expense repository
    pub fn new(path: PathBuf) -> Self {
        Self {
            path,
            data: RwLock::new(Vec::new()),
            unreadable: RwLock::new(Vec::new()),
            degraded: RwLock::new(false),
        }
    }

    /// Load expenses from disk
    ///
    /// Records that don't parse (e.g. the retired `savings` category) are
    /// kept aside rather than failing the whole document. A document that
    /// can't be parsed leaves the repository empty and degraded; the next
    /// save copies it to a backup before overwriting it.
    pub fn load(&self) -> Result<(), BudgetError> {
        let parsed = read_json_optional::<Value, _>(&self.path).and_then(|document| match document {
            Some(value) => parse_document(value),
            None => Ok((Vec::new(), Vec::new())),
        });

        let (expenses, unreadable, result) = match parsed {
            Ok((expenses, unreadable)) => (expenses, unreadable, Ok(())),
            Err(e) => (Vec::new(), Vec::new(), Err(e)),
        };

        tracing::debug!(
            count = expenses.len(),
            unreadable = unreadable.len(),
            "loaded expenses"
        );

        *self
            .data
            .write()
            .map_err(|e| BudgetError::Storage(format!("Failed to acquire write lock: {}", e)))? =
            expenses;
        *self
            .unreadable
            .write()
            .map_err(|e| BudgetError::Storage(format!("Failed to acquire write lock: {}", e)))? =
            unreadable;
        *self
            .degraded
            .write()
            .map_err(|e| BudgetError::Storage(format!("Failed to acquire write lock: {}", e)))? =
            result.is_err();

        result
    }

    /// Save expenses to disk
    ///
    /// Refuses to overwrite an unparseable document unless it could first
    /// be copied aside.
    pub fn save(&self) -> Result<(), BudgetError> {
        let mut degraded = self
            .degraded
            .write()
            .map_err(|e| BudgetError::Storage(format!("Failed to acquire write lock: {}", e)))?;
        if *degraded {
            let backup = backup_file(&self.path)?;
            tracing::warn!(backup = %backup.display(), "kept unreadable expense document");
            *degraded = false;
        }

        let data = self
            .data
            .read()
            .map_err(|e| BudgetError::Storage(format!("Failed to acquire read lock: {}", e)))?;
        let unreadable = self
            .unreadable
            .read()
            .map_err(|e| BudgetError::Storage(format!("Failed to acquire read lock: {}", e)))?;

        let mut records = Vec::with_capacity(data.len() + unreadable.len());
        for expense in data.iter() {
            records.push(serde_json::to_value(expense)?);
        }
        records.extend(unreadable.iter().cloned());

        let file_data = ExpenseData {
            version: EXPENSES_SCHEMA_VERSION,
            expenses: records,
        };
        write_json_atomic(&self.path, &file_data)
    }

    /// Whether the last load could not parse the document
    pub fn is_degraded(&self) -> bool {
        self.degraded.read().map(|d| *d).unwrap_or(true)
    }

    /// Number of stored records this build can't read
    pub fn unreadable_count(&self) -> Result<usize, BudgetError> {
        let unreadable = self
            .unreadable
            .read()
            .map_err(|e| BudgetError::Storage(format!("Failed to acquire read lock: {}", e)))?;
        Ok(unreadable.len())
    }

    /// Get all expenses in stored order
    pub fn get_all(&self) -> Result<Vec<Expense>, BudgetError> {
        let data = self
            .data
            .read()
            .map_err(|e| BudgetError::Storage(format!("Failed to acquire read lock: {}", e)))?;

        Ok(data.clone())
    }

    /// Get an expense by ID
    pub fn get(&self, id: &ExpenseId) -> Result<Option<Expense>, BudgetError> {
        let data = self
            .data
            .read()
            .map_err(|e| BudgetError::Storage(format!("Failed to acquire read lock: {}", e)))?;

        Ok(data.iter().find(|e| &e.id == id).cloned())
    }

    /// Check whether an expense with this ID exists
    pub fn contains(&self, id: &ExpenseId) -> Result<bool, BudgetError> {
        Ok(self.get(id)?.is_some())
    }

    /// Append an expense
    pub fn push(&self, expense: Expense) -> Result<(), BudgetError> {
        let mut data = self
            .data
            .write()
            .map_err(|e| BudgetError::Storage(format!("Failed to acquire write lock: {}", e)))?;

        data.push(expense);
        Ok(())
    }

    /// Replace the expense with the same ID, keeping its position
    ///
    /// Returns false when no expense has that ID.
    pub fn replace(&self, expense: Expense) -> Result<bool, BudgetError> {
        let mut data = self
            .data
            .write()
            .map_err(|e| BudgetError::Storage(format!("Failed to acquire write lock: {}", e)))?;

        match data.iter_mut().find(|e| e.id == expense.id) {
            Some(slot) => {
                *slot = expense;
                Ok(true)
            }
            None => Ok(false),
        }
    }

    /// Remove every expense with this ID, returning the first one removed
    pub fn remove(&self, id: &ExpenseId) -> Result<Option<Expense>, BudgetError> {
        let mut data = self
            .data
            .write()
            .map_err(|e| BudgetError::Storage(format!("Failed to acquire write lock: {}", e)))?;

        let removed = data.iter().find(|e| &e.id == id).cloned();
        data.retain(|e| &e.id != id);
        Ok(removed)
    }

    /// Count expenses
    pub fn count(&self) -> Result<usize, BudgetError> {
        let data = self
            .data
            .read()
            .map_err(|e| BudgetError::Storage(format!("Failed to acquire read lock: {}", e)))?;

        Ok(data.len())
    }
}

/// Split a stored document into readable expenses and raw unreadable records
fn parse_document(value: Value) -> Result<(Vec<Expense>, Vec<Value>), BudgetError> {
    let records = match value {
        Value::Array(records) => {
            tracing::debug!("reading legacy expense array");
            records
        }
        Value::Object(mut object) => {
            if let Some(version) = object.get("version").and_then(Value::as_u64) {
                if version > u64::from(EXPENSES_SCHEMA_VERSION) {
                    tracing::warn!(version, "expense document is newer than this build");
                }
            }
            match object.remove("expenses") {
                Some(Value::Array(records)) => records,
                _ => {
                    return Err(BudgetError::Storage(
                        "Expense document has no expenses array".into(),
                    ))
                }
            }
        }
        _ => {
            return Err(BudgetError::Storage(
                "Expense document must be an object or an array".into(),
            ))
        }
    };

    let mut expenses = Vec::with_capacity(records.len());
    let mut unreadable = Vec::new();
    for (index, record) in records.into_iter().enumerate() {
        match serde_json::from_value::<Expense>(record.clone()) {
            Ok(expense) => expenses.push(expense),
            Err(e) => {
                tracing::warn!(index, error = %e, "keeping unreadable expense record as is");
                unreadable.push(record);
            }
        }
    }
    Ok((expenses, unreadable))
}
