//! File I/O utilities with atomic writes
//!
//! Every document is written to a temp file next to its target and then
//! renamed into place, so a crash never leaves a half-written document.

use std::ffi::OsString;
use std::fs::{self, File};
use std::io::{BufReader, BufWriter, Write};
use std::path::{Path, PathBuf};

use chrono::Utc;

use serde::{de::DeserializeOwned, Serialize};

use crate::error::BudgetError;

/// Read JSON from a file, returning a default value if file doesn't exist
pub fn read_json<T, P>(path: P) -> Result<T, BudgetError>
where
    T: DeserializeOwned + Default,
    P: AsRef<Path>,
{
    Ok(read_json_optional(path)?.unwrap_or_default())
}

/// Read JSON from a file, `None` if the file doesn't exist
pub fn read_json_optional<T, P>(path: P) -> Result<Option<T>, BudgetError>
where
    T: DeserializeOwned,
    P: AsRef<Path>,
{
    let path = path.as_ref();

    if !path.exists() {
        return Ok(None);
    }

    let file = File::open(path)
        .map_err(|e| BudgetError::Storage(format!("Failed to open {}: {}", path.display(), e)))?;

    let reader = BufReader::new(file);
    serde_json::from_reader(reader)
        .map(Some)
        .map_err(|e| BudgetError::Storage(format!("Failed to parse {}: {}", path.display(), e)))
}

/// Copy `path` to `<name>.bak-<timestamp>` in the same directory
///
/// Used before overwriting a document that could not be parsed. Fails
/// when the copy can't be made, so callers don't overwrite it either.
pub fn backup_file<P: AsRef<Path>>(path: P) -> Result<PathBuf, BudgetError> {
    let path = path.as_ref();
    let now = Utc::now();

    let mut name = path.file_name().map(OsString::from).unwrap_or_default();
    name.push(format!(
        ".bak-{}-{:03}",
        now.format("%Y%m%d-%H%M%S"),
        now.timestamp_subsec_millis()
    ));
    let backup = path.with_file_name(name);

    fs::copy(path, &backup).map_err(|e| {
        BudgetError::Storage(format!(
            "Refusing to overwrite unreadable {}: backup failed: {}",
            path.display(),
            e
        ))
    })?;

    tracing::debug!(from = %path.display(), to = %backup.display(), "backed up document");
    Ok(backup)
}

/// Write JSON to a file atomically (write to temp, then rename)
pub fn write_json_atomic<T, P>(path: P, data: &T) -> Result<(), BudgetError>
where
    T: Serialize,
    P: AsRef<Path>,
{
    let path = path.as_ref();

    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).map_err(|e| {
            BudgetError::Storage(format!(
                "Failed to create directory {}: {}",
                parent.display(),
                e
            ))
        })?;
    }

    // Same directory as the target, otherwise rename isn't atomic
    let temp_path = path.with_extension("json.tmp");

    let file = File::create(&temp_path)
        .map_err(|e| BudgetError::Storage(format!("Failed to create temp file: {}", e)))?;

    let mut writer = BufWriter::new(file);
    serde_json::to_writer_pretty(&mut writer, data)
        .map_err(|e| BudgetError::Storage(format!("Failed to serialize data: {}", e)))?;

    writer
        .flush()
        .map_err(|e| BudgetError::Storage(format!("Failed to flush data: {}", e)))?;

    writer
        .get_ref()
        .sync_all()
        .map_err(|e| BudgetError::Storage(format!("Failed to sync data: {}", e)))?;

    fs::rename(&temp_path, path).map_err(|e| {
        let _ = fs::remove_file(&temp_path);
        BudgetError::Storage(format!("Failed to rename temp file: {}", e))
    })?;

    tracing::debug!(path = %path.display(), "wrote document");
    Ok(())
}

/// Check if a JSON file exists and parses
pub fn json_file_valid<P: AsRef<Path>>(path: P) -> bool {
    let path = path.as_ref();
    if !path.exists() {
        return false;
    }

    match File::open(path) {
        Ok(file) => serde_json::from_reader::<_, serde_json::Value>(BufReader::new(file)).is_ok(),
        Err(_) => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde::{Deserialize, Serialize};
    use tempfile::TempDir;

    #[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
    struct Document {
        income: i64,
        note: String,
    }

    fn sample() -> Document {
        Document {
            income: 3000,
            note: "june".to_string(),
        }
    }

    #[test]
    fn test_backup_file_copies_next_to_original() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("doc.json");
        fs::write(&path, "{broken").unwrap();

        let backup = backup_file(&path).unwrap();
        assert_eq!(backup.parent(), path.parent());
        assert!(backup
            .file_name()
            .unwrap()
            .to_string_lossy()
            .starts_with("doc.json.bak-"));
        assert_eq!(fs::read_to_string(&backup).unwrap(), "{broken");
        assert!(path.exists());

        assert!(backup_file(temp_dir.path().join("missing.json")).is_err());
    }

    #[test]
    fn test_read_nonexistent_returns_default() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("missing.json");

        let data: Document = read_json(&path).unwrap();
        assert_eq!(data, Document::default());

        let optional: Option<Document> = read_json_optional(&path).unwrap();
        assert!(optional.is_none());
    }

    #[test]
    fn test_write_then_read() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("budget-tracker-settings.json");

        write_json_atomic(&path, &sample()).unwrap();

        let loaded: Option<Document> = read_json_optional(&path).unwrap();
        assert_eq!(loaded, Some(sample()));
        assert!(!temp_dir.path().join("budget-tracker-settings.json.tmp").exists());
    }

    #[test]
    fn test_write_creates_parent_directories() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("data").join("nested").join("doc.json");

        write_json_atomic(&path, &sample()).unwrap();
        assert!(path.exists());
    }

    #[test]
    fn test_corrupt_file_is_a_storage_error() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("broken.json");
        fs::write(&path, "{ not json").unwrap();

        let result: Result<Document, _> = read_json(&path);
        assert!(matches!(result, Err(BudgetError::Storage(_))));
        assert!(!json_file_valid(&path));
    }

    #[test]
    fn test_json_file_valid() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("valid.json");

        assert!(!json_file_valid(&path));
        fs::write(&path, r#"[{"id": "1"}]"#).unwrap();
        assert!(json_file_valid(&path));
    }
}
