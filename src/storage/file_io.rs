//! File I/O helpers for the JSON document store
//!
//! Every collection is a single JSON file. Writes go to a sibling `.tmp`
//! file, are synced, and then renamed over the original.

use std::fs::{self, File};
use std::io::{BufReader, BufWriter, Write};
use std::path::Path;

use serde::{de::DeserializeOwned, Serialize};

use crate::error::SpendwiseError;

fn storage_err(action: &str, path: &Path, e: impl std::fmt::Display) -> SpendwiseError {
    SpendwiseError::Storage(format!("Failed to {} {}: {}", action, path.display(), e))
}

/// Read a collection, or its default when the file has not been written yet
pub fn read_json<T, P>(path: P) -> Result<T, SpendwiseError>
where
    T: DeserializeOwned + Default,
    P: AsRef<Path>,
{
    let path = path.as_ref();
    let file = match File::open(path) {
        Ok(file) => file,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(T::default()),
        Err(e) => return Err(storage_err("open", path, e)),
    };

    serde_json::from_reader(BufReader::new(file)).map_err(|e| storage_err("parse", path, e))
}

/// Write a collection as pretty JSON, replacing the file atomically
pub fn write_json_atomic<T, P>(path: P, data: &T) -> Result<(), SpendwiseError>
where
    T: Serialize,
    P: AsRef<Path>,
{
    let path = path.as_ref();
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).map_err(|e| storage_err("create directory", parent, e))?;
    }

    let temp_path = path.with_extension("json.tmp");
    let file = File::create(&temp_path).map_err(|e| storage_err("create", &temp_path, e))?;

    let mut writer = BufWriter::new(file);
    serde_json::to_writer_pretty(&mut writer, data)
        .map_err(|e| storage_err("serialize", path, e))?;
    writer
        .flush()
        .and_then(|_| writer.get_ref().sync_all())
        .map_err(|e| storage_err("write", &temp_path, e))?;

    fs::rename(&temp_path, path).map_err(|e| {
        let _ = fs::remove_file(&temp_path);
        storage_err("replace", path, e)
    })
}

/// Remove a file, treating an already-missing file as success
///
/// Returns whether a file was actually removed.
pub fn remove_file_if_exists<P: AsRef<Path>>(path: P) -> Result<bool, SpendwiseError> {
    let path = path.as_ref();
    match fs::remove_file(path) {
        Ok(()) => Ok(true),
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(false),
        Err(e) => Err(storage_err("remove", path, e)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde::{Deserialize, Serialize};
    use std::collections::HashMap;
    use tempfile::TempDir;

    #[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
    struct Ledger {
        owner: String,
        balances: HashMap<String, i64>,
    }

    fn ledger() -> Ledger {
        Ledger {
            owner: "usr-1234".into(),
            balances: HashMap::from([("Food".to_string(), 4250)]),
        }
    }

    #[test]
    fn test_missing_collection_reads_as_default() {
        let temp_dir = TempDir::new().unwrap();
        let data: Ledger = read_json(temp_dir.path().join("budgets.json")).unwrap();
        assert_eq!(data, Ledger::default());
    }

    #[test]
    fn test_write_then_read_into_nested_user_dir() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("users").join("usr-1234").join("budgets.json");

        write_json_atomic(&path, &ledger()).unwrap();

        let loaded: Ledger = read_json(&path).unwrap();
        assert_eq!(loaded, ledger());
        assert!(!path.with_extension("json.tmp").exists());
    }

    #[test]
    fn test_overwrite_replaces_contents() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("budgets.json");

        write_json_atomic(&path, &ledger()).unwrap();
        write_json_atomic(&path, &Ledger::default()).unwrap();

        let loaded: Ledger = read_json(&path).unwrap();
        assert!(loaded.balances.is_empty());
    }

    #[test]
    fn test_remove_file_if_exists() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("session.json");

        assert!(!remove_file_if_exists(&path).unwrap());
        write_json_atomic(&path, &ledger()).unwrap();
        assert!(remove_file_if_exists(&path).unwrap());
        assert!(!path.exists());
    }

    #[test]
    fn test_corrupt_file_is_storage_error() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("transactions.json");
        fs::write(&path, "not json at all").unwrap();

        let err = read_json::<Ledger, _>(&path).unwrap_err();
        assert!(matches!(err, SpendwiseError::Storage(_)));
        assert!(err.to_string().contains("parse"));
    }
}
