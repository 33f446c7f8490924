//! Custom category repository for JSON storage
//!
//! Stores only the user's own labels; the defaults are compiled in.

use std::path::PathBuf;
use std::sync::RwLock;

use crate::error::SpendwiseError;
use crate::models::Category;

use super::file_io::{read_json, write_json_atomic};
use super::{read_lock_err, write_lock_err};

#[derive(Debug, Clone, Default, serde::Serialize, serde::Deserialize)]
struct CategoryData {
    #[serde(default)]
    custom: Vec<Category>,
}

/// Repository for user-defined category labels
pub struct CategoryRepository {
    path: PathBuf,
    custom: RwLock<Vec<Category>>,
}

impl CategoryRepository {
    pub fn new(path: PathBuf) -> Self {
        Self {
            path,
            custom: RwLock::new(Vec::new()),
        }
    }

    pub fn load(&self) -> Result<(), SpendwiseError> {
        let file_data: CategoryData = read_json(&self.path)?;
        let mut custom = self.custom.write().map_err(write_lock_err)?;
        *custom = file_data.custom;
        Ok(())
    }

    pub fn save(&self) -> Result<(), SpendwiseError> {
        let custom = self.custom.read().map_err(read_lock_err)?;
        write_json_atomic(
            &self.path,
            &CategoryData {
                custom: custom.clone(),
            },
        )
    }

    /// Custom labels in insertion order
    pub fn get_all(&self) -> Result<Vec<Category>, SpendwiseError> {
        let custom = self.custom.read().map_err(read_lock_err)?;
        Ok(custom.clone())
    }

    /// Case-insensitive lookup
    pub fn get(&self, name: &str) -> Result<Option<Category>, SpendwiseError> {
        let custom = self.custom.read().map_err(read_lock_err)?;
        Ok(custom.iter().find(|c| c.matches(name)).cloned())
    }

    /// Add a label; returns false if an equal label already exists
    pub fn insert(&self, category: Category) -> Result<bool, SpendwiseError> {
        let mut custom = self.custom.write().map_err(write_lock_err)?;
        if custom.iter().any(|c| c.matches(category.name())) {
            return Ok(false);
        }
        custom.push(category);
        Ok(true)
    }

    /// Remove a label, returning it if it existed
    pub fn delete(&self, name: &str) -> Result<Option<Category>, SpendwiseError> {
        let mut custom = self.custom.write().map_err(write_lock_err)?;
        let position = custom.iter().position(|c| c.matches(name));
        Ok(position.map(|i| custom.remove(i)))
    }

    pub fn clear(&self) -> Result<(), SpendwiseError> {
        self.custom.write().map_err(write_lock_err)?.clear();
        Ok(())
    }

    pub fn count(&self) -> Result<usize, SpendwiseError> {
        Ok(self.custom.read().map_err(read_lock_err)?.len())
    }
}
