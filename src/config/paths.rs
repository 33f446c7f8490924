//! Path management for Spendwise
//!
//! ## Path Resolution Order
//!
//! 1. `SPENDWISE_DATA_DIR` environment variable (if set)
//! 2. The platform config directory (`~/.config/spendwise` on Linux,
//!    `~/Library/Application Support/spendwise` on macOS, `%APPDATA%\spendwise`
//!    on Windows)
//!
//! User data lives under `data/users/<user id>/`, so several local accounts
//! can share one install without seeing each other's records.

use std::path::PathBuf;

use directories::ProjectDirs;

use crate::error::SpendwiseError;
use crate::models::UserId;

/// Environment variable that overrides the base directory
pub const DATA_DIR_ENV: &str = "SPENDWISE_DATA_DIR";

/// Manages all paths used by Spendwise
#[derive(Debug, Clone)]
pub struct SpendwisePaths {
    base_dir: PathBuf,
}

impl SpendwisePaths {
    /// Create a new SpendwisePaths instance
    ///
    /// # Errors
    ///
    /// Returns an error if no home directory can be determined.
    pub fn new() -> Result<Self, SpendwiseError> {
        let base_dir = if let Ok(custom) = std::env::var(DATA_DIR_ENV) {
            PathBuf::from(custom)
        } else {
            resolve_default_path()?
        };

        Ok(Self { base_dir })
    }

    /// Create SpendwisePaths with a custom base directory (useful for testing)
    pub fn with_base_dir(base_dir: PathBuf) -> Self {
        Self { base_dir }
    }

    pub fn base_dir(&self) -> &PathBuf {
        &self.base_dir
    }

    /// Get the data directory (<base>/data/)
    pub fn data_dir(&self) -> PathBuf {
        self.base_dir.join("data")
    }

    /// Get the default directory for exported files (<base>/exports/)
    pub fn exports_dir(&self) -> PathBuf {
        self.base_dir.join("exports")
    }

    /// Get the path to the settings file
    pub fn settings_file(&self) -> PathBuf {
        self.base_dir.join("config.json")
    }

    /// Get the path to the audit log
    pub fn audit_log(&self) -> PathBuf {
        self.base_dir.join("audit.log")
    }

    /// Get the path to the active session file
    pub fn session_file(&self) -> PathBuf {
        self.base_dir.join("session.json")
    }

    /// Get the path to the local credential store
    pub fn credentials_file(&self) -> PathBuf {
        self.data_dir().join("credentials.json")
    }

    /// Get the path to profiles.json (all user profiles)
    pub fn profiles_file(&self) -> PathBuf {
        self.data_dir().join("profiles.json")
    }

    /// Get the data directory of a single user
    pub fn user_dir(&self, user_id: UserId) -> PathBuf {
        self.data_dir().join("users").join(user_id.as_uuid().to_string())
    }

    pub fn transactions_file(&self, user_id: UserId) -> PathBuf {
        self.user_dir(user_id).join("transactions.json")
    }

    pub fn budgets_file(&self, user_id: UserId) -> PathBuf {
        self.user_dir(user_id).join("budgets.json")
    }

    /// Get the path to the user's custom categories
    pub fn categories_file(&self, user_id: UserId) -> PathBuf {
        self.user_dir(user_id).join("categories.json")
    }

    /// Ensure all shared directories exist
    ///
    /// Creates:
    /// - Base directory
    /// - Data directory (<base>/data/)
    pub fn ensure_directories(&self) -> Result<(), SpendwiseError> {
        std::fs::create_dir_all(&self.base_dir)
            .map_err(|e| SpendwiseError::Io(format!("Failed to create base directory: {}", e)))?;

        std::fs::create_dir_all(self.data_dir())
            .map_err(|e| SpendwiseError::Io(format!("Failed to create data directory: {}", e)))?;

        Ok(())
    }

    /// Ensure the per-user data directory exists
    pub fn ensure_user_dir(&self, user_id: UserId) -> Result<(), SpendwiseError> {
        std::fs::create_dir_all(self.user_dir(user_id))
            .map_err(|e| SpendwiseError::Io(format!("Failed to create user directory: {}", e)))
    }
}

fn resolve_default_path() -> Result<PathBuf, SpendwiseError> {
    ProjectDirs::from("", "", "spendwise")
        .map(|dirs| dirs.config_dir().to_path_buf())
        .ok_or_else(|| SpendwiseError::Config("Could not determine home directory".into()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_custom_base_dir() {
        let temp_dir = TempDir::new().unwrap();
        let paths = SpendwisePaths::with_base_dir(temp_dir.path().to_path_buf());

        assert_eq!(paths.base_dir(), temp_dir.path());
        assert_eq!(paths.data_dir(), temp_dir.path().join("data"));
        assert_eq!(paths.exports_dir(), temp_dir.path().join("exports"));
    }

    #[test]
    fn test_ensure_directories() {
        let temp_dir = TempDir::new().unwrap();
        let paths = SpendwisePaths::with_base_dir(temp_dir.path().to_path_buf());

        paths.ensure_directories().unwrap();

        assert!(paths.data_dir().exists());
    }

    #[test]
    fn test_user_files_are_scoped() {
        let temp_dir = TempDir::new().unwrap();
        let paths = SpendwisePaths::with_base_dir(temp_dir.path().to_path_buf());
        let alice = UserId::new();
        let bob = UserId::new();

        assert_ne!(paths.transactions_file(alice), paths.transactions_file(bob));
        assert!(paths.budgets_file(alice).starts_with(paths.user_dir(alice)));

        paths.ensure_user_dir(alice).unwrap();
        assert!(paths.user_dir(alice).exists());
        assert!(!paths.user_dir(bob).exists());
    }

    #[test]
    fn test_file_paths() {
        let temp_dir = TempDir::new().unwrap();
        let paths = SpendwisePaths::with_base_dir(temp_dir.path().to_path_buf());

        assert_eq!(paths.settings_file(), temp_dir.path().join("config.json"));
        assert_eq!(
            paths.profiles_file(),
            temp_dir.path().join("data").join("profiles.json")
        );
    }
}
