//! Profile repository for JSON storage
//!
//! Profiles are shared across users (one profiles.json) and keyed by user id.
//! The profile gate only sees this through the `ProfileStore` trait.

use std::collections::HashMap;
use std::path::PathBuf;
use std::sync::RwLock;

use crate::error::SpendwiseError;
use crate::models::{UserId, UserProfile};

use super::file_io::{read_json, write_json_atomic};
use super::{read_lock_err, write_lock_err};

/// Lookup and creation of profile records
pub trait ProfileStore {
    /// Fetch the profile for `user_id`, if one exists
    fn get_profile(&self, user_id: UserId) -> Result<Option<UserProfile>, SpendwiseError>;

    /// Persist a new profile
    fn create_profile(&self, profile: &UserProfile) -> Result<(), SpendwiseError>;
}

#[derive(Debug, Clone, Default, serde::Serialize, serde::Deserialize)]
struct ProfileData {
    #[serde(default)]
    profiles: Vec<UserProfile>,
}

/// Repository for user profiles
pub struct ProfileRepository {
    path: PathBuf,
    profiles: RwLock<HashMap<UserId, UserProfile>>,
}

impl ProfileRepository {
    pub fn new(path: PathBuf) -> Self {
        Self {
            path,
            profiles: RwLock::new(HashMap::new()),
        }
    }

    /// Create a repository and load it from disk
    pub fn open(path: PathBuf) -> Result<Self, SpendwiseError> {
        let repo = Self::new(path);
        repo.load()?;
        Ok(repo)
    }

    pub fn load(&self) -> Result<(), SpendwiseError> {
        let file_data: ProfileData = read_json(&self.path)?;
        let mut profiles = self.profiles.write().map_err(write_lock_err)?;
        profiles.clear();
        for profile in file_data.profiles {
            profiles.insert(profile.id, profile);
        }
        Ok(())
    }

    pub fn save(&self) -> Result<(), SpendwiseError> {
        let profiles = self.profiles.read().map_err(read_lock_err)?;
        let mut list: Vec<_> = profiles.values().cloned().collect();
        list.sort_by(|a, b| a.created_at.cmp(&b.created_at));
        write_json_atomic(&self.path, &ProfileData { profiles: list })
    }

    pub fn get(&self, id: UserId) -> Result<Option<UserProfile>, SpendwiseError> {
        let profiles = self.profiles.read().map_err(read_lock_err)?;
        Ok(profiles.get(&id).cloned())
    }

    pub fn upsert(&self, profile: UserProfile) -> Result<(), SpendwiseError> {
        let mut profiles = self.profiles.write().map_err(write_lock_err)?;
        profiles.insert(profile.id, profile);
        Ok(())
    }

    pub fn delete(&self, id: UserId) -> Result<Option<UserProfile>, SpendwiseError> {
        let mut profiles = self.profiles.write().map_err(write_lock_err)?;
        Ok(profiles.remove(&id))
    }

    pub fn count(&self) -> Result<usize, SpendwiseError> {
        Ok(self.profiles.read().map_err(read_lock_err)?.len())
    }
}

impl ProfileStore for ProfileRepository {
    fn get_profile(&self, user_id: UserId) -> Result<Option<UserProfile>, SpendwiseError> {
        self.get(user_id)
    }

    fn create_profile(&self, profile: &UserProfile) -> Result<(), SpendwiseError> {
        self.upsert(profile.clone())?;
        self.save()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_create_profile_persists() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("profiles.json");
        let repo = ProfileRepository::open(path.clone()).unwrap();
        let profile = UserProfile::new(UserId::new(), "kim@example.com", "Kim");

        assert!(repo.get_profile(profile.id).unwrap().is_none());
        repo.create_profile(&profile).unwrap();

        let reopened = ProfileRepository::open(path).unwrap();
        assert_eq!(reopened.get_profile(profile.id).unwrap(), Some(profile));
    }

    #[test]
    fn test_delete() {
        let temp_dir = TempDir::new().unwrap();
        let repo = ProfileRepository::new(temp_dir.path().join("profiles.json"));
        let profile = UserProfile::new(UserId::new(), "a@b.c", "A");
        repo.upsert(profile.clone()).unwrap();
        assert_eq!(repo.count().unwrap(), 1);
        assert!(repo.delete(profile.id).unwrap().is_some());
        assert_eq!(repo.count().unwrap(), 0);
    }
}
