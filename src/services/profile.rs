//! Profile service
//!
//! Reads and edits the signed-in user's profile, and wipes their data on
//! request.

use log::info;
use serde::Serialize;

use crate::audit::EntityType;
use crate::auth::AuthProvider;
use crate::error::{SpendwiseError, SpendwiseResult};
use crate::models::{Currency, Theme, UserProfile};
use crate::storage::Storage;

/// Counts of what `delete_all_data` removed
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct DeletionSummary {
    pub transactions: usize,
    pub budgets: usize,
    pub categories: usize,
}

/// Service for the current user's profile
pub struct ProfileService<'a> {
    storage: &'a Storage,
}

impl<'a> ProfileService<'a> {
    pub fn new(storage: &'a Storage) -> Self {
        Self { storage }
    }

    pub fn get(&self) -> SpendwiseResult<UserProfile> {
        let user_id = self.storage.user_id();
        self.storage
            .profiles
            .get(user_id)?
            .ok_or_else(|| SpendwiseError::profile_not_found(user_id.to_string()))
    }

    pub fn update_name(&self, name: &str) -> SpendwiseResult<UserProfile> {
        let name = name.trim();
        if name.is_empty() {
            return Err(SpendwiseError::Validation("Name cannot be empty".into()));
        }

        let mut profile = self.get()?;
        let before = profile.clone();
        profile.name = name.to_string();
        self.save(&before, profile)
    }

    /// Merge preference changes; `None` keeps the current value
    pub fn update_preferences(
        &self,
        currency: Option<Currency>,
        theme: Option<Theme>,
    ) -> SpendwiseResult<UserProfile> {
        let mut profile = self.get()?;
        let before = profile.clone();
        profile.preferences.merge(currency, theme);
        self.save(&before, profile)
    }

    fn save(&self, before: &UserProfile, profile: UserProfile) -> SpendwiseResult<UserProfile> {
        if *before == profile {
            return Ok(profile);
        }

        self.storage.profiles.upsert(profile.clone())?;
        self.storage.profiles.save()?;

        self.storage.log_update(
            EntityType::Profile,
            profile.id.to_string(),
            Some(profile.email.clone()),
            before,
            &profile,
        );
        info!("updated profile {}", profile.id);

        Ok(profile)
    }

    /// Delete every transaction, budget and custom category, then the
    /// profile, then end the session
    pub fn delete_all_data<A: AuthProvider + ?Sized>(
        &self,
        auth: &A,
    ) -> SpendwiseResult<DeletionSummary> {
        let (transactions, budgets, categories) = self.storage.delete_user_data()?;
        auth.sign_out()?;

        Ok(DeletionSummary {
            transactions,
            budgets,
            categories,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::auth::{AuthUser, SecurePassword};
    use crate::config::paths::SpendwisePaths;
    use crate::models::{Category, Money, Transaction, TransactionType, UserId};
    use crate::storage::ProfileStore;
    use chrono::NaiveDate;
    use std::cell::Cell;
    use tempfile::TempDir;

    #[derive(Default)]
    struct CountingAuth {
        sign_outs: Cell<usize>,
    }

    impl AuthProvider for CountingAuth {
        fn sign_up(&self, _: &str, _: &SecurePassword, _: &str) -> SpendwiseResult<AuthUser> {
            unimplemented!()
        }

        fn sign_in(&self, _: &str, _: &SecurePassword) -> SpendwiseResult<AuthUser> {
            unimplemented!()
        }

        fn current_user(&self) -> SpendwiseResult<Option<AuthUser>> {
            Ok(None)
        }

        fn sign_out(&self) -> SpendwiseResult<()> {
            self.sign_outs.set(self.sign_outs.get() + 1);
            Ok(())
        }
    }

    fn storage_with_profile() -> (TempDir, Storage) {
        let temp_dir = TempDir::new().unwrap();
        let paths = SpendwisePaths::with_base_dir(temp_dir.path().to_path_buf());
        let user = UserId::new();
        let storage = Storage::open(paths, user).unwrap();
        storage
            .profiles
            .create_profile(&UserProfile::new(user, "kim@example.com", "Kim"))
            .unwrap();
        (temp_dir, storage)
    }

    #[test]
    fn test_missing_profile() {
        let temp_dir = TempDir::new().unwrap();
        let paths = SpendwisePaths::with_base_dir(temp_dir.path().to_path_buf());
        let storage = Storage::open(paths, UserId::new()).unwrap();
        assert!(ProfileService::new(&storage).get().unwrap_err().is_not_found());
    }

    #[test]
    fn test_update_name() {
        let (_temp, storage) = storage_with_profile();
        let service = ProfileService::new(&storage);

        assert_eq!(service.update_name("  Kim Lee ").unwrap().name, "Kim Lee");
        assert!(service.update_name("   ").unwrap_err().is_validation());
        assert_eq!(service.get().unwrap().name, "Kim Lee");
    }

    #[test]
    fn test_update_preferences_merges() {
        let (_temp, storage) = storage_with_profile();
        let service = ProfileService::new(&storage);

        service.update_preferences(Some(Currency::Gbp), None).unwrap();
        let profile = service.update_preferences(None, Some(Theme::Dark)).unwrap();
        assert_eq!(profile.preferences.currency, Currency::Gbp);
        assert_eq!(profile.preferences.theme, Theme::Dark);

        // No-op updates are not audited
        let before = storage.audit_logger().read_all().unwrap().len();
        service.update_preferences(None, None).unwrap();
        assert_eq!(storage.audit_logger().read_all().unwrap().len(), before);
    }

    #[test]
    fn test_delete_all_data_signs_out() {
        let (_temp, storage) = storage_with_profile();
        storage
            .transactions
            .upsert(Transaction::new(
                storage.user_id(),
                TransactionType::Expense,
                Money::from_cents(100),
                Category::new("Food"),
                NaiveDate::from_ymd_opt(2025, 1, 1).unwrap(),
            ))
            .unwrap();
        let auth = CountingAuth::default();

        let summary = ProfileService::new(&storage).delete_all_data(&auth).unwrap();
        assert_eq!(summary.transactions, 1);
        assert_eq!(auth.sign_outs.get(), 1);
        assert!(storage.profiles.get(storage.user_id()).unwrap().is_none());
    }
}
