//! User profile and preferences
//!
//! The profile is the application-side record of a signed-in user. It is
//! created lazily the first time the profile gate sees a user without one.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::currency::{Currency, Theme};
use super::ids::UserId;

/// Display preferences stored on the profile
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct Preferences {
    #[serde(default)]
    pub currency: Currency,

    #[serde(default)]
    pub theme: Theme,
}

impl Preferences {
    /// Merge a partial update; unset fields keep their current value
    pub fn merge(&mut self, currency: Option<Currency>, theme: Option<Theme>) {
        if let Some(currency) = currency {
            self.currency = currency;
        }
        if let Some(theme) = theme {
            self.theme = theme;
        }
    }
}

/// A user's profile record
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UserProfile {
    pub id: UserId,

    pub email: String,

    pub name: String,

    pub created_at: DateTime<Utc>,

    #[serde(default)]
    pub preferences: Preferences,
}

impl UserProfile {
    /// Create a profile with default preferences
    ///
    /// An empty name falls back to the local part of the email address.
    pub fn new(id: UserId, email: impl Into<String>, name: impl Into<String>) -> Self {
        let email = email.into();
        let name = name.into().trim().to_string();
        let name = if name.is_empty() {
            email.split('@').next().unwrap_or_default().to_string()
        } else {
            name
        };
        Self {
            id,
            email,
            name,
            created_at: Utc::now(),
            preferences: Preferences::default(),
        }
    }

    pub fn currency(&self) -> Currency {
        self.preferences.currency
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_name_falls_back_to_email() {
        let profile = UserProfile::new(UserId::new(), "sam@example.com", "  ");
        assert_eq!(profile.name, "sam");
        assert_eq!(profile.preferences, Preferences::default());
    }

    #[test]
    fn test_defaults() {
        let prefs = Preferences::default();
        assert_eq!(prefs.currency, Currency::Usd);
        assert_eq!(prefs.theme, Theme::Auto);
    }

    #[test]
    fn test_merge_keeps_unset_fields() {
        let mut prefs = Preferences::default();
        prefs.merge(Some(Currency::Eur), None);
        assert_eq!(prefs.currency, Currency::Eur);
        assert_eq!(prefs.theme, Theme::Auto);

        prefs.merge(None, Some(Theme::Dark));
        assert_eq!(prefs.currency, Currency::Eur);
        assert_eq!(prefs.theme, Theme::Dark);
    }

    #[test]
    fn test_missing_preferences_deserialize_to_defaults() {
        let json = r#"{
            "id": "550e8400-e29b-41d4-a716-446655440000",
            "email": "a@b.c",
            "name": "A",
            "created_at": "2025-01-01T00:00:00Z"
        }"#;
        let profile: UserProfile = serde_json::from_str(json).unwrap();
        assert_eq!(profile.currency(), Currency::Usd);
    }
}
