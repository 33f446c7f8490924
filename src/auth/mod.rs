//! Authentication
//!
//! Sign-in is behind the `AuthProvider` trait so the rest of the application
//! only sees an `AuthUser`. `LocalAuthProvider` keeps argon2 password hashes
//! and a session token on disk; a hosted identity service can be swapped in
//! by implementing the same trait.

pub mod local;
pub mod password;

pub use local::LocalAuthProvider;
pub use password::{read_password, SecurePassword, PASSWORD_ENV};

use serde::{Deserialize, Serialize};

use crate::error::SpendwiseResult;
use crate::models::UserId;

/// Minimum accepted password length
pub const MIN_PASSWORD_LEN: usize = 6;

/// The identity of a signed-in user as reported by the auth provider
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuthUser {
    pub uid: UserId,
    pub email: String,
    #[serde(default)]
    pub display_name: String,
}

/// An authentication backend
pub trait AuthProvider {
    /// Register a new account and start a session for it
    fn sign_up(
        &self,
        email: &str,
        password: &SecurePassword,
        display_name: &str,
    ) -> SpendwiseResult<AuthUser>;

    /// Verify credentials and start a session
    fn sign_in(&self, email: &str, password: &SecurePassword) -> SpendwiseResult<AuthUser>;

    /// The user of the active session, if any
    fn current_user(&self) -> SpendwiseResult<Option<AuthUser>>;

    /// End the active session (no-op when signed out)
    fn sign_out(&self) -> SpendwiseResult<()>;
}

/// Trim and lowercase an email address
pub fn normalize_email(email: &str) -> String {
    email.trim().to_lowercase()
}
