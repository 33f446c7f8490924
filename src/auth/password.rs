//! Password handling: zeroized buffers, hashing and terminal prompts

use argon2::{
    password_hash::{rand_core::OsRng, PasswordHash, PasswordHasher, PasswordVerifier, SaltString},
    Argon2,
};
use std::fmt;
use zeroize::{Zeroize, ZeroizeOnDrop};

use crate::error::{SpendwiseError, SpendwiseResult};

/// Environment variable read instead of prompting (for scripts and tests)
pub const PASSWORD_ENV: &str = "SPENDWISE_PASSWORD";

/// A password that is wiped from memory when dropped
#[derive(Clone, Zeroize, ZeroizeOnDrop)]
pub struct SecurePassword(String);

impl SecurePassword {
    pub fn new(s: impl Into<String>) -> Self {
        Self(s.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Length in characters
    pub fn len(&self) -> usize {
        self.0.chars().count()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl fmt::Debug for SecurePassword {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "SecurePassword(***)")
    }
}

impl From<&str> for SecurePassword {
    fn from(s: &str) -> Self {
        Self::new(s)
    }
}

/// Hash a password into a PHC string with a fresh random salt
pub fn hash_password(password: &SecurePassword) -> SpendwiseResult<String> {
    let salt = SaltString::generate(&mut OsRng);
    Argon2::default()
        .hash_password(password.as_str().as_bytes(), &salt)
        .map(|hash| hash.to_string())
        .map_err(|e| SpendwiseError::Auth(format!("Failed to hash password: {}", e)))
}

/// Check a password against a stored PHC hash
pub fn verify_password(password: &SecurePassword, stored_hash: &str) -> SpendwiseResult<bool> {
    let parsed = PasswordHash::new(stored_hash)
        .map_err(|e| SpendwiseError::Auth(format!("Stored password hash is invalid: {}", e)))?;
    Ok(Argon2::default()
        .verify_password(password.as_str().as_bytes(), &parsed)
        .is_ok())
}

/// Read a password from `SPENDWISE_PASSWORD` or prompt for it without echo
pub fn read_password(prompt: &str) -> SpendwiseResult<SecurePassword> {
    if let Ok(from_env) = std::env::var(PASSWORD_ENV) {
        return Ok(SecurePassword::new(from_env));
    }
    rpassword::prompt_password(prompt)
        .map(SecurePassword::new)
        .map_err(|e| SpendwiseError::Io(format!("Failed to read password: {}", e)))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hash_and_verify() {
        let password = SecurePassword::from("correct horse");
        let hash = hash_password(&password).unwrap();

        assert!(hash.starts_with("$argon2"));
        assert!(verify_password(&password, &hash).unwrap());
        assert!(!verify_password(&SecurePassword::from("wrong"), &hash).unwrap());
    }

    #[test]
    fn test_hashes_are_salted() {
        let password = SecurePassword::from("same-password");
        assert_ne!(hash_password(&password).unwrap(), hash_password(&password).unwrap());
    }

    #[test]
    fn test_debug_is_redacted() {
        let password = SecurePassword::from("hunter22");
        assert_eq!(format!("{:?}", password), "SecurePassword(***)");
    }

    #[test]
    fn test_invalid_stored_hash() {
        let err = verify_password(&SecurePassword::from("x"), "not-a-hash").unwrap_err();
        assert!(matches!(err, SpendwiseError::Auth(_)));
    }
}
