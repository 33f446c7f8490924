//! File-backed auth provider
//!
//! Credentials (argon2 PHC hashes) live in `data/credentials.json`; the
//! active session is a random token in `session.json`.

use std::path::PathBuf;

use argon2::password_hash::rand_core::{OsRng, RngCore};
use base64::{engine::general_purpose::STANDARD, Engine as _};
use chrono::{DateTime, Utc};
use log::{info, warn};
use serde::{Deserialize, Serialize};

use super::password::{hash_password, verify_password, SecurePassword};
use super::{normalize_email, AuthProvider, AuthUser, MIN_PASSWORD_LEN};
use crate::config::paths::SpendwisePaths;
use crate::error::{SpendwiseError, SpendwiseResult};
use crate::models::UserId;
use crate::storage::{read_json, remove_file_if_exists, write_json_atomic};

#[derive(Debug, Clone, Serialize, Deserialize)]
struct Credential {
    uid: UserId,
    email: String,
    #[serde(default)]
    display_name: String,
    password_hash: String,
    created_at: DateTime<Utc>,
}

impl Credential {
    fn to_user(&self) -> AuthUser {
        AuthUser {
            uid: self.uid,
            email: self.email.clone(),
            display_name: self.display_name.clone(),
        }
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
struct CredentialData {
    #[serde(default)]
    accounts: Vec<Credential>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
struct Session {
    uid: UserId,
    token: String,
    created_at: DateTime<Utc>,
}

/// Auth provider storing credentials in the local data directory
pub struct LocalAuthProvider {
    credentials_path: PathBuf,
    session_path: PathBuf,
}

fn invalid_credentials() -> SpendwiseError {
    SpendwiseError::Auth("Invalid email or password".into())
}

fn new_session_token() -> String {
    let mut bytes = [0u8; 32];
    OsRng.fill_bytes(&mut bytes);
    STANDARD.encode(bytes)
}

impl LocalAuthProvider {
    pub fn new(paths: &SpendwisePaths) -> Self {
        Self {
            credentials_path: paths.credentials_file(),
            session_path: paths.session_file(),
        }
    }

    fn load_credentials(&self) -> SpendwiseResult<CredentialData> {
        read_json(&self.credentials_path)
    }

    fn start_session(&self, uid: UserId) -> SpendwiseResult<()> {
        let session = Session {
            uid,
            token: new_session_token(),
            created_at: Utc::now(),
        };
        write_json_atomic(&self.session_path, &session)
    }
}

impl AuthProvider for LocalAuthProvider {
    fn sign_up(
        &self,
        email: &str,
        password: &SecurePassword,
        display_name: &str,
    ) -> SpendwiseResult<AuthUser> {
        let email = normalize_email(email);
        if email.is_empty() || !email.contains('@') {
            return Err(SpendwiseError::Validation(format!(
                "'{}' is not a valid email address",
                email
            )));
        }
        if password.len() < MIN_PASSWORD_LEN {
            return Err(SpendwiseError::Validation(format!(
                "Password must be at least {} characters",
                MIN_PASSWORD_LEN
            )));
        }

        let mut data = self.load_credentials()?;
        if data.accounts.iter().any(|c| c.email == email) {
            return Err(SpendwiseError::Duplicate {
                entity_type: "Account",
                identifier: email,
            });
        }

        let credential = Credential {
            uid: UserId::new(),
            email,
            display_name: display_name.trim().to_string(),
            password_hash: hash_password(password)?,
            created_at: Utc::now(),
        };
        let user = credential.to_user();
        data.accounts.push(credential);
        write_json_atomic(&self.credentials_path, &data)?;

        self.start_session(user.uid)?;
        info!("registered and signed in {}", user.uid);
        Ok(user)
    }

    fn sign_in(&self, email: &str, password: &SecurePassword) -> SpendwiseResult<AuthUser> {
        let email = normalize_email(email);
        let data = self.load_credentials()?;

        let credential = data
            .accounts
            .iter()
            .find(|c| c.email == email)
            .ok_or_else(invalid_credentials)?;

        if !verify_password(password, &credential.password_hash)? {
            return Err(invalid_credentials());
        }

        self.start_session(credential.uid)?;
        info!("signed in {}", credential.uid);
        Ok(credential.to_user())
    }

    fn current_user(&self) -> SpendwiseResult<Option<AuthUser>> {
        if !self.session_path.exists() {
            return Ok(None);
        }

        let session: Session = match read_json::<Option<Session>, _>(&self.session_path) {
            Ok(Some(session)) => session,
            Ok(None) => return Ok(None),
            Err(e) => {
                warn!("ignoring unreadable session file: {}", e);
                return Ok(None);
            }
        };

        let data = self.load_credentials()?;
        let user = data
            .accounts
            .iter()
            .find(|c| c.uid == session.uid)
            .map(Credential::to_user);

        if user.is_none() {
            warn!("session refers to unknown user {}", session.uid);
        }
        Ok(user)
    }

    fn sign_out(&self) -> SpendwiseResult<()> {
        if remove_file_if_exists(&self.session_path)? {
            info!("signed out");
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn provider() -> (TempDir, LocalAuthProvider) {
        let temp_dir = TempDir::new().unwrap();
        let paths = SpendwisePaths::with_base_dir(temp_dir.path().to_path_buf());
        paths.ensure_directories().unwrap();
        let provider = LocalAuthProvider::new(&paths);
        (temp_dir, provider)
    }

    #[test]
    fn test_sign_up_starts_session() {
        let (_dir, auth) = provider();
        let user = auth
            .sign_up(" Ana@Example.com ", &"secret1".into(), "Ana")
            .unwrap();

        assert_eq!(user.email, "ana@example.com");
        assert_eq!(auth.current_user().unwrap(), Some(user));
    }

    #[test]
    fn test_sign_up_rejects_duplicates_and_bad_input() {
        let (_dir, auth) = provider();
        auth.sign_up("ana@example.com", &"secret1".into(), "").unwrap();

        let dup = auth.sign_up("ANA@example.com", &"secret2".into(), "").unwrap_err();
        assert!(dup.is_duplicate());
        assert!(auth.sign_up("no-at-sign", &"secret1".into(), "").unwrap_err().is_validation());
        assert!(auth.sign_up("b@example.com", &"short".into(), "").unwrap_err().is_validation());
    }

    #[test]
    fn test_sign_in_and_out() {
        let (_dir, auth) = provider();
        let user = auth.sign_up("ana@example.com", &"secret1".into(), "Ana").unwrap();
        auth.sign_out().unwrap();
        assert_eq!(auth.current_user().unwrap(), None);

        let again = auth.sign_in("ana@example.com", &"secret1".into()).unwrap();
        assert_eq!(again.uid, user.uid);
        assert!(auth.current_user().unwrap().is_some());

        // Signing out twice is fine
        auth.sign_out().unwrap();
        auth.sign_out().unwrap();
    }

    #[test]
    fn test_wrong_password_and_unknown_email_look_the_same() {
        let (_dir, auth) = provider();
        auth.sign_up("ana@example.com", &"secret1".into(), "").unwrap();

        let wrong = auth.sign_in("ana@example.com", &"nope123".into()).unwrap_err();
        let unknown = auth.sign_in("bob@example.com", &"secret1".into()).unwrap_err();
        assert_eq!(wrong.to_string(), unknown.to_string());
    }

    #[test]
    fn test_session_tokens_are_random() {
        let (dir, auth) = provider();
        auth.sign_up("ana@example.com", &"secret1".into(), "").unwrap();
        let first = std::fs::read_to_string(dir.path().join("session.json")).unwrap();
        auth.sign_in("ana@example.com", &"secret1".into()).unwrap();
        let second = std::fs::read_to_string(dir.path().join("session.json")).unwrap();
        assert_ne!(first, second);
    }
}
