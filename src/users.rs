//! Username/password gate that keeps each user's history separate.
//!
//! Passwords are stored and compared in plaintext. This is only a
//! separation of histories on a shared machine, not an access control.

use crate::error::{JournalError, Result};
use crate::store::write_json;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Credential {
    pub username: String,
    pub password: String,
}

/// Result of a signup attempt.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SignupResult {
    Created,
    DuplicateUser,
}

/// Trim and validate a username. Usernames become file names, so only
/// ASCII letters, digits, `-`, `_` and `.` are allowed.
pub fn normalize_username(username: &str) -> Result<String> {
    let trimmed = username.trim();
    let valid = !trimmed.is_empty()
        && !trimmed.starts_with('.')
        && trimmed
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || matches!(c, '-' | '_' | '.'));
    if valid {
        Ok(trimmed.to_string())
    } else {
        Err(JournalError::InvalidUsername(username.to_string()))
    }
}

/// Credential list stored as a JSON array.
#[derive(Debug, Clone)]
pub struct CredentialStore {
    path: PathBuf,
}

impl CredentialStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn in_root(root: &Path) -> Self {
        Self::new(root.join("users.json"))
    }

    fn load(&self) -> Result<Vec<Credential>> {
        match std::fs::read_to_string(&self.path) {
            Ok(contents) if contents.trim().is_empty() => Ok(Vec::new()),
            Ok(contents) => {
                serde_json::from_str(&contents).map_err(|e| JournalError::format(&self.path, e))
            }
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(Vec::new()),
            Err(e) => Err(JournalError::io(&self.path, e)),
        }
    }

    fn save(&self, users: &[Credential]) -> Result<()> {
        write_json(&self.path, users)
    }

    /// Register a new user. An existing username is reported as
    /// [`SignupResult::DuplicateUser`], not as an error.
    pub fn signup(&self, username: &str, password: &str) -> Result<SignupResult> {
        let username = normalize_username(username)?;
        if password.is_empty() {
            return Err(JournalError::InvalidPassword);
        }

        let mut users = self.load()?;
        if users.iter().any(|u| u.username == username) {
            tracing::info!("Signup rejected, user {} already exists", username);
            return Ok(SignupResult::DuplicateUser);
        }

        users.push(Credential {
            username: username.clone(),
            password: password.to_string(),
        });
        self.save(&users)?;
        tracing::info!("Created user {}", username);
        Ok(SignupResult::Created)
    }

    /// Check a username/password pair.
    pub fn verify(&self, username: &str, password: &str) -> Result<bool> {
        let Ok(username) = normalize_username(username) else {
            return Ok(false);
        };
        let users = self.load()?;
        Ok(users
            .iter()
            .any(|u| u.username == username && u.password == password))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn duplicate_signup_is_reported() {
        let dir = TempDir::new().unwrap();
        let store = CredentialStore::in_root(dir.path());
        assert_eq!(store.signup("alice", "pw").unwrap(), SignupResult::Created);
        let again = store.signup("alice", "other").unwrap();
        assert_eq!(again, SignupResult::DuplicateUser);
        let padded = store.signup("  alice ", "pw").unwrap();
        assert_eq!(padded, SignupResult::DuplicateUser);
    }

    #[test]
    fn verify_compares_plaintext() {
        let dir = TempDir::new().unwrap();
        let store = CredentialStore::in_root(dir.path());
        store.signup("alice", "secret").unwrap();
        assert!(store.verify("alice", "secret").unwrap());
        assert!(!store.verify("alice", "Secret").unwrap());
        assert!(!store.verify("bob", "secret").unwrap());
        assert!(!store.verify("../alice", "secret").unwrap());
    }

    #[test]
    fn verify_without_any_users() {
        let dir = TempDir::new().unwrap();
        let store = CredentialStore::in_root(dir.path());
        assert!(!store.verify("alice", "pw").unwrap());
    }

    #[test]
    fn usernames_are_validated() {
        assert_eq!(normalize_username(" carol_1.b ").unwrap(), "carol_1.b");
        for bad in ["", "   ", "../etc", "a/b", "a b", ".hidden", "émile"] {
            assert!(
                matches!(normalize_username(bad), Err(JournalError::InvalidUsername(_))),
                "{bad:?} should be rejected"
            );
        }
    }

    #[test]
    fn empty_password_is_rejected() {
        let dir = TempDir::new().unwrap();
        let store = CredentialStore::in_root(dir.path());
        assert!(matches!(
            store.signup("dave", ""),
            Err(JournalError::InvalidPassword)
        ));
    }

    #[test]
    fn credentials_persist_between_store_instances() {
        let dir = TempDir::new().unwrap();
        let store = CredentialStore::in_root(dir.path());
        store.signup("erin", "pw").unwrap();

        let path = dir.path().join("users.json");
        let raw = std::fs::read_to_string(&path).unwrap();
        let users: Vec<Credential> = serde_json::from_str(&raw).unwrap();
        let expected = Credential {
            username: "erin".into(),
            password: "pw".into(),
        };
        assert_eq!(users, vec![expected]);

        let reopened = CredentialStore::in_root(dir.path());
        assert!(reopened.verify("erin", "pw").unwrap());
    }
}
