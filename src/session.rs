//! The session store: a read-only key-value view of who is logged in.
//!
//! The identity is held as a serialized JSON string under the `user` key and the bearer token, if
//! any, under the `jwt` key. `SessionFile` keeps these items in `session.json` in the billed home
//! directory.

use crate::model::User;
use crate::{utils, Res};
use anyhow::Context;
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

pub const USER_KEY: &str = "user";
pub const JWT_KEY: &str = "jwt";

/// Read access to the session's items.
pub trait Session: Send + Sync {
    fn get_item(&self, key: &str) -> Option<String>;

    /// The logged-in identity.
    fn user(&self) -> Res<User> {
        let raw = self
            .get_item(USER_KEY)
            .context("No user is logged in, run 'billed login' first")?;
        serde_json::from_str(&raw).context("The session holds an invalid user")
    }

    fn jwt(&self) -> Option<String> {
        self.get_item(JWT_KEY).filter(|t| !t.is_empty())
    }
}

/// A session held in memory.
#[derive(Debug, Default, Clone)]
pub struct MemorySession {
    items: BTreeMap<String, String>,
}

impl MemorySession {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_user(user: &User) -> Res<Self> {
        let mut session = Self::new();
        session.set_user(user)?;
        Ok(session)
    }

    pub fn set_item(&mut self, key: impl Into<String>, value: impl Into<String>) {
        let _ = self.items.insert(key.into(), value.into());
    }

    pub fn set_user(&mut self, user: &User) -> Res<()> {
        let raw = serde_json::to_string(user).context("Unable to serialize user")?;
        self.set_item(USER_KEY, raw);
        Ok(())
    }
}

impl Session for MemorySession {
    fn get_item(&self, key: &str) -> Option<String> {
        self.items.get(key).cloned()
    }
}

/// A session persisted as a JSON object of string items.
#[derive(Debug, Clone)]
pub struct SessionFile {
    path: PathBuf,
    inner: MemorySession,
}

impl SessionFile {
    /// Loads `path`. A missing file is an empty session.
    pub async fn load(path: impl Into<PathBuf>) -> Res<Self> {
        let path = path.into();
        let items: BTreeMap<String, String> = if path.is_file() {
            utils::deserialize(&path).await?
        } else {
            BTreeMap::new()
        };
        Ok(Self {
            path,
            inner: MemorySession { items },
        })
    }

    /// Replaces the session with `user` and, optionally, a bearer token, and saves it.
    pub async fn login(&mut self, user: &User, jwt: Option<&str>) -> Res<()> {
        let mut inner = MemorySession::with_user(user)?;
        if let Some(token) = jwt {
            inner.set_item(JWT_KEY, token);
        }
        self.inner = inner;
        self.save().await
    }

    pub async fn save(&self) -> Res<()> {
        let json = serde_json::to_string_pretty(&self.inner.items)
            .context("Unable to serialize the session")?;
        utils::write(&self.path, json).await
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl Session for SessionFile {
    fn get_item(&self, key: &str) -> Option<String> {
        self.inner.get_item(key)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::UserType;
    use tempfile::TempDir;

    #[test]
    fn test_memory_session_user() {
        let session = MemorySession::with_user(&User::new(UserType::Employee, "a@a")).unwrap();
        let user = session.user().unwrap();
        assert_eq!(user.email(), "a@a");
        assert_eq!(user.user_type(), UserType::Employee);
        assert_eq!(session.jwt(), None);
    }

    #[test]
    fn test_identity_is_stored_as_serialized_string() {
        let mut session = MemorySession::new();
        session.set_item(USER_KEY, r#"{"type":"Admin","email":"admin@company.tld"}"#);
        let user = session.user().unwrap();
        assert_eq!(user.user_type(), UserType::Admin);
        assert_eq!(user.email(), "admin@company.tld");
    }

    #[test]
    fn test_missing_user() {
        let err = MemorySession::new().user().unwrap_err();
        assert!(err.to_string().contains("No user is logged in"));
    }

    #[tokio::test]
    async fn test_session_file_login_and_reload() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("session.json");
        let mut session = SessionFile::load(&path).await.unwrap();
        assert!(session.user().is_err());

        session
            .login(&User::new(UserType::Employee, "a@a"), Some("token"))
            .await
            .unwrap();

        let reloaded = SessionFile::load(&path).await.unwrap();
        assert_eq!(reloaded.user().unwrap().email(), "a@a");
        assert_eq!(reloaded.jwt(), Some("token".to_string()));
    }
}
