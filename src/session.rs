// src/session.rs
use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use thiserror::Error;
use tracing::debug;

/// Credentials for an authenticated recruiter, created by the login flow and
/// torn down on logout. Every authenticated API call borrows the token from
/// here; nothing else in the crate touches ambient state.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Session {
    pub token: String,
    pub username: String,
    pub logged_in_at: DateTime<Utc>,
}

impl Session {
    pub fn new(token: impl Into<String>, username: impl Into<String>) -> Self {
        Self {
            token: token.into(),
            username: username.into(),
            logged_in_at: Utc::now(),
        }
    }
}

#[derive(Debug, Error)]
pub enum SessionError {
    /// No stored session; the caller must go through the login flow first.
    #[error("no active session")]
    NotLoggedIn,
}

/// File-backed session storage, one JSON file holding token and username.
pub struct SessionStore {
    path: PathBuf,
}

impl SessionStore {
    pub fn new(path: PathBuf) -> Self {
        Self { path }
    }

    /// Read the stored session. A missing or unreadable file means no session.
    pub fn load(&self) -> Option<Session> {
        let content = std::fs::read_to_string(&self.path).ok()?;
        match serde_json::from_str(&content) {
            Ok(session) => Some(session),
            Err(err) => {
                debug!("Ignoring corrupt session file: {}", err);
                None
            }
        }
    }

    /// Session guard: fail fast when no session is stored so that no
    /// authenticated work (and no network call) happens without a token.
    pub fn require(&self) -> Result<Session, SessionError> {
        self.load().ok_or(SessionError::NotLoggedIn)
    }

    pub fn save(&self, session: &Session) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            std::fs::create_dir_all(parent).with_context(|| {
                format!("Failed to create session directory: {}", parent.display())
            })?;
        }
        let content = serde_json::to_string_pretty(session)?;
        std::fs::write(&self.path, content)
            .with_context(|| format!("Failed to write session file: {}", self.path.display()))
    }

    /// Logout: drop everything the store holds.
    pub fn clear(&self) -> Result<()> {
        if self.path.exists() {
            std::fs::remove_file(&self.path).with_context(|| {
                format!("Failed to remove session file: {}", self.path.display())
            })?;
        }
        Ok(())
    }
}
