//! Login sessions
//!
//! Static credential table plus the set of live session ids handed out as
//! cookies. Sessions live in memory and die with the process.

use std::collections::{BTreeMap, HashMap};
use std::sync::RwLock;
use thiserror::Error;
use tracing::{debug, info, warn};
use uuid::Uuid;

/// Name of the session cookie
pub const SESSION_COOKIE: &str = "parley_session";

/// Authentication errors
#[derive(Debug, Error)]
pub enum AuthError {
    /// No session cookie on the request
    #[error("Authentication required")]
    MissingCredentials,

    /// Wrong username or password
    #[error("Invalid username or password")]
    InvalidCredentials,

    /// Cookie does not name a live session
    #[error("Session is not valid")]
    InvalidSession,

    /// Internal failure
    #[error("Internal auth error: {0}")]
    Internal(String),
}

/// Authenticated caller
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionContext {
    pub username: String,
    /// `None` for the anonymous user admitted while auth is disabled
    pub session_id: Option<Uuid>,
}

impl SessionContext {
    pub fn anonymous() -> Self {
        Self {
            username: "anonymous".to_string(),
            session_id: None,
        }
    }
}

/// Credential table and live sessions
#[derive(Debug)]
pub struct AuthStore {
    enabled: bool,
    users: BTreeMap<String, String>,
    /// session id → username
    sessions: RwLock<HashMap<Uuid, String>>,
}

impl AuthStore {
    pub fn new(enabled: bool, users: BTreeMap<String, String>) -> Self {
        Self {
            enabled,
            users: users
                .into_iter()
                .map(|(name, password)| (name.to_lowercase(), password))
                .collect(),
            sessions: RwLock::new(HashMap::new()),
        }
    }

    /// Check if authentication is enabled
    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    /// Check credentials and open a session.
    ///
    /// Usernames are case-insensitive; passwords are not.
    pub fn login(&self, username: &str, password: &str) -> Result<Uuid, AuthError> {
        let username = username.to_lowercase();
        match self.users.get(&username) {
            Some(expected) if expected == password => {}
            _ => {
                warn!(username = %username, "Rejected login");
                return Err(AuthError::InvalidCredentials);
            }
        }

        let session_id = Uuid::new_v4();
        self.sessions
            .write()
            .map_err(|e| AuthError::Internal(format!("Lock poisoned: {}", e)))?
            .insert(session_id, username.clone());

        info!(username = %username, "User logged in");
        Ok(session_id)
    }

    /// Close a session. Unknown ids are ignored.
    pub fn logout(&self, session_id: Uuid) -> Result<(), AuthError> {
        let removed = self
            .sessions
            .write()
            .map_err(|e| AuthError::Internal(format!("Lock poisoned: {}", e)))?
            .remove(&session_id);

        if let Some(username) = removed {
            info!(username = %username, "User logged out");
        } else {
            debug!(%session_id, "Logout for unknown session");
        }
        Ok(())
    }

    /// Resolve a session id
    pub fn validate(&self, session_id: Uuid) -> Result<SessionContext, AuthError> {
        let sessions = self
            .sessions
            .read()
            .map_err(|e| AuthError::Internal(format!("Lock poisoned: {}", e)))?;

        sessions
            .get(&session_id)
            .map(|username| SessionContext {
                username: username.clone(),
                session_id: Some(session_id),
            })
            .ok_or(AuthError::InvalidSession)
    }
}
