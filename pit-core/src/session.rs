//! Session lifecycle
//!
//! Explicit session context with a defined load/save/clear cycle instead of
//! ambient storage reads. The authenticated profile is persisted as a single
//! JSON record under a fixed file name, with no expiry: a session survives
//! until explicit logout or a manual clear.

use std::path::{Path, PathBuf};

use pit_client::{ClientError, RemoteStore};
use shared::models::UserProfile;
use thiserror::Error;
use tracing::{debug, info};

const SESSION_FILE: &str = "session.json";

#[derive(Debug, Error)]
pub enum SessionError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Login failure taxonomy surfaced on the login form
#[derive(Debug, Error)]
pub enum LoginError {
    /// The store rejected the credentials
    #[error("Invalid credentials: {0}")]
    InvalidCredentials(String),

    /// HTTP 401: the web-app deployment access is not configured
    #[error("Web app access not configured")]
    AccessNotConfigured,

    /// Transport failure
    #[error(transparent)]
    Network(ClientError),

    /// Persisting the session failed
    #[error(transparent)]
    Session(#[from] SessionError),
}

/// File-backed persistence of the authenticated profile
#[derive(Debug, Clone)]
pub struct SessionStore {
    file_path: PathBuf,
}

impl SessionStore {
    pub fn new(data_dir: &Path) -> Self {
        Self {
            file_path: data_dir.join(SESSION_FILE),
        }
    }

    /// Load the persisted profile, if any
    pub fn load(&self) -> Result<Option<UserProfile>, SessionError> {
        if !self.file_path.exists() {
            return Ok(None);
        }
        let content = std::fs::read_to_string(&self.file_path)?;
        let profile: UserProfile = serde_json::from_str(&content)?;
        debug!(email = %profile.email, "loaded persisted session");
        Ok(Some(profile))
    }

    /// Persist the profile, creating the data directory if needed
    pub fn save(&self, profile: &UserProfile) -> Result<(), SessionError> {
        if let Some(parent) = self.file_path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let content = serde_json::to_string_pretty(profile)?;
        std::fs::write(&self.file_path, content)?;
        debug!(email = %profile.email, "session saved");
        Ok(())
    }

    /// Remove the persisted session, if present
    pub fn clear(&self) -> Result<(), SessionError> {
        if self.file_path.exists() {
            std::fs::remove_file(&self.file_path)?;
            debug!("session cleared");
        }
        Ok(())
    }
}

/// Login/restore/logout against the remote store plus the session file
pub struct SessionManager<S> {
    store: S,
    cache: SessionStore,
}

impl<S: RemoteStore> SessionManager<S> {
    pub fn new(store: S, data_dir: &Path) -> Self {
        Self {
            store,
            cache: SessionStore::new(data_dir),
        }
    }

    /// Authenticate, persist the returned profile, and hand it back
    pub async fn login(&self, username: &str, password: &str) -> Result<UserProfile, LoginError> {
        let profile = match self.store.authenticate(username, password).await {
            Ok(profile) => profile,
            Err(ClientError::Rejected(message)) => {
                return Err(LoginError::InvalidCredentials(message));
            }
            Err(ClientError::Unauthorized) => return Err(LoginError::AccessNotConfigured),
            Err(other) => return Err(LoginError::Network(other)),
        };
        self.cache.save(&profile)?;
        info!(email = %profile.email, "login succeeded");
        Ok(profile)
    }

    /// Reload a previously persisted profile (page refresh path)
    pub fn restore(&self) -> Result<Option<UserProfile>, SessionError> {
        self.cache.load()
    }

    /// Drop the persisted session
    pub fn logout(&self) -> Result<(), SessionError> {
        info!("logout");
        self.cache.clear()
    }
}
