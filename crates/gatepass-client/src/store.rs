use std::sync::Mutex;

use thiserror::Error;

/// Opaque bearer credential pair. Created by login and refresh,
/// overwritten on every successful refresh, deleted on logout or
/// unrecoverable refresh failure.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Credentials {
    pub access_token: String,
    pub refresh_token: Option<String>,
    pub session_token: Option<String>,
}

impl Credentials {
    pub fn new(access_token: impl Into<String>) -> Self {
        Self {
            access_token: access_token.into(),
            refresh_token: None,
            session_token: None,
        }
    }

    pub fn with_refresh_token(mut self, refresh_token: impl Into<String>) -> Self {
        self.refresh_token = Some(refresh_token.into());
        self
    }

    pub fn with_session_token(mut self, session_token: impl Into<String>) -> Self {
        self.session_token = Some(session_token.into());
        self
    }
}

#[derive(Debug, Error)]
#[error("{0}")]
pub struct StoreError(pub String);

/// Durable home for the credential pair. Request paths only read it; the
/// refresh-settlement path (and login/logout) are the only writers.
pub trait CredentialStore: Send + Sync {
    fn load(&self) -> Result<Option<Credentials>, StoreError>;
    fn save(&self, credentials: &Credentials) -> Result<(), StoreError>;
    fn clear(&self) -> Result<(), StoreError>;
}

/// Process-local store used by tests and short-lived tools.
#[derive(Default)]
pub struct MemoryStore {
    inner: Mutex<Option<Credentials>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_credentials(credentials: Credentials) -> Self {
        Self {
            inner: Mutex::new(Some(credentials)),
        }
    }
}

impl CredentialStore for MemoryStore {
    fn load(&self) -> Result<Option<Credentials>, StoreError> {
        let guard = self
            .inner
            .lock()
            .map_err(|_| StoreError("memory store poisoned".to_string()))?;
        Ok(guard.clone())
    }

    fn save(&self, credentials: &Credentials) -> Result<(), StoreError> {
        let mut guard = self
            .inner
            .lock()
            .map_err(|_| StoreError("memory store poisoned".to_string()))?;
        *guard = Some(credentials.clone());
        Ok(())
    }

    fn clear(&self) -> Result<(), StoreError> {
        let mut guard = self
            .inner
            .lock()
            .map_err(|_| StoreError("memory store poisoned".to_string()))?;
        *guard = None;
        Ok(())
    }
}
