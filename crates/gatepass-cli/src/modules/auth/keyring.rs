#[cfg(test)]
use std::collections::HashMap;
#[cfg(test)]
use std::sync::{Mutex, OnceLock};
#[cfg(test)]
use tokio::sync::Mutex as TokioMutex;
use tracing::debug;
#[cfg(not(test))]
use tracing::warn;

use gatepass_client::{CredentialStore, Credentials, StoreError};

fn keyring_key(kind: &str, context_name: &str, token_name: &str) -> String {
    format!("{kind}::{}::{}", context_name, token_name)
}

#[cfg(test)]
fn keyring_store() -> &'static Mutex<HashMap<String, String>> {
    static STORE: OnceLock<Mutex<HashMap<String, String>>> = OnceLock::new();
    STORE.get_or_init(|| Mutex::new(HashMap::new()))
}

#[cfg(test)]
static KEYRING_TEST_LOCK: OnceLock<TokioMutex<()>> = OnceLock::new();

#[cfg(test)]
pub(crate) fn lock_keyring_tests_sync() -> tokio::sync::MutexGuard<'static, ()> {
    KEYRING_TEST_LOCK
        .get_or_init(|| TokioMutex::new(()))
        .blocking_lock()
}

#[cfg(test)]
pub(crate) async fn lock_keyring_tests_async() -> tokio::sync::MutexGuard<'static, ()> {
    KEYRING_TEST_LOCK
        .get_or_init(|| TokioMutex::new(()))
        .lock()
        .await
}

#[cfg(not(test))]
fn keyring_entry(
    kind: &str,
    context_name: &str,
    token_name: &str,
) -> anyhow::Result<keyring::Entry> {
    let service = "gatepass-cli";
    let key = keyring_key(kind, context_name, token_name);
    keyring::Entry::new(service, &key)
        .map_err(|err| anyhow::anyhow!("failed to access keyring: {err}"))
}

#[cfg(not(test))]
fn keyring_set(
    kind: &str,
    context_name: &str,
    token_name: &str,
    value: &str,
) -> anyhow::Result<()> {
    let entry = keyring_entry(kind, context_name, token_name)?;
    entry
        .set_password(value)
        .map_err(|err| anyhow::anyhow!("failed to store {kind} token: {err}"))
}

#[cfg(not(test))]
fn keyring_get(kind: &str, context_name: &str, token_name: &str) -> anyhow::Result<Option<String>> {
    let entry = keyring_entry(kind, context_name, token_name)?;
    match entry.get_password() {
        Ok(value) => Ok(Some(value)),
        Err(keyring::Error::NoEntry) => Ok(None),
        Err(err) => Err(anyhow::anyhow!(
            "failed to load {kind} token from keychain for context '{}', token '{}': {err}",
            context_name,
            token_name
        )),
    }
}

#[cfg(not(test))]
fn keyring_delete(kind: &str, context_name: &str, token_name: &str) -> anyhow::Result<()> {
    let entry = keyring_entry(kind, context_name, token_name)?;
    match entry.delete_password() {
        Ok(()) | Err(keyring::Error::NoEntry) => Ok(()),
        Err(err) => {
            warn!(context = %context_name, token = %token_name, "failed to delete {kind} token: {err}");
            Ok(())
        }
    }
}

#[cfg(test)]
fn keyring_set(
    kind: &str,
    context_name: &str,
    token_name: &str,
    value: &str,
) -> anyhow::Result<()> {
    let key = keyring_key(kind, context_name, token_name);
    let mut store = keyring_store()
        .lock()
        .map_err(|_| anyhow::anyhow!("failed to lock keyring store"))?;
    store.insert(key, value.to_string());
    Ok(())
}

#[cfg(test)]
fn keyring_get(kind: &str, context_name: &str, token_name: &str) -> anyhow::Result<Option<String>> {
    let key = keyring_key(kind, context_name, token_name);
    let store = keyring_store()
        .lock()
        .map_err(|_| anyhow::anyhow!("failed to lock keyring store"))?;
    Ok(store.get(&key).cloned())
}

#[cfg(test)]
fn keyring_delete(kind: &str, context_name: &str, token_name: &str) -> anyhow::Result<()> {
    let key = keyring_key(kind, context_name, token_name);
    let mut store = keyring_store()
        .lock()
        .map_err(|_| anyhow::anyhow!("failed to lock keyring store"))?;
    store.remove(&key);
    Ok(())
}

#[cfg(test)]
pub(crate) fn clear_keyring_mock() {
    if let Ok(mut map) = keyring_store().lock() {
        map.clear();
    }
}

pub(crate) fn store_access_token(
    context_name: &str,
    token_name: &str,
    access_token: &str,
) -> anyhow::Result<()> {
    keyring_set("access", context_name, token_name, access_token)?;
    debug!(context = %context_name, token = %token_name, "stored access token in keyring");
    Ok(())
}

pub(crate) fn load_access_token(
    context_name: &str,
    token_name: &str,
) -> anyhow::Result<Option<String>> {
    keyring_get("access", context_name, token_name)
}

pub(crate) fn delete_access_token(context_name: &str, token_name: &str) -> anyhow::Result<()> {
    keyring_delete("access", context_name, token_name)
}

pub(crate) fn store_refresh_token(
    context_name: &str,
    token_name: &str,
    refresh_token: &str,
) -> anyhow::Result<()> {
    keyring_set("refresh", context_name, token_name, refresh_token)?;
    debug!(context = %context_name, token = %token_name, "stored refresh token in keyring");
    Ok(())
}

pub(crate) fn load_refresh_token(
    context_name: &str,
    token_name: &str,
) -> anyhow::Result<Option<String>> {
    keyring_get("refresh", context_name, token_name)
}

pub(crate) fn delete_refresh_token(context_name: &str, token_name: &str) -> anyhow::Result<()> {
    keyring_delete("refresh", context_name, token_name)
}

pub(crate) fn store_session_token(
    context_name: &str,
    token_name: &str,
    session_token: &str,
) -> anyhow::Result<()> {
    keyring_set("session", context_name, token_name, session_token)?;
    debug!(context = %context_name, token = %token_name, "stored session token in keyring");
    Ok(())
}

pub(crate) fn load_session_token(
    context_name: &str,
    token_name: &str,
) -> anyhow::Result<Option<String>> {
    keyring_get("session", context_name, token_name)
}

pub(crate) fn delete_session_token(context_name: &str, token_name: &str) -> anyhow::Result<()> {
    keyring_delete("session", context_name, token_name)
}

/// Keyring-backed credential store handed to the API client, so tokens
/// rotated by the 401-refresh path land in the same keychain entries the
/// login flow writes.
pub(crate) struct KeyringStore {
    context_name: String,
    token_name: String,
}

impl KeyringStore {
    pub(crate) fn new(context_name: impl Into<String>, token_name: impl Into<String>) -> Self {
        Self {
            context_name: context_name.into(),
            token_name: token_name.into(),
        }
    }
}

impl CredentialStore for KeyringStore {
    fn load(&self) -> Result<Option<Credentials>, StoreError> {
        let access = load_access_token(&self.context_name, &self.token_name)
            .map_err(|err| StoreError(err.to_string()))?;
        let refresh = load_refresh_token(&self.context_name, &self.token_name)
            .map_err(|err| StoreError(err.to_string()))?;
        let session = load_session_token(&self.context_name, &self.token_name)
            .map_err(|err| StoreError(err.to_string()))?;
        if access.is_none() && refresh.is_none() {
            return Ok(None);
        }
        Ok(Some(Credentials {
            access_token: access.unwrap_or_default(),
            refresh_token: refresh,
            session_token: session,
        }))
    }

    fn save(&self, credentials: &Credentials) -> Result<(), StoreError> {
        store_access_token(
            &self.context_name,
            &self.token_name,
            &credentials.access_token,
        )
        .map_err(|err| StoreError(err.to_string()))?;
        match credentials.refresh_token.as_deref() {
            Some(refresh_token) => {
                store_refresh_token(&self.context_name, &self.token_name, refresh_token)
            }
            None => delete_refresh_token(&self.context_name, &self.token_name),
        }
        .map_err(|err| StoreError(err.to_string()))?;
        match credentials.session_token.as_deref() {
            Some(session_token) => {
                store_session_token(&self.context_name, &self.token_name, session_token)
            }
            None => delete_session_token(&self.context_name, &self.token_name),
        }
        .map_err(|err| StoreError(err.to_string()))?;
        Ok(())
    }

    fn clear(&self) -> Result<(), StoreError> {
        delete_access_token(&self.context_name, &self.token_name)
            .map_err(|err| StoreError(err.to_string()))?;
        delete_refresh_token(&self.context_name, &self.token_name)
            .map_err(|err| StoreError(err.to_string()))?;
        delete_session_token(&self.context_name, &self.token_name)
            .map_err(|err| StoreError(err.to_string()))?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn keyring_store_roundtrip() {
        let _guard = lock_keyring_tests_sync();
        clear_keyring_mock();
        let store = KeyringStore::new("ctx", "session");

        assert_eq!(store.load().expect("load"), None);

        let credentials = Credentials::new("access").with_refresh_token("refresh");
        store.save(&credentials).expect("save");
        assert_eq!(store.load().expect("load"), Some(credentials));

        // a rotation without a session token removes any stale one
        store
            .save(&Credentials::new("access-2").with_refresh_token("refresh-2"))
            .expect("save");
        let loaded = store.load().expect("load").expect("credentials");
        assert_eq!(loaded.access_token, "access-2");
        assert_eq!(loaded.session_token, None);

        store.clear().expect("clear");
        assert_eq!(store.load().expect("load"), None);
    }
}
