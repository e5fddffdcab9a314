//! Durable mirror of the session token and user record.
//!
//! SYSTEM CONTEXT
//! ==============
//! The auth context reads this once at startup and rewrites it on every login
//! and logout. Both keys move together; a lone key is read as "no session".

#[cfg(test)]
#[path = "credential_store_test.rs"]
mod credential_store_test;

use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use crate::net::types::User;

pub const TOKEN_KEY: &str = "token";
pub const USER_KEY: &str = "user";

/// A write the storage medium refused (quota, private mode, no window).
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("could not store '{key}': {reason}")]
pub struct StorageError {
    pub key: String,
    pub reason: String,
}

impl StorageError {
    pub fn new(key: &str, reason: impl Into<String>) -> Self {
        Self { key: key.to_owned(), reason: reason.into() }
    }
}

/// Minimal string key/value medium behind the credential store.
pub trait StorageBackend: Send + Sync {
    fn get_item(&self, key: &str) -> Option<String>;
    /// # Errors
    ///
    /// Returns [`StorageError`] when the medium rejects the write.
    fn set_item(&self, key: &str, value: &str) -> Result<(), StorageError>;
    fn remove_item(&self, key: &str);
}

/// `window.localStorage`; a no-op outside the browser.
#[derive(Clone, Copy, Debug, Default)]
pub struct BrowserStorage;

#[cfg(feature = "hydrate")]
fn local_storage() -> Option<web_sys::Storage> {
    web_sys::window().and_then(|w| w.local_storage().ok().flatten())
}

impl StorageBackend for BrowserStorage {
    fn get_item(&self, key: &str) -> Option<String> {
        #[cfg(feature = "hydrate")]
        {
            local_storage()?.get_item(key).ok().flatten()
        }
        #[cfg(not(feature = "hydrate"))]
        {
            let _ = key;
            None
        }
    }

    fn set_item(&self, key: &str, value: &str) -> Result<(), StorageError> {
        #[cfg(feature = "hydrate")]
        {
            let storage = local_storage().ok_or_else(|| StorageError::new(key, "localStorage unavailable"))?;
            storage.set_item(key, value).map_err(|e| StorageError::new(key, format!("{e:?}")))
        }
        #[cfg(not(feature = "hydrate"))]
        {
            let _ = (key, value);
            Ok(())
        }
    }

    fn remove_item(&self, key: &str) {
        #[cfg(feature = "hydrate")]
        {
            if let Some(storage) = local_storage() {
                let _ = storage.remove_item(key);
            }
        }
        #[cfg(not(feature = "hydrate"))]
        {
            let _ = key;
        }
    }
}

/// In-process storage for tests and server rendering.
#[derive(Debug, Default)]
pub struct MemoryStorage {
    items: Mutex<HashMap<String, String>>,
}

impl StorageBackend for MemoryStorage {
    fn get_item(&self, key: &str) -> Option<String> {
        self.items.lock().ok()?.get(key).cloned()
    }

    fn set_item(&self, key: &str, value: &str) -> Result<(), StorageError> {
        let mut items = self.items.lock().map_err(|_| StorageError::new(key, "storage lock poisoned"))?;
        items.insert(key.to_owned(), value.to_owned());
        Ok(())
    }

    fn remove_item(&self, key: &str) {
        if let Ok(mut items) = self.items.lock() {
            items.remove(key);
        }
    }
}

/// What `load` found. Either half may be missing.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct StoredCredentials {
    pub token: Option<String>,
    pub user: Option<User>,
}

impl StoredCredentials {
    /// Both halves, or nothing.
    pub fn complete(self) -> Option<(String, User)> {
        match (self.token, self.user) {
            (Some(token), Some(user)) => Some((token, user)),
            _ => None,
        }
    }
}

/// Token + user persistence over a [`StorageBackend`].
#[derive(Clone)]
pub struct CredentialStore {
    backend: Arc<dyn StorageBackend>,
}

impl CredentialStore {
    pub fn new(backend: impl StorageBackend + 'static) -> Self {
        Self { backend: Arc::new(backend) }
    }

    /// Share a backend the caller also keeps a handle to.
    pub fn from_shared(backend: Arc<dyn StorageBackend>) -> Self {
        Self { backend }
    }

    pub fn browser() -> Self {
        Self::new(BrowserStorage)
    }

    pub fn in_memory() -> Self {
        Self::new(MemoryStorage::default())
    }

    /// Read both keys. Unparsable user JSON reads as absent.
    pub fn load(&self) -> StoredCredentials {
        let token = self.backend.get_item(TOKEN_KEY).filter(|t| !t.is_empty());
        let user = self
            .backend
            .get_item(USER_KEY)
            .and_then(|raw| serde_json::from_str::<User>(&raw).ok());
        StoredCredentials { token, user }
    }

    /// Overwrite both keys. If either write fails, both are removed.
    ///
    /// # Errors
    ///
    /// Returns the first [`StorageError`]; the store is empty afterwards.
    pub fn save(&self, token: &str, user: &User) -> Result<(), StorageError> {
        let written = serde_json::to_string(user)
            .map_err(|e| StorageError::new(USER_KEY, e.to_string()))
            .and_then(|raw| {
                self.backend.set_item(TOKEN_KEY, token)?;
                self.backend.set_item(USER_KEY, &raw)
            });
        if let Err(e) = &written {
            leptos::logging::warn!("credential store: {e}; clearing partial write");
            self.clear();
        }
        written
    }

    /// Remove both keys.
    pub fn clear(&self) {
        self.backend.remove_item(TOKEN_KEY);
        self.backend.remove_item(USER_KEY);
    }
}

impl std::fmt::Debug for CredentialStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CredentialStore").finish_non_exhaustive()
    }
}
