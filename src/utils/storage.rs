use std::cell::RefCell;
use std::collections::HashMap;
use std::rc::Rc;

use serde::Serialize;
use thiserror::Error;

use crate::models::{Credential, User};
use crate::utils::constants::{STORAGE_KEY_AUTH_TOKEN, STORAGE_KEY_CURRENT_USER};

#[derive(Debug, Clone, PartialEq, Error)]
pub enum StorageError {
    #[error("localStorage is not available")]
    Unavailable,
    #[error("could not write key {0}")]
    Write(String),
    #[error("could not serialize value: {0}")]
    Serialize(String),
}

/// Per-browser string key/value storage
pub trait KeyValueStorage {
    fn get(&self, key: &str) -> Option<String>;
    fn set(&self, key: &str, value: &str) -> Result<(), StorageError>;
    fn remove(&self, key: &str);
}

/// `window.localStorage`, through gloo-storage
#[derive(Debug, Clone, Copy, Default)]
pub struct LocalStorage;

impl LocalStorage {
    fn raw() -> Option<web_sys::Storage> {
        use gloo_storage::Storage as _;
        // gloo panics outside a browser, keep the check explicit
        web_sys::window()?;
        Some(gloo_storage::LocalStorage::raw())
    }
}

impl KeyValueStorage for LocalStorage {
    fn get(&self, key: &str) -> Option<String> {
        Self::raw()?.get_item(key).ok().flatten()
    }

    fn set(&self, key: &str, value: &str) -> Result<(), StorageError> {
        let storage = Self::raw().ok_or(StorageError::Unavailable)?;
        storage
            .set_item(key, value)
            .map_err(|_| StorageError::Write(key.to_string()))
    }

    fn remove(&self, key: &str) {
        if let Some(storage) = Self::raw() {
            if storage.remove_item(key).is_err() {
                log::warn!("⚠️ [STORAGE] Could not remove {}", key);
            }
        }
    }
}

/// In-memory storage, used outside the browser and by tests
#[derive(Debug, Clone, Default)]
pub struct MemoryStorage {
    entries: Rc<RefCell<HashMap<String, String>>>,
    read_only: Rc<RefCell<bool>>,
    failing_key: Rc<RefCell<Option<String>>>,
}

impl MemoryStorage {
    pub fn new() -> Self {
        Self::default()
    }

    /// Makes every later `set` fail, like a full quota
    pub fn set_read_only(&self, read_only: bool) {
        *self.read_only.borrow_mut() = read_only;
    }

    /// Makes `set` fail for one key only
    pub fn fail_writes_to(&self, key: &str) {
        *self.failing_key.borrow_mut() = Some(key.to_string());
    }

    pub fn len(&self) -> usize {
        self.entries.borrow().len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.borrow().is_empty()
    }
}

impl KeyValueStorage for MemoryStorage {
    fn get(&self, key: &str) -> Option<String> {
        self.entries.borrow().get(key).cloned()
    }

    fn set(&self, key: &str, value: &str) -> Result<(), StorageError> {
        if *self.read_only.borrow() || self.failing_key.borrow().as_deref() == Some(key) {
            return Err(StorageError::Write(key.to_string()));
        }
        self.entries
            .borrow_mut()
            .insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove(&self, key: &str) {
        self.entries.borrow_mut().remove(key);
    }
}

pub fn save_to_storage<T: Serialize>(
    storage: &dyn KeyValueStorage,
    key: &str,
    value: &T,
) -> Result<(), StorageError> {
    let json = serde_json::to_string(value).map_err(|e| StorageError::Serialize(e.to_string()))?;
    storage.set(key, &json)
}

// ============================================================================
// CREDENTIAL STORE - token + user snapshot, always written as a pair
// ============================================================================

#[derive(Clone)]
pub struct CredentialStore {
    backend: Rc<dyn KeyValueStorage>,
}

impl CredentialStore {
    pub fn new(backend: Rc<dyn KeyValueStorage>) -> Self {
        Self { backend }
    }

    /// Writes both entries. On failure both are removed, including any
    /// pair left by a previous session.
    pub fn save(&self, user: &User, token: &Credential) -> Result<(), StorageError> {
        let written = self
            .backend
            .set(STORAGE_KEY_AUTH_TOKEN, token.as_str())
            .and_then(|_| save_to_storage(self.backend.as_ref(), STORAGE_KEY_CURRENT_USER, user));
        if written.is_err() {
            self.clear();
        }
        written
    }

    pub fn clear(&self) {
        self.backend.remove(STORAGE_KEY_AUTH_TOKEN);
        self.backend.remove(STORAGE_KEY_CURRENT_USER);
    }

    pub fn token(&self) -> Option<Credential> {
        self.backend
            .get(STORAGE_KEY_AUTH_TOKEN)
            .filter(|t| !t.is_empty())
            .map(Credential::new)
    }
}
