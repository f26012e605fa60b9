//! Session persistence over a string key/value store.
//!
//! SYSTEM CONTEXT
//! ==============
//! In the browser the backing store is `localStorage`; elsewhere it is an
//! in-memory map. Both are best-effort: a failed write is logged and the
//! in-memory session stays authoritative for the rest of the page lifetime.

#[cfg(test)]
#[path = "storage_test.rs"]
mod storage_test;

use std::collections::HashMap;
use std::sync::{Mutex, MutexGuard, PoisonError};

use crate::config::StorageKeys;
use crate::net::types::User;
use crate::state::session::Session;

/// Minimal `localStorage`-shaped interface.
pub trait SessionStorage {
    fn get_item(&self, key: &str) -> Option<String>;
    fn set_item(&self, key: &str, value: &str);
    fn remove_item(&self, key: &str);
}

/// Process-local storage for native builds and tests.
#[derive(Debug, Default)]
pub struct MemoryStorage {
    items: Mutex<HashMap<String, String>>,
}

impl MemoryStorage {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of stored keys.
    pub fn len(&self) -> usize {
        self.items().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    // A panic mid-insert cannot leave the map half-written, so a poisoned
    // lock is still safe to use.
    fn items(&self) -> MutexGuard<'_, HashMap<String, String>> {
        self.items.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl SessionStorage for MemoryStorage {
    fn get_item(&self, key: &str) -> Option<String> {
        self.items().get(key).cloned()
    }

    fn set_item(&self, key: &str, value: &str) {
        self.items().insert(key.to_owned(), value.to_owned());
    }

    fn remove_item(&self, key: &str) {
        self.items().remove(key);
    }
}

/// `window.localStorage`, resolved on every call so the handle stays `Send`.
#[cfg(feature = "hydrate")]
#[derive(Debug, Clone, Copy, Default)]
pub struct LocalStorage;

#[cfg(feature = "hydrate")]
impl LocalStorage {
    fn storage() -> Option<web_sys::Storage> {
        match web_sys::window()?.local_storage() {
            Ok(storage) => storage,
            Err(e) => {
                log::warn!("localStorage access denied: {e:?}");
                None
            }
        }
    }
}

#[cfg(feature = "hydrate")]
impl SessionStorage for LocalStorage {
    fn get_item(&self, key: &str) -> Option<String> {
        match Self::storage()?.get_item(key) {
            Ok(value) => value,
            Err(e) => {
                log::warn!("localStorage read failed for {key}: {e:?}");
                None
            }
        }
    }

    fn set_item(&self, key: &str, value: &str) {
        let Some(storage) = Self::storage() else {
            log::warn!("localStorage unavailable; {key} not persisted");
            return;
        };
        if storage.set_item(key, value).is_err() {
            log::warn!("localStorage write failed for {key}");
        }
    }

    fn remove_item(&self, key: &str) {
        let Some(storage) = Self::storage() else {
            log::warn!("localStorage unavailable; {key} not removed");
            return;
        };
        if let Err(e) = storage.remove_item(key) {
            log::warn!("localStorage remove failed for {key}: {e:?}");
        }
    }
}

/// Rebuild the session persisted by a previous page load.
///
/// An empty token counts as absent. A user entry that no longer parses is
/// dropped rather than failing startup.
pub fn load_session<S: SessionStorage + ?Sized>(storage: &S, keys: &StorageKeys) -> Session {
    let token = storage.get_item(&keys.token).filter(|t| !t.is_empty());
    let user = storage.get_item(&keys.user).and_then(|raw| match serde_json::from_str::<Option<User>>(&raw) {
        Ok(user) => user,
        Err(e) => {
            log::warn!("discarding unreadable persisted user: {e}");
            None
        }
    });
    Session { token, user, ..Session::default() }
}

/// Persist a freshly issued token together with its user.
pub fn persist_session<S: SessionStorage + ?Sized>(storage: &S, keys: &StorageKeys, token: &str, user: &User) {
    storage.set_item(&keys.token, token);
    persist_user(storage, keys, user);
}

/// Persist only the user profile.
pub fn persist_user<S: SessionStorage + ?Sized>(storage: &S, keys: &StorageKeys, user: &User) {
    match serde_json::to_string(user) {
        Ok(raw) => storage.set_item(&keys.user, &raw),
        Err(e) => log::warn!("failed to serialize user for storage: {e}"),
    }
}

/// Remove both session keys.
pub fn clear_session<S: SessionStorage + ?Sized>(storage: &S, keys: &StorageKeys) {
    storage.remove_item(&keys.token);
    storage.remove_item(&keys.user);
}
