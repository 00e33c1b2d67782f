//! Durable session persistence (`auth_token` + `user_data`).
//!
//! SYSTEM CONTEXT
//! ==============
//! The browser build persists into `localStorage`; SSR and unit tests use an
//! in-memory map. Only the session store and the API client's 401 handler
//! write these keys.

#[cfg(test)]
#[path = "storage_test.rs"]
mod storage_test;

use std::collections::HashMap;
use std::sync::{Arc, Mutex, PoisonError};

use crate::net::types::User;

pub const AUTH_TOKEN_KEY: &str = "auth_token";
pub const USER_DATA_KEY: &str = "user_data";

/// Minimal string key/value store.
pub trait SessionStorage: Send + Sync {
    fn get(&self, key: &str) -> Option<String>;
    fn set(&self, key: &str, value: &str);
    fn remove(&self, key: &str);
}

/// `window.localStorage`. Silently no-ops where storage is unavailable
/// (private mode, SSR).
#[derive(Clone, Copy, Debug, Default)]
pub struct BrowserStorage;

impl SessionStorage for BrowserStorage {
    fn get(&self, key: &str) -> Option<String> {
        #[cfg(feature = "hydrate")]
        {
            let storage = web_sys::window().and_then(|w| w.local_storage().ok().flatten())?;
            storage.get_item(key).ok().flatten()
        }
        #[cfg(not(feature = "hydrate"))]
        {
            let _ = key;
            None
        }
    }

    fn set(&self, key: &str, value: &str) {
        #[cfg(feature = "hydrate")]
        {
            let Some(storage) = web_sys::window().and_then(|w| w.local_storage().ok().flatten()) else {
                return;
            };
            let _ = storage.set_item(key, value);
        }
        #[cfg(not(feature = "hydrate"))]
        {
            let _ = (key, value);
        }
    }

    fn remove(&self, key: &str) {
        #[cfg(feature = "hydrate")]
        {
            let Some(storage) = web_sys::window().and_then(|w| w.local_storage().ok().flatten()) else {
                return;
            };
            let _ = storage.remove_item(key);
        }
        #[cfg(not(feature = "hydrate"))]
        {
            let _ = key;
        }
    }
}

/// Process-local storage for SSR and tests.
#[derive(Clone, Debug, Default)]
pub struct MemoryStorage {
    entries: Arc<Mutex<HashMap<String, String>>>,
}

impl MemoryStorage {
    pub fn new() -> Self {
        Self::default()
    }
}

impl SessionStorage for MemoryStorage {
    fn get(&self, key: &str) -> Option<String> {
        self.entries
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .get(key)
            .cloned()
    }

    fn set(&self, key: &str, value: &str) {
        self.entries
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .insert(key.to_owned(), value.to_owned());
    }

    fn remove(&self, key: &str) {
        self.entries
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .remove(key);
    }
}

/// Storage backend for the current build target.
pub fn platform_storage() -> Arc<dyn SessionStorage> {
    #[cfg(feature = "hydrate")]
    {
        Arc::new(BrowserStorage)
    }
    #[cfg(not(feature = "hydrate"))]
    {
        Arc::new(MemoryStorage::new())
    }
}

/// Result of reading the persisted session at startup.
#[derive(Clone, Debug, PartialEq)]
pub enum StoredSession {
    /// Token and a parseable user record are both present.
    Restored { token: String, user: User },
    /// Nothing persisted.
    Empty,
    /// One half missing or `user_data` unparseable.
    Corrupt,
}

/// Read `auth_token` + `user_data` and classify what was found.
pub fn read_session(storage: &dyn SessionStorage) -> StoredSession {
    match (storage.get(AUTH_TOKEN_KEY), storage.get(USER_DATA_KEY)) {
        (None, None) => StoredSession::Empty,
        (Some(token), Some(raw)) => match serde_json::from_str::<User>(&raw) {
            Ok(user) => StoredSession::Restored { token, user },
            Err(_) => StoredSession::Corrupt,
        },
        _ => StoredSession::Corrupt,
    }
}

/// Write both session keys.
///
/// # Errors
///
/// Returns the serialization error if the user record cannot be encoded; in
/// that case nothing is written.
pub fn persist_session(storage: &dyn SessionStorage, token: &str, user: &User) -> Result<(), serde_json::Error> {
    let raw = serde_json::to_string(user)?;
    storage.set(AUTH_TOKEN_KEY, token);
    storage.set(USER_DATA_KEY, &raw);
    Ok(())
}

/// Remove both session keys.
pub fn clear_session(storage: &dyn SessionStorage) {
    storage.remove(AUTH_TOKEN_KEY);
    storage.remove(USER_DATA_KEY);
}

/// Current bearer token, if any.
pub fn stored_token(storage: &dyn SessionStorage) -> Option<String> {
    storage.get(AUTH_TOKEN_KEY).filter(|token| !token.is_empty())
}
