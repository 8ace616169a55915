//! Key/value persistence for the leaderboard and settings
//!
//! Features:
//! - `Storage` trait so the game never touches a backend directly
//! - LocalStorage on the web, an in-memory map everywhere else
//! - JSON helpers that treat unreadable data as absent

use std::collections::HashMap;

use serde::Serialize;
use serde::de::DeserializeOwned;

use crate::error::{Error, Result};

/// Minimal string key/value store
pub trait Storage {
    fn get_item(&self, key: &str) -> Option<String>;
    fn set_item(&mut self, key: &str, value: &str) -> Result<()>;
}

/// Volatile store for native runs and tests
#[derive(Debug, Clone, Default)]
pub struct MemoryStorage {
    items: HashMap<String, String>,
}

impl MemoryStorage {
    pub fn new() -> Self {
        Self::default()
    }
}

impl Storage for MemoryStorage {
    fn get_item(&self, key: &str) -> Option<String> {
        self.items.get(key).cloned()
    }

    fn set_item(&mut self, key: &str, value: &str) -> Result<()> {
        self.items.insert(key.to_string(), value.to_string());
        Ok(())
    }
}

/// Browser LocalStorage (None when disabled, e.g. private mode)
#[cfg(target_arch = "wasm32")]
#[derive(Debug, Clone)]
pub struct LocalStorage {
    inner: Option<web_sys::Storage>,
}

#[cfg(target_arch = "wasm32")]
impl LocalStorage {
    pub fn open() -> Self {
        let inner = web_sys::window()
            .and_then(|w| w.local_storage().ok())
            .flatten();
        if inner.is_none() {
            log::warn!("LocalStorage unavailable - scores will not persist");
        }
        Self { inner }
    }
}

#[cfg(target_arch = "wasm32")]
impl Storage for LocalStorage {
    fn get_item(&self, key: &str) -> Option<String> {
        self.inner.as_ref()?.get_item(key).ok().flatten()
    }

    fn set_item(&mut self, key: &str, value: &str) -> Result<()> {
        let storage = self.inner.as_ref().ok_or(Error::StorageUnavailable)?;
        storage.set_item(key, value).map_err(|_| Error::StorageWrite {
            key: key.to_string(),
        })
    }
}

/// Decode a stored value; missing or malformed data yields None
pub fn load_json<T: DeserializeOwned>(storage: &impl Storage, key: &str) -> Option<T> {
    let json = storage.get_item(key)?;
    match serde_json::from_str(&json) {
        Ok(value) => Some(value),
        Err(e) => {
            log::warn!("Discarding unreadable `{}`: {}", key, e);
            None
        }
    }
}

pub fn save_json<T: Serialize>(storage: &mut impl Storage, key: &str, value: &T) -> Result<()> {
    let json = serde_json::to_string(value).map_err(|source| Error::Encode {
        key: key.to_string(),
        source,
    })?;
    storage.set_item(key, &json)
}
