//! Persistence port.
//!
//! The engine only ever sees string values under string keys; adapters decide
//! where those strings live. Reads and writes made through [`load_or`] and
//! [`save_value`] never fail the caller: corruption falls back to defaults and
//! write failures are logged.
use serde::Serialize;
use serde::de::DeserializeOwned;
use std::cell::RefCell;
use std::collections::HashMap;
use std::rc::Rc;
use thiserror::Error;

/// Key-value medium the progression state is written to.
pub trait KeyValueStore {
    type Error: std::error::Error + 'static;

    /// Raw value stored under `key`, `None` when absent.
    ///
    /// # Errors
    ///
    /// Returns an error if the medium cannot be read.
    fn load_raw(&self, key: &str) -> Result<Option<String>, Self::Error>;

    /// Replace the value stored under `key`.
    ///
    /// # Errors
    ///
    /// Returns an error if the medium cannot be written.
    fn save_raw(&self, key: &str, value: &str) -> Result<(), Self::Error>;
}

#[derive(Debug, Error)]
pub enum StorageError {
    #[error("storage is read-only")]
    ReadOnly,
    #[error("failed to access `{path}`: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },
}

/// Load and decode `key`, returning `fallback` when missing or unreadable.
pub fn load_or<S, T>(store: &S, key: &str, fallback: T) -> T
where
    S: KeyValueStore + ?Sized,
    T: DeserializeOwned,
{
    match store.load_raw(key) {
        Ok(Some(raw)) => match serde_json::from_str(&raw) {
            Ok(value) => value,
            Err(err) => {
                log::warn!("discarding corrupt value under `{key}`: {err}");
                fallback
            }
        },
        Ok(None) => fallback,
        Err(err) => {
            log::warn!("failed to read `{key}`: {err}");
            fallback
        }
    }
}

/// Encode and store `value`; returns whether the write landed.
pub fn save_value<S, T>(store: &S, key: &str, value: &T) -> bool
where
    S: KeyValueStore + ?Sized,
    T: Serialize + ?Sized,
{
    let raw = match serde_json::to_string(value) {
        Ok(raw) => raw,
        Err(err) => {
            log::warn!("failed to encode `{key}`: {err}");
            return false;
        }
    };
    match store.save_raw(key, &raw) {
        Ok(()) => true,
        Err(err) => {
            log::warn!("failed to write `{key}`: {err}");
            false
        }
    }
}

/// In-process store; clones share the same map.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    entries: Rc<RefCell<HashMap<String, String>>>,
    read_only: bool,
}

impl MemoryStore {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Store that rejects writes, for exercising failure paths.
    #[must_use]
    pub fn read_only() -> Self {
        Self {
            read_only: true,
            ..Self::default()
        }
    }

    /// Write `value` directly, bypassing encoding.
    pub fn insert_raw(&self, key: &str, value: &str) {
        self.entries
            .borrow_mut()
            .insert(key.to_string(), value.to_string());
    }

    #[must_use]
    pub fn raw(&self, key: &str) -> Option<String> {
        self.entries.borrow().get(key).cloned()
    }
}

impl KeyValueStore for MemoryStore {
    type Error = StorageError;

    fn load_raw(&self, key: &str) -> Result<Option<String>, Self::Error> {
        Ok(self.entries.borrow().get(key).cloned())
    }

    fn save_raw(&self, key: &str, value: &str) -> Result<(), Self::Error> {
        if self.read_only {
            return Err(StorageError::ReadOnly);
        }
        self.insert_raw(key, value);
        Ok(())
    }
}
