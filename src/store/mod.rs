//! Persistence for ironlog
//!
//! Everything is stored as whole JSON values under fixed string keys, so any
//! key-value backend works. Two backends ship with the crate:
//!
//! - [`SqliteStore`]: `~/.ironlog/ironlog.db`, used by the CLI
//! - [`MemoryStore`]: in-process map for tests and throwaway sessions
//!
//! Typed access (with defaults on missing or corrupt data) lives in
//! [`Repository`].

mod db;
pub mod history;
mod memory;
mod repository;

pub use db::SqliteStore;
pub use memory::MemoryStore;
pub use repository::{keys, Repository};

use thiserror::Error;

/// Errors raised by a storage backend
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("database error: {0}")]
    Sqlite(#[from] rusqlite::Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("failed to serialize '{key}': {source}")]
    Serialize {
        key: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("store lock poisoned")]
    LockPoisoned,
}

/// Raw string storage keyed by name.
///
/// Every write replaces the whole value under `key`.
pub trait KeyValueStore {
    fn get(&self, key: &str) -> Result<Option<String>, StoreError>;

    fn set(&self, key: &str, value: &str) -> Result<(), StoreError>;

    /// Remove `key`. Removing a missing key is not an error.
    fn remove(&self, key: &str) -> Result<(), StoreError>;

    /// Write several values at once. Backends that can should apply all or none.
    fn set_many(&self, entries: &[(&str, String)]) -> Result<(), StoreError> {
        for (key, value) in entries {
            self.set(key, value)?;
        }
        Ok(())
    }
}

impl<S: KeyValueStore + ?Sized> KeyValueStore for &S {
    fn get(&self, key: &str) -> Result<Option<String>, StoreError> {
        (**self).get(key)
    }

    fn set(&self, key: &str, value: &str) -> Result<(), StoreError> {
        (**self).set(key, value)
    }

    fn remove(&self, key: &str) -> Result<(), StoreError> {
        (**self).remove(key)
    }

    fn set_many(&self, entries: &[(&str, String)]) -> Result<(), StoreError> {
        (**self).set_many(entries)
    }
}
