//! SQLite-backed key-value store
//!
//! Manages the `~/.ironlog/ironlog.db` database with automatic schema migration.

use std::path::Path;
use std::sync::{Arc, Mutex, MutexGuard};

use chrono::Utc;
use rusqlite::{Connection, OptionalExtension};

use super::{KeyValueStore, StoreError};
use crate::config::Config;

const SCHEMA_SQL: &str = r#"
CREATE TABLE IF NOT EXISTS schema_version (
    version INTEGER PRIMARY KEY
);
"#;

const UPSERT_SQL: &str = r#"
INSERT INTO kv (key, value, updated_at) VALUES (?1, ?2, ?3)
ON CONFLICT(key) DO UPDATE SET value = excluded.value, updated_at = excluded.updated_at
"#;

/// Database wrapper; clones share one connection
#[derive(Clone)]
pub struct SqliteStore {
    conn: Arc<Mutex<Connection>>,
}

impl SqliteStore {
    /// Open or create the database at the default location (~/.ironlog/ironlog.db)
    pub fn open_default() -> Result<Self, StoreError> {
        Self::open(&Config::default_database_path())
    }

    /// Open or create the database at a specific path
    pub fn open(path: &Path) -> Result<Self, StoreError> {
        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent)?;
            }
        }

        let conn = Connection::open(path)?;
        conn.pragma_update(None, "journal_mode", "WAL")?;
        conn.pragma_update(None, "synchronous", "NORMAL")?;

        let store = Self::from_connection(conn)?;
        tracing::debug!("Opened store at {}", path.display());
        Ok(store)
    }

    /// Database living only as long as this value (for tests)
    pub fn open_in_memory() -> Result<Self, StoreError> {
        Self::from_connection(Connection::open_in_memory()?)
    }

    fn from_connection(conn: Connection) -> Result<Self, StoreError> {
        let store = Self {
            conn: Arc::new(Mutex::new(conn)),
        };
        store.init_schema()?;
        Ok(store)
    }

    fn conn(&self) -> Result<MutexGuard<'_, Connection>, StoreError> {
        self.conn.lock().map_err(|_| StoreError::LockPoisoned)
    }

    fn init_schema(&self) -> Result<(), StoreError> {
        let conn = self.conn()?;
        conn.execute_batch(SCHEMA_SQL)?;
        drop(conn);
        self.run_migrations()
    }

    /// Current schema version, 0 for a fresh database
    pub fn schema_version(&self) -> Result<i32, StoreError> {
        let conn = self.conn()?;
        let version = conn.query_row(
            "SELECT COALESCE(MAX(version), 0) FROM schema_version",
            [],
            |r| r.get(0),
        )?;
        Ok(version)
    }

    fn run_migrations(&self) -> Result<(), StoreError> {
        let version = self.schema_version()?;
        let conn = self.conn()?;

        // Migration 1: key-value table
        if version < 1 {
            conn.execute_batch(
                r#"
                CREATE TABLE IF NOT EXISTS kv (
                    key TEXT PRIMARY KEY,
                    value TEXT NOT NULL,
                    updated_at INTEGER NOT NULL
                );
                "#,
            )?;
            conn.execute("INSERT OR REPLACE INTO schema_version VALUES (1)", [])?;
            tracing::info!("Store schema migrated to version 1");
        }

        Ok(())
    }

    /// When `key` was last written, in milliseconds since the epoch
    pub fn updated_at(&self, key: &str) -> Result<Option<i64>, StoreError> {
        let conn = self.conn()?;
        let ts = conn
            .query_row("SELECT updated_at FROM kv WHERE key = ?1", [key], |r| r.get(0))
            .optional()?;
        Ok(ts)
    }

    /// Delete every stored value
    pub fn reset_all(&self) -> Result<(), StoreError> {
        self.conn()?.execute("DELETE FROM kv", [])?;
        Ok(())
    }
}

impl KeyValueStore for SqliteStore {
    fn get(&self, key: &str) -> Result<Option<String>, StoreError> {
        let conn = self.conn()?;
        let value = conn
            .query_row("SELECT value FROM kv WHERE key = ?1", [key], |r| r.get(0))
            .optional()?;
        Ok(value)
    }

    fn set(&self, key: &str, value: &str) -> Result<(), StoreError> {
        let conn = self.conn()?;
        conn.execute(UPSERT_SQL, (key, value, Utc::now().timestamp_millis()))?;
        Ok(())
    }

    fn set_many(&self, entries: &[(&str, String)]) -> Result<(), StoreError> {
        let mut conn = self.conn()?;
        let tx = conn.transaction()?;
        let now = Utc::now().timestamp_millis();
        for (key, value) in entries {
            tx.execute(UPSERT_SQL, (*key, value.as_str(), now))?;
        }
        tx.commit()?;
        Ok(())
    }

    fn remove(&self, key: &str) -> Result<(), StoreError> {
        self.conn()?.execute("DELETE FROM kv WHERE key = ?1", [key])?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_roundtrip_on_disk() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("nested").join("ironlog.db");

        let store = SqliteStore::open(&path).unwrap();
        store.set("ironlog-prs", r#"{"Supino Reto":60}"#).unwrap();
        assert!(store.updated_at("ironlog-prs").unwrap().is_some());
        drop(store);

        let reopened = SqliteStore::open(&path).unwrap();
        assert_eq!(
            reopened.get("ironlog-prs").unwrap().as_deref(),
            Some(r#"{"Supino Reto":60}"#)
        );
        assert_eq!(reopened.schema_version().unwrap(), 1);
    }

    #[test]
    fn test_overwrite_and_remove() {
        let store = SqliteStore::open_in_memory().unwrap();
        store.set("a", "1").unwrap();
        store.set("a", "2").unwrap();
        assert_eq!(store.get("a").unwrap().as_deref(), Some("2"));

        store.remove("a").unwrap();
        assert_eq!(store.get("a").unwrap(), None);
        assert_eq!(store.updated_at("a").unwrap(), None);
    }

    #[test]
    fn test_reset_all() {
        let store = SqliteStore::open_in_memory().unwrap();
        store.set("a", "1").unwrap();
        store.set("b", "2").unwrap();
        store.reset_all().unwrap();
        assert_eq!(store.get("a").unwrap(), None);
        assert_eq!(store.get("b").unwrap(), None);
    }

    #[test]
    fn test_set_many_is_all_or_nothing() {
        let store = SqliteStore::open_in_memory().unwrap();
        store.set("a", "old").unwrap();
        store
            .conn()
            .unwrap()
            .execute_batch(
                "CREATE TRIGGER reject_b BEFORE INSERT ON kv WHEN NEW.key = 'b'
                 BEGIN SELECT RAISE(ABORT, 'rejected'); END;",
            )
            .unwrap();

        let result = store.set_many(&[("a", "new".to_string()), ("b", "2".to_string())]);
        assert!(result.is_err());
        assert_eq!(store.get("a").unwrap().as_deref(), Some("old"), "first write rolled back");
        assert_eq!(store.get("b").unwrap(), None);

        store.set_many(&[("a", "new".to_string()), ("c", "3".to_string())]).unwrap();
        assert_eq!(store.get("a").unwrap().as_deref(), Some("new"));
        assert_eq!(store.get("c").unwrap().as_deref(), Some("3"));
    }
}
