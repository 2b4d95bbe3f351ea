//! Storage layer for attendx.
//!
//! A durable string key-value store backed by `SQLite`. The ledger keeps each
//! record collection as one serialized value under a fixed key, so this layer
//! knows nothing about events or attendance.

pub mod migrations;
pub mod schema;

use std::path::{Path, PathBuf};

use chrono::{DateTime, Utc};
use rusqlite::{params, Connection, OptionalExtension};
use tracing::{debug, info};

use crate::error::{Error, Result};

/// Key-value storage engine.
#[derive(Debug)]
pub struct Storage {
    /// Path to the database file.
    path: PathBuf,
    /// Database connection.
    conn: Connection,
}

impl Storage {
    /// Open or create a storage database at the given path.
    ///
    /// Creates the parent directories and database file if they don't exist
    /// and brings the schema up to date.
    ///
    /// # Errors
    ///
    /// Returns an error if the database cannot be opened or schema initialization fails.
    pub fn open(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref().to_path_buf();

        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() && !parent.exists() {
                std::fs::create_dir_all(parent).map_err(|source| Error::DirectoryCreate {
                    path: parent.to_path_buf(),
                    source,
                })?;
            }
        }

        debug!("Opening database at {}", path.display());
        let conn = Connection::open(&path).map_err(|source| Error::DatabaseOpen {
            path: path.clone(),
            source,
        })?;

        conn.execute_batch("PRAGMA journal_mode=WAL; PRAGMA synchronous=NORMAL;")?;
        migrations::initialize_schema(&conn)?;

        info!("Database opened at {}", path.display());
        Ok(Self { path, conn })
    }

    /// Create an in-memory storage instance.
    ///
    /// # Errors
    ///
    /// Returns an error if the in-memory database cannot be created.
    pub fn open_in_memory() -> Result<Self> {
        let conn = Connection::open_in_memory().map_err(|source| Error::DatabaseOpen {
            path: PathBuf::from(":memory:"),
            source,
        })?;

        migrations::initialize_schema(&conn)?;

        Ok(Self {
            path: PathBuf::from(":memory:"),
            conn,
        })
    }

    /// Get the path to the database file.
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Read the value stored under `key`.
    ///
    /// # Errors
    ///
    /// Returns an error if the database operation fails.
    pub fn get(&self, key: &str) -> Result<Option<String>> {
        let value = self
            .conn
            .query_row("SELECT value FROM entries WHERE key = ?1", [key], |row| {
                row.get(0)
            })
            .optional()?;
        Ok(value)
    }

    /// Store `value` under `key`, replacing any previous value.
    ///
    /// # Errors
    ///
    /// Returns an error if the database operation fails.
    pub fn set(&self, key: &str, value: &str) -> Result<()> {
        self.conn.execute(
            r"
            INSERT INTO entries (key, value, updated_at) VALUES (?1, ?2, ?3)
            ON CONFLICT(key) DO UPDATE SET value = excluded.value, updated_at = excluded.updated_at
            ",
            params![key, value, Utc::now().to_rfc3339()],
        )?;
        debug!("Wrote {} bytes under {}", value.len(), key);
        Ok(())
    }

    /// Remove `key`. Returns `true` if a value was removed.
    ///
    /// # Errors
    ///
    /// Returns an error if the database operation fails.
    pub fn remove(&self, key: &str) -> Result<bool> {
        let affected = self
            .conn
            .execute("DELETE FROM entries WHERE key = ?1", [key])?;
        Ok(affected > 0)
    }

    /// Check whether a value is stored under `key`.
    ///
    /// # Errors
    ///
    /// Returns an error if the database operation fails.
    pub fn contains(&self, key: &str) -> Result<bool> {
        let count: i64 = self.conn.query_row(
            "SELECT COUNT(*) FROM entries WHERE key = ?1",
            [key],
            |row| row.get(0),
        )?;
        Ok(count > 0)
    }

    /// List all stored keys in sorted order.
    ///
    /// # Errors
    ///
    /// Returns an error if the database operation fails.
    pub fn keys(&self) -> Result<Vec<String>> {
        let mut stmt = self.conn.prepare("SELECT key FROM entries ORDER BY key")?;
        let keys = stmt
            .query_map([], |row| row.get(0))?
            .collect::<std::result::Result<Vec<String>, _>>()?;
        Ok(keys)
    }

    /// Get database statistics.
    ///
    /// # Errors
    ///
    /// Returns an error if the database operation fails.
    pub fn stats(&self) -> Result<StorageStats> {
        let total_keys: i64 = self
            .conn
            .query_row("SELECT COUNT(*) FROM entries", [], |row| row.get(0))?;

        let last_write: Option<String> = self
            .conn
            .query_row("SELECT MAX(updated_at) FROM entries", [], |row| row.get(0))
            .optional()?
            .flatten();

        let last_write = last_write
            .and_then(|s| DateTime::parse_from_rfc3339(&s).ok())
            .map(|dt| dt.with_timezone(&Utc));

        let db_size_bytes = if self.path.to_string_lossy() == ":memory:" {
            0
        } else {
            std::fs::metadata(&self.path).map(|m| m.len()).unwrap_or(0)
        };

        Ok(StorageStats {
            total_keys,
            last_write,
            db_size_bytes,
        })
    }
}

/// Statistics about the storage.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StorageStats {
    /// Number of keys with a stored value.
    pub total_keys: i64,
    /// Time of the most recent write.
    pub last_write: Option<DateTime<Utc>>,
    /// Size of the database file in bytes.
    pub db_size_bytes: u64,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn create_test_storage() -> Storage {
        Storage::open_in_memory().expect("failed to create test storage")
    }

    #[test]
    fn test_open_in_memory() {
        let storage = create_test_storage();
        assert_eq!(storage.path(), Path::new(":memory:"));
    }

    #[test]
    fn test_get_missing_key() {
        let storage = create_test_storage();
        assert!(storage.get("nothing").unwrap().is_none());
        assert!(!storage.contains("nothing").unwrap());
    }

    #[test]
    fn test_set_and_get() {
        let storage = create_test_storage();
        storage.set("greeting", "hello").unwrap();

        assert_eq!(storage.get("greeting").unwrap().as_deref(), Some("hello"));
        assert!(storage.contains("greeting").unwrap());
    }

    #[test]
    fn test_set_overwrites() {
        let storage = create_test_storage();
        storage.set("k", "first").unwrap();
        storage.set("k", "second").unwrap();

        assert_eq!(storage.get("k").unwrap().as_deref(), Some("second"));
        assert_eq!(storage.keys().unwrap(), vec!["k".to_string()]);
    }

    #[test]
    fn test_remove() {
        let storage = create_test_storage();
        storage.set("k", "v").unwrap();

        assert!(storage.remove("k").unwrap());
        assert!(storage.get("k").unwrap().is_none());
        assert!(!storage.remove("k").unwrap());
    }

    #[test]
    fn test_keys_sorted() {
        let storage = create_test_storage();
        storage.set("b", "2").unwrap();
        storage.set("a", "1").unwrap();

        assert_eq!(storage.keys().unwrap(), vec!["a", "b"]);
    }

    #[test]
    fn test_stats_empty() {
        let stats = create_test_storage().stats().unwrap();
        assert_eq!(stats.total_keys, 0);
        assert!(stats.last_write.is_none());
        assert_eq!(stats.db_size_bytes, 0);
    }

    #[test]
    fn test_stats_after_write() {
        let storage = create_test_storage();
        storage.set("a", "1").unwrap();
        storage.set("b", "2").unwrap();

        let stats = storage.stats().unwrap();
        assert_eq!(stats.total_keys, 2);
        assert!(stats.last_write.is_some());
    }

    #[test]
    fn test_open_creates_parent_dirs_and_persists() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("ledger.db");

        {
            let storage = Storage::open(&path).unwrap();
            storage.set("k", "persisted").unwrap();
        }

        let reopened = Storage::open(&path).unwrap();
        assert_eq!(reopened.get("k").unwrap().as_deref(), Some("persisted"));
        assert!(reopened.stats().unwrap().db_size_bytes > 0);
    }
}
