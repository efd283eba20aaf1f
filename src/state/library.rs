//! Mii storage backend
//!
//! The library is a flat keyed store: one row per mii, key
//! `"mii-" + creation-timestamp`, value the codec's encoded bytes as
//! base64 text. The workflow only ever sees the [`MiiStore`] trait;
//! [`Library`] is the shipped SQLite implementation.

use async_trait::async_trait;
use rusqlite::Connection;
use std::path::PathBuf;
use std::sync::{Mutex, MutexGuard};
use thiserror::Error;

/// Storage failures. The workflow does not treat these specially beyond
/// surfacing them; a corrupt VALUE is a codec problem, not a store one.
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("storage error: {0}")]
    Backend(String),
}

impl From<rusqlite::Error> for StoreError {
    fn from(err: rusqlite::Error) -> Self {
        StoreError::Backend(err.to_string())
    }
}

/// Keyed store for encoded mii records. All operations may suspend.
#[async_trait]
pub trait MiiStore: Send + Sync {
    async fn list_keys(&self) -> Result<Vec<String>, StoreError>;
    async fn get(&self, key: &str) -> Result<Option<String>, StoreError>;
    async fn set(&self, key: &str, value: &str) -> Result<(), StoreError>;
    async fn remove(&self, key: &str) -> Result<(), StoreError>;
}

/// The Library manages the SQLite mii store.
///
/// The database file is created in the user's data directory:
/// - Linux: ~/.local/share/mii-editor/mii_editor.db
/// - macOS: ~/Library/Application Support/mii-editor/mii_editor.db
/// - Windows: %APPDATA%\mii-editor\mii_editor.db
pub struct Library {
    conn: Mutex<Connection>,
    db_path: PathBuf,
}

impl Library {
    /// Open (or create) the store at the default location.
    pub fn new() -> Result<Self, StoreError> {
        let db_path = Self::default_db_path()?;

        if let Some(parent) = db_path.parent() {
            std::fs::create_dir_all(parent)
                .map_err(|e| StoreError::Backend(format!("creating data directory: {e}")))?;
        }

        let conn = Connection::open(&db_path)?;
        println!("📁 Mii library initialized at: {}", db_path.display());

        let library = Library { conn: Mutex::new(conn), db_path };
        library.init_schema()?;
        Ok(library)
    }

    /// In-memory store, used by tests.
    pub fn in_memory() -> Result<Self, StoreError> {
        let library = Library {
            conn: Mutex::new(Connection::open_in_memory()?),
            db_path: PathBuf::from(":memory:"),
        };
        library.init_schema()?;
        Ok(library)
    }

    fn default_db_path() -> Result<PathBuf, StoreError> {
        let mut path = dirs::data_dir()
            .or_else(dirs::home_dir)
            .ok_or_else(|| StoreError::Backend("could not determine user data directory".into()))?;
        path.push("mii-editor");
        path.push("mii_editor.db");
        Ok(path)
    }

    fn init_schema(&self) -> Result<(), StoreError> {
        self.conn()?.execute(
            "CREATE TABLE IF NOT EXISTS miis (
                id      TEXT PRIMARY KEY,
                data    TEXT NOT NULL
            )",
            [],
        )?;
        Ok(())
    }

    /// Get the path to the database file
    pub fn path(&self) -> &PathBuf {
        &self.db_path
    }

    /// Number of stored miis (valid or not)
    pub fn mii_count(&self) -> Result<i64, StoreError> {
        let count: i64 = self
            .conn()?
            .query_row("SELECT COUNT(*) FROM miis", [], |row| row.get(0))?;
        Ok(count)
    }

    fn conn(&self) -> Result<MutexGuard<'_, Connection>, StoreError> {
        self.conn
            .lock()
            .map_err(|_| StoreError::Backend("store mutex poisoned".into()))
    }
}

#[async_trait]
impl MiiStore for Library {
    async fn list_keys(&self) -> Result<Vec<String>, StoreError> {
        let conn = self.conn()?;
        let mut stmt = conn.prepare("SELECT id FROM miis ORDER BY id")?;

        let key_iter = stmt.query_map([], |row| row.get::<_, String>(0))?;

        let mut keys = Vec::new();
        for key in key_iter {
            keys.push(key?);
        }
        Ok(keys)
    }

    async fn get(&self, key: &str) -> Result<Option<String>, StoreError> {
        let conn = self.conn()?;
        let mut stmt = conn.prepare("SELECT data FROM miis WHERE id = ?1")?;

        let mut rows = stmt.query_map([key], |row| row.get::<_, String>(0))?;
        match rows.next() {
            Some(value) => Ok(Some(value?)),
            None => Ok(None),
        }
    }

    async fn set(&self, key: &str, value: &str) -> Result<(), StoreError> {
        // Last writer wins, both for new entries and in-place overwrites
        self.conn()?.execute(
            "INSERT INTO miis (id, data) VALUES (?1, ?2)
             ON CONFLICT(id) DO UPDATE SET data = excluded.data",
            rusqlite::params![key, value],
        )?;
        Ok(())
    }

    async fn remove(&self, key: &str) -> Result<(), StoreError> {
        self.conn()?
            .execute("DELETE FROM miis WHERE id = ?1", [key])?;
        Ok(())
    }
}

impl std::fmt::Debug for Library {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Library")
            .field("db_path", &self.db_path)
            .finish()
    }
}
