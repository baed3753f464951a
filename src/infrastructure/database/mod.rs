//! Per-guild prefix storage

use async_trait::async_trait;
use rusqlite::{Connection, OptionalExtension};
use std::collections::HashMap;
use std::path::Path;
use std::sync::{Mutex, RwLock};

use crate::application::errors::StorageError;
use crate::domain::traits::PrefixStore;

/// SQLite-backed prefix store
pub struct SqlitePrefixStore {
    conn: Mutex<Connection>,
}

impl SqlitePrefixStore {
    pub fn open(path: impl AsRef<Path>) -> Result<Self, StorageError> {
        if let Some(parent) = path.as_ref().parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent)?;
            }
        }
        Self::with_connection(Connection::open(path)?)
    }

    pub fn in_memory() -> Result<Self, StorageError> {
        Self::with_connection(Connection::open_in_memory()?)
    }

    fn with_connection(conn: Connection) -> Result<Self, StorageError> {
        conn.execute(
            "CREATE TABLE IF NOT EXISTS guild_prefixes (
                guild_id TEXT PRIMARY KEY,
                prefix TEXT NOT NULL,
                updated_at TEXT NOT NULL DEFAULT (datetime('now'))
            )",
            [],
        )?;
        Ok(Self {
            conn: Mutex::new(conn),
        })
    }
}

#[async_trait]
impl PrefixStore for SqlitePrefixStore {
    async fn prefix(&self, guild_id: &str) -> Result<Option<String>, StorageError> {
        let conn = self.conn.lock().map_err(|_| StorageError::Poisoned)?;
        let prefix = conn
            .query_row(
                "SELECT prefix FROM guild_prefixes WHERE guild_id = ?1",
                [guild_id],
                |row| row.get(0),
            )
            .optional()?;
        Ok(prefix)
    }

    async fn set_prefix(&self, guild_id: &str, prefix: &str) -> Result<(), StorageError> {
        let conn = self.conn.lock().map_err(|_| StorageError::Poisoned)?;
        conn.execute(
            "INSERT INTO guild_prefixes (guild_id, prefix) VALUES (?1, ?2)
             ON CONFLICT(guild_id) DO UPDATE SET prefix = excluded.prefix, updated_at = datetime('now')",
            rusqlite::params![guild_id, prefix],
        )?;
        Ok(())
    }
}

/// Prefix store seeded from configuration
#[derive(Default)]
pub struct StaticPrefixStore {
    prefixes: RwLock<HashMap<String, String>>,
}

impl StaticPrefixStore {
    pub fn new(prefixes: HashMap<String, String>) -> Self {
        Self {
            prefixes: RwLock::new(prefixes),
        }
    }
}

#[async_trait]
impl PrefixStore for StaticPrefixStore {
    async fn prefix(&self, guild_id: &str) -> Result<Option<String>, StorageError> {
        let prefixes = self.prefixes.read().map_err(|_| StorageError::Poisoned)?;
        Ok(prefixes.get(guild_id).cloned())
    }

    async fn set_prefix(&self, guild_id: &str, prefix: &str) -> Result<(), StorageError> {
        let mut prefixes = self.prefixes.write().map_err(|_| StorageError::Poisoned)?;
        prefixes.insert(guild_id.to_string(), prefix.to_string());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn sqlite_store_upserts() {
        let store = SqlitePrefixStore::in_memory().unwrap();
        assert_eq!(store.prefix("g1").await.unwrap(), None);

        store.set_prefix("g1", "?").await.unwrap();
        store.set_prefix("g1", "rei!").await.unwrap();
        assert_eq!(store.prefix("g1").await.unwrap().as_deref(), Some("rei!"));
        assert_eq!(store.prefix("g2").await.unwrap(), None);
    }

    #[tokio::test]
    async fn sqlite_store_persists_to_file() {
        let tmp = tempfile::tempdir().unwrap();
        let path = tmp.path().join("data/prefixes.db");

        SqlitePrefixStore::open(&path)
            .unwrap()
            .set_prefix("g1", "$")
            .await
            .unwrap();

        let reopened = SqlitePrefixStore::open(&path).unwrap();
        assert_eq!(reopened.prefix("g1").await.unwrap().as_deref(), Some("$"));
    }

    #[tokio::test]
    async fn static_store_reads_config_map() {
        let store = StaticPrefixStore::new(HashMap::from([("g1".to_string(), ">".to_string())]));
        assert_eq!(store.prefix("g1").await.unwrap().as_deref(), Some(">"));
        assert_eq!(store.prefix("g2").await.unwrap(), None);
    }
}
