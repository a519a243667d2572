use anyhow::{anyhow, Result};
use rusqlite::{params, Connection, OptionalExtension};
use std::sync::Mutex;

/// Key/value persistence for client state that must survive restarts.
pub struct LocalStore {
    conn: Mutex<Connection>,
}

impl LocalStore {
    pub fn open(path: &str) -> Result<Self> {
        let store = Self { conn: Mutex::new(Connection::open(path)?) };
        store.init()?;
        Ok(store)
    }

    pub fn in_memory() -> Result<Self> {
        let store = Self { conn: Mutex::new(Connection::open_in_memory()?) };
        store.init()?;
        Ok(store)
    }

    fn init(&self) -> Result<()> {
        self.conn()?.execute_batch(
            "BEGIN;
            CREATE TABLE IF NOT EXISTS local_storage (
                key TEXT PRIMARY KEY NOT NULL,
                value TEXT NOT NULL,
                updated_at INTEGER NOT NULL
            );
            COMMIT;",
        )?;
        Ok(())
    }

    fn conn(&self) -> Result<std::sync::MutexGuard<'_, Connection>> {
        self.conn.lock().map_err(|_| anyhow!("local store lock poisoned"))
    }

    pub fn get_item(&self, key: &str) -> Result<Option<String>> {
        let value = self
            .conn()?
            .query_row(
                "SELECT value FROM local_storage WHERE key = ?1",
                params![key],
                |row| row.get::<_, String>(0),
            )
            .optional()?;
        Ok(value)
    }

    pub fn set_item(&self, key: &str, value: &str) -> Result<()> {
        self.conn()?.execute(
            "INSERT INTO local_storage (key, value, updated_at) VALUES (?1, ?2, ?3)
             ON CONFLICT(key) DO UPDATE SET value = excluded.value, updated_at = excluded.updated_at",
            params![key, value, chrono::Utc::now().timestamp()],
        )?;
        Ok(())
    }

    /// Returns whether a value was present.
    pub fn remove_item(&self, key: &str) -> Result<bool> {
        let n = self
            .conn()?
            .execute("DELETE FROM local_storage WHERE key = ?1", params![key])?;
        Ok(n > 0)
    }
}
