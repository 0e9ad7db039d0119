pub mod error;
pub mod migrations;
pub mod queries;
pub mod votes;

pub use error::{Result, StoreError};
pub use queries::QUESTION_PLACEHOLDER_BODY;

use rusqlite::Connection;
use std::sync::Mutex;
use tracing::info;

/// The board's five collections: users, questions, answers and the two vote
/// ledgers. Backed by an in-memory SQLite connection, so nothing outlives the
/// process.
pub struct Store {
    conn: Mutex<Connection>,
}

impl Store {
    /// Opens a store with the schema and the fixture data loaded.
    pub fn open_in_memory() -> Result<Self> {
        let store = Self::open_unseeded()?;
        store.with_conn(migrations::seed)?;
        info!("Store opened with fixture data");
        Ok(store)
    }

    /// Opens a store with the schema only.
    pub fn open_unseeded() -> Result<Self> {
        let conn = Connection::open_in_memory()?;
        conn.pragma_update(None, "foreign_keys", "ON")?;

        migrations::run(&conn)?;

        Ok(Self {
            conn: Mutex::new(conn),
        })
    }

    /// Runs `f` while holding the connection lock. Id allocation and the vote
    /// read-modify-write rely on this being one critical section.
    pub fn with_conn<F, T>(&self, f: F) -> Result<T>
    where
        F: FnOnce(&Connection) -> Result<T>,
    {
        let conn = self
            .conn
            .lock()
            .map_err(|e| StoreError::LockPoisoned(e.to_string()))?;
        f(&conn)
    }

    pub fn with_conn_mut<F, T>(&self, f: F) -> Result<T>
    where
        F: FnOnce(&mut Connection) -> Result<T>,
    {
        let mut conn = self
            .conn
            .lock()
            .map_err(|e| StoreError::LockPoisoned(e.to_string()))?;
        f(&mut conn)
    }
}
