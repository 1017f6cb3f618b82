//! SQLite-backed search history.
//!
//! Append-only: records are never updated or deleted, and retrieval is
//! always newest-first with a hard cap. A single shared handle is assumed;
//! single-row inserts rely on SQLite's own atomicity.

use std::path::Path;

use chrono::Utc;
use rusqlite::{Connection, params};

use crate::error::Result;
use crate::model::HistoryRecord;

/// Default cap on `recent` queries.
pub const DEFAULT_RECENT_LIMIT: usize = 50;

pub struct SearchHistoryStore {
    conn: Connection,
}

impl std::fmt::Debug for SearchHistoryStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SearchHistoryStore").finish_non_exhaustive()
    }
}

impl SearchHistoryStore {
    /// Open (creating if needed) the history database at `path`.
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        let conn = Connection::open(path)?;
        let store = Self { conn };
        store.init_schema()?;
        Ok(store)
    }

    /// In-memory store, useful for tests and history-less sessions.
    pub fn in_memory() -> Result<Self> {
        let conn = Connection::open_in_memory()?;
        let store = Self { conn };
        store.init_schema()?;
        Ok(store)
    }

    fn init_schema(&self) -> Result<()> {
        self.conn.execute_batch(
            r#"
            CREATE TABLE IF NOT EXISTS search_history (
                id INTEGER PRIMARY KEY AUTOINCREMENT,
                city TEXT NOT NULL,
                temperature_c REAL NOT NULL,
                observed_at TEXT NOT NULL,
                recorded_at TEXT NOT NULL
            );
            "#,
        )?;
        Ok(())
    }

    /// Append one search, assigning `recorded_at` now.
    pub fn append(&self, city: &str, temperature_c: f64, observed_at: &str) -> Result<HistoryRecord> {
        let recorded_at = Utc::now();
        self.conn.execute(
            "INSERT INTO search_history (city, temperature_c, observed_at, recorded_at)
             VALUES (?1, ?2, ?3, ?4)",
            params![city, temperature_c, observed_at, recorded_at],
        )?;

        Ok(HistoryRecord {
            city: city.to_string(),
            temperature_c,
            observed_at: observed_at.to_string(),
            recorded_at,
        })
    }

    /// The `limit` most recently appended records, newest first.
    ///
    /// Ordered by rowid rather than `recorded_at` so that appends landing in
    /// the same instant still come back in insertion order.
    pub fn recent(&self, limit: usize) -> Result<Vec<HistoryRecord>> {
        let mut stmt = self.conn.prepare(
            "SELECT city, temperature_c, observed_at, recorded_at
             FROM search_history
             ORDER BY id DESC
             LIMIT ?1",
        )?;

        let rows = stmt.query_map(params![limit as i64], |row| {
            Ok(HistoryRecord {
                city: row.get(0)?,
                temperature_c: row.get(1)?,
                observed_at: row.get(2)?,
                recorded_at: row.get(3)?,
            })
        })?;

        let mut records = Vec::new();
        for row in rows {
            records.push(row?);
        }
        Ok(records)
    }
}
