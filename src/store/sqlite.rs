//! SQLite store implementation
//!
//! This module provides the SQLite-backed implementation of the WorkStore trait.

use crate::state::WorkStatus;
use crate::store::schema::initialize_schema;
use crate::store::traits::{StoreError, StoreResult, WorkStore};
use crate::store::{DiscoveredCategory, ProductRecord, WorkItem};
use crate::VitrineError;
use chrono::Utc;
use rusqlite::{params, Connection, OptionalExtension};
use std::path::Path;

/// SQLite store backend
pub struct SqliteStore {
    conn: Connection,
}

impl SqliteStore {
    /// Creates a new SqliteStore instance
    ///
    /// # Arguments
    ///
    /// * `path` - Path to the SQLite database file
    pub fn new(path: &Path) -> Result<Self, VitrineError> {
        let conn = Connection::open(path)?;

        // Configure SQLite for better performance
        conn.execute_batch(
            "
            PRAGMA journal_mode = WAL;
            PRAGMA synchronous = NORMAL;
            PRAGMA foreign_keys = ON;
        ",
        )?;

        initialize_schema(&conn)?;

        Ok(Self { conn })
    }

    /// Creates an in-memory database (for testing)
    pub fn new_in_memory() -> Result<Self, VitrineError> {
        let conn = Connection::open_in_memory()?;
        initialize_schema(&conn)?;
        Ok(Self { conn })
    }

    fn row_to_item(row: &rusqlite::Row<'_>) -> rusqlite::Result<WorkItem> {
        Ok(WorkItem {
            url: row.get(0)?,
            label: row.get(1)?,
            status: WorkStatus::from_db_string(&row.get::<_, String>(2)?)
                .unwrap_or(WorkStatus::Failed),
            discovered_at: row.get(3)?,
        })
    }
}

impl WorkStore for SqliteStore {
    // ===== Category queue =====

    fn replace_all(&mut self, items: &[DiscoveredCategory]) -> StoreResult<usize> {
        let now = Utc::now().to_rfc3339();

        let tx = self.conn.transaction()?;
        tx.execute("DELETE FROM categories", [])?;

        let mut installed = 0;
        {
            let mut stmt = tx.prepare(
                "INSERT OR IGNORE INTO categories (url, label, status, discovered_at)
                 VALUES (?1, ?2, ?3, ?4)",
            )?;
            for item in items {
                installed += stmt.execute(params![
                    item.url.as_str(),
                    item.label,
                    WorkStatus::Pending.to_db_string(),
                    now
                ])?;
            }
        }
        tx.commit()?;

        Ok(installed)
    }

    fn reset_all_to_pending(&mut self) -> StoreResult<usize> {
        let reset = self.conn.execute(
            "UPDATE categories SET status = ?1",
            params![WorkStatus::Pending.to_db_string()],
        )?;
        Ok(reset)
    }

    fn claim_one_pending(&self) -> StoreResult<Option<WorkItem>> {
        let mut stmt = self.conn.prepare(
            "SELECT url, label, status, discovered_at FROM categories
             WHERE status = ?1 ORDER BY rowid LIMIT 1",
        )?;

        let item = stmt
            .query_row(params![WorkStatus::Pending.to_db_string()], Self::row_to_item)
            .optional()?;

        Ok(item)
    }

    fn set_status(&mut self, url: &str, status: WorkStatus) -> StoreResult<()> {
        let updated = self.conn.execute(
            "UPDATE categories SET status = ?1 WHERE url = ?2",
            params![status.to_db_string(), url],
        )?;

        if updated == 0 {
            return Err(StoreError::CategoryNotFound(url.to_string()));
        }

        Ok(())
    }

    fn get_item(&self, url: &str) -> StoreResult<Option<WorkItem>> {
        let mut stmt = self.conn.prepare(
            "SELECT url, label, status, discovered_at FROM categories WHERE url = ?1",
        )?;

        let item = stmt.query_row(params![url], Self::row_to_item).optional()?;

        Ok(item)
    }

    // ===== Product records =====

    fn append_records(&mut self, records: &[ProductRecord]) -> StoreResult<usize> {
        let now = Utc::now().to_rfc3339();

        let tx = self.conn.transaction()?;
        let mut written = 0;
        {
            let mut stmt = tx.prepare(
                "INSERT INTO products
                 (category_label, name, url, rating_avg, reviews_count, price_brl, extracted_at)
                 VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7)",
            )?;
            for record in records {
                written += stmt.execute(params![
                    record.category_label,
                    record.name,
                    record.url,
                    record.rating_avg,
                    record.reviews_count,
                    record.price_brl,
                    now
                ])?;
            }
        }
        tx.commit()?;

        Ok(written)
    }

    fn clear_records(&mut self) -> StoreResult<()> {
        self.conn.execute("DELETE FROM products", [])?;
        Ok(())
    }

    // ===== Statistics =====

    fn count_items_by_status(&self, status: WorkStatus) -> StoreResult<u64> {
        let count: i64 = self.conn.query_row(
            "SELECT COUNT(*) FROM categories WHERE status = ?1",
            params![status.to_db_string()],
            |row| row.get(0),
        )?;
        Ok(count as u64)
    }

    fn count_total_items(&self) -> StoreResult<u64> {
        let count: i64 = self
            .conn
            .query_row("SELECT COUNT(*) FROM categories", [], |row| row.get(0))?;
        Ok(count as u64)
    }

    fn count_records(&self) -> StoreResult<u64> {
        let count: i64 = self
            .conn
            .query_row("SELECT COUNT(*) FROM products", [], |row| row.get(0))?;
        Ok(count as u64)
    }

    fn record_breakdown(&self) -> StoreResult<Vec<(String, u64)>> {
        let mut stmt = self.conn.prepare(
            "SELECT category_label, COUNT(*) as count FROM products
             GROUP BY category_label ORDER BY count DESC, category_label",
        )?;

        let breakdown = stmt
            .query_map([], |row| Ok((row.get(0)?, row.get::<_, i64>(1)? as u64)))?
            .collect::<Result<Vec<_>, _>>()?;

        Ok(breakdown)
    }
}
