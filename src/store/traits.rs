//! Work store trait and error types
//!
//! This module defines the trait interface for the persistent work queue and
//! its associated error types.

use crate::state::WorkStatus;
use crate::store::{DiscoveredCategory, ProductRecord, WorkItem};
use thiserror::Error;

/// Errors that can occur during store operations
#[derive(Debug, Error)]
pub enum StoreError {
    /// A status transition targeted a URL the store has never seen. This
    /// means the driver loop and the store have diverged, so it is not
    /// recoverable within a run.
    #[error("Category not found: {0}")]
    CategoryNotFound(String),

    #[error("SQLite error: {0}")]
    Sqlite(#[from] rusqlite::Error),
}

/// Result type for store operations
pub type StoreResult<T> = Result<T, StoreError>;

/// Trait for the persistent work queue backing the pipeline
///
/// The store holds the single source of truth for what remains to be
/// processed. It assumes one consumer at a time: `claim_one_pending` does not
/// mark the returned item in-flight, so concurrent claimers would race.
pub trait WorkStore {
    // ===== Category queue =====

    /// Atomically replaces the whole category set
    ///
    /// Any existing rows are discarded; every installed row starts at
    /// `pending` with `discovered_at` stamped once. Duplicate URLs in the
    /// input collapse to a single row (first occurrence wins).
    ///
    /// Returns the number of rows installed.
    fn replace_all(&mut self, items: &[DiscoveredCategory]) -> StoreResult<usize>;

    /// Sets every category back to `pending`, whatever its current status
    ///
    /// Called at the start of a processing run so the whole set is
    /// reprocessed. Idempotent.
    ///
    /// Returns the number of rows now pending.
    fn reset_all_to_pending(&mut self) -> StoreResult<usize>;

    /// Returns one pending category, or None when the queue is drained
    ///
    /// Picks the first pending row by insertion order. The item stays
    /// `pending` until `set_status` is called for it.
    fn claim_one_pending(&self) -> StoreResult<Option<WorkItem>>;

    /// Transitions one category to the given status
    ///
    /// Fails with [`StoreError::CategoryNotFound`] when the URL is unknown.
    fn set_status(&mut self, url: &str, status: WorkStatus) -> StoreResult<()>;

    /// Gets a category by URL
    fn get_item(&self, url: &str) -> StoreResult<Option<WorkItem>>;

    // ===== Product records =====

    /// Appends extracted product records, stamping `extracted_at`
    ///
    /// Returns the number of rows written.
    fn append_records(&mut self, records: &[ProductRecord]) -> StoreResult<usize>;

    /// Deletes all product records (run-start reset)
    fn clear_records(&mut self) -> StoreResult<()>;

    // ===== Statistics =====

    /// Counts categories in the given status
    fn count_items_by_status(&self, status: WorkStatus) -> StoreResult<u64>;

    /// Counts all categories
    fn count_total_items(&self) -> StoreResult<u64>;

    /// Counts all product records
    fn count_records(&self) -> StoreResult<u64>;

    /// Gets product counts grouped by category label, largest first
    fn record_breakdown(&self) -> StoreResult<Vec<(String, u64)>>;
}
