//! Storage module for the work queue and extracted products
//!
//! This module handles all database operations for the pipeline, including:
//! - SQLite database initialization and schema management
//! - The category work queue and its status transitions
//! - Append-only persistence of extracted product records

mod schema;
mod sqlite;
mod traits;

pub use sqlite::SqliteStore;
pub use traits::{StoreError, StoreResult, WorkStore};

use crate::state::WorkStatus;
use crate::VitrineError;

use std::path::Path;
use url::Url;

/// Initializes or opens a store database
pub fn open_store(path: &Path) -> Result<SqliteStore, VitrineError> {
    SqliteStore::new(path)
}

/// A category link pulled off the bestsellers index
///
/// This is the discovery output before it is installed into the store.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DiscoveredCategory {
    /// Human-readable category name
    pub label: String,
    /// Absolute URL of the category's bestseller page
    pub url: Url,
}

/// One category in the work queue
#[derive(Debug, Clone)]
pub struct WorkItem {
    /// Canonical category URL; the unique identifier
    pub url: String,
    /// Human-readable category name, not unique
    pub label: String,
    /// Current queue status
    pub status: WorkStatus,
    /// RFC 3339 timestamp, set once when the category was installed
    pub discovered_at: String,
}

/// One product extracted from a category page
///
/// Every field except the name may be missing; extraction is best-effort per
/// field. `extracted_at` is stamped by the store at persist time.
#[derive(Debug, Clone, PartialEq)]
pub struct ProductRecord {
    /// Label of the category the product was found under
    pub category_label: String,
    /// Product name; records without one are never persisted
    pub name: String,
    /// Canonical product URL, when the link could be read
    pub url: Option<String>,
    /// Average star rating, 0 to 5
    pub rating_avg: Option<f64>,
    /// Number of customer reviews
    pub reviews_count: Option<i64>,
    /// Price in the site's local currency
    pub price_brl: Option<f64>,
}
