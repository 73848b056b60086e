//! Vitrine: a bestseller shelf harvester
//!
//! This crate discovers the product categories listed on a retail site's
//! bestsellers index, then renders each category page and extracts the
//! products on it into a local SQLite database. Categories move through a
//! small status state machine so an interrupted run can be restarted from
//! scratch without re-discovering anything.

pub mod config;
pub mod discovery;
pub mod driver;
pub mod output;
pub mod scrape;
pub mod state;
pub mod store;

use thiserror::Error;

/// Main error type for vitrine operations
#[derive(Debug, Error)]
pub enum VitrineError {
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("Discovery error: {0}")]
    Discovery(#[from] DiscoveryError),

    #[error("Store error: {0}")]
    Store(#[from] store::StoreError),

    #[error("Render error: {0}")]
    Render(#[from] scrape::RenderError),

    #[error("Database error: {0}")]
    Database(#[from] rusqlite::Error),

    #[error("URL parse error: {0}")]
    UrlParse(#[from] url::ParseError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Configuration-specific errors
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to parse TOML: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Invalid URL in config: {0}")]
    InvalidUrl(String),
}

/// Errors raised while discovering categories from the seed page
///
/// Discovery has no per-item degradation path: a failed seed fetch leaves
/// nothing to process, so these abort the whole run.
#[derive(Debug, Error)]
pub enum DiscoveryError {
    #[error("HTTP error fetching {url}: {source}")]
    Http {
        url: String,
        source: reqwest::Error,
    },

    #[error("Seed page {url} returned HTTP {status}")]
    HttpStatus { url: String, status: u16 },
}

/// Result type alias for vitrine operations
pub type Result<T> = std::result::Result<T, VitrineError>;

/// Result type alias for configuration operations
pub type ConfigResult<T> = std::result::Result<T, ConfigError>;

// Re-export commonly used types
pub use config::Config;
pub use state::WorkStatus;
pub use store::{ProductRecord, WorkItem, WorkStore};
