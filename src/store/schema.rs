//! Database schema definitions
//!
//! This module contains all SQL schema definitions for the vitrine database.

/// SQL schema for the database
pub const SCHEMA_SQL: &str = r#"
-- Discovered bestseller categories and their processing status
CREATE TABLE IF NOT EXISTS categories (
    url TEXT PRIMARY KEY,
    label TEXT NOT NULL,
    status TEXT NOT NULL,
    discovered_at TEXT NOT NULL
);

CREATE INDEX IF NOT EXISTS idx_categories_status ON categories(status);

-- Products extracted from category pages (append-only)
CREATE TABLE IF NOT EXISTS products (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    category_label TEXT NOT NULL,
    name TEXT NOT NULL,
    url TEXT,
    rating_avg REAL,
    reviews_count INTEGER,
    price_brl REAL,
    extracted_at TEXT NOT NULL
);

CREATE INDEX IF NOT EXISTS idx_products_category ON products(category_label);
"#;

/// Initializes the database schema
///
/// # Arguments
///
/// * `conn` - The database connection
pub fn initialize_schema(conn: &rusqlite::Connection) -> Result<(), rusqlite::Error> {
    conn.execute_batch(SCHEMA_SQL)?;
    Ok(())
}
