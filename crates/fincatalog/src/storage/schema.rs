//! `SQLite` schema definitions for the selection cache.
//!
//! This module contains the SQL statements for creating and managing
//! the database schema.

/// SQL statement to create the cache entries table.
///
/// Each row is one named entry (the product list snapshot, the selected id).
pub const CREATE_CACHE_ENTRIES_TABLE: &str = r"
CREATE TABLE IF NOT EXISTS cache_entries (
    key TEXT PRIMARY KEY,
    value TEXT NOT NULL,
    updated_at TEXT NOT NULL
)
";

/// SQL statement to create the metadata table for storing key-value pairs.
pub const CREATE_METADATA_TABLE: &str = r"
CREATE TABLE IF NOT EXISTS metadata (
    key TEXT PRIMARY KEY,
    value TEXT NOT NULL
)
";

/// All schema creation statements in order.
pub const SCHEMA_STATEMENTS: &[&str] = &[CREATE_CACHE_ENTRIES_TABLE, CREATE_METADATA_TABLE];
