//! Selection cache for fincatalog.
//!
//! A small `SQLite` key-value store holding the last fetched product list and
//! the currently selected product id. Both entries are caches of server state,
//! used to hand a product from the list to the detail and edit commands
//! without fetching again.

pub mod migrations;
pub mod schema;

use std::path::{Path, PathBuf};

use chrono::{DateTime, Utc};
use rusqlite::{params, Connection, OptionalExtension};
use tracing::{debug, info};

use crate::error::{Error, Result};
use crate::product::Product;

/// Key of the product list snapshot.
pub const PRODUCTS_KEY: &str = "products";

/// Key of the selected product id.
pub const SELECTED_ID_KEY: &str = "selected_product_id";

/// Device-local cache of the product list and current selection.
#[derive(Debug)]
pub struct SelectionCache {
    /// Path to the database file.
    path: PathBuf,
    /// Database connection.
    conn: Connection,
}

impl SelectionCache {
    /// Open or create a cache database at the given path.
    ///
    /// Creates the parent directories and database file if they don't exist.
    ///
    /// # Errors
    ///
    /// Returns an error if the database cannot be opened or schema initialization fails.
    pub fn open(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref().to_path_buf();

        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() && !parent.exists() {
                std::fs::create_dir_all(parent).map_err(|source| Error::DirectoryCreate {
                    path: parent.to_path_buf(),
                    source,
                })?;
            }
        }

        debug!("Opening cache at {}", path.display());
        let conn = Connection::open(&path).map_err(|source| Error::DatabaseOpen {
            path: path.clone(),
            source,
        })?;

        conn.execute_batch("PRAGMA journal_mode=WAL; PRAGMA synchronous=NORMAL;")?;
        migrations::initialize_schema(&conn)?;

        info!("Cache opened at {}", path.display());
        Ok(Self { path, conn })
    }

    /// Create an in-memory cache, for tests and one-off sessions.
    ///
    /// # Errors
    ///
    /// Returns an error if the in-memory database cannot be created.
    pub fn open_in_memory() -> Result<Self> {
        let conn = Connection::open_in_memory().map_err(|source| Error::DatabaseOpen {
            path: PathBuf::from(":memory:"),
            source,
        })?;

        migrations::initialize_schema(&conn)?;

        Ok(Self {
            path: PathBuf::from(":memory:"),
            conn,
        })
    }

    /// Get the path to the database file.
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    fn put(&self, key: &str, value: &str) -> Result<()> {
        self.conn.execute(
            r"
            INSERT INTO cache_entries (key, value, updated_at) VALUES (?1, ?2, ?3)
            ON CONFLICT(key) DO UPDATE SET value = excluded.value, updated_at = excluded.updated_at
            ",
            params![key, value, Utc::now().to_rfc3339()],
        )?;
        Ok(())
    }

    fn get(&self, key: &str) -> Result<Option<String>> {
        let value = self
            .conn
            .query_row(
                "SELECT value FROM cache_entries WHERE key = ?1",
                [key],
                |row| row.get(0),
            )
            .optional()?;
        Ok(value)
    }

    fn remove(&self, key: &str) -> Result<bool> {
        let affected = self
            .conn
            .execute("DELETE FROM cache_entries WHERE key = ?1", [key])?;
        Ok(affected > 0)
    }

    /// Replace the product list snapshot.
    ///
    /// # Errors
    ///
    /// Returns an error if serialization or the database write fails.
    pub fn store_products(&self, products: &[Product]) -> Result<()> {
        let json = serde_json::to_string(products)?;
        self.put(PRODUCTS_KEY, &json)?;
        debug!("Cached {} products", products.len());
        Ok(())
    }

    /// Read the product list snapshot. Empty if nothing was cached yet.
    ///
    /// # Errors
    ///
    /// Returns an error if the database read fails or the snapshot is corrupt.
    pub fn products(&self) -> Result<Vec<Product>> {
        match self.get(PRODUCTS_KEY)? {
            Some(json) => Ok(serde_json::from_str(&json)?),
            None => Ok(Vec::new()),
        }
    }

    /// Look up a product in the snapshot by id.
    ///
    /// # Errors
    ///
    /// Returns an error if the snapshot cannot be read.
    pub fn find(&self, id: &str) -> Result<Option<Product>> {
        Ok(self.products()?.into_iter().find(|p| p.id == id))
    }

    /// Remember the selected product id.
    ///
    /// # Errors
    ///
    /// Returns an error if the database write fails.
    pub fn set_selected_id(&self, id: &str) -> Result<()> {
        self.put(SELECTED_ID_KEY, id)?;
        debug!("Selected product {}", id);
        Ok(())
    }

    /// The selected product id, if any.
    ///
    /// # Errors
    ///
    /// Returns an error if the database read fails.
    pub fn selected_id(&self) -> Result<Option<String>> {
        self.get(SELECTED_ID_KEY)
    }

    /// Forget the selected product id.
    ///
    /// Returns `true` if a selection was cleared.
    ///
    /// # Errors
    ///
    /// Returns an error if the database write fails.
    pub fn clear_selection(&self) -> Result<bool> {
        self.remove(SELECTED_ID_KEY)
    }

    /// Get cache statistics.
    ///
    /// # Errors
    ///
    /// Returns an error if the database operation fails.
    pub fn stats(&self) -> Result<CacheStats> {
        let cached_products = self.products()?.len();
        let selected_id = self.selected_id()?;

        let refreshed: Option<String> = self
            .conn
            .query_row(
                "SELECT updated_at FROM cache_entries WHERE key = ?1",
                [PRODUCTS_KEY],
                |row| row.get(0),
            )
            .optional()?;
        let last_refreshed = refreshed
            .and_then(|s| DateTime::parse_from_rfc3339(&s).ok())
            .map(|dt| dt.with_timezone(&Utc));

        let db_size_bytes = if self.path.to_string_lossy() == ":memory:" {
            0
        } else {
            std::fs::metadata(&self.path).map(|m| m.len()).unwrap_or(0)
        };

        Ok(CacheStats {
            cached_products,
            selected_id,
            last_refreshed,
            db_size_bytes,
        })
    }
}

/// Statistics about the cache.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CacheStats {
    /// Number of products in the list snapshot.
    pub cached_products: usize,
    /// Currently selected product id.
    pub selected_id: Option<String>,
    /// When the list snapshot was last written.
    pub last_refreshed: Option<DateTime<Utc>>,
    /// Size of the database file in bytes.
    pub db_size_bytes: u64,
}
