//! Error types for fincatalog.
//!
//! This module defines all error types used throughout the fincatalog crate,
//! providing detailed context for debugging and user-friendly error messages.

use std::path::PathBuf;
use thiserror::Error;

use crate::validation::FieldErrors;

/// The main error type for fincatalog operations.
#[derive(Error, Debug)]
pub enum Error {
    // === Remote API Errors ===
    /// The HTTP request could not be completed.
    #[error("request failed: {0}")]
    Http(#[from] reqwest::Error),

    /// The catalog service answered with a non-success status.
    #[error("{operation} failed with status {status}{}", fmt_detail(.message))]
    ApiStatus {
        /// The API operation that was attempted.
        operation: &'static str,
        /// HTTP status code returned by the service.
        status: u16,
        /// Response body, if any.
        message: String,
    },

    // === Catalog Errors ===
    /// Form validation failed; the request was not sent.
    #[error("validation failed:\n{0}")]
    Validation(FieldErrors),

    /// No product is currently selected.
    #[error("no product selected; run `fincat select <ID>` first")]
    NoSelection,

    /// The requested product is not in the cached list.
    #[error("product not found: {id}")]
    ProductNotFound {
        /// The id that was looked up.
        id: String,
    },

    // === Storage Errors ===
    /// Failed to open or create the cache database.
    #[error("failed to open cache at {path}: {source}")]
    DatabaseOpen {
        /// Path to the database file.
        path: PathBuf,
        /// The underlying error.
        #[source]
        source: rusqlite::Error,
    },

    /// A database query failed.
    #[error("database query failed: {0}")]
    DatabaseQuery(#[from] rusqlite::Error),

    /// Failed to run database migrations.
    #[error("database migration failed: {message}")]
    DatabaseMigration {
        /// Description of what went wrong.
        message: String,
    },

    // === Configuration Errors ===
    /// Failed to load configuration.
    #[error("failed to load configuration: {0}")]
    ConfigLoad(Box<figment::Error>),

    /// Configuration validation failed.
    #[error("invalid configuration: {message}")]
    ConfigValidation {
        /// Description of the validation failure.
        message: String,
    },

    // === I/O Errors ===
    /// File system operation failed.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Failed to create a required directory.
    #[error("failed to create directory {path}: {source}")]
    DirectoryCreate {
        /// Path that couldn't be created.
        path: PathBuf,
        /// The underlying error.
        #[source]
        source: std::io::Error,
    },

    // === Serialization Errors ===
    /// JSON serialization/deserialization failed.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    // === Generic Errors ===
    /// An internal error occurred (bug).
    #[error("internal error: {0}")]
    Internal(String),
}

/// A specialized Result type for fincatalog operations.
pub type Result<T> = std::result::Result<T, Error>;

impl From<figment::Error> for Error {
    fn from(err: figment::Error) -> Self {
        Self::ConfigLoad(Box::new(err))
    }
}

fn fmt_detail(message: &str) -> String {
    if message.is_empty() {
        String::new()
    } else {
        format!(": {message}")
    }
}

impl Error {
    /// Create an API status error.
    #[must_use]
    pub fn api_status(operation: &'static str, status: u16, message: impl Into<String>) -> Self {
        Self::ApiStatus {
            operation,
            status,
            message: message.into(),
        }
    }

    /// Create a product-not-found error.
    #[must_use]
    pub fn product_not_found(id: impl Into<String>) -> Self {
        Self::ProductNotFound { id: id.into() }
    }

    /// Create a new internal error.
    #[must_use]
    pub fn internal(message: impl Into<String>) -> Self {
        Self::Internal(message.into())
    }

    /// Check if this error is a form validation failure.
    #[must_use]
    pub fn is_validation(&self) -> bool {
        matches!(self, Self::Validation(_))
    }

    /// Check if this error means the product or selection could not be found.
    #[must_use]
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NoSelection | Self::ProductNotFound { .. })
    }

    /// Check if this error came from talking to the catalog service.
    #[must_use]
    pub fn is_remote(&self) -> bool {
        matches!(self, Self::Http(_) | Self::ApiStatus { .. })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::validation::Field;

    #[test]
    fn test_error_display() {
        let err = Error::NoSelection;
        assert!(err.to_string().starts_with("no product selected"));

        let err = Error::internal("test error");
        assert_eq!(err.to_string(), "internal error: test error");
    }

    #[test]
    fn test_api_status_display_with_message() {
        let err = Error::api_status("delete product", 404, "Not product found");
        assert_eq!(
            err.to_string(),
            "delete product failed with status 404: Not product found"
        );
    }

    #[test]
    fn test_api_status_display_without_message() {
        let err = Error::api_status("list products", 500, "");
        assert_eq!(err.to_string(), "list products failed with status 500");
    }

    #[test]
    fn test_product_not_found_display() {
        let err = Error::product_not_found("xyz");
        assert_eq!(err.to_string(), "product not found: xyz");
    }

    #[test]
    fn test_validation_display_lists_fields() {
        let mut errors = FieldErrors::default();
        errors.insert(Field::Id, "ID must be between 3 and 10 characters.");
        let err = Error::Validation(errors);
        let msg = err.to_string();
        assert!(msg.contains("validation failed"));
        assert!(msg.contains("3 and 10 characters"));
    }

    #[test]
    fn test_predicates() {
        assert!(Error::Validation(FieldErrors::default()).is_validation());
        assert!(Error::NoSelection.is_not_found());
        assert!(Error::product_not_found("a").is_not_found());
        assert!(Error::api_status("x", 400, "").is_remote());
        assert!(!Error::NoSelection.is_remote());
        assert!(!Error::internal("x").is_validation());
    }

    #[test]
    fn test_from_io_error() {
        let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "file not found");
        let err: Error = io_err.into();
        assert!(err.to_string().contains("file not found"));
    }

    #[test]
    fn test_from_rusqlite_error() {
        let result = rusqlite::Connection::open_with_flags(
            "/nonexistent/path/db.sqlite",
            rusqlite::OpenFlags::SQLITE_OPEN_READ_ONLY,
        );
        if let Err(sqlite_err) = result {
            let err: Error = sqlite_err.into();
            assert!(matches!(err, Error::DatabaseQuery(_)));
        }
    }

    #[test]
    fn test_from_json_error() {
        let json_result: std::result::Result<i32, serde_json::Error> =
            serde_json::from_str("not valid json");
        if let Err(json_err) = json_result {
            let err: Error = json_err.into();
            assert!(matches!(err, Error::Json(_)));
        }
    }

    #[test]
    fn test_database_migration_error_display() {
        let err = Error::DatabaseMigration {
            message: "version mismatch".to_string(),
        };
        assert!(err.to_string().contains("version mismatch"));
    }

    #[test]
    fn test_config_validation_error_display() {
        let err = Error::ConfigValidation {
            message: "author_id must not be empty".to_string(),
        };
        assert!(err.to_string().contains("author_id"));
    }

    #[test]
    fn test_directory_create_error_display() {
        let io_err = std::io::Error::new(std::io::ErrorKind::PermissionDenied, "access denied");
        let err = Error::DirectoryCreate {
            path: PathBuf::from("/root/forbidden"),
            source: io_err,
        };
        assert!(err.to_string().contains("/root/forbidden"));
    }
}
