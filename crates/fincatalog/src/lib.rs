//! `fincatalog` - Client library for a remote financial-products catalog
//!
//! This library provides the product model, field validation, the HTTP
//! client for the catalog service, a local selection cache and the
//! [`Catalog`] controller that ties them together for the `fincat` binary.

#![warn(missing_docs)]
#![warn(missing_debug_implementations)]
#![deny(unsafe_code)]

pub mod api;
pub mod catalog;
pub mod cli;
pub mod config;
pub mod error;
pub mod logging;
pub mod product;
pub mod search;
pub mod storage;
pub mod validation;

pub use api::{HttpProductApi, ProductApi};
pub use catalog::{AssumeYes, Catalog, Confirm, DeleteOutcome, ListView};
pub use config::Config;
pub use error::{Error, Result};
pub use logging::init_logging;
pub use product::{Product, ProductChanges};
pub use storage::{CacheStats, SelectionCache};
pub use validation::{Field, FieldErrors};
