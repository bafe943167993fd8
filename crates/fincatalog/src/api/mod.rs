//! Remote catalog service abstraction.
//!
//! This module defines the contract the catalog controller relies on. The HTTP
//! implementation lives in [`http`]; tests substitute an in-memory fake.

pub mod http;

use serde::Deserialize;

use crate::error::Result;
use crate::product::Product;

pub use http::{HttpProductApi, AUTHOR_ID_HEADER};

/// Operations offered by the remote product service.
///
/// Each call issues exactly one request. Implementations must not retry.
#[async_trait::async_trait]
pub trait ProductApi: Send + Sync {
    /// Fetch the full product list.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails or the service rejects it.
    async fn list_products(&self) -> Result<Vec<Product>>;

    /// Ask whether a product id already exists.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails or the service rejects it.
    async fn verify_id(&self, id: &str) -> Result<bool>;

    /// Create a product.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails or the service rejects it.
    async fn create_product(&self, product: &Product) -> Result<Product>;

    /// Replace a product with the given full record.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails or the service rejects it.
    async fn update_product(&self, product: &Product) -> Result<Product>;

    /// Delete a product by id.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails or the service rejects it.
    async fn delete_product(&self, id: &str) -> Result<()>;
}

/// A response body, either bare or wrapped as `{"data": ...}`.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
pub(crate) enum Envelope<T> {
    Bare(T),
    Wrapped { data: T },
}

impl<T> Envelope<T> {
    pub(crate) fn into_inner(self) -> T {
        match self {
            Self::Bare(value) | Self::Wrapped { data: value } => value,
        }
    }
}
