//! HTTP implementation of the product service.

use reqwest::{Client, RequestBuilder, Response};
use serde::de::DeserializeOwned;
use tracing::debug;

use super::{Envelope, ProductApi};
use crate::config::ApiConfig;
use crate::error::{Error, Result};
use crate::product::Product;

/// Header identifying the caller on listing and mutating requests.
pub const AUTHOR_ID_HEADER: &str = "authorId";

/// Client for the remote product service.
///
/// Sends one request per operation against `{base_url}/products`. There are
/// no retries and no request timeout.
#[derive(Debug, Clone)]
pub struct HttpProductApi {
    client: Client,
    base_url: String,
    author_id: String,
}

impl HttpProductApi {
    /// Create a client for the given base URL and author id.
    #[must_use]
    pub fn new(base_url: impl Into<String>, author_id: impl Into<String>) -> Self {
        let base_url = base_url.into().trim_end_matches('/').to_string();
        Self {
            client: Client::new(),
            base_url,
            author_id: author_id.into(),
        }
    }

    /// Create a client from the `[api]` configuration section.
    #[must_use]
    pub fn from_config(config: &ApiConfig) -> Self {
        Self::new(config.base_url.clone(), config.author_id.clone())
    }

    /// The base URL requests are sent to.
    #[must_use]
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn products_url(&self) -> String {
        format!("{}/products", self.base_url)
    }

    fn verification_url(&self) -> String {
        format!("{}/products/verification", self.base_url)
    }

    fn authored(&self, request: RequestBuilder) -> RequestBuilder {
        request.header(AUTHOR_ID_HEADER, &self.author_id)
    }

    /// Send a request, mapping any non-success status to [`Error::ApiStatus`].
    async fn send(operation: &'static str, request: RequestBuilder) -> Result<Response> {
        let response = request.send().await?;
        let status = response.status();
        debug!("{} -> {}", operation, status);

        if status.is_success() {
            return Ok(response);
        }

        let message = response.text().await.unwrap_or_default();
        Err(Error::api_status(operation, status.as_u16(), message.trim()))
    }

    async fn decode<T: DeserializeOwned>(response: Response) -> Result<T> {
        let body = response.bytes().await?;
        let envelope: Envelope<T> = serde_json::from_slice(&body)?;
        Ok(envelope.into_inner())
    }

    /// Decode the product echoed by a create/update call, falling back to
    /// the submitted record when the body does not hold one.
    async fn echoed_product(response: Response, submitted: &Product) -> Result<Product> {
        let body = response.bytes().await?;
        match serde_json::from_slice::<Envelope<Product>>(&body) {
            Ok(envelope) => Ok(envelope.into_inner()),
            Err(e) => {
                debug!("response did not contain a product ({}); using submitted record", e);
                Ok(submitted.clone())
            }
        }
    }
}

#[async_trait::async_trait]
impl ProductApi for HttpProductApi {
    async fn list_products(&self) -> Result<Vec<Product>> {
        let url = self.products_url();
        debug!("GET {}", url);
        let response = Self::send("list products", self.authored(self.client.get(url))).await?;
        Self::decode(response).await
    }

    async fn verify_id(&self, id: &str) -> Result<bool> {
        let url = self.verification_url();
        debug!("GET {} id={}", url, id);
        let request = self.client.get(url).query(&[("id", id)]);
        let response = Self::send("verify product id", request).await?;
        Self::decode(response).await
    }

    async fn create_product(&self, product: &Product) -> Result<Product> {
        let url = self.products_url();
        debug!("POST {} id={}", url, product.id);
        let request = self.authored(self.client.post(url)).json(product);
        let response = Self::send("create product", request).await?;
        Self::echoed_product(response, product).await
    }

    async fn update_product(&self, product: &Product) -> Result<Product> {
        let url = self.products_url();
        debug!("PUT {} id={}", url, product.id);
        let request = self.authored(self.client.put(url)).json(product);
        let response = Self::send("update product", request).await?;
        Self::echoed_product(response, product).await
    }

    async fn delete_product(&self, id: &str) -> Result<()> {
        let url = self.products_url();
        debug!("DELETE {} id={}", url, id);
        let request = self.authored(self.client.delete(url)).query(&[("id", id)]);
        Self::send("delete product", request).await?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_trailing_slash_is_ignored() {
        let api = HttpProductApi::new("https://example.com/bp/", "123");
        assert_eq!(api.base_url(), "https://example.com/bp");
        assert_eq!(api.products_url(), "https://example.com/bp/products");
        assert_eq!(
            api.verification_url(),
            "https://example.com/bp/products/verification"
        );
    }

    #[test]
    fn test_from_config() {
        let config = ApiConfig {
            base_url: "http://localhost:3002/bp".to_string(),
            author_id: "42".to_string(),
        };
        let api = HttpProductApi::from_config(&config);
        assert_eq!(api.base_url(), "http://localhost:3002/bp");
        assert_eq!(api.author_id, "42");
    }

    #[tokio::test]
    async fn test_unreachable_service_is_http_error() {
        let port = {
            let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
            listener.local_addr().unwrap().port()
        };
        let api = HttpProductApi::new(format!("http://127.0.0.1:{port}"), "123");
        let err = api.list_products().await.unwrap_err();
        assert!(err.is_remote());
        assert!(matches!(err, Error::Http(_)));
    }
}
