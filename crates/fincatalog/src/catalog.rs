//! Catalog controller.
//!
//! Ties the remote service, the selection cache and the validators together
//! into the list, detail, create and edit flows. Every successful mutation is
//! followed by a fresh list fetch, so the cache always mirrors what the
//! service returned last.

use chrono::NaiveDate;
use tracing::{info, warn};

use crate::api::ProductApi;
use crate::error::{Error, Result};
use crate::product::{Product, ProductChanges};
use crate::search;
use crate::storage::SelectionCache;
use crate::validation;

/// Asks the user to confirm a destructive action.
pub trait Confirm {
    /// Return `true` to proceed.
    ///
    /// # Errors
    ///
    /// Returns an error if the answer could not be read.
    fn confirm(&self, prompt: &str) -> Result<bool>;
}

/// Confirmation that always answers yes (`--yes`).
#[derive(Debug, Clone, Copy, Default)]
pub struct AssumeYes;

impl Confirm for AssumeYes {
    fn confirm(&self, _prompt: &str) -> Result<bool> {
        Ok(true)
    }
}

/// Result of opening the product list.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ListView {
    /// All products returned by the service; empty when the fetch failed.
    pub products: Vec<Product>,
    /// One-shot message describing a failed fetch.
    pub alert: Option<String>,
}

impl ListView {
    /// Products matching a search term.
    #[must_use]
    pub fn filtered(&self, term: &str) -> Vec<Product> {
        search::filter_products(&self.products, term)
    }
}

/// Outcome of a delete request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DeleteOutcome {
    /// The user declined; nothing was sent.
    Cancelled,
    /// The product was deleted on the service.
    Deleted(Product),
}

/// Controller over a product service and a local selection cache.
#[derive(Debug)]
pub struct Catalog<A> {
    api: A,
    cache: SelectionCache,
}

impl<A: ProductApi> Catalog<A> {
    /// Create a controller.
    pub fn new(api: A, cache: SelectionCache) -> Self {
        Self { api, cache }
    }

    /// The underlying service.
    pub fn api(&self) -> &A {
        &self.api
    }

    /// The underlying cache.
    pub fn cache(&self) -> &SelectionCache {
        &self.cache
    }

    /// Fetch the full list and refresh the cache snapshot.
    ///
    /// # Errors
    ///
    /// Returns an error if the fetch or the cache write fails.
    pub async fn refresh(&self) -> Result<Vec<Product>> {
        let products = self.api.list_products().await?;
        self.cache.store_products(&products)?;
        info!("Fetched {} products", products.len());
        Ok(products)
    }

    /// Open the list view.
    ///
    /// Always fetches. A failed fetch yields an empty list with an alert and
    /// leaves the previous cache snapshot in place.
    pub async fn open_list(&self) -> ListView {
        match self.refresh().await {
            Ok(products) => ListView {
                products,
                alert: None,
            },
            Err(e) => {
                warn!("Failed to load products: {}", e);
                ListView {
                    products: Vec::new(),
                    alert: Some(format!("Could not load products: {e}")),
                }
            }
        }
    }

    /// Select a product from the cached list.
    ///
    /// # Errors
    ///
    /// Returns [`Error::ProductNotFound`] if the id is not in the cached list.
    pub fn select(&self, id: &str) -> Result<Product> {
        let product = self
            .cache
            .find(id)?
            .ok_or_else(|| Error::product_not_found(id))?;
        self.cache.set_selected_id(id)?;
        Ok(product)
    }

    /// Forget the current selection.
    ///
    /// # Errors
    ///
    /// Returns an error if the cache write fails.
    pub fn clear_selection(&self) -> Result<bool> {
        self.cache.clear_selection()
    }

    /// The selected product, read from the cache without fetching.
    ///
    /// # Errors
    ///
    /// Returns [`Error::NoSelection`] or [`Error::ProductNotFound`].
    pub fn detail(&self) -> Result<Product> {
        let id = self.cache.selected_id()?.ok_or(Error::NoSelection)?;
        self.cache
            .find(&id)?
            .ok_or_else(|| Error::product_not_found(id))
    }

    /// Delete the selected product after explicit confirmation.
    ///
    /// # Errors
    ///
    /// Returns an error if there is no selection, the confirmation could not
    /// be read, or the service rejects the delete. Cache and selection are
    /// unchanged on error.
    pub async fn delete_selected<C>(&self, confirm: &C) -> Result<DeleteOutcome>
    where
        C: Confirm + ?Sized,
    {
        let product = self.detail()?;
        let prompt = format!(
            "Are you sure you want to delete the product {}?",
            product.name
        );
        if !confirm.confirm(&prompt)? {
            info!("Delete of {} cancelled", product.id);
            return Ok(DeleteOutcome::Cancelled);
        }

        self.api.delete_product(&product.id).await?;
        info!("Deleted product {}", product.id);

        self.cache.clear_selection()?;
        self.refresh_after_mutation().await;
        Ok(DeleteOutcome::Deleted(product))
    }

    /// Validate and create a product.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Validation`] without contacting the create endpoint if
    /// any field fails, or the service error if the create is rejected.
    pub async fn create(&self, product: Product, today: NaiveDate) -> Result<Product> {
        let errors = validation::validate_new(&product, today, &self.api).await;
        if !errors.is_empty() {
            return Err(Error::Validation(errors));
        }

        let created = self.api.create_product(&product).await?;
        info!("Created product {}", created.id);
        self.refresh_after_mutation().await;
        Ok(created)
    }

    /// Apply changes to the selected product, validate and update it.
    ///
    /// The id is never changed.
    ///
    /// # Errors
    ///
    /// Returns an error if there is no selection, validation fails, or the
    /// service rejects the update.
    pub async fn edit(&self, changes: ProductChanges, today: NaiveDate) -> Result<Product> {
        let mut product = self.detail()?;
        product.apply(changes);

        let errors = validation::validate_existing(&product, today);
        if !errors.is_empty() {
            return Err(Error::Validation(errors));
        }

        let updated = self.api.update_product(&product).await?;
        info!("Updated product {}", updated.id);
        self.refresh_after_mutation().await;
        Ok(updated)
    }

    async fn refresh_after_mutation(&self) {
        if let Err(e) = self.refresh().await {
            warn!("Refresh after update failed: {}", e);
        }
    }
}
