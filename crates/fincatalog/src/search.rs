//! Product list filtering.

use crate::product::Product;

/// Check whether a product matches a search term.
///
/// Case-insensitive substring match against the name or the id. An empty term
/// matches everything.
#[must_use]
pub fn matches(product: &Product, term: &str) -> bool {
    if term.is_empty() {
        return true;
    }
    let needle = term.to_lowercase();
    product.name.to_lowercase().contains(&needle) || product.id.to_lowercase().contains(&needle)
}

/// Filter products by a search term, preserving order.
#[must_use]
pub fn filter_products(products: &[Product], term: &str) -> Vec<Product> {
    products
        .iter()
        .filter(|p| matches(p, term))
        .cloned()
        .collect()
}
