//! Catalog fixtures and the query pipeline.
//!
//! The catalog is an immutable product and category list loaded once at
//! startup from a bundled JSON fixture. The store layer never mutates
//! it; everything derived from it goes through the pure query pipeline
//! in [`query`].

pub mod query;

pub use query::{CatalogQuery, PAGE_SIZE, QueryPage, SortKey, run_query};

use std::path::Path;
use std::sync::Arc;

use serde::Deserialize;
use thiserror::Error;
use tracing::info;

use sunstone_core::{CategoryId, ProductId};

use crate::models::{Category, Product};

/// Errors that can occur when loading the catalog fixture.
#[derive(Debug, Error)]
pub enum CatalogError {
    /// The fixture file could not be read.
    #[error("failed to read catalog file {path}: {message}")]
    Io {
        path: String,
        message: String,
    },
    /// The fixture did not parse.
    #[error("failed to parse catalog: {0}")]
    Parse(#[from] serde_json::Error),
}

/// On-disk fixture shape.
#[derive(Debug, Deserialize)]
struct CatalogFile {
    products: Vec<Product>,
    categories: Vec<Category>,
}

/// The immutable product catalog.
///
/// Cheaply cloneable via `Arc`; every clone shares the same fixture data.
#[derive(Debug, Clone)]
pub struct Catalog {
    products: Arc<Vec<Product>>,
    categories: Arc<Vec<Category>>,
}

impl Catalog {
    /// Load the catalog from a JSON fixture file.
    ///
    /// # Errors
    ///
    /// Returns `CatalogError::Io` if the file cannot be read and
    /// `CatalogError::Parse` if it is not a valid catalog document.
    pub fn load(path: &Path) -> Result<Self, CatalogError> {
        let raw = std::fs::read_to_string(path).map_err(|e| CatalogError::Io {
            path: path.display().to_string(),
            message: e.to_string(),
        })?;
        let file: CatalogFile = serde_json::from_str(&raw)?;

        info!(
            products = file.products.len(),
            categories = file.categories.len(),
            "Loaded catalog"
        );

        Ok(Self::from_parts(file.products, file.categories))
    }

    /// Build a catalog from in-memory fixtures (tests, demos).
    #[must_use]
    pub fn from_parts(products: Vec<Product>, categories: Vec<Category>) -> Self {
        Self {
            products: Arc::new(products),
            categories: Arc::new(categories),
        }
    }

    /// All products, in fixture order.
    #[must_use]
    pub fn products(&self) -> &[Product] {
        &self.products
    }

    /// All categories.
    #[must_use]
    pub fn categories(&self) -> &[Category] {
        &self.categories
    }

    /// Look up a product by id.
    #[must_use]
    pub fn product(&self, id: ProductId) -> Option<&Product> {
        self.products.iter().find(|p| p.id == id)
    }

    /// Resolve a URL-friendly category slug (hyphens for spaces,
    /// case-insensitive) against the category table.
    ///
    /// `"smart-home"` resolves to the category named `"Smart Home"`.
    #[must_use]
    pub fn category_by_slug(&self, slug: &str) -> Option<&Category> {
        let wanted = slug.replace('-', " ");
        self.categories
            .iter()
            .find(|c| c.name.eq_ignore_ascii_case(&wanted))
    }

    /// Look up a category by id.
    #[must_use]
    pub fn category(&self, id: CategoryId) -> Option<&Category> {
        self.categories.iter().find(|c| c.id == id)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
pub(crate) mod fixtures;

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_category_slug_resolution() {
        let catalog = fixtures::catalog();

        let category = catalog.category_by_slug("microphones").unwrap();
        assert_eq!(category.name, "Microphones");

        let category = catalog.category_by_slug("smart-home").unwrap();
        assert_eq!(category.name, "Smart Home");

        assert!(catalog.category_by_slug("no-such-category").is_none());
    }

    #[test]
    fn test_load_parses_fixture_document() {
        let json = r#"{
            "categories": [{"id": 1, "name": "Microphones"}],
            "products": [{
                "id": 10,
                "name": "Desk Mic",
                "price": 49.99,
                "image": "mic.jpg",
                "categoryId": 1,
                "rating": 4.5,
                "reviews": 12,
                "stock": 40
            }]
        }"#;

        let file: CatalogFile = serde_json::from_str(json).unwrap();
        let catalog = Catalog::from_parts(file.products, file.categories);
        assert_eq!(catalog.products().len(), 1);
        assert!(catalog.product(ProductId::new(10)).is_some());
    }
}
