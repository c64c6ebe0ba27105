//! Catalog records.
//!
//! Products and categories are immutable fixtures supplied by the bundled
//! catalog data; no store ever mutates them.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use sunstone_core::{CategoryId, Price, ProductId};

/// A product category.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Category {
    pub id: CategoryId,
    pub name: String,
}

/// A catalog product. Read-only from the store layer's perspective.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Product {
    pub id: ProductId,
    pub name: String,
    pub price: Price,
    pub image: String,
    pub category_id: CategoryId,
    #[serde(default)]
    pub brand: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    /// Average rating on a 1-5 scale, precomputed in the fixture.
    pub rating: f64,
    /// Review count, precomputed in the fixture.
    pub reviews: u32,
    pub stock: u32,
    #[serde(default)]
    pub is_flash_deal: bool,
    #[serde(default)]
    pub is_limited_stock: bool,
    /// Discount percentage, when the product is on sale.
    #[serde(default)]
    pub discount: Option<u32>,
    #[serde(default)]
    pub original_price: Option<Price>,
    #[serde(default)]
    pub flash_deal_end: Option<DateTime<Utc>>,
}
