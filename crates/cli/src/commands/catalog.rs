//! Catalog inspection commands.
//!
//! Runs the same query pipeline the product listing page uses, against
//! the bundled catalog fixture named by `SUNSTONE_CATALOG`.

use std::str::FromStr;

use rust_decimal::Decimal;
use thiserror::Error;

use sunstone_core::Price;
use sunstone_storefront::catalog::{Catalog, CatalogQuery, SortKey, run_query};
use sunstone_storefront::config::Config;

/// Errors that can occur during catalog commands.
#[derive(Debug, Error)]
pub enum CatalogCommandError {
    /// Configuration failed to load.
    #[error(transparent)]
    Config(#[from] sunstone_storefront::config::ConfigError),

    /// The catalog fixture failed to load.
    #[error(transparent)]
    Catalog(#[from] sunstone_storefront::catalog::CatalogError),

    /// A price argument did not parse as a decimal.
    #[error("Invalid price: {0}")]
    InvalidPrice(String),

    /// The sort key was not recognized.
    #[error(transparent)]
    InvalidSort(#[from] sunstone_storefront::catalog::query::ParseSortKeyError),
}

/// Arguments for `catalog query`, mirroring the listing page's filters.
pub struct QueryArgs {
    pub category: Option<String>,
    pub search: Option<String>,
    pub brands: Vec<String>,
    pub min_price: Option<String>,
    pub max_price: Option<String>,
    pub ratings: Vec<f64>,
    pub flash_deals: bool,
    pub limited_stock: bool,
    pub sort: String,
    pub page: usize,
}

fn parse_price(raw: &str) -> Result<Price, CatalogCommandError> {
    Decimal::from_str(raw)
        .map(Price::new)
        .map_err(|_| CatalogCommandError::InvalidPrice(raw.to_string()))
}

/// Run the query pipeline and print one page of results.
pub fn query(args: &QueryArgs) -> Result<(), CatalogCommandError> {
    let config = Config::from_env()?;
    let catalog = Catalog::load(&config.catalog_path)?;

    let query = CatalogQuery {
        category_slug: args.category.clone(),
        search: args.search.clone(),
        min_price: args.min_price.as_deref().map(parse_price).transpose()?,
        max_price: args.max_price.as_deref().map(parse_price).transpose()?,
        brands: args.brands.clone(),
        rating_thresholds: args.ratings.clone(),
        flash_deals_only: args.flash_deals,
        limited_stock_only: args.limited_stock,
        sort: SortKey::from_str(&args.sort)?,
        page: args.page,
    };

    let page = run_query(&catalog, &query);

    println!(
        "Page {}/{} ({} matching products)",
        page.page, page.total_pages, page.total_matches
    );
    for product in &page.products {
        let brand = product.brand.as_deref().unwrap_or("-");
        let flags = match (product.is_flash_deal, product.is_limited_stock) {
            (true, true) => " [flash, limited]",
            (true, false) => " [flash]",
            (false, true) => " [limited]",
            (false, false) => "",
        };
        println!(
            "  {:>8}  {:<28} {:<12} {:.1}* ({} reviews){flags}",
            product.price.to_string(),
            product.name,
            brand,
            product.rating,
            product.reviews,
        );
    }

    Ok(())
}

/// Print the category table.
pub fn categories() -> Result<(), CatalogCommandError> {
    let config = Config::from_env()?;
    let catalog = Catalog::load(&config.catalog_path)?;

    for category in catalog.categories() {
        let count = catalog
            .products()
            .iter()
            .filter(|p| p.category_id == category.id)
            .count();
        println!("  {:>4}  {:<20} ({count} products)", category.id, category.name);
    }

    Ok(())
}
