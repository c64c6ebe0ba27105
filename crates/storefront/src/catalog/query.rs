//! The catalog query pipeline: filter, sort, paginate.
//!
//! A pure function of (catalog, parameter set) -> visible page. All
//! filters are independent predicates combined with AND; within the
//! brand and rating filters, selected values combine with OR. Sorting is
//! stable, so ties keep the original catalog order, and re-running the
//! same query yields an identical result.

use std::cmp::Ordering;
use std::str::FromStr;

use serde::Serialize;
use thiserror::Error;

use sunstone_core::Price;

use crate::models::Product;

use super::Catalog;

/// Fixed page size for catalog listings.
pub const PAGE_SIZE: usize = 12;

/// Sort order for catalog listings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum SortKey {
    /// Flash-deal items first; otherwise catalog order.
    #[default]
    Featured,
    /// Price ascending.
    PriceLow,
    /// Price descending.
    PriceHigh,
    /// Rating descending.
    Rating,
    /// Newest first (ids are creation timestamps, so id descending).
    Newest,
    /// Review count descending.
    Popular,
}

/// Error for unrecognized sort keys.
#[derive(Debug, Error)]
#[error("unknown sort key: {0} (expected featured, price-low, price-high, rating, newest, popular)")]
pub struct ParseSortKeyError(String);

impl FromStr for SortKey {
    type Err = ParseSortKeyError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "featured" => Ok(Self::Featured),
            "price-low" => Ok(Self::PriceLow),
            "price-high" => Ok(Self::PriceHigh),
            "rating" => Ok(Self::Rating),
            "newest" => Ok(Self::Newest),
            "popular" => Ok(Self::Popular),
            other => Err(ParseSortKeyError(other.to_string())),
        }
    }
}

/// Parameter set for one catalog listing. All filters are optional and
/// composable.
#[derive(Debug, Clone)]
pub struct CatalogQuery {
    /// URL-friendly category slug, resolved against the category table.
    /// A slug that resolves to no category matches no products.
    pub category_slug: Option<String>,
    /// Case-insensitive substring match against name, brand, or
    /// description (OR across the three fields).
    pub search: Option<String>,
    /// Inclusive lower price bound.
    pub min_price: Option<Price>,
    /// Inclusive upper price bound.
    pub max_price: Option<Price>,
    /// Brand memberships (OR); empty means no brand filter.
    pub brands: Vec<String>,
    /// Rating thresholds: a product qualifies when its rating is >= any
    /// selected threshold (OR, so "4 & up" plus "2 & up" equals "2 & up").
    pub rating_thresholds: Vec<f64>,
    /// Keep only flash-deal products.
    pub flash_deals_only: bool,
    /// Keep only limited-stock products.
    pub limited_stock_only: bool,
    pub sort: SortKey,
    /// 1-indexed page number. Zero is treated as page one.
    pub page: usize,
}

impl Default for CatalogQuery {
    fn default() -> Self {
        Self {
            category_slug: None,
            search: None,
            min_price: None,
            max_price: None,
            brands: Vec::new(),
            rating_thresholds: Vec::new(),
            flash_deals_only: false,
            limited_stock_only: false,
            sort: SortKey::default(),
            page: 1,
        }
    }
}

/// One visible page of query results.
#[derive(Debug, Clone, PartialEq)]
pub struct QueryPage {
    /// The page slice, at most [`PAGE_SIZE`] products.
    pub products: Vec<Product>,
    /// Total products matching the filters, across all pages.
    pub total_matches: usize,
    /// `ceil(total_matches / PAGE_SIZE)`.
    pub total_pages: usize,
    /// The 1-indexed page this slice is for.
    pub page: usize,
}

/// Run the pipeline: filter the catalog, sort, and slice out one page.
#[must_use]
pub fn run_query(catalog: &Catalog, query: &CatalogQuery) -> QueryPage {
    // An unresolvable slug matches nothing, mirroring the storefront's
    // listing page behavior for stale category links.
    let category_id = query
        .category_slug
        .as_deref()
        .map(|slug| catalog.category_by_slug(slug).map(|c| c.id));

    let search = query.search.as_deref().map(str::to_lowercase);

    let mut matches: Vec<&Product> = catalog
        .products()
        .iter()
        .filter(|p| match category_id {
            None => true,
            Some(Some(id)) => p.category_id == id,
            Some(None) => false,
        })
        .filter(|p| search.as_deref().is_none_or(|needle| matches_text(p, needle)))
        .filter(|p| query.min_price.is_none_or(|min| p.price >= min))
        .filter(|p| query.max_price.is_none_or(|max| p.price <= max))
        .filter(|p| {
            query.brands.is_empty()
                || p.brand
                    .as_deref()
                    .is_some_and(|brand| query.brands.iter().any(|b| b == brand))
        })
        .filter(|p| {
            query.rating_thresholds.is_empty()
                || query.rating_thresholds.iter().any(|t| p.rating >= *t)
        })
        .filter(|p| !query.flash_deals_only || p.is_flash_deal)
        .filter(|p| !query.limited_stock_only || p.is_limited_stock)
        .collect();

    sort_products(&mut matches, query.sort);

    let total_matches = matches.len();
    let total_pages = total_matches.div_ceil(PAGE_SIZE);
    let page = query.page.max(1);

    let products = matches
        .into_iter()
        .skip((page - 1) * PAGE_SIZE)
        .take(PAGE_SIZE)
        .cloned()
        .collect();

    QueryPage {
        products,
        total_matches,
        total_pages,
        page,
    }
}

/// Substring match over name, brand, and description (OR).
fn matches_text(product: &Product, needle: &str) -> bool {
    product.name.to_lowercase().contains(needle)
        || product
            .brand
            .as_deref()
            .is_some_and(|b| b.to_lowercase().contains(needle))
        || product
            .description
            .as_deref()
            .is_some_and(|d| d.to_lowercase().contains(needle))
}

/// Stable sort; ties keep catalog order.
fn sort_products(products: &mut [&Product], sort: SortKey) {
    match sort {
        SortKey::Featured => products.sort_by_key(|p| !p.is_flash_deal),
        SortKey::PriceLow => products.sort_by_key(|p| p.price),
        SortKey::PriceHigh => products.sort_by(|a, b| b.price.cmp(&a.price)),
        SortKey::Rating => products.sort_by(|a, b| {
            b.rating.partial_cmp(&a.rating).unwrap_or(Ordering::Equal)
        }),
        SortKey::Newest => products.sort_by(|a, b| b.id.cmp(&a.id)),
        SortKey::Popular => products.sort_by(|a, b| b.reviews.cmp(&a.reviews)),
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::catalog::fixtures;
    use sunstone_core::ProductId;

    fn names(page: &QueryPage) -> Vec<&str> {
        page.products.iter().map(|p| p.name.as_str()).collect()
    }

    #[test]
    fn test_no_filters_returns_first_page_of_everything() {
        let catalog = fixtures::catalog();
        let page = run_query(&catalog, &CatalogQuery::default());

        assert_eq!(page.total_matches, catalog.products().len());
        assert_eq!(page.products.len(), PAGE_SIZE);
        assert_eq!(
            page.total_pages,
            catalog.products().len().div_ceil(PAGE_SIZE)
        );
    }

    #[test]
    fn test_determinism_identical_inputs_identical_output() {
        let catalog = fixtures::catalog();
        let query = CatalogQuery {
            search: Some("mic".into()),
            sort: SortKey::Rating,
            ..CatalogQuery::default()
        };

        let first = run_query(&catalog, &query);
        let second = run_query(&catalog, &query);
        assert_eq!(first, second);
    }

    #[test]
    fn test_microphones_price_low_worked_example() {
        let catalog = fixtures::catalog();
        let query = CatalogQuery {
            category_slug: Some("microphones".into()),
            sort: SortKey::PriceLow,
            ..CatalogQuery::default()
        };

        let page = run_query(&catalog, &query);
        let microphones = catalog.category_by_slug("microphones").unwrap();

        // Exactly the Microphones products, ascending by price.
        assert!(page.total_matches > 0);
        assert!(
            page.products
                .iter()
                .all(|p| p.category_id == microphones.id)
        );
        assert!(
            page.products
                .windows(2)
                .all(|w| w[0].price <= w[1].price)
        );
        assert_eq!(page.products.len(), page.total_matches.min(PAGE_SIZE));
        assert_eq!(page.total_pages, page.total_matches.div_ceil(PAGE_SIZE));
    }

    #[test]
    fn test_unknown_category_slug_matches_nothing() {
        let catalog = fixtures::catalog();
        let query = CatalogQuery {
            category_slug: Some("no-such-thing".into()),
            ..CatalogQuery::default()
        };

        let page = run_query(&catalog, &query);
        assert_eq!(page.total_matches, 0);
        assert_eq!(page.total_pages, 0);
        assert!(page.products.is_empty());
    }

    #[test]
    fn test_search_matches_name_brand_and_description() {
        let catalog = fixtures::catalog();

        let by_name = run_query(
            &catalog,
            &CatalogQuery {
                search: Some("WAVE".into()),
                ..CatalogQuery::default()
            },
        );
        assert!(by_name.products.iter().any(|p| p.name.contains("Wave")));

        let by_brand = run_query(
            &catalog,
            &CatalogQuery {
                search: Some("sonic".into()),
                ..CatalogQuery::default()
            },
        );
        assert!(
            by_brand
                .products
                .iter()
                .all(|p| p.name.to_lowercase().contains("sonic")
                    || p.brand.as_deref().is_some_and(|b| b.to_lowercase().contains("sonic"))
                    || p.description
                        .as_deref()
                        .is_some_and(|d| d.to_lowercase().contains("sonic")))
        );
        assert!(!by_brand.products.is_empty());
    }

    #[test]
    fn test_price_bounds_are_inclusive() {
        let catalog = fixtures::catalog();
        let query = CatalogQuery {
            min_price: Some(Price::from_cents(4999)),
            max_price: Some(Price::from_cents(4999)),
            ..CatalogQuery::default()
        };

        let page = run_query(&catalog, &query);
        assert!(!page.products.is_empty());
        assert!(
            page.products
                .iter()
                .all(|p| p.price == Price::from_cents(4999))
        );
    }

    #[test]
    fn test_brand_filter_is_or_membership() {
        let catalog = fixtures::catalog();
        let query = CatalogQuery {
            brands: vec!["SonicPro".into(), "Wavecraft".into()],
            ..CatalogQuery::default()
        };

        let page = run_query(&catalog, &query);
        assert!(!page.products.is_empty());
        assert!(page.products.iter().all(|p| {
            matches!(p.brand.as_deref(), Some("SonicPro" | "Wavecraft"))
        }));
    }

    #[test]
    fn test_rating_thresholds_are_or_semantics() {
        let catalog = fixtures::catalog();

        let both = run_query(
            &catalog,
            &CatalogQuery {
                rating_thresholds: vec![4.0, 2.0],
                ..CatalogQuery::default()
            },
        );
        let loosest = run_query(
            &catalog,
            &CatalogQuery {
                rating_thresholds: vec![2.0],
                ..CatalogQuery::default()
            },
        );

        // Selecting "4 & up" and "2 & up" together equals just "2 & up".
        assert_eq!(both.total_matches, loosest.total_matches);
        assert_eq!(names(&both), names(&loosest));
    }

    #[test]
    fn test_flag_filters() {
        let catalog = fixtures::catalog();

        let deals = run_query(
            &catalog,
            &CatalogQuery {
                flash_deals_only: true,
                ..CatalogQuery::default()
            },
        );
        assert!(!deals.products.is_empty());
        assert!(deals.products.iter().all(|p| p.is_flash_deal));

        let limited = run_query(
            &catalog,
            &CatalogQuery {
                limited_stock_only: true,
                ..CatalogQuery::default()
            },
        );
        assert!(limited.products.iter().all(|p| p.is_limited_stock));
    }

    #[test]
    fn test_featured_sort_puts_flash_deals_first_stably() {
        let catalog = fixtures::catalog();
        let page = run_query(
            &catalog,
            &CatalogQuery {
                sort: SortKey::Featured,
                ..CatalogQuery::default()
            },
        );

        let first_regular = page
            .products
            .iter()
            .position(|p| !p.is_flash_deal)
            .unwrap();
        assert!(
            page.products[..first_regular]
                .iter()
                .all(|p| p.is_flash_deal)
        );
        assert!(
            page.products[first_regular..]
                .iter()
                .all(|p| !p.is_flash_deal)
        );

        // Stability: within each group, catalog order (ascending fixture
        // ids in this data set) is preserved.
        assert!(
            page.products[first_regular..]
                .windows(2)
                .all(|w| w[0].id < w[1].id)
        );
    }

    #[test]
    fn test_newest_sorts_by_id_descending() {
        let catalog = fixtures::catalog();
        let page = run_query(
            &catalog,
            &CatalogQuery {
                sort: SortKey::Newest,
                ..CatalogQuery::default()
            },
        );

        assert!(page.products.windows(2).all(|w| w[0].id >= w[1].id));
    }

    #[test]
    fn test_popular_sorts_by_review_count_descending() {
        let catalog = fixtures::catalog();
        let page = run_query(
            &catalog,
            &CatalogQuery {
                sort: SortKey::Popular,
                ..CatalogQuery::default()
            },
        );

        assert!(
            page.products
                .windows(2)
                .all(|w| w[0].reviews >= w[1].reviews)
        );
    }

    #[test]
    fn test_pagination_slices_and_counts() {
        let catalog = fixtures::catalog();
        let total = catalog.products().len();

        let page1 = run_query(
            &catalog,
            &CatalogQuery {
                page: 1,
                ..CatalogQuery::default()
            },
        );
        let page2 = run_query(
            &catalog,
            &CatalogQuery {
                page: 2,
                ..CatalogQuery::default()
            },
        );

        assert_eq!(page1.products.len(), PAGE_SIZE);
        assert_eq!(page2.products.len(), total - PAGE_SIZE);
        // No overlap between pages.
        assert!(
            page1
                .products
                .iter()
                .all(|p| page2.products.iter().all(|q| q.id != p.id))
        );

        // Past-the-end pages are empty but keep the counts.
        let page9 = run_query(
            &catalog,
            &CatalogQuery {
                page: 9,
                ..CatalogQuery::default()
            },
        );
        assert!(page9.products.is_empty());
        assert_eq!(page9.total_matches, total);
    }

    #[test]
    fn test_page_zero_is_treated_as_page_one() {
        let catalog = fixtures::catalog();
        let zero = run_query(
            &catalog,
            &CatalogQuery {
                page: 0,
                ..CatalogQuery::default()
            },
        );
        let one = run_query(
            &catalog,
            &CatalogQuery {
                page: 1,
                ..CatalogQuery::default()
            },
        );

        assert_eq!(zero.products, one.products);
        assert_eq!(zero.page, 1);
    }

    #[test]
    fn test_filters_compose() {
        let catalog = fixtures::catalog();
        let query = CatalogQuery {
            category_slug: Some("microphones".into()),
            min_price: Some(Price::from_major(50)),
            sort: SortKey::PriceHigh,
            ..CatalogQuery::default()
        };

        let page = run_query(&catalog, &query);
        let microphones = catalog.category_by_slug("microphones").unwrap();
        assert!(page.products.iter().all(|p| {
            p.category_id == microphones.id && p.price >= Price::from_major(50)
        }));
        assert!(page.products.windows(2).all(|w| w[0].price >= w[1].price));
    }

    #[test]
    fn test_sort_key_from_str() {
        assert_eq!("price-low".parse::<SortKey>().unwrap(), SortKey::PriceLow);
        assert_eq!("featured".parse::<SortKey>().unwrap(), SortKey::Featured);
        assert!("price_low".parse::<SortKey>().is_err());
    }

    #[test]
    fn test_product_lookup_by_id() {
        let catalog = fixtures::catalog();
        let first = &catalog.products()[0];
        assert_eq!(catalog.product(first.id).unwrap().name, first.name);
        assert!(catalog.product(ProductId::new(999_999)).is_none());
    }
}
