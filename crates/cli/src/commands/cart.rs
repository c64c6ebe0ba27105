//! Cart walkthrough command.
//!
//! Exercises the cart store end to end against file-backed storage: the
//! cart written here survives across invocations, the same way the
//! browser cart survives reloads.

use std::sync::Arc;

use thiserror::Error;

use sunstone_storefront::catalog::Catalog;
use sunstone_storefront::config::Config;
use sunstone_storefront::storage::{FileStorage, StorageError};
use sunstone_storefront::stores::CartStore;

/// Errors that can occur during cart commands.
#[derive(Debug, Error)]
pub enum CartCommandError {
    /// Configuration failed to load.
    #[error(transparent)]
    Config(#[from] sunstone_storefront::config::ConfigError),

    /// The catalog fixture failed to load.
    #[error(transparent)]
    Catalog(#[from] sunstone_storefront::catalog::CatalogError),

    /// Storage could not be opened.
    #[error(transparent)]
    Storage(#[from] StorageError),

    /// The catalog fixture has no products to demo with.
    #[error("Catalog is empty, nothing to add to the cart")]
    EmptyCatalog,
}

/// Scripted add/update/total walkthrough.
pub fn demo() -> Result<(), CartCommandError> {
    let config = Config::from_env()?;
    let catalog = Catalog::load(&config.catalog_path)?;
    let storage = Arc::new(FileStorage::new(&config.storage_dir)?);

    let mut cart = CartStore::new(storage);
    println!(
        "Cart restored: {} items, total {}",
        cart.item_count(),
        cart.total()
    );

    let mut products = catalog.products().iter();
    let first = products.next().ok_or(CartCommandError::EmptyCatalog)?;
    let second = products.next().unwrap_or(first);

    cart.add_to_cart(first, 2);
    cart.add_to_cart(second, 1);
    cart.add_to_cart(first, 1); // merges into the existing line
    println!("Added {} x3 and {} x1", first.name, second.name);

    cart.update_quantity(second.id, 4);
    println!("Set {} quantity to 4", second.name);

    for item in cart.items() {
        println!(
            "  {:<28} x{:<3} {}",
            item.product.name,
            item.quantity,
            item.product.price * item.quantity
        );
    }
    println!("Total: {} ({} items)", cart.total(), cart.item_count());

    Ok(())
}
