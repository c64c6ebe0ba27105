//! Cart store.
//!
//! Maintains the shopping cart as a quantity-indexed set of products and
//! exposes derived totals. Synchronous and in-memory, mirrored to durable
//! storage on every mutation; no network calls.
//!
//! Contract: cart operations are infallible. Invalid input is clamped,
//! never rejected - UI code is written against that behavior.

use std::sync::Arc;

use serde::{Deserialize, Serialize};
use tracing::debug;

use sunstone_core::{Price, ProductId};

use crate::models::Product;
use crate::storage::{StorageBackend, keys, load_snapshot, persist_snapshot};

/// A purchasable line item: a product plus a quantity counter.
///
/// Exactly one `CartItem` exists per distinct product id, and `quantity`
/// is always positive while the item is in the cart.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CartItem {
    #[serde(flatten)]
    pub product: Product,
    pub quantity: u32,
}

/// The cart store.
pub struct CartStore {
    storage: Arc<dyn StorageBackend>,
    items: Vec<CartItem>,
}

impl CartStore {
    /// Create a cart store, restoring any persisted cart.
    #[must_use]
    pub fn new(storage: Arc<dyn StorageBackend>) -> Self {
        let items: Vec<CartItem> = load_snapshot(storage.as_ref(), keys::CART);
        Self { storage, items }
    }

    fn persist(&self) {
        persist_snapshot(self.storage.as_ref(), keys::CART, &self.items);
    }

    /// Current line items, in insertion order.
    #[must_use]
    pub fn items(&self) -> &[CartItem] {
        &self.items
    }

    /// Add `qty` of a product. If the product is already in the cart its
    /// quantity is incremented; otherwise a new line item is appended.
    /// A `qty` of zero is clamped to one.
    pub fn add_to_cart(&mut self, product: &Product, qty: u32) {
        let qty = qty.max(1);
        if let Some(item) = self.items.iter_mut().find(|i| i.product.id == product.id) {
            item.quantity = item.quantity.saturating_add(qty);
        } else {
            self.items.push(CartItem {
                product: product.clone(),
                quantity: qty,
            });
        }
        debug!(product_id = %product.id, qty, "Added to cart");
        self.persist();
    }

    /// Remove a line item entirely. Unknown ids are a no-op.
    pub fn remove_from_cart(&mut self, product_id: ProductId) {
        self.items.retain(|i| i.product.id != product_id);
        self.persist();
    }

    /// Set a line item's quantity. A quantity of zero or less removes the
    /// item (clamp, don't error). Unknown ids are a no-op.
    pub fn update_quantity(&mut self, product_id: ProductId, qty: i64) {
        if qty <= 0 {
            self.remove_from_cart(product_id);
            return;
        }

        let qty = u32::try_from(qty).unwrap_or(u32::MAX);
        if let Some(item) = self.items.iter_mut().find(|i| i.product.id == product_id) {
            item.quantity = qty;
            self.persist();
        }
    }

    /// Empty the cart.
    pub fn clear(&mut self) {
        self.items.clear();
        self.persist();
    }

    /// Total price: sum of price x quantity over all line items.
    /// A pure fold, recomputed on demand, not cached.
    #[must_use]
    pub fn total(&self) -> Price {
        self.items
            .iter()
            .map(|i| i.product.price * i.quantity)
            .sum()
    }

    /// Total number of units across all line items.
    #[must_use]
    pub fn item_count(&self) -> u32 {
        self.items.iter().map(|i| i.quantity).sum()
    }
}
