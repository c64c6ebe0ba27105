//! Wishlist store.
//!
//! A deduplicated set of saved products with toggle semantics, mirrored
//! to durable storage. The partition is per-user when an owner is known
//! and a shared guest partition otherwise, so an anonymous wishlist is
//! visible to every anonymous session on the same device.

use std::sync::Arc;

use tracing::debug;

use sunstone_core::{ProductId, UserId};

use crate::models::Product;
use crate::storage::{StorageBackend, keys, load_snapshot, persist_snapshot};

/// The wishlist store.
pub struct WishlistStore {
    storage: Arc<dyn StorageBackend>,
    key: String,
    items: Vec<Product>,
}

impl WishlistStore {
    /// Create a wishlist store for the given owner (or the guest
    /// partition), restoring any persisted wishlist.
    #[must_use]
    pub fn new(storage: Arc<dyn StorageBackend>, owner: Option<UserId>) -> Self {
        let key = keys::wishlist(owner);
        let items: Vec<Product> = load_snapshot(storage.as_ref(), &key);
        Self {
            storage,
            key,
            items,
        }
    }

    fn persist(&self) {
        persist_snapshot(self.storage.as_ref(), &self.key, &self.items);
    }

    /// Saved products, in insertion order.
    #[must_use]
    pub fn items(&self) -> &[Product] {
        &self.items
    }

    /// Toggle membership: remove the product if present, add it
    /// otherwise. Returns `true` if the product is in the wishlist after
    /// the call.
    pub fn toggle(&mut self, product: &Product) -> bool {
        let present = if self.contains(product.id) {
            self.items.retain(|p| p.id != product.id);
            false
        } else {
            self.items.push(product.clone());
            true
        };
        debug!(product_id = %product.id, present, "Toggled wishlist");
        self.persist();
        present
    }

    /// Membership predicate.
    #[must_use]
    pub fn contains(&self, product_id: ProductId) -> bool {
        self.items.iter().any(|p| p.id == product_id)
    }

    /// Remove a product. Unknown ids are a no-op.
    pub fn remove(&mut self, product_id: ProductId) {
        self.items.retain(|p| p.id != product_id);
        self.persist();
    }

    /// Empty the wishlist.
    pub fn clear(&mut self) {
        self.items.clear();
        self.persist();
    }
}
