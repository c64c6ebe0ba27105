//! Durable client storage.
//!
//! A synchronous key-value string store matching the browser
//! `localStorage` contract: `get`/`set`/`remove`, values survive restarts,
//! and one logical partition per browser profile. Two backends are
//! provided: an in-memory map for tests and ephemeral sessions, and a
//! file-per-key JSON backend for real persistence.
//!
//! Store snapshots are wrapped in a versioned envelope before being
//! written. Loading is best effort: a missing key, an unknown schema
//! version, or a corrupt value resets the snapshot to its default instead
//! of failing.

mod file;
mod memory;

pub use file::FileStorage;
pub use memory::MemoryStorage;

use serde::{Deserialize, Serialize, de::DeserializeOwned};
use thiserror::Error;

/// Current snapshot schema version.
///
/// Bump this when a persisted snapshot shape changes; old snapshots are
/// then discarded on load rather than migrated.
pub const SCHEMA_VERSION: u32 = 1;

/// Errors that can occur when writing to durable storage.
#[derive(Debug, Error)]
pub enum StorageError {
    /// The value could not be written to the backing medium.
    #[error("storage write failed for key {key}: {message}")]
    WriteFailed {
        /// Key being written.
        key: String,
        /// Underlying failure description.
        message: String,
    },
    /// The value could not be serialized.
    #[error("failed to serialize snapshot for key {key}: {message}")]
    Serialize {
        /// Key being written.
        key: String,
        /// Underlying failure description.
        message: String,
    },
}

/// Synchronous key-value string storage.
///
/// Implementations must be usable from multiple stores at once; each
/// store owns a disjoint key namespace (see [`keys`]), so no cross-key
/// transactional guarantee is needed or provided.
pub trait StorageBackend: Send + Sync {
    /// Read the value stored under `key`, if any.
    fn get(&self, key: &str) -> Option<String>;

    /// Write `value` under `key`, replacing any previous value.
    ///
    /// # Errors
    ///
    /// Returns `StorageError::WriteFailed` if the backing medium rejects
    /// the write.
    fn set(&self, key: &str, value: &str) -> Result<(), StorageError>;

    /// Remove the value stored under `key`. Removing an absent key is a
    /// no-op.
    fn remove(&self, key: &str);
}

// =============================================================================
// Versioned snapshots
// =============================================================================

/// Versioned wrapper around a persisted store snapshot.
#[derive(Debug, Serialize, Deserialize)]
struct Envelope<T> {
    schema_version: u32,
    payload: T,
}

/// Load a snapshot from storage, falling back to `T::default()`.
///
/// Resets to the default (and logs) when the key is absent, the envelope
/// does not parse, or the schema version is unknown. This preserves the
/// "best effort, never crash on bad stored data" posture.
pub fn load_snapshot<T>(storage: &dyn StorageBackend, key: &str) -> T
where
    T: DeserializeOwned + Default,
{
    let Some(raw) = storage.get(key) else {
        return T::default();
    };

    match serde_json::from_str::<Envelope<T>>(&raw) {
        Ok(envelope) if envelope.schema_version == SCHEMA_VERSION => envelope.payload,
        Ok(envelope) => {
            tracing::warn!(
                key,
                found = envelope.schema_version,
                expected = SCHEMA_VERSION,
                "Unknown snapshot schema version, resetting to empty"
            );
            T::default()
        }
        Err(e) => {
            tracing::warn!(key, error = %e, "Corrupt snapshot, resetting to empty");
            T::default()
        }
    }
}

/// Persist a snapshot to storage under a versioned envelope.
///
/// Persistence is a mirror, not the source of truth: failures are logged
/// and swallowed so a full disk never takes down the in-memory store.
pub fn persist_snapshot<T>(storage: &dyn StorageBackend, key: &str, payload: &T)
where
    T: Serialize,
{
    let envelope = Envelope {
        schema_version: SCHEMA_VERSION,
        payload,
    };

    let raw = match serde_json::to_string(&envelope) {
        Ok(raw) => raw,
        Err(e) => {
            tracing::error!(key, error = %e, "Failed to serialize snapshot");
            return;
        }
    };

    if let Err(e) = storage.set(key, &raw) {
        tracing::error!(key, error = %e, "Failed to persist snapshot");
    }
}

// =============================================================================
// Key namespaces
// =============================================================================

/// Storage key namespaces, one per store.
///
/// Keys are disjoint by construction; no store reads another store's keys.
pub mod keys {
    use sunstone_core::UserId;

    /// Current session (the logged-in user record).
    pub const SESSION: &str = "session";

    /// The shopping cart.
    pub const CART: &str = "cart";

    /// Product reviews, keyed by product id inside the snapshot.
    pub const REVIEWS: &str = "reviews";

    /// Wishlist partition for a user, or the shared guest partition.
    #[must_use]
    pub fn wishlist(owner: Option<UserId>) -> String {
        owner.map_or_else(
            || "wishlist:guest".to_string(),
            |id| format!("wishlist:{id}"),
        )
    }

    /// Conversation partition for a user. Switching users switches the
    /// loaded partition.
    #[must_use]
    pub fn conversations(user_id: UserId) -> String {
        format!("conversations:{user_id}")
    }
}
