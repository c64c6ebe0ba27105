//! Client-side state stores.
//!
//! Each store is an in-memory state container with mutation operations
//! and a durable-storage mirror. Stores are independent: they compose
//! only through construction order at session start (the conversation
//! store needs the session store's identity) and never read each other's
//! storage keys.
//!
//! Failure contracts differ by store and are load-bearing for callers:
//! the session store returns structured errors and never panics; the
//! cart, wishlist, conversation, and review stores clamp invalid input
//! instead of failing.

pub mod cart;
pub mod conversations;
pub mod reviews;
pub mod session;
pub mod wishlist;

pub use cart::{CartItem, CartStore};
pub use conversations::{Conversation, ConversationStore, Message, MessageKind, Participant};
pub use reviews::{RatingBucket, Review, ReviewDraft, ReviewStats, ReviewStore};
pub use session::{SessionError, SessionStore};
pub use wishlist::WishlistStore;

/// Current time in milliseconds since the epoch.
///
/// Generated ids are millisecond timestamps, matching the upstream data
/// set. Collision-prone under rapid sequential creation within one
/// millisecond; kept as-is because existing records rely on the shape.
#[must_use]
pub(crate) fn now_millis() -> i64 {
    chrono::Utc::now().timestamp_millis()
}
