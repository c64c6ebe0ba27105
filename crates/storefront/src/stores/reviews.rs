//! Reviews store.
//!
//! Accumulates reviews per product and derives rating statistics. Review
//! lists are append-only (no edit or delete); the whole map is persisted
//! on every mutation. Aggregates are computed on demand from the lists,
//! never cached.

use std::collections::HashMap;
use std::sync::Arc;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use tracing::debug;

use sunstone_core::{ProductId, ReviewId, UserId};

use crate::storage::{StorageBackend, keys, load_snapshot, persist_snapshot};

use super::now_millis;

/// A product review.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Review {
    pub id: ReviewId,
    pub user_id: UserId,
    pub user_name: String,
    pub user_avatar: String,
    /// Star rating, an integer in 1..=5.
    pub rating: u8,
    pub title: String,
    pub comment: String,
    pub date: NaiveDate,
}

/// Input for a new review; id and date are assigned on add.
#[derive(Debug, Clone)]
pub struct ReviewDraft {
    pub user_id: UserId,
    pub user_name: String,
    pub user_avatar: String,
    pub rating: u8,
    pub title: String,
    pub comment: String,
}

/// One bucket of the star-rating distribution.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct RatingBucket {
    /// Star value, 5 down to 1.
    pub stars: u8,
    pub count: usize,
    /// Share of all reviews, in percent. 0 when there are no reviews.
    pub percentage: f64,
}

/// Aggregate rating statistics for one product.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ReviewStats {
    pub total_reviews: usize,
    /// Arithmetic mean of ratings; 0 when there are no reviews.
    pub average_rating: f64,
    /// Five buckets ordered 5 stars down to 1.
    pub distribution: [RatingBucket; 5],
}

/// Persisted snapshot: product id -> review list.
type ReviewMap = HashMap<ProductId, Vec<Review>>;

/// The reviews store.
pub struct ReviewStore {
    storage: Arc<dyn StorageBackend>,
    reviews: ReviewMap,
}

impl ReviewStore {
    /// Create a review store, restoring the persisted review map.
    #[must_use]
    pub fn new(storage: Arc<dyn StorageBackend>) -> Self {
        let reviews: ReviewMap = load_snapshot(storage.as_ref(), keys::REVIEWS);
        Self { storage, reviews }
    }

    fn persist(&self) {
        persist_snapshot(self.storage.as_ref(), keys::REVIEWS, &self.reviews);
    }

    /// Append a review to a product's list.
    ///
    /// Ratings outside 1..=5 are clamped into range rather than rejected.
    /// Returns the stored review.
    pub fn add_review(&mut self, product_id: ProductId, draft: ReviewDraft) -> Review {
        let review = Review {
            id: ReviewId::new(now_millis()),
            user_id: draft.user_id,
            user_name: draft.user_name,
            user_avatar: draft.user_avatar,
            rating: draft.rating.clamp(1, 5),
            title: draft.title,
            comment: draft.comment,
            date: chrono::Utc::now().date_naive(),
        };
        debug!(product_id = %product_id, rating = review.rating, "Adding review");

        self.reviews
            .entry(product_id)
            .or_default()
            .push(review.clone());
        self.persist();

        review
    }

    /// Reviews for a product, oldest first; empty if none.
    #[must_use]
    pub fn product_reviews(&self, product_id: ProductId) -> &[Review] {
        self.reviews
            .get(&product_id)
            .map_or(&[], Vec::as_slice)
    }

    /// Arithmetic mean of a product's ratings; 0 with no reviews.
    #[must_use]
    #[allow(clippy::cast_precision_loss)]
    pub fn product_rating(&self, product_id: ProductId) -> f64 {
        let reviews = self.product_reviews(product_id);
        if reviews.is_empty() {
            return 0.0;
        }
        let sum: u32 = reviews.iter().map(|r| u32::from(r.rating)).sum();
        f64::from(sum) / reviews.len() as f64
    }

    /// Full rating statistics for a product.
    #[must_use]
    #[allow(clippy::cast_precision_loss)]
    pub fn review_stats(&self, product_id: ProductId) -> ReviewStats {
        let reviews = self.product_reviews(product_id);
        let total = reviews.len();

        let distribution = std::array::from_fn(|i| {
            // Index 0 is 5 stars, index 4 is 1 star.
            let stars = 5 - u8::try_from(i).unwrap_or(0);
            let count = reviews.iter().filter(|r| r.rating == stars).count();
            let percentage = if total == 0 {
                0.0
            } else {
                count as f64 * 100.0 / total as f64
            };
            RatingBucket {
                stars,
                count,
                percentage,
            }
        });

        ReviewStats {
            total_reviews: total,
            average_rating: self.product_rating(product_id),
            distribution,
        }
    }
}
