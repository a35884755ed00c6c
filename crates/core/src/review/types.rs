use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A review authored by a user about a place.
///
/// `id` and `date` are assigned server-side at creation and never change.
/// A review is immutable after creation until it is deleted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Review {
    pub id: Uuid,
    pub user_id: String,
    pub place_id: String,
    pub rating: i64,
    pub price: String,
    pub review: String,
    /// Unix timestamp in seconds; sort key for the by-user and by-place
    /// access paths. Two reviews created concurrently may share a date.
    pub date: i64,
}

/// Validated input for creating a review.
///
/// Produced by [`CreateReview::from_value`]; see the `validation` module for
/// the coercion rules.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CreateReview {
    pub user_id: String,
    pub place_id: String,
    pub rating: i64,
    pub price: String,
    pub review: String,
}

impl Review {
    /// Create a new review from validated input, assigning a random v4 UUID
    /// and the current Unix time in seconds.
    pub fn new(input: CreateReview) -> Self {
        Self {
            id: Uuid::new_v4(),
            user_id: input.user_id,
            place_id: input.place_id,
            rating: input.rating,
            price: input.price,
            review: input.review,
            date: chrono::Utc::now().timestamp(),
        }
    }
}
