use async_trait::async_trait;
use uuid::Uuid;

use crate::review::Review;

use super::Result;

/// Repository for review storage operations.
///
/// Backends provide atomic single-record put/get/delete plus two secondary
/// access paths ordered by `date` ascending. The repository performs no
/// retries; transient storage faults propagate to the caller.
#[async_trait]
pub trait ReviewRepository: Send + Sync {
    /// Gets a review by its ID.
    async fn get_review(&self, id: Uuid) -> Result<Option<Review>>;

    /// Persists a review keyed by its ID.
    ///
    /// This is an unconditional insert: no existence check is performed, so
    /// a retried create produces a duplicate review with a different ID.
    async fn put_review(&self, review: &Review) -> Result<()>;

    /// Deletes a review by its ID.
    ///
    /// Deleting an ID that is not present succeeds; callers that need to
    /// report absence perform their own lookup first.
    async fn delete_review(&self, id: Uuid) -> Result<()>;

    /// Gets all reviews for a place, ordered by date ascending.
    async fn reviews_by_place(&self, place_id: &str) -> Result<Vec<Review>>;

    /// Gets all reviews by a user, ordered by date ascending.
    async fn reviews_by_user(&self, user_id: &str) -> Result<Vec<Review>>;
}
