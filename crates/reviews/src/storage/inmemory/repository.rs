//! In-memory repository implementation.

use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::RwLock;
use uuid::Uuid;

use reviews_core::review::Review;
use reviews_core::storage::{Result, ReviewRepository};

/// In-memory storage backend for local runs and tests.
///
/// Uses a HashMap wrapped in `Arc<RwLock<_>>` for thread-safe access.
/// Data is not persisted and will be lost when the repository is dropped.
#[derive(Debug, Clone, Default)]
pub struct InMemoryRepository {
    reviews: Arc<RwLock<HashMap<Uuid, Review>>>,
}

impl InMemoryRepository {
    /// Creates a new empty in-memory repository.
    pub fn new() -> Self {
        Self::default()
    }

    async fn reviews_matching<F>(&self, predicate: F) -> Vec<Review>
    where
        F: Fn(&Review) -> bool,
    {
        let reviews = self.reviews.read().await;
        let mut matched: Vec<Review> = reviews.values().filter(|r| predicate(r)).cloned().collect();
        // Same ordering the secondary indexes provide: date ascending.
        matched.sort_by_key(|r| r.date);
        matched
    }
}

#[async_trait]
impl ReviewRepository for InMemoryRepository {
    async fn get_review(&self, id: Uuid) -> Result<Option<Review>> {
        let reviews = self.reviews.read().await;
        Ok(reviews.get(&id).cloned())
    }

    async fn put_review(&self, review: &Review) -> Result<()> {
        let mut reviews = self.reviews.write().await;
        reviews.insert(review.id, review.clone());
        Ok(())
    }

    async fn delete_review(&self, id: Uuid) -> Result<()> {
        let mut reviews = self.reviews.write().await;
        // Removing an absent key is a no-op; the caller's lookup decides
        // what outcome to report.
        reviews.remove(&id);
        Ok(())
    }

    async fn reviews_by_place(&self, place_id: &str) -> Result<Vec<Review>> {
        Ok(self.reviews_matching(|r| r.place_id == place_id).await)
    }

    async fn reviews_by_user(&self, user_id: &str) -> Result<Vec<Review>> {
        Ok(self.reviews_matching(|r| r.user_id == user_id).await)
    }
}
