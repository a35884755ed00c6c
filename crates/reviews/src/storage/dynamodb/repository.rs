//! DynamoDB repository implementation.
//!
//! Implements the `ReviewRepository` trait from `reviews_core::storage`
//! using DynamoDB.

use async_trait::async_trait;
use aws_sdk_dynamodb::types::AttributeValue;
use aws_sdk_dynamodb::Client;
use uuid::Uuid;

use reviews_core::review::Review;
use reviews_core::storage::{Result, ReviewRepository};

use super::conversions::{item_to_review, review_to_item};
use super::error::{
    map_delete_item_error, map_get_item_error, map_put_item_error, map_query_error,
};

/// Secondary index over `(user_id, date)`.
const USER_INDEX: &str = "user-index";
/// Secondary index over `(place_id, date)`.
const PLACE_INDEX: &str = "place-index";

/// DynamoDB-based repository implementation.
///
/// Provides async access to a reviews table keyed by `id`, with by-user and
/// by-place global secondary indexes sorted by `date`. The client is safe to
/// share across concurrent invocations.
pub struct DynamoDbRepository {
    client: Client,
    table_name: String,
}

impl DynamoDbRepository {
    /// Creates a new repository with the given DynamoDB client and table name.
    pub fn new(client: Client, table_name: impl Into<String>) -> Self {
        Self {
            client,
            table_name: table_name.into(),
        }
    }

    /// Query one of the secondary indexes for all reviews matching a key.
    ///
    /// The index's natural order is `date` ascending, which is what
    /// `ScanIndexForward`'s default gives us.
    async fn query_index(&self, index_name: &str, key: &str, value: &str) -> Result<Vec<Review>> {
        let result = self
            .client
            .query()
            .table_name(&self.table_name)
            .index_name(index_name)
            .key_condition_expression(format!("{key} = :key"))
            .expression_attribute_values(":key", AttributeValue::S(value.to_string()))
            .send()
            .await
            .map_err(map_query_error)?;

        let items = result.items.unwrap_or_default();
        items.iter().map(item_to_review).collect()
    }
}

#[async_trait]
impl ReviewRepository for DynamoDbRepository {
    async fn get_review(&self, id: Uuid) -> Result<Option<Review>> {
        let result = self
            .client
            .get_item()
            .table_name(&self.table_name)
            .key("id", AttributeValue::S(id.to_string()))
            .send()
            .await
            .map_err(map_get_item_error)?;

        match result.item {
            Some(item) => Ok(Some(item_to_review(&item)?)),
            None => Ok(None),
        }
    }

    async fn put_review(&self, review: &Review) -> Result<()> {
        let item = review_to_item(review);

        // Unconditional insert: ids are generated server-side, so an
        // existence check would never fire.
        self.client
            .put_item()
            .table_name(&self.table_name)
            .set_item(Some(item))
            .send()
            .await
            .map_err(map_put_item_error)?;

        Ok(())
    }

    async fn delete_review(&self, id: Uuid) -> Result<()> {
        // No condition expression: deleting an already-absent key succeeds,
        // which tolerates a concurrent delete of the same id.
        self.client
            .delete_item()
            .table_name(&self.table_name)
            .key("id", AttributeValue::S(id.to_string()))
            .send()
            .await
            .map_err(map_delete_item_error)?;

        Ok(())
    }

    async fn reviews_by_place(&self, place_id: &str) -> Result<Vec<Review>> {
        self.query_index(PLACE_INDEX, "place_id", place_id).await
    }

    async fn reviews_by_user(&self, user_id: &str) -> Result<Vec<Review>> {
        self.query_index(USER_INDEX, "user_id", user_id).await
    }
}
