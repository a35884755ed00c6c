//! DynamoDB storage backend implementation.
//!
//! Implements [`reviews_core::storage::ReviewRepository`] on top of a table
//! keyed by `id`, with `user-index` and `place-index` global secondary
//! indexes sorted by `date`.

mod conversions;
mod error;
mod repository;

pub use repository::DynamoDbRepository;
