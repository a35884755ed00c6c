//! Application state with repository-based storage.
//!
//! The shared state passed to all request handlers holds a single repository
//! trait object. It is constructed once at startup and cloned per request;
//! there is no hidden process-wide storage handle.

use std::sync::Arc;

use reviews_core::storage::ReviewRepository;

use crate::config::Config;

// Storage features: exactly one must be enabled, they are mutually exclusive
#[cfg(all(feature = "inmemory", feature = "dynamodb"))]
compile_error!("Cannot enable both 'inmemory' and 'dynamodb' storage features");

#[cfg(not(any(feature = "inmemory", feature = "dynamodb")))]
compile_error!("Must enable exactly one storage feature: 'inmemory' or 'dynamodb'");

/// Shared application state.
///
/// Cloned for each request handler; the repository is safe to share across
/// concurrent invocations and carries no business data of its own.
#[derive(Clone)]
pub struct AppState {
    /// Review repository backing all four operations.
    pub review_repo: Arc<dyn ReviewRepository>,
}

impl AppState {
    /// Creates an AppState around an explicitly constructed repository.
    pub fn with_repository(review_repo: Arc<dyn ReviewRepository>) -> Self {
        Self { review_repo }
    }
}

#[cfg(feature = "inmemory")]
impl AppState {
    /// Creates AppState with in-memory storage.
    /// Useful for local runs and tests without any external dependencies.
    pub async fn new(_config: &Config) -> Result<Self, anyhow::Error> {
        let repo = Arc::new(crate::storage::InMemoryRepository::new());
        Ok(Self::with_repository(repo))
    }
}

#[cfg(feature = "dynamodb")]
impl AppState {
    /// Creates AppState with DynamoDB storage.
    ///
    /// Uses the AWS SDK default credential chain; the table name comes from
    /// configuration.
    pub async fn new(config: &Config) -> Result<Self, anyhow::Error> {
        let aws_config = aws_config::load_defaults(aws_config::BehaviorVersion::latest()).await;
        let client = aws_sdk_dynamodb::Client::new(&aws_config);
        let repo = Arc::new(crate::storage::DynamoDbRepository::new(
            client,
            config.table_name.clone(),
        ));
        Ok(Self::with_repository(repo))
    }
}

#[cfg(all(test, feature = "inmemory"))]
impl Default for AppState {
    /// Creates an AppState with in-memory storage for testing.
    fn default() -> Self {
        Self::with_repository(Arc::new(crate::storage::InMemoryRepository::new()))
    }
}
