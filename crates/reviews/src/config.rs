use std::env;

/// Application configuration loaded from environment variables.
#[derive(Debug, Clone)]
pub struct Config {
    /// Name of the backing reviews table (default: "reviews")
    /// Note: Only used when the `dynamodb` feature is enabled.
    #[allow(dead_code)]
    pub table_name: String,
}

impl Config {
    /// Load configuration from environment variables.
    ///
    /// Environment variables:
    /// - `REVIEWS_TABLE_NAME` - Backing table name (default: "reviews")
    pub fn from_env() -> Self {
        Self {
            table_name: env::var("REVIEWS_TABLE_NAME").unwrap_or_else(|_| "reviews".to_string()),
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self::from_env()
    }
}
