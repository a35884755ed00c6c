mod types;
mod validation;

pub use types::{CreateReview, Review};
pub use validation::{ValidationError, REQUIRED_FIELDS_MESSAGE};
