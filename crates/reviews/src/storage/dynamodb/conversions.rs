//! DynamoDB attribute conversion functions.
//!
//! Pure functions for converting between DynamoDB AttributeValue maps and the
//! Review type. These are testable in isolation without DynamoDB access.
//!
//! `rating` and `date` are stored as native DynamoDB numbers (arbitrary
//! precision decimals on the wire). Converting back to the external `i64`
//! representation must be lossless: a stored value with a fractional part is
//! a storage contract violation and fails with `InvalidData` rather than
//! being silently truncated.

use std::collections::HashMap;

use aws_sdk_dynamodb::types::AttributeValue;
use uuid::Uuid;

use reviews_core::review::Review;
use reviews_core::storage::RepositoryError;

/// Convert a Review to a DynamoDB item.
pub fn review_to_item(review: &Review) -> HashMap<String, AttributeValue> {
    let mut item = HashMap::new();

    item.insert("id".to_string(), AttributeValue::S(review.id.to_string()));
    item.insert(
        "user_id".to_string(),
        AttributeValue::S(review.user_id.clone()),
    );
    item.insert(
        "place_id".to_string(),
        AttributeValue::S(review.place_id.clone()),
    );
    item.insert(
        "rating".to_string(),
        AttributeValue::N(review.rating.to_string()),
    );
    item.insert("price".to_string(), AttributeValue::S(review.price.clone()));
    item.insert(
        "review".to_string(),
        AttributeValue::S(review.review.clone()),
    );
    item.insert(
        "date".to_string(),
        AttributeValue::N(review.date.to_string()),
    );

    item
}

/// Convert a DynamoDB item to a Review.
pub fn item_to_review(item: &HashMap<String, AttributeValue>) -> Result<Review, RepositoryError> {
    Ok(Review {
        id: get_uuid(item, "id")?,
        user_id: get_string(item, "user_id")?,
        place_id: get_string(item, "place_id")?,
        rating: get_integer(item, "rating")?,
        price: get_string(item, "price")?,
        review: get_string(item, "review")?,
        date: get_integer(item, "date")?,
    })
}

/// Get a required string attribute.
fn get_string(
    item: &HashMap<String, AttributeValue>,
    key: &str,
) -> Result<String, RepositoryError> {
    item.get(key)
        .and_then(|v| v.as_s().ok())
        .map(|s| s.to_string())
        .ok_or_else(|| RepositoryError::InvalidData(format!("Missing or invalid field: {}", key)))
}

/// Get a required UUID attribute.
fn get_uuid(item: &HashMap<String, AttributeValue>, key: &str) -> Result<Uuid, RepositoryError> {
    let s = get_string(item, key)?;
    Uuid::parse_str(&s)
        .map_err(|e| RepositoryError::InvalidData(format!("Invalid UUID {}: {}", key, e)))
}

/// Get a required number attribute as a plain integer.
///
/// Integral decimal forms ("4", "4.0") are accepted; a fractional value
/// ("4.5") is an error.
fn get_integer(item: &HashMap<String, AttributeValue>, key: &str) -> Result<i64, RepositoryError> {
    let n = item
        .get(key)
        .and_then(|v| v.as_n().ok())
        .ok_or_else(|| RepositoryError::InvalidData(format!("Missing or invalid field: {}", key)))?;

    if let Ok(i) = n.parse::<i64>() {
        return Ok(i);
    }

    match n.parse::<f64>() {
        Ok(f) if f.fract() == 0.0 && f >= i64::MIN as f64 && f <= i64::MAX as f64 => Ok(f as i64),
        _ => Err(RepositoryError::InvalidData(format!(
            "Field {} is not an integral number: {}",
            key, n
        ))),
    }
}
