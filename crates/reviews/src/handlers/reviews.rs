//! Review CRUD handlers.
//!
//! Each handler validates its input, performs at most one repository round
//! trip (two for delete: lookup then delete), and converts the outcome into
//! a status/body response. Validation failures never surface as 5xx.

use axum::{
    extract::{rejection::JsonRejection, Query, State},
    http::StatusCode,
    Json,
};
use serde::Deserialize;
use uuid::Uuid;

use reviews_core::review::{CreateReview, Review, REQUIRED_FIELDS_MESSAGE};
use reviews_core::storage::{repository_error_to_status_code, RepositoryError};

use crate::state::AppState;

/// Error response with message (for client input errors).
fn error_response(status: StatusCode, message: impl Into<String>) -> (StatusCode, String) {
    let msg = message.into();
    tracing::warn!(status = %status, message = %msg, "API error");
    (status, msg)
}

/// Convert a repository error into its HTTP response.
fn storage_error(err: RepositoryError) -> (StatusCode, String) {
    let status = StatusCode::from_u16(repository_error_to_status_code(&err))
        .unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
    tracing::error!(error = %err, "Storage error");
    (status, err.to_string())
}

/// Query parameters for listing reviews by place.
#[derive(Debug, Deserialize)]
pub struct ByPlaceQuery {
    pub place_id: Option<String>,
}

/// Query parameters for listing reviews by user.
#[derive(Debug, Deserialize)]
pub struct ByUserQuery {
    pub user_id: Option<String>,
}

/// Query parameters for deleting a review.
#[derive(Debug, Deserialize)]
pub struct DeleteQuery {
    pub id: Option<String>,
}

// ============================================================================
// List by place / list by user
// ============================================================================

/// List reviews for a place (GET /api/reviews/by-place?place_id=...).
///
/// Returns a (possibly empty) JSON array ordered by date ascending; a key
/// with no reviews is not an error.
pub async fn list_reviews_by_place(
    State(state): State<AppState>,
    Query(query): Query<ByPlaceQuery>,
) -> Result<Json<Vec<Review>>, (StatusCode, String)> {
    let place_id = match query.place_id.as_deref() {
        Some(p) if !p.is_empty() => p,
        _ => return Err(error_response(StatusCode::BAD_REQUEST, "place_id is required")),
    };

    let reviews = state
        .review_repo
        .reviews_by_place(place_id)
        .await
        .map_err(storage_error)?;

    Ok(Json(reviews))
}

/// List reviews by a user (GET /api/reviews/by-user?user_id=...).
pub async fn list_reviews_by_user(
    State(state): State<AppState>,
    Query(query): Query<ByUserQuery>,
) -> Result<Json<Vec<Review>>, (StatusCode, String)> {
    let user_id = match query.user_id.as_deref() {
        Some(u) if !u.is_empty() => u,
        _ => return Err(error_response(StatusCode::BAD_REQUEST, "user_id is required")),
    };

    let reviews = state
        .review_repo
        .reviews_by_user(user_id)
        .await
        .map_err(storage_error)?;

    Ok(Json(reviews))
}

// ============================================================================
// Create
// ============================================================================

/// Create a new review (POST /api/reviews).
///
/// The id and date are assigned server-side; the insert is unconditional,
/// so a retried create produces a second review with a different id.
pub async fn create_review(
    State(state): State<AppState>,
    body: Result<Json<serde_json::Value>, JsonRejection>,
) -> Result<(StatusCode, Json<&'static str>), (StatusCode, String)> {
    let Json(payload) =
        body.map_err(|_| error_response(StatusCode::BAD_REQUEST, REQUIRED_FIELDS_MESSAGE))?;

    let input = CreateReview::from_value(&payload).map_err(|e| {
        error_response(
            StatusCode::BAD_REQUEST,
            format!("{REQUIRED_FIELDS_MESSAGE} ({e})"),
        )
    })?;

    let review = Review::new(input);
    tracing::debug!(review = ?review, "Received create review request");

    state
        .review_repo
        .put_review(&review)
        .await
        .map_err(storage_error)?;

    tracing::info!(review_id = %review.id, place_id = %review.place_id, "Created review");

    // Confirmation is a JSON string so success responses stay
    // application/json like the list endpoints.
    Ok((StatusCode::CREATED, Json("review created")))
}

// ============================================================================
// Delete
// ============================================================================

/// Delete a review by id (DELETE /api/reviews?id=...).
///
/// Lookup then delete. The delete itself is unconditional, so a concurrent
/// delete of the same id between the two steps is reported as success here;
/// this caller observed the record and the record is gone either way.
pub async fn delete_review(
    State(state): State<AppState>,
    Query(query): Query<DeleteQuery>,
) -> Result<(StatusCode, Json<&'static str>), (StatusCode, String)> {
    let raw_id = match query.id.as_deref() {
        Some(i) if !i.is_empty() => i,
        _ => return Err(error_response(StatusCode::BAD_REQUEST, "id is required")),
    };

    // Ids are server-generated UUIDs; anything else cannot name a record.
    let Ok(id) = Uuid::parse_str(raw_id) else {
        return Err(error_response(StatusCode::NOT_FOUND, "Review not found"));
    };

    let existing = state
        .review_repo
        .get_review(id)
        .await
        .map_err(storage_error)?;

    if existing.is_none() {
        return Err(error_response(StatusCode::NOT_FOUND, "Review not found"));
    }

    state
        .review_repo
        .delete_review(id)
        .await
        .map_err(storage_error)?;

    tracing::info!(review_id = %id, "Deleted review");

    Ok((StatusCode::OK, Json("review deleted")))
}
