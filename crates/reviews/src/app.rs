use std::time::Duration;

use axum::{
    http::{header, HeaderValue, Method, StatusCode},
    routing::{get, post},
    Router,
};
use tower_http::{
    cors::{Any, CorsLayer},
    set_header::SetResponseHeaderLayer,
    timeout::TimeoutLayer,
    trace::TraceLayer,
};

use crate::{
    handlers::{
        health::livez,
        reviews::{create_review, delete_review, list_reviews_by_place, list_reviews_by_user},
    },
    state::AppState,
};

/// Create the application router with all routes and middleware.
pub fn create_app(state: AppState) -> Router {
    // CORS configuration for API endpoints
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods([Method::GET, Method::POST, Method::DELETE])
        .allow_headers([header::CONTENT_TYPE]);

    // API routes with CORS. The allow-credentials header is set explicitly
    // because CorsLayer rejects the wildcard-origin + credentials combination.
    let api_routes = Router::new()
        .route("/reviews", post(create_review).delete(delete_review))
        .route("/reviews/by-place", get(list_reviews_by_place))
        .route("/reviews/by-user", get(list_reviews_by_user))
        .layer(SetResponseHeaderLayer::if_not_present(
            header::ACCESS_CONTROL_ALLOW_CREDENTIALS,
            HeaderValue::from_static("true"),
        ))
        .layer(cors);

    // Main application router
    Router::new()
        .route("/livez", get(livez))
        .nest("/api", api_routes)
        .layer(TraceLayer::new_for_http())
        .layer(TimeoutLayer::with_status_code(
            StatusCode::REQUEST_TIMEOUT,
            Duration::from_secs(10),
        ))
        .with_state(state)
}

#[cfg(all(test, feature = "inmemory"))]
mod tests {
    use super::*;
    use axum::{
        body::Body,
        http::{Request, StatusCode},
    };
    use http_body_util::BodyExt;
    use tower::ServiceExt;

    fn create_request(body: serde_json::Value) -> Request<Body> {
        Request::builder()
            .method("POST")
            .uri("/api/reviews")
            .header("Content-Type", "application/json")
            .body(Body::from(body.to_string()))
            .unwrap()
    }

    fn sample_payload() -> serde_json::Value {
        serde_json::json!({
            "user_id": "u1",
            "place_id": "p1",
            "rating": 5,
            "price": "$$",
            "review": "great",
        })
    }

    async fn list_by_place(app: &Router, place_id: &str) -> Vec<serde_json::Value> {
        let response = app
            .clone()
            .oneshot(
                Request::builder()
                    .uri(format!("/api/reviews/by-place?place_id={place_id}"))
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let body = response.into_body().collect().await.unwrap().to_bytes();
        serde_json::from_slice(&body).unwrap()
    }

    #[tokio::test]
    async fn test_livez() {
        let app = create_app(AppState::default());

        let response = app
            .oneshot(
                Request::builder()
                    .uri("/livez")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
    }

    #[tokio::test]
    async fn test_list_by_place_empty() {
        let app = create_app(AppState::default());
        let reviews = list_by_place(&app, "nowhere").await;
        assert!(reviews.is_empty());
    }

    #[tokio::test]
    async fn test_list_by_user_empty() {
        let app = create_app(AppState::default());

        let response = app
            .oneshot(
                Request::builder()
                    .uri("/api/reviews/by-user?user_id=nobody")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let body = response.into_body().collect().await.unwrap().to_bytes();
        let reviews: Vec<serde_json::Value> = serde_json::from_slice(&body).unwrap();
        assert!(reviews.is_empty());
    }

    #[tokio::test]
    async fn test_list_requires_key() {
        let app = create_app(AppState::default());

        for uri in ["/api/reviews/by-place", "/api/reviews/by-user?user_id="] {
            let response = app
                .clone()
                .oneshot(Request::builder().uri(uri).body(Body::empty()).unwrap())
                .await
                .unwrap();

            assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        }
    }

    #[tokio::test]
    async fn test_create_review() {
        let app = create_app(AppState::default());

        let response = app
            .clone()
            .oneshot(create_request(sample_payload()))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::CREATED);
        let body = response.into_body().collect().await.unwrap().to_bytes();
        let message: String = serde_json::from_slice(&body).unwrap();
        assert_eq!(message, "review created");

        let reviews = list_by_place(&app, "p1").await;
        assert_eq!(reviews.len(), 1);
        assert_eq!(reviews[0]["user_id"], "u1");
        assert_eq!(reviews[0]["place_id"], "p1");
        assert_eq!(reviews[0]["price"], "$$");
        assert_eq!(reviews[0]["review"], "great");
        assert!(reviews[0]["id"].is_string());
        assert!(reviews[0]["date"].is_i64());
    }

    #[tokio::test]
    async fn test_repeated_creates_get_distinct_ids() {
        let app = create_app(AppState::default());

        for _ in 0..2 {
            let response = app
                .clone()
                .oneshot(create_request(sample_payload()))
                .await
                .unwrap();
            assert_eq!(response.status(), StatusCode::CREATED);
        }

        let reviews = list_by_place(&app, "p1").await;
        assert_eq!(reviews.len(), 2);
        assert_ne!(reviews[0]["id"], reviews[1]["id"]);
    }

    #[tokio::test]
    async fn test_create_missing_field_is_400_and_creates_nothing() {
        let app = create_app(AppState::default());

        for field in ["user_id", "place_id", "rating", "price", "review"] {
            let mut payload = sample_payload();
            payload.as_object_mut().unwrap().remove(field);

            let response = app
                .clone()
                .oneshot(create_request(payload))
                .await
                .unwrap();

            assert_eq!(response.status(), StatusCode::BAD_REQUEST);
            let body = response.into_body().collect().await.unwrap().to_bytes();
            let message = String::from_utf8(body.to_vec()).unwrap();
            assert!(message.contains("required"));
        }

        let reviews = list_by_place(&app, "p1").await;
        assert!(reviews.is_empty());
    }

    #[tokio::test]
    async fn test_create_malformed_body_is_400() {
        let app = create_app(AppState::default());

        let response = app
            .oneshot(
                Request::builder()
                    .method("POST")
                    .uri("/api/reviews")
                    .header("Content-Type", "application/json")
                    .body(Body::from("not json"))
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_rating_round_trips_as_integer() {
        let app = create_app(AppState::default());

        let mut payload = sample_payload();
        payload["rating"] = serde_json::json!(4);
        let response = app.clone().oneshot(create_request(payload)).await.unwrap();
        assert_eq!(response.status(), StatusCode::CREATED);

        let reviews = list_by_place(&app, "p1").await;
        assert_eq!(reviews.len(), 1);
        assert_eq!(reviews[0]["rating"], serde_json::json!(4));
        assert!(reviews[0]["rating"].is_i64());
    }

    #[tokio::test]
    async fn test_success_responses_carry_cors_headers() {
        let app = create_app(AppState::default());

        fn assert_envelope(response: &axum::response::Response) {
            let headers = response.headers();
            assert_eq!(headers["access-control-allow-origin"], "*");
            assert_eq!(headers["access-control-allow-credentials"], "true");
            assert_eq!(headers["content-type"], "application/json");
        }

        let response = app
            .clone()
            .oneshot(create_request(sample_payload()))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::CREATED);
        assert_envelope(&response);

        let response = app
            .oneshot(
                Request::builder()
                    .uri("/api/reviews/by-place?place_id=p1")
                    .header("Origin", "http://localhost:3000")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        assert_envelope(&response);
    }

    #[tokio::test]
    async fn test_delete_unknown_id_is_404() {
        let app = create_app(AppState::default());

        let response = app
            .oneshot(
                Request::builder()
                    .method("DELETE")
                    .uri("/api/reviews?id=00000000-0000-0000-0000-000000000000")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn test_delete_requires_id() {
        let app = create_app(AppState::default());

        let response = app
            .oneshot(
                Request::builder()
                    .method("DELETE")
                    .uri("/api/reviews")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_create_then_delete_then_list() {
        let app = create_app(AppState::default());

        // Create
        let response = app
            .clone()
            .oneshot(create_request(sample_payload()))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::CREATED);

        // Fetch the assigned id
        let reviews = list_by_place(&app, "p1").await;
        assert_eq!(reviews.len(), 1);
        assert_eq!(reviews[0]["rating"], serde_json::json!(5));
        let id = reviews[0]["id"].as_str().unwrap().to_string();

        // Delete
        let response = app
            .clone()
            .oneshot(
                Request::builder()
                    .method("DELETE")
                    .uri(format!("/api/reviews?id={id}"))
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        let body = response.into_body().collect().await.unwrap().to_bytes();
        let message: String = serde_json::from_slice(&body).unwrap();
        assert_eq!(message, "review deleted");

        // Gone from both access paths
        assert!(list_by_place(&app, "p1").await.is_empty());
        let response = app
            .clone()
            .oneshot(
                Request::builder()
                    .uri("/api/reviews/by-user?user_id=u1")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        let body = response.into_body().collect().await.unwrap().to_bytes();
        let reviews: Vec<serde_json::Value> = serde_json::from_slice(&body).unwrap();
        assert!(reviews.is_empty());

        // A second delete of the same id reports 404
        let response = app
            .oneshot(
                Request::builder()
                    .method("DELETE")
                    .uri(format!("/api/reviews?id={id}"))
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }
}
