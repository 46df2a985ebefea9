//! Router builders. Mount `common_routes` at the root and `registration_routes` under `/api/v1`.

pub(crate) mod common;
mod registration;

pub use common::{common_routes, common_routes_with_ready};
pub use registration::registration_routes;

use crate::state::AppState;
use axum::Router;
use tower::ServiceBuilder;
use tower_http::limit::RequestBodyLimitLayer;
use tower_http::trace::TraceLayer;

/// Full application: probes, OpenAPI document, and the registration API, behind request
/// tracing and a body size cap.
pub fn app(state: AppState, body_limit: usize) -> Router {
    Router::new()
        .merge(common_routes_with_ready(state.clone()))
        .nest("/api/v1", registration_routes(state))
        .layer(
            ServiceBuilder::new()
                .layer(TraceLayer::new_for_http())
                .layer(RequestBodyLimitLayer::new(body_limit)),
        )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::StorageError;
    use crate::model::Course;
    use crate::service::EnrollmentService;
    use crate::store::{CourseStore, InMemoryCourseStore, InMemoryEnrollmentStore};
    use async_trait::async_trait;
    use axum::body::{to_bytes, Body};
    use axum::http::{Request, StatusCode};
    use std::sync::Arc;
    use tower::ServiceExt;

    fn test_app() -> Router {
        let service = EnrollmentService::new(
            Arc::new(InMemoryCourseStore::with_names(["Math101", "CS201"])),
            Arc::new(InMemoryEnrollmentStore::new()),
        );
        app(AppState::new(service), 1024)
    }

    #[tokio::test]
    async fn test_health_and_ready() {
        let app = test_app();
        for uri in ["/health", "/ready", "/version", "/api-docs/openapi.json"] {
            let response = app
                .clone()
                .oneshot(Request::builder().uri(uri).body(Body::empty()).unwrap())
                .await
                .unwrap();
            assert_eq!(response.status(), StatusCode::OK, "{uri}");
        }
    }

    struct UnreachableCatalog;

    #[async_trait]
    impl CourseStore for UnreachableCatalog {
        async fn find_all(&self) -> Result<Vec<Course>, StorageError> {
            Err(StorageError::Unavailable("catalog offline".into()))
        }

        async fn ping(&self) -> Result<(), StorageError> {
            Err(StorageError::Unavailable("catalog offline".into()))
        }
    }

    #[tokio::test]
    async fn test_ready_degrades_when_a_store_is_down() {
        let service = EnrollmentService::new(
            Arc::new(UnreachableCatalog),
            Arc::new(InMemoryEnrollmentStore::new()),
        );
        let router = app(AppState::new(service), 1024);

        let response = router
            .clone()
            .oneshot(Request::builder().uri("/ready").body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::SERVICE_UNAVAILABLE);
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        let body: serde_json::Value = serde_json::from_slice(&bytes).unwrap();
        assert_eq!(body, serde_json::json!({"status": "degraded", "storage": "unavailable"}));

        let response = router
            .oneshot(Request::builder().uri("/health").body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
    }

    #[tokio::test]
    async fn test_oversized_body_is_rejected() {
        let payload = format!(
            r#"{{"name":"{}","emailId":"a@b.c","courseName":"CS201"}}"#,
            "x".repeat(2048)
        );
        let response = test_app()
            .oneshot(
                Request::builder()
                    .method("POST")
                    .uri("/api/v1/enrollments")
                    .header("content-type", "application/json")
                    .header("content-length", payload.len())
                    .body(Body::from(payload))
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::PAYLOAD_TOO_LARGE);
    }

    #[tokio::test]
    async fn test_unknown_route_is_404() {
        let response = test_app()
            .oneshot(Request::builder().uri("/api/v1/students").body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }
}
