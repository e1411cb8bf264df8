mod common;

use axum::{
    body::Body,
    http::{Request, StatusCode},
};
use common::{app, send, setup_db};
use http_body_util::BodyExt;
use tower::ServiceExt;

#[tokio::test]
async fn test_unknown_route_is_not_found() {
    let app = app(setup_db().await);

    let response = app
        .oneshot(
            Request::builder()
                .uri("/not-a-real-route")
                .method("GET")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_health_check() {
    let app = app(setup_db().await);

    let response = app
        .oneshot(Request::builder().uri("/health").body(Body::empty()).unwrap())
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let body = response.into_body().collect().await.unwrap().to_bytes();
    assert_eq!(&body[..], b"Service is healthy");
}

#[tokio::test]
async fn test_populate_requires_post() {
    let app = app(setup_db().await);

    let response = app
        .oneshot(
            Request::builder()
                .uri("/api/_populate_sample_data")
                .method("GET")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::METHOD_NOT_ALLOWED);
}

#[tokio::test]
async fn test_openapi_document_lists_endpoints() {
    let app = app(setup_db().await);

    let (status, doc) = send(&app, "GET", "/api-doc/openapi.json").await;

    assert_eq!(status, StatusCode::OK);
    let paths = doc["paths"].as_object().unwrap();
    for path in [
        "/health",
        "/api/statistics",
        "/api/opportunities",
        "/api/filters",
        "/api/_populate_sample_data",
    ] {
        assert!(paths.contains_key(path), "missing {path}");
    }
    assert!(doc["components"]["schemas"]["OpportunityRecord"].is_object());
}

#[tokio::test]
async fn test_cors_allows_configured_origin() {
    let app = app(setup_db().await);

    let response = app
        .oneshot(
            Request::builder()
                .uri("/api/statistics")
                .header("Origin", "http://localhost:3000")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(
        response.headers().get("access-control-allow-origin").unwrap(),
        "http://localhost:3000"
    );
}
