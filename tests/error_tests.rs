use axum::{http::StatusCode, response::IntoResponse};
use fundingportal::error::AppError;
use http_body_util::BodyExt;
use sea_orm::DbErr;
use serde_json::Value;

#[test]
fn test_app_error_display() {
    let error = AppError::InternalError("population failed".to_string());
    assert_eq!(error.to_string(), "Internal Server Error: population failed");

    let error = AppError::from(DbErr::Custom("connection refused".to_string()));
    assert!(error.to_string().starts_with("Database error: "));
    assert!(error.to_string().contains("connection refused"));
}

#[tokio::test]
async fn test_app_error_into_response() {
    let response = AppError::InternalError("population failed".to_string()).into_response();
    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);

    let body_bytes = response.into_body().collect().await.unwrap().to_bytes();
    let body: Value = serde_json::from_slice(&body_bytes).unwrap();
    assert_eq!(body["error"], "Internal Server Error: population failed");

    let response = AppError::Database(DbErr::RecordNotFound("organization".to_string())).into_response();
    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);

    let body_bytes = response.into_body().collect().await.unwrap().to_bytes();
    let body: Value = serde_json::from_slice(&body_bytes).unwrap();
    assert!(body["error"].as_str().unwrap().starts_with("Database error: "));
}

#[tokio::test]
async fn test_database_failure_surfaces_as_500() {
    use axum::{body::Body, http::Request};
    use fundingportal::{config::Config, create_app, db, service::CatalogService, AppState};
    use tower::ServiceExt;

    // Not migrated: every catalog query hits a missing table.
    let conn = db::connect("sqlite::memory:", 1).await.unwrap();
    let app = create_app(AppState::new(CatalogService::new(conn), Config::default()));

    for uri in ["/api/statistics", "/api/opportunities", "/api/filters"] {
        let response = app
            .clone()
            .oneshot(Request::builder().uri(uri).body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR, "{uri}");

        let body_bytes = response.into_body().collect().await.unwrap().to_bytes();
        let body: Value = serde_json::from_slice(&body_bytes).unwrap();
        assert!(body["error"].as_str().unwrap().starts_with("Database error"), "{uri}");
    }
}
