use std::sync::Arc;

use axum::{
    http::{HeaderValue, StatusCode},
    response::IntoResponse,
    routing::{get, post},
    Router,
};
use tower_http::cors::{AllowOrigin, Any, CorsLayer};
use tower_http::trace::TraceLayer;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

pub mod config;
pub mod db;
pub mod entities;
pub mod error;
pub mod jobs;
pub mod query;
pub mod records;
pub mod routes;
pub mod sample_data;
pub mod service;

use crate::config::Config;
use crate::service::CatalogService;

/// Shared handler state.
#[derive(Clone)]
pub struct AppState {
    pub catalog: CatalogService,
    pub config: Arc<Config>,
}

impl AppState {
    pub fn new(catalog: CatalogService, config: Config) -> Self {
        Self {
            catalog,
            config: Arc::new(config),
        }
    }
}

/// Health check endpoint
#[utoipa::path(
    get,
    path = "/health",
    responses(
        (status = 200, description = "Service is healthy", body = String)
    )
)]
async fn health_check() -> impl IntoResponse {
    (StatusCode::OK, "Service is healthy")
}

#[derive(OpenApi)]
#[openapi(
    info(
        title = "Funding Portal API",
        version = "0.1.0",
        description = "Search and browse research funding opportunities"
    ),
    paths(
        health_check,
        routes::get_statistics,
        routes::list_opportunities,
        routes::get_filter_options,
        routes::populate_sample_data
    ),
    components(schemas(
        records::OpportunityRecord,
        records::OpportunityPage,
        records::Statistics,
        records::FilterOptions,
        records::MessageResponse,
        records::ErrorResponse,
        entities::OpportunityStatus
    ))
)]
pub struct ApiDoc;

fn cors_layer(origins: &[String]) -> CorsLayer {
    let allow_origin = if origins.iter().any(|o| o == "*") {
        AllowOrigin::any()
    } else {
        let parsed: Vec<HeaderValue> = origins
            .iter()
            .filter_map(|origin| match origin.parse::<HeaderValue>() {
                Ok(value) => Some(value),
                Err(e) => {
                    tracing::warn!(%origin, error = %e, "ignoring invalid CORS origin");
                    None
                }
            })
            .collect();
        AllowOrigin::list(parsed)
    };

    CorsLayer::new()
        .allow_origin(allow_origin)
        .allow_methods(Any)
        .allow_headers(Any)
}

/// Create the application with all routes and middleware
pub fn create_app(state: AppState) -> Router {
    let cors = cors_layer(&state.config.cors_origins);

    let api_routes = Router::new()
        .route("/statistics", get(routes::get_statistics))
        .route("/opportunities", get(routes::list_opportunities))
        .route("/filters", get(routes::get_filter_options))
        .route("/_populate_sample_data", post(routes::populate_sample_data));

    let docs_router = SwaggerUi::new("/docs").url("/api-doc/openapi.json", ApiDoc::openapi());

    Router::new()
        .nest("/api", api_routes)
        .route("/health", get(health_check))
        .with_state(state)
        .merge(docs_router)
        .layer(cors)
        .layer(TraceLayer::new_for_http())
}
