use axum::{extract::State, http::StatusCode, response::IntoResponse, Json};

use crate::records::{ErrorResponse, MessageResponse};
use crate::AppState;

/// Load the demo catalog into the database
#[utoipa::path(
    post,
    path = "/api/_populate_sample_data",
    responses(
        (status = 200, description = "Sample data populated", body = MessageResponse),
        (status = 500, description = "Population failed", body = ErrorResponse)
    ),
    description = "Administrative endpoint. Safe to repeat; existing rows are left alone. Do not call it concurrently."
)]
pub async fn populate_sample_data(State(state): State<AppState>) -> impl IntoResponse {
    match state.catalog.populate_sample_data().await {
        Ok(_) => (
            StatusCode::OK,
            Json(MessageResponse {
                message: "Sample data populated successfully!".to_string(),
            }),
        )
            .into_response(),
        Err(e) => e.into_response(),
    }
}
