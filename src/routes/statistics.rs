use axum::{extract::State, Json};

use crate::error::AppError;
use crate::records::{ErrorResponse, Statistics};
use crate::AppState;

/// Headline counters for the landing page
#[utoipa::path(
    get,
    path = "/api/statistics",
    responses(
        (status = 200, description = "Counters over active opportunities", body = Statistics),
        (status = 500, description = "Database failure", body = ErrorResponse)
    )
)]
pub async fn get_statistics(State(state): State<AppState>) -> Result<Json<Statistics>, AppError> {
    Ok(Json(state.catalog.statistics().await?))
}
