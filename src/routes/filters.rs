use axum::{extract::State, Json};

use crate::error::AppError;
use crate::records::{ErrorResponse, FilterOptions};
use crate::AppState;

/// Distinct values available for each listing filter
#[utoipa::path(
    get,
    path = "/api/filters",
    responses(
        (status = 200, description = "Sorted filter values", body = FilterOptions),
        (status = 500, description = "Database failure", body = ErrorResponse)
    )
)]
pub async fn get_filter_options(State(state): State<AppState>) -> Result<Json<FilterOptions>, AppError> {
    Ok(Json(state.catalog.filter_options().await?))
}
