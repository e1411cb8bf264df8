use axum::{
    extract::{rejection::QueryRejection, Query, State},
    Json,
};

use crate::error::AppError;
use crate::query::{OpportunityFilter, OpportunityQuery};
use crate::records::{ErrorResponse, OpportunityPage};
use crate::AppState;

/// List active funding opportunities
#[utoipa::path(
    get,
    path = "/api/opportunities",
    params(OpportunityQuery),
    responses(
        (status = 200, description = "A page of opportunities, or generated sample data when nothing matches", body = OpportunityPage),
        (status = 500, description = "Database failure", body = ErrorResponse)
    ),
    description = "Filters are combined with AND. Results are ordered by deadline (soonest first, open-ended last), then newest first. Malformed parameters fall back to their defaults; for a repeated parameter the first value is used."
)]
#[tracing::instrument(skip(state))]
pub async fn list_opportunities(
    State(state): State<AppState>,
    params: Result<Query<Vec<(String, String)>>, QueryRejection>,
) -> Result<Json<OpportunityPage>, AppError> {
    let query = match params {
        Ok(Query(pairs)) => OpportunityQuery::from_pairs(pairs),
        Err(rejection) => {
            tracing::warn!(error = %rejection, "unreadable query string; using defaults");
            OpportunityQuery::default()
        }
    };
    let filter = OpportunityFilter::from(&query);
    let page = state.catalog.list_opportunities(&filter).await?;
    Ok(Json(page))
}
