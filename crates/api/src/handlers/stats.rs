use axum::extract::State;
use axum::response::IntoResponse;
use axum::Json;

use crate::error::AppResult;
use crate::response::DataResponse;
use crate::services::catalog;
use crate::state::AppState;

/// GET /api/v1/stats
pub async fn get_stats(State(state): State<AppState>) -> AppResult<impl IntoResponse> {
    let stats = catalog::catalog_stats(&state.pool).await?;
    Ok(Json(DataResponse { data: stats }))
}
