//! Handlers for the `/categories` resource.

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;
use catalog_core::types::DbId;
use catalog_db::models::category::{CreateCategory, UpdateCategory};

use crate::error::AppResult;
use crate::query::SkipLimitParams;
use crate::response::DataResponse;
use crate::services::catalog;
use crate::state::AppState;

/// GET /api/v1/categories?skip=0&limit=100
///
/// List categories, each with its `books_count`.
pub async fn list(
    State(state): State<AppState>,
    Query(params): Query<SkipLimitParams>,
) -> AppResult<impl IntoResponse> {
    let categories = catalog::list_categories(&state.pool, params.limit(), params.skip()).await?;
    Ok(Json(DataResponse { data: categories }))
}

/// GET /api/v1/categories/{id}
pub async fn get_by_id(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<impl IntoResponse> {
    let category = catalog::get_category(&state.pool, id).await?;
    Ok(Json(DataResponse { data: category }))
}

/// POST /api/v1/categories
pub async fn create(
    State(state): State<AppState>,
    Json(input): Json<CreateCategory>,
) -> AppResult<impl IntoResponse> {
    let category = catalog::create_category(&state.pool, &input).await?;
    Ok((StatusCode::CREATED, Json(DataResponse { data: category })))
}

/// PUT /api/v1/categories/{id}
pub async fn update(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
    Json(input): Json<UpdateCategory>,
) -> AppResult<impl IntoResponse> {
    let category = catalog::update_category(&state.pool, id, &input).await?;
    Ok(Json(DataResponse { data: category }))
}

/// DELETE /api/v1/categories/{id}
///
/// Refused with 403 while the category still owns books.
pub async fn delete(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<StatusCode> {
    catalog::delete_category(&state.pool, id).await?;
    Ok(StatusCode::NO_CONTENT)
}
