//! Handlers for the `/books` resource.

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;
use catalog_core::types::DbId;
use catalog_db::models::book::{CreateBook, UpdateBook};

use crate::error::AppResult;
use crate::query::BookListParams;
use crate::response::DataResponse;
use crate::services::catalog;
use crate::state::AppState;

/// GET /api/v1/books?skip=&limit=&title=&category_id=&min_price=&max_price=
///
/// List books. Any supplied filters are combined with AND.
pub async fn list(
    State(state): State<AppState>,
    Query(params): Query<BookListParams>,
) -> AppResult<impl IntoResponse> {
    let (page, filter) = params.into_parts();
    let books = catalog::list_books(&state.pool, &filter, page.limit(), page.skip()).await?;
    Ok(Json(DataResponse { data: books }))
}

/// GET /api/v1/books/{id}
pub async fn get_by_id(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<impl IntoResponse> {
    let book = catalog::get_book(&state.pool, id).await?;
    Ok(Json(DataResponse { data: book }))
}

/// POST /api/v1/books
pub async fn create(
    State(state): State<AppState>,
    Json(input): Json<CreateBook>,
) -> AppResult<impl IntoResponse> {
    let book = catalog::create_book(&state.pool, &input).await?;
    Ok((StatusCode::CREATED, Json(DataResponse { data: book })))
}

/// PUT /api/v1/books/{id}
///
/// Full replacement: every field must be supplied.
pub async fn update(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
    Json(input): Json<UpdateBook>,
) -> AppResult<impl IntoResponse> {
    let book = catalog::update_book(&state.pool, id, &input).await?;
    Ok(Json(DataResponse { data: book }))
}

/// DELETE /api/v1/books/{id}
pub async fn delete(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<StatusCode> {
    catalog::delete_book(&state.pool, id).await?;
    Ok(StatusCode::NO_CONTENT)
}
