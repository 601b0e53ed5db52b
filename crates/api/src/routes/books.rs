//! Route definitions for books.

use axum::routing::get;
use axum::Router;

use crate::handlers::books;
use crate::state::AppState;

/// Routes mounted at `/books`.
///
/// ```text
/// GET    /        -> list (with optional filters)
/// POST   /        -> create
/// GET    /{id}    -> get_by_id
/// PUT    /{id}    -> update
/// DELETE /{id}    -> delete
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(books::list).post(books::create))
        .route(
            "/{id}",
            get(books::get_by_id).put(books::update).delete(books::delete),
        )
}
