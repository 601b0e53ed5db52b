pub mod books;
pub mod categories;
pub mod health;

use axum::routing::get;
use axum::Router;

use crate::handlers;
use crate::state::AppState;

/// Build the `/api/v1` route tree.
///
/// Route hierarchy:
///
/// ```text
/// /categories                  list, create
/// /categories/{id}             get, update, delete
///
/// /books                       list/search, create
/// /books/{id}                  get, update, delete
///
/// /stats                       catalog summary
/// ```
pub fn api_routes() -> Router<AppState> {
    Router::new()
        .nest("/categories", categories::router())
        .nest("/books", books::router())
        .route("/stats", get(handlers::stats::get_stats))
}
