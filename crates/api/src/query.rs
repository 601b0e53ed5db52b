//! Shared query parameter types for API handlers.

use catalog_core::search::{clamp_limit, clamp_offset, DEFAULT_LIST_LIMIT, MAX_LIST_LIMIT};
use catalog_core::types::DbId;
use catalog_db::models::book::BookFilter;
use serde::Deserialize;

/// Offset pagination parameters (`?skip=&limit=`).
///
/// Values are clamped by [`SkipLimitParams::limit`] and
/// [`SkipLimitParams::skip`] before reaching the store.
#[derive(Debug, Default, Deserialize)]
pub struct SkipLimitParams {
    pub skip: Option<i64>,
    pub limit: Option<i64>,
}

impl SkipLimitParams {
    pub fn limit(&self) -> i64 {
        clamp_limit(self.limit, DEFAULT_LIST_LIMIT, MAX_LIST_LIMIT)
    }

    pub fn skip(&self) -> i64 {
        clamp_offset(self.skip)
    }
}

/// Query parameters for `GET /books`: pagination plus optional filters.
#[derive(Debug, Default, Deserialize)]
pub struct BookListParams {
    pub skip: Option<i64>,
    pub limit: Option<i64>,
    pub title: Option<String>,
    pub category_id: Option<DbId>,
    pub min_price: Option<f64>,
    pub max_price: Option<f64>,
}

impl BookListParams {
    /// Split into pagination and filter parts.
    pub fn into_parts(self) -> (SkipLimitParams, BookFilter) {
        let page = SkipLimitParams {
            skip: self.skip,
            limit: self.limit,
        };
        let filter = BookFilter {
            // An empty `?title=` means "no title filter".
            title: self.title.filter(|t| !t.is_empty()),
            category_id: self.category_id,
            min_price: self.min_price,
            max_price: self.max_price,
        };
        (page, filter)
    }
}
