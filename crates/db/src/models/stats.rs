//! Aggregate catalog statistics (read-only, computed on request).

use catalog_core::types::DbId;
use serde::Serialize;
use sqlx::FromRow;

/// A book reduced to what the price extremes need.
#[derive(Debug, Clone, Serialize, FromRow)]
pub struct BookPrice {
    pub id: DbId,
    pub title: String,
    pub price: f64,
}

/// Number of books in one category.
#[derive(Debug, Clone, Serialize, FromRow)]
pub struct CategoryBookCount {
    pub id: DbId,
    pub title: String,
    pub books_count: i64,
}

/// Catalog-wide summary.
#[derive(Debug, Clone, Serialize)]
pub struct CatalogStats {
    pub total_categories: i64,
    pub total_books: i64,
    /// `None` when the catalog has no books.
    pub average_price: Option<f64>,
    pub most_expensive: Option<BookPrice>,
    pub cheapest: Option<BookPrice>,
    pub per_category: Vec<CategoryBookCount>,
}
