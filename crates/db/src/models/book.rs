//! Book model and search filter.

use catalog_core::types::{DbId, Timestamp};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

use crate::models::category::Category;

/// A row from the `books` table.
#[derive(Debug, Clone, Serialize, FromRow)]
pub struct Book {
    pub id: DbId,
    pub title: String,
    pub description: Option<String>,
    pub price: f64,
    pub url: String,
    pub category_id: DbId,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// The category embedded in a book response.
///
/// Columns are aliased `category_ref_*` in joined queries so they do not
/// clash with the book's own `id` and `title`.
#[derive(Debug, Clone, Serialize, FromRow)]
pub struct BookCategory {
    #[sqlx(rename = "category_ref_id")]
    pub id: DbId,
    #[sqlx(rename = "category_ref_title")]
    pub title: String,
}

impl From<&Category> for BookCategory {
    fn from(category: &Category) -> Self {
        Self {
            id: category.id,
            title: category.title.clone(),
        }
    }
}

/// A book joined with its owning category.
#[derive(Debug, Clone, Serialize, FromRow)]
pub struct BookWithCategory {
    #[serde(flatten)]
    #[sqlx(flatten)]
    pub book: Book,
    #[sqlx(flatten)]
    pub category: BookCategory,
}

/// DTO for creating a new book.
#[derive(Debug, Clone, Deserialize)]
pub struct CreateBook {
    pub title: String,
    pub description: Option<String>,
    pub price: f64,
    pub category_id: DbId,
    pub url: Option<String>,
}

/// DTO for replacing every field of a book.
#[derive(Debug, Clone, Deserialize)]
pub struct UpdateBook {
    pub title: String,
    pub description: Option<String>,
    pub price: f64,
    pub category_id: DbId,
    pub url: Option<String>,
}

/// Optional, conjunctive filters for book search.
///
/// `title` is a case-insensitive substring match; price bounds are
/// inclusive. Omitted fields do not constrain the result.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct BookFilter {
    pub title: Option<String>,
    pub category_id: Option<DbId>,
    pub min_price: Option<f64>,
    pub max_price: Option<f64>,
}

