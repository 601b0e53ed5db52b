//! Category model.

use catalog_core::types::{DbId, Timestamp};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// A row from the `categories` table.
#[derive(Debug, Clone, Serialize, FromRow)]
pub struct Category {
    pub id: DbId,
    pub title: String,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// A category together with the number of books it owns.
#[derive(Debug, Clone, Serialize, FromRow)]
pub struct CategoryWithCount {
    pub id: DbId,
    pub title: String,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
    pub books_count: i64,
}

impl CategoryWithCount {
    /// Attach a book count to a plain category row.
    pub fn new(category: Category, books_count: i64) -> Self {
        Self {
            id: category.id,
            title: category.title,
            created_at: category.created_at,
            updated_at: category.updated_at,
            books_count,
        }
    }
}

/// DTO for creating a new category.
#[derive(Debug, Clone, Deserialize)]
pub struct CreateCategory {
    pub title: String,
}

/// DTO for replacing a category's fields.
#[derive(Debug, Clone, Deserialize)]
pub struct UpdateCategory {
    pub title: String,
}
