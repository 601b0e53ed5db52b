//! Repository for the `categories` table.

use catalog_core::types::DbId;
use sqlx::PgPool;

use crate::models::category::{Category, CategoryWithCount, CreateCategory, UpdateCategory};

/// Column list for categories queries.
const COLUMNS: &str = "id, title, created_at, updated_at";

/// `SELECT` prefix producing [`CategoryWithCount`] rows. Callers append
/// an optional `WHERE` and the trailing `GROUP BY c.id`.
const WITH_COUNT_SELECT: &str = "SELECT c.id, c.title, c.created_at, c.updated_at, \
        COUNT(b.id) AS books_count \
     FROM categories c \
     LEFT JOIN books b ON b.category_id = c.id";

/// Provides CRUD operations for categories.
pub struct CategoryRepo;

impl CategoryRepo {
    /// List categories with their book counts, ordered by id.
    ///
    /// `limit` and `offset` are passed through unchanged; bounding them is
    /// the caller's job.
    pub async fn list(
        pool: &PgPool,
        limit: i64,
        offset: i64,
    ) -> Result<Vec<CategoryWithCount>, sqlx::Error> {
        let query = format!(
            "{WITH_COUNT_SELECT} \
             GROUP BY c.id \
             ORDER BY c.id ASC \
             LIMIT $1 OFFSET $2"
        );
        sqlx::query_as::<_, CategoryWithCount>(&query)
            .bind(limit)
            .bind(offset)
            .fetch_all(pool)
            .await
    }

    /// Find a category by its ID.
    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<Category>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM categories WHERE id = $1");
        sqlx::query_as::<_, Category>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// Find a category by its ID, including its book count.
    pub async fn find_by_id_with_count(
        pool: &PgPool,
        id: DbId,
    ) -> Result<Option<CategoryWithCount>, sqlx::Error> {
        let query = format!("{WITH_COUNT_SELECT} WHERE c.id = $1 GROUP BY c.id");
        sqlx::query_as::<_, CategoryWithCount>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// Find a category by exact title.
    pub async fn find_by_title(
        pool: &PgPool,
        title: &str,
    ) -> Result<Option<Category>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM categories WHERE title = $1");
        sqlx::query_as::<_, Category>(&query)
            .bind(title)
            .fetch_optional(pool)
            .await
    }

    /// Count the books owned by a category.
    pub async fn count_books(pool: &PgPool, id: DbId) -> Result<i64, sqlx::Error> {
        let count: (i64,) = sqlx::query_as("SELECT COUNT(*) FROM books WHERE category_id = $1")
            .bind(id)
            .fetch_one(pool)
            .await?;
        Ok(count.0)
    }

    /// Create a new category, returning the created row.
    pub async fn create(pool: &PgPool, input: &CreateCategory) -> Result<Category, sqlx::Error> {
        let query = format!(
            "INSERT INTO categories (title)
             VALUES ($1)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Category>(&query)
            .bind(&input.title)
            .fetch_one(pool)
            .await
    }

    /// Replace a category's fields, returning the updated row.
    pub async fn update(
        pool: &PgPool,
        id: DbId,
        input: &UpdateCategory,
    ) -> Result<Option<Category>, sqlx::Error> {
        let query = format!(
            "UPDATE categories SET title = $2
             WHERE id = $1
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Category>(&query)
            .bind(id)
            .bind(&input.title)
            .fetch_optional(pool)
            .await
    }

    /// Delete a category by ID. Returns `true` if a row was deleted.
    ///
    /// Owned books are removed by the `ON DELETE CASCADE` foreign key.
    pub async fn delete(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM categories WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}
