//! Repository for the `books` table.

use catalog_core::search::contains_pattern;
use catalog_core::types::DbId;
use sqlx::PgPool;

use crate::models::book::{Book, BookFilter, BookWithCategory, CreateBook, UpdateBook};

/// Column list for books queries.
const COLUMNS: &str = "id, title, description, price, url, category_id, created_at, updated_at";

/// `SELECT ... FROM` prefix producing [`BookWithCategory`] rows.
const WITH_CATEGORY_SELECT: &str = "SELECT \
        b.id, b.title, b.description, b.price, b.url, b.category_id, \
        b.created_at, b.updated_at, \
        c.id AS category_ref_id, c.title AS category_ref_title \
     FROM books b \
     JOIN categories c ON c.id = b.category_id";

/// Provides CRUD and search operations for books.
pub struct BookRepo;

impl BookRepo {
    /// List books with their categories, ordered by id.
    pub async fn list(
        pool: &PgPool,
        limit: i64,
        offset: i64,
    ) -> Result<Vec<BookWithCategory>, sqlx::Error> {
        Self::search(pool, &BookFilter::default(), limit, offset).await
    }

    /// Search books with optional conjunctive filters and pagination.
    ///
    /// Offset and limit apply after filtering. `limit` is not bounded here.
    pub async fn search(
        pool: &PgPool,
        filter: &BookFilter,
        limit: i64,
        offset: i64,
    ) -> Result<Vec<BookWithCategory>, sqlx::Error> {
        // Build dynamic WHERE clauses.
        let mut conditions = Vec::new();
        let mut bind_idx = 1u32;

        if filter.title.is_some() {
            conditions.push(format!("b.title ILIKE ${bind_idx}"));
            bind_idx += 1;
        }
        if filter.category_id.is_some() {
            conditions.push(format!("b.category_id = ${bind_idx}"));
            bind_idx += 1;
        }
        if filter.min_price.is_some() {
            conditions.push(format!("b.price >= ${bind_idx}"));
            bind_idx += 1;
        }
        if filter.max_price.is_some() {
            conditions.push(format!("b.price <= ${bind_idx}"));
            bind_idx += 1;
        }

        let where_clause = if conditions.is_empty() {
            String::new()
        } else {
            format!("WHERE {}", conditions.join(" AND "))
        };

        let query = format!(
            "{WITH_CATEGORY_SELECT} \
             {where_clause} \
             ORDER BY b.id ASC \
             LIMIT ${bind_idx} OFFSET ${next_idx}",
            next_idx = bind_idx + 1,
        );

        let mut q = sqlx::query_as::<_, BookWithCategory>(&query);

        // Bind dynamic parameters in order.
        if let Some(ref title) = filter.title {
            q = q.bind(contains_pattern(title));
        }
        if let Some(category_id) = filter.category_id {
            q = q.bind(category_id);
        }
        if let Some(min_price) = filter.min_price {
            q = q.bind(min_price);
        }
        if let Some(max_price) = filter.max_price {
            q = q.bind(max_price);
        }

        q = q.bind(limit).bind(offset);
        q.fetch_all(pool).await
    }

    /// Find a book by its ID.
    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<Book>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM books WHERE id = $1");
        sqlx::query_as::<_, Book>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// Find a book by its ID, joined with its category.
    pub async fn find_by_id_with_category(
        pool: &PgPool,
        id: DbId,
    ) -> Result<Option<BookWithCategory>, sqlx::Error> {
        let query = format!("{WITH_CATEGORY_SELECT} WHERE b.id = $1");
        sqlx::query_as::<_, BookWithCategory>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// Find the book with exactly this title in a category.
    pub async fn find_by_title_in_category(
        pool: &PgPool,
        title: &str,
        category_id: DbId,
    ) -> Result<Option<Book>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM books WHERE title = $1 AND category_id = $2");
        sqlx::query_as::<_, Book>(&query)
            .bind(title)
            .bind(category_id)
            .fetch_optional(pool)
            .await
    }

    /// Create a new book, returning the created row. A missing `url` is
    /// stored as an empty string.
    pub async fn create(pool: &PgPool, input: &CreateBook) -> Result<Book, sqlx::Error> {
        let query = format!(
            "INSERT INTO books (title, description, price, url, category_id)
             VALUES ($1, $2, $3, COALESCE($4, ''), $5)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Book>(&query)
            .bind(&input.title)
            .bind(input.description.as_deref())
            .bind(input.price)
            .bind(input.url.as_deref())
            .bind(input.category_id)
            .fetch_one(pool)
            .await
    }

    /// Replace every field of a book, returning the updated row.
    pub async fn update(
        pool: &PgPool,
        id: DbId,
        input: &UpdateBook,
    ) -> Result<Option<Book>, sqlx::Error> {
        let query = format!(
            "UPDATE books SET
                title = $2,
                description = $3,
                price = $4,
                url = COALESCE($5, ''),
                category_id = $6
             WHERE id = $1
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Book>(&query)
            .bind(id)
            .bind(&input.title)
            .bind(input.description.as_deref())
            .bind(input.price)
            .bind(input.url.as_deref())
            .bind(input.category_id)
            .fetch_optional(pool)
            .await
    }

    /// Delete a book by ID. Returns `true` if a row was deleted.
    pub async fn delete(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM books WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}
