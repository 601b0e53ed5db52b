//! Catalog service: invariant checks in front of the catalog store.
//!
//! Every operation takes the pool explicitly and performs its checks as
//! plain read-then-write queries. The checks are not atomic against
//! concurrent writers; the schema's unique and foreign key constraints
//! catch what slips through, and [`AppError`] maps those violations to
//! the same `CONFLICT` / `INVALID_REFERENCE` codes.
//!
//! Category deletion is gated here: a category that still owns books is
//! rejected with `Forbidden`, so the schema's `ON DELETE CASCADE` never
//! fires through the API.

use catalog_core::catalog::{
    validate_book_fields, validate_category_title, validate_price_filter, validate_title_filter,
    ENTITY_BOOK, ENTITY_CATEGORY,
};
use catalog_core::error::CoreError;
use catalog_core::types::DbId;
use catalog_db::models::book::{BookFilter, BookWithCategory, CreateBook, UpdateBook};
use catalog_db::models::category::{
    Category, CategoryWithCount, CreateCategory, UpdateCategory,
};
use catalog_db::models::stats::CatalogStats;
use catalog_db::repositories::{BookRepo, CategoryRepo, StatsRepo};
use sqlx::PgPool;

use crate::error::{AppError, AppResult};

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

fn category_not_found(id: DbId) -> AppError {
    AppError::Core(CoreError::NotFound {
        entity: ENTITY_CATEGORY,
        id,
    })
}

fn book_not_found(id: DbId) -> AppError {
    AppError::Core(CoreError::NotFound {
        entity: ENTITY_BOOK,
        id,
    })
}

/// Load the category a book points at, or fail with `InvalidReference`.
async fn ensure_category_reference(pool: &PgPool, category_id: DbId) -> AppResult<Category> {
    CategoryRepo::find_by_id(pool, category_id)
        .await?
        .ok_or(AppError::Core(CoreError::InvalidReference {
            entity: ENTITY_CATEGORY,
            id: category_id,
        }))
}

/// Reject a category title already used by a category other than `except_id`.
async fn ensure_category_title_free(
    pool: &PgPool,
    title: &str,
    except_id: Option<DbId>,
) -> AppResult<()> {
    match CategoryRepo::find_by_title(pool, title).await? {
        Some(existing) if Some(existing.id) != except_id => Err(AppError::Core(
            CoreError::Conflict(format!("Category with title '{title}' already exists")),
        )),
        _ => Ok(()),
    }
}

/// Reject a `(title, category_id)` pair already used by a book other than `except_id`.
async fn ensure_book_title_free(
    pool: &PgPool,
    title: &str,
    category_id: DbId,
    except_id: Option<DbId>,
) -> AppResult<()> {
    match BookRepo::find_by_title_in_category(pool, title, category_id).await? {
        Some(existing) if Some(existing.id) != except_id => {
            Err(AppError::Core(CoreError::Conflict(format!(
                "Book with title '{title}' already exists in category {category_id}"
            ))))
        }
        _ => Ok(()),
    }
}

// ---------------------------------------------------------------------------
// Categories
// ---------------------------------------------------------------------------

/// List categories with book counts.
pub async fn list_categories(
    pool: &PgPool,
    limit: i64,
    offset: i64,
) -> AppResult<Vec<CategoryWithCount>> {
    Ok(CategoryRepo::list(pool, limit, offset).await?)
}

/// Get one category with its book count.
pub async fn get_category(pool: &PgPool, id: DbId) -> AppResult<CategoryWithCount> {
    CategoryRepo::find_by_id_with_count(pool, id)
        .await?
        .ok_or_else(|| category_not_found(id))
}

/// Create a category. Fails with `Conflict` if the title is taken.
pub async fn create_category(
    pool: &PgPool,
    input: &CreateCategory,
) -> AppResult<CategoryWithCount> {
    validate_category_title(&input.title)?;
    ensure_category_title_free(pool, &input.title, None).await?;

    let category = CategoryRepo::create(pool, input).await?;
    tracing::info!(category_id = category.id, title = %category.title, "Category created");

    Ok(CategoryWithCount::new(category, 0))
}

/// Replace a category's title.
///
/// Fails with `NotFound` for an unknown id and `Conflict` when another
/// category already has the title.
pub async fn update_category(
    pool: &PgPool,
    id: DbId,
    input: &UpdateCategory,
) -> AppResult<CategoryWithCount> {
    validate_category_title(&input.title)?;
    CategoryRepo::find_by_id(pool, id)
        .await?
        .ok_or_else(|| category_not_found(id))?;
    ensure_category_title_free(pool, &input.title, Some(id)).await?;

    let category = CategoryRepo::update(pool, id, input)
        .await?
        .ok_or_else(|| category_not_found(id))?;
    let books_count = CategoryRepo::count_books(pool, id).await?;
    tracing::info!(category_id = id, title = %category.title, "Category updated");

    Ok(CategoryWithCount::new(category, books_count))
}

/// Delete a category that owns no books.
///
/// Fails with `NotFound` for an unknown id and `Forbidden` while any book
/// still references the category.
pub async fn delete_category(pool: &PgPool, id: DbId) -> AppResult<()> {
    CategoryRepo::find_by_id(pool, id)
        .await?
        .ok_or_else(|| category_not_found(id))?;

    let books_count = CategoryRepo::count_books(pool, id).await?;
    if books_count > 0 {
        return Err(AppError::Core(CoreError::Forbidden(format!(
            "Category {id} still has {books_count} book(s); delete or move them first"
        ))));
    }

    if !CategoryRepo::delete(pool, id).await? {
        return Err(category_not_found(id));
    }
    tracing::info!(category_id = id, "Category deleted");
    Ok(())
}

// ---------------------------------------------------------------------------
// Books
// ---------------------------------------------------------------------------

/// List or search books. An empty filter lists everything.
pub async fn list_books(
    pool: &PgPool,
    filter: &BookFilter,
    limit: i64,
    offset: i64,
) -> AppResult<Vec<BookWithCategory>> {
    validate_title_filter(filter.title.as_deref())?;
    validate_price_filter(filter.min_price, filter.max_price)?;
    Ok(BookRepo::search(pool, filter, limit, offset).await?)
}

/// Get one book with its embedded category.
pub async fn get_book(pool: &PgPool, id: DbId) -> AppResult<BookWithCategory> {
    BookRepo::find_by_id_with_category(pool, id)
        .await?
        .ok_or_else(|| book_not_found(id))
}

/// Create a book.
///
/// Fails with `InvalidReference` when the category does not exist and
/// `Conflict` when the category already holds a book with this title.
pub async fn create_book(pool: &PgPool, input: &CreateBook) -> AppResult<BookWithCategory> {
    validate_book_fields(
        &input.title,
        input.description.as_deref(),
        input.price,
        input.url.as_deref(),
    )?;
    let category = ensure_category_reference(pool, input.category_id).await?;
    ensure_book_title_free(pool, &input.title, input.category_id, None).await?;

    let book = BookRepo::create(pool, input).await?;
    tracing::info!(
        book_id = book.id,
        category_id = book.category_id,
        title = %book.title,
        "Book created",
    );

    Ok(BookWithCategory {
        book,
        category: (&category).into(),
    })
}

/// Replace every field of a book.
///
/// Fails with `NotFound` for an unknown id, `InvalidReference` when moved
/// to a category that does not exist, and `Conflict` when the target
/// category holds a different book with the same title. A failed update
/// leaves the stored book untouched.
pub async fn update_book(
    pool: &PgPool,
    id: DbId,
    input: &UpdateBook,
) -> AppResult<BookWithCategory> {
    validate_book_fields(
        &input.title,
        input.description.as_deref(),
        input.price,
        input.url.as_deref(),
    )?;
    let current = BookRepo::find_by_id(pool, id)
        .await?
        .ok_or_else(|| book_not_found(id))?;

    if input.category_id != current.category_id {
        ensure_category_reference(pool, input.category_id).await?;
    }
    ensure_book_title_free(pool, &input.title, input.category_id, Some(id)).await?;

    BookRepo::update(pool, id, input)
        .await?
        .ok_or_else(|| book_not_found(id))?;
    tracing::info!(
        book_id = id,
        category_id = input.category_id,
        moved = input.category_id != current.category_id,
        "Book updated",
    );

    get_book(pool, id).await
}

/// Delete a book. Fails with `NotFound` for an unknown id.
pub async fn delete_book(pool: &PgPool, id: DbId) -> AppResult<()> {
    if !BookRepo::delete(pool, id).await? {
        return Err(book_not_found(id));
    }
    tracing::info!(book_id = id, "Book deleted");
    Ok(())
}

// ---------------------------------------------------------------------------
// Stats
// ---------------------------------------------------------------------------

/// Catalog-wide totals and price summary.
pub async fn catalog_stats(pool: &PgPool) -> AppResult<CatalogStats> {
    Ok(StatsRepo::catalog_stats(pool).await?)
}
