//! Read-only aggregate queries over the whole catalog.

use sqlx::PgPool;

use crate::models::stats::{BookPrice, CatalogStats, CategoryBookCount};

/// Computes catalog-wide statistics.
pub struct StatsRepo;

impl StatsRepo {
    /// Totals, average price, price extremes and per-category counts.
    ///
    /// Ties on price are broken by the lowest id.
    pub async fn catalog_stats(pool: &PgPool) -> Result<CatalogStats, sqlx::Error> {
        let (total_categories, total_books, average_price): (i64, i64, Option<f64>) =
            sqlx::query_as(
                "SELECT \
                    (SELECT COUNT(*) FROM categories), \
                    (SELECT COUNT(*) FROM books), \
                    (SELECT AVG(price) FROM books)",
            )
            .fetch_one(pool)
            .await?;

        let most_expensive = sqlx::query_as::<_, BookPrice>(
            "SELECT id, title, price FROM books ORDER BY price DESC, id ASC LIMIT 1",
        )
        .fetch_optional(pool)
        .await?;

        let cheapest = sqlx::query_as::<_, BookPrice>(
            "SELECT id, title, price FROM books ORDER BY price ASC, id ASC LIMIT 1",
        )
        .fetch_optional(pool)
        .await?;

        let per_category = sqlx::query_as::<_, CategoryBookCount>(
            "SELECT c.id, c.title, COUNT(b.id) AS books_count \
             FROM categories c \
             LEFT JOIN books b ON b.category_id = c.id \
             GROUP BY c.id \
             ORDER BY c.id ASC",
        )
        .fetch_all(pool)
        .await?;

        Ok(CatalogStats {
            total_categories,
            total_books,
            average_price,
            most_expensive,
            cheapest,
            per_category,
        })
    }
}
