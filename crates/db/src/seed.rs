//! Demo data for local development.
//!
//! Seeding goes through the repositories so the inserted rows obey the
//! same column defaults as API writes.

use sqlx::PgPool;

use crate::models::book::CreateBook;
use crate::models::category::CreateCategory;
use crate::repositories::{BookRepo, CategoryRepo};

/// (title, description, price, url) of a demo book.
type DemoBook = (&'static str, &'static str, f64, &'static str);

const DEMO_CATALOG: &[(&str, &[DemoBook])] = &[
    (
        "Programming",
        &[
            (
                "Clean Code",
                "A handbook of agile software craftsmanship",
                2500.0,
                "https://example.com/clean-code",
            ),
            (
                "Code Complete",
                "A practical handbook of software construction",
                2200.0,
                "https://example.com/code-complete",
            ),
            (
                "Python Pocket Reference",
                "Quick reference for the Python language",
                900.0,
                "https://example.com/python-pocket",
            ),
        ],
    ),
    (
        "Science Fiction",
        &[
            (
                "Dune",
                "Epic science fiction",
                1500.0,
                "https://example.com/dune",
            ),
            (
                "Foundation",
                "Asimov's classic",
                1200.0,
                "https://example.com/foundation",
            ),
        ],
    ),
    (
        "Business and Economics",
        &[(
            "Rich Dad Poor Dad",
            "Personal finance basics",
            800.0,
            "https://example.com/rich-dad",
        )],
    ),
];

/// Insert the demo catalog if no categories exist yet.
///
/// Returns `true` when data was inserted, `false` when the catalog was
/// already populated.
pub async fn seed_demo_data(pool: &PgPool) -> Result<bool, sqlx::Error> {
    let existing = CategoryRepo::list(pool, 1, 0).await?;
    if !existing.is_empty() {
        tracing::info!("Catalog already has categories, skipping demo seed");
        return Ok(false);
    }

    for (category_title, books) in DEMO_CATALOG {
        let category = CategoryRepo::create(
            pool,
            &CreateCategory {
                title: (*category_title).to_string(),
            },
        )
        .await?;

        for (title, description, price, url) in *books {
            BookRepo::create(
                pool,
                &CreateBook {
                    title: (*title).to_string(),
                    description: Some((*description).to_string()),
                    price: *price,
                    category_id: category.id,
                    url: Some((*url).to_string()),
                },
            )
            .await?;
        }

        tracing::info!(
            category_id = category.id,
            category = %category.title,
            books = books.len(),
            "Seeded demo category",
        );
    }

    Ok(true)
}
