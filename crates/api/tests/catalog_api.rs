//! HTTP-level integration tests for the categories, books and stats API.
//!
//! Uses Axum's tower::ServiceExt to send requests directly to the router.

mod common;

use axum::http::StatusCode;
use common::{body_json, build_test_app, delete, get, post_json, put_json};
use serde_json::json;
use sqlx::PgPool;

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

async fn create_category(pool: &PgPool, title: &str) -> i64 {
    let response = post_json(
        build_test_app(pool.clone()),
        "/api/v1/categories",
        json!({ "title": title }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::CREATED);
    body_json(response).await["data"]["id"].as_i64().unwrap()
}

async fn create_book(pool: &PgPool, category_id: i64, title: &str, price: f64) -> i64 {
    let response = post_json(
        build_test_app(pool.clone()),
        "/api/v1/books",
        json!({
            "title": title,
            "description": "A book",
            "price": price,
            "category_id": category_id,
            "url": "https://example.com/book"
        }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::CREATED);
    body_json(response).await["data"]["id"].as_i64().unwrap()
}

// ---------------------------------------------------------------------------
// Categories
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_category_lifecycle(pool: PgPool) {
    let id = create_category(&pool, "Programming").await;

    let response = get(build_test_app(pool.clone()), &format!("/api/v1/categories/{id}")).await;
    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    assert_eq!(json["data"]["title"], "Programming");
    assert_eq!(json["data"]["books_count"], 0);

    let response = put_json(
        build_test_app(pool.clone()),
        &format!("/api/v1/categories/{id}"),
        json!({ "title": "Software" }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(body_json(response).await["data"]["title"], "Software");

    let response = delete(build_test_app(pool.clone()), &format!("/api/v1/categories/{id}")).await;
    assert_eq!(response.status(), StatusCode::NO_CONTENT);

    let response = get(build_test_app(pool), &format!("/api/v1/categories/{id}")).await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    assert_eq!(body_json(response).await["code"], "NOT_FOUND");
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_list_categories_with_counts_and_pagination(pool: PgPool) {
    let a = create_category(&pool, "A").await;
    let b = create_category(&pool, "B").await;
    create_book(&pool, a, "One", 1.0).await;
    create_book(&pool, a, "Two", 2.0).await;

    let response = get(build_test_app(pool.clone()), "/api/v1/categories").await;
    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    let data = json["data"].as_array().unwrap();
    assert_eq!(data.len(), 2);
    assert_eq!(data[0]["books_count"], 2);
    assert_eq!(data[1]["books_count"], 0);

    let response = get(build_test_app(pool), "/api/v1/categories?skip=1&limit=1").await;
    let json = body_json(response).await;
    let data = json["data"].as_array().unwrap();
    assert_eq!(data.len(), 1);
    assert_eq!(data[0]["id"], b);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_duplicate_category_returns_409(pool: PgPool) {
    create_category(&pool, "Dup").await;
    let response = post_json(
        build_test_app(pool),
        "/api/v1/categories",
        json!({ "title": "Dup" }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::CONFLICT);
    assert_eq!(body_json(response).await["code"], "CONFLICT");
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_overlong_category_title_returns_400(pool: PgPool) {
    let response = post_json(
        build_test_app(pool),
        "/api/v1/categories",
        json!({ "title": "t".repeat(101) }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(body_json(response).await["code"], "VALIDATION_ERROR");
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_nul_in_input_returns_400(pool: PgPool) {
    let response = post_json(
        build_test_app(pool.clone()),
        "/api/v1/categories",
        json!({ "title": "a\u{0}b" }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(body_json(response).await["code"], "VALIDATION_ERROR");

    let response = get(build_test_app(pool), "/api/v1/books?title=a%00b").await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(body_json(response).await["code"], "VALIDATION_ERROR");
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_delete_category_with_books_returns_403(pool: PgPool) {
    let cat = create_category(&pool, "Busy").await;
    create_book(&pool, cat, "Resident", 1.0).await;

    let response = delete(build_test_app(pool), &format!("/api/v1/categories/{cat}")).await;
    assert_eq!(response.status(), StatusCode::FORBIDDEN);
    assert_eq!(body_json(response).await["code"], "FORBIDDEN");
}

// ---------------------------------------------------------------------------
// Books
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_book_round_trip_embeds_category(pool: PgPool) {
    let cat = create_category(&pool, "X").await;
    let book = create_book(&pool, cat, "Under X", 10.0).await;

    let response = get(build_test_app(pool.clone()), &format!("/api/v1/books/{book}")).await;
    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    assert_eq!(json["data"]["title"], "Under X");
    assert_eq!(json["data"]["category_id"], cat);
    assert_eq!(json["data"]["category"]["id"], cat);
    assert_eq!(json["data"]["category"]["title"], "X");

    let response = delete(build_test_app(pool.clone()), &format!("/api/v1/books/{book}")).await;
    assert_eq!(response.status(), StatusCode::NO_CONTENT);

    let response = delete(build_test_app(pool), &format!("/api/v1/categories/{cat}")).await;
    assert_eq!(response.status(), StatusCode::NO_CONTENT);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_create_book_error_codes(pool: PgPool) {
    let cat = create_category(&pool, "Errors").await;
    create_book(&pool, cat, "Taken", 1.0).await;

    let response = post_json(
        build_test_app(pool.clone()),
        "/api/v1/books",
        json!({ "title": "Nowhere", "price": 1.0, "category_id": 987_654 }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(body_json(response).await["code"], "INVALID_REFERENCE");

    let response = post_json(
        build_test_app(pool.clone()),
        "/api/v1/books",
        json!({ "title": "Taken", "price": 2.0, "category_id": cat }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::CONFLICT);

    let response = post_json(
        build_test_app(pool),
        "/api/v1/books",
        json!({ "title": "Negative", "price": -3.0, "category_id": cat }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(body_json(response).await["code"], "VALIDATION_ERROR");
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_update_book_replaces_all_fields(pool: PgPool) {
    let cat = create_category(&pool, "Before").await;
    let other = create_category(&pool, "After").await;
    let book = create_book(&pool, cat, "Original", 10.0).await;

    let response = put_json(
        build_test_app(pool.clone()),
        &format!("/api/v1/books/{book}"),
        json!({ "title": "Renamed", "price": 12.5, "category_id": other }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    assert_eq!(json["data"]["title"], "Renamed");
    assert_eq!(json["data"]["price"], 12.5);
    assert_eq!(json["data"]["description"], serde_json::Value::Null);
    assert_eq!(json["data"]["url"], "");
    assert_eq!(json["data"]["category"]["title"], "After");

    let response = put_json(
        build_test_app(pool.clone()),
        &format!("/api/v1/books/{book}"),
        json!({ "title": "Renamed", "price": 12.5, "category_id": 555_555 }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(body_json(response).await["code"], "INVALID_REFERENCE");

    let response = put_json(
        build_test_app(pool),
        "/api/v1/books/777777",
        json!({ "title": "Nobody", "price": 1.0, "category_id": cat }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_search_books_by_filters(pool: PgPool) {
    let prog = create_category(&pool, "Programming").await;
    let scifi = create_category(&pool, "SciFi").await;
    create_book(&pool, prog, "Clean Code", 2500.0).await;
    create_book(&pool, prog, "Python Cookbook", 2000.0).await;
    create_book(&pool, scifi, "Dune", 1500.0).await;
    create_book(&pool, scifi, "Foundation", 1200.0).await;

    let titles = |json: &serde_json::Value| -> Vec<String> {
        json["data"]
            .as_array()
            .unwrap()
            .iter()
            .map(|b| b["title"].as_str().unwrap().to_string())
            .collect()
    };

    let response = get(
        build_test_app(pool.clone()),
        "/api/v1/books?min_price=1000&max_price=2000",
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    assert_eq!(titles(&json), vec!["Python Cookbook", "Dune", "Foundation"]);

    let response = get(
        build_test_app(pool.clone()),
        &format!("/api/v1/books?min_price=1000&max_price=2000&category_id={scifi}"),
    )
    .await;
    let json = body_json(response).await;
    assert_eq!(titles(&json), vec!["Dune", "Foundation"]);

    let response = get(build_test_app(pool.clone()), "/api/v1/books?title=CODE").await;
    let json = body_json(response).await;
    assert_eq!(titles(&json), vec!["Clean Code"]);

    let response = get(build_test_app(pool.clone()), "/api/v1/books?skip=1&limit=2").await;
    let json = body_json(response).await;
    assert_eq!(titles(&json), vec!["Python Cookbook", "Dune"]);

    let response = get(build_test_app(pool), "/api/v1/books?min_price=-5").await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_missing_book_returns_404(pool: PgPool) {
    let response = get(build_test_app(pool.clone()), "/api/v1/books/31337").await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    let json = body_json(response).await;
    assert_eq!(json["error"], "Book with id 31337 not found");

    let response = delete(build_test_app(pool), "/api/v1/books/31337").await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

// ---------------------------------------------------------------------------
// Stats
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_stats_summary(pool: PgPool) {
    let prog = create_category(&pool, "Programming").await;
    create_category(&pool, "Empty").await;
    create_book(&pool, prog, "Cheap", 100.0).await;
    create_book(&pool, prog, "Pricey", 300.0).await;

    let response = get(build_test_app(pool), "/api/v1/stats").await;
    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    let data = &json["data"];
    assert_eq!(data["total_categories"], 2);
    assert_eq!(data["total_books"], 2);
    assert_eq!(data["average_price"], 200.0);
    assert_eq!(data["most_expensive"]["title"], "Pricey");
    assert_eq!(data["cheapest"]["title"], "Cheap");
    assert_eq!(data["per_category"][0]["books_count"], 2);
    assert_eq!(data["per_category"][1]["books_count"], 0);
}
