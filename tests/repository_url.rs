//! PostgreSQL repository tests.
//!
//! Run with a database available:
//! `DATABASE_URL=postgres://... cargo test --test repository_url -- --ignored`

use chrono::Utc;
use sqlx::PgPool;
use std::sync::Arc;
use clicklink::domain::entities::NewUrlRecord;
use clicklink::domain::repositories::{InsertOutcome, UrlRepository};
use clicklink::infrastructure::persistence::PgUrlRepository;

fn new_record(url: &str, code: &str) -> NewUrlRecord {
    NewUrlRecord::new(url.to_string(), code.to_string(), "https://sho.rt", Utc::now())
}

#[sqlx::test]
#[ignore = "requires PostgreSQL (DATABASE_URL)"]
async fn test_insert_and_find(pool: PgPool) {
    let repo = PgUrlRepository::new(Arc::new(pool));

    let outcome = repo
        .insert_if_absent(new_record("https://example.com", "test1234"))
        .await
        .unwrap();

    let InsertOutcome::Inserted(record) = outcome else {
        panic!("expected insert, got {outcome:?}");
    };
    assert_eq!(record.short_code, "test1234");
    assert_eq!(record.short_url, "https://sho.rt/test1234");
    assert_eq!(record.clicks, 0);

    let by_code = repo.find_by_code("test1234").await.unwrap().unwrap();
    assert_eq!(by_code.original_url, "https://example.com");

    let by_url = repo
        .find_by_original_url("https://example.com")
        .await
        .unwrap()
        .unwrap();
    assert_eq!(by_url.short_code, "test1234");
}

#[sqlx::test]
#[ignore = "requires PostgreSQL (DATABASE_URL)"]
async fn test_find_by_code_not_found(pool: PgPool) {
    let repo = PgUrlRepository::new(Arc::new(pool));

    assert!(repo.find_by_code("notfound").await.unwrap().is_none());
}

#[sqlx::test]
#[ignore = "requires PostgreSQL (DATABASE_URL)"]
async fn test_insert_duplicate_original_url(pool: PgPool) {
    let repo = PgUrlRepository::new(Arc::new(pool.clone()));

    repo.insert_if_absent(new_record("https://example.com", "first123"))
        .await
        .unwrap();
    let outcome = repo
        .insert_if_absent(new_record("https://example.com", "second12"))
        .await
        .unwrap();

    assert!(matches!(outcome, InsertOutcome::OriginalUrlTaken));

    let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM urls")
        .fetch_one(&pool)
        .await
        .unwrap();
    assert_eq!(count, 1);
}

#[sqlx::test]
#[ignore = "requires PostgreSQL (DATABASE_URL)"]
async fn test_insert_duplicate_code(pool: PgPool) {
    let repo = PgUrlRepository::new(Arc::new(pool));

    repo.insert_if_absent(new_record("https://one.example", "samecode"))
        .await
        .unwrap();
    let outcome = repo
        .insert_if_absent(new_record("https://two.example", "samecode"))
        .await
        .unwrap();

    assert!(matches!(outcome, InsertOutcome::CodeTaken));
}

#[sqlx::test]
#[ignore = "requires PostgreSQL (DATABASE_URL)"]
async fn test_increment_clicks(pool: PgPool) {
    let repo = PgUrlRepository::new(Arc::new(pool));

    repo.insert_if_absent(new_record("https://example.com", "clickme1"))
        .await
        .unwrap();

    let url = repo.increment_clicks("clickme1").await.unwrap();
    assert_eq!(url.as_deref(), Some("https://example.com"));
    repo.increment_clicks("clickme1").await.unwrap();

    assert_eq!(repo.find_by_code("clickme1").await.unwrap().unwrap().clicks, 2);
    assert!(repo.increment_clicks("missing1").await.unwrap().is_none());
}

#[sqlx::test]
#[ignore = "requires PostgreSQL (DATABASE_URL)"]
async fn test_concurrent_increments(pool: PgPool) {
    let repo = Arc::new(PgUrlRepository::new(Arc::new(pool)));

    repo.insert_if_absent(new_record("https://example.com", "hotcode1"))
        .await
        .unwrap();

    let mut tasks = tokio::task::JoinSet::new();
    for _ in 0..50 {
        let repo = repo.clone();
        tasks.spawn(async move { repo.increment_clicks("hotcode1").await });
    }
    while let Some(result) = tasks.join_next().await {
        result.unwrap().unwrap();
    }

    assert_eq!(repo.find_by_code("hotcode1").await.unwrap().unwrap().clicks, 50);
}

#[sqlx::test]
#[ignore = "requires PostgreSQL (DATABASE_URL)"]
async fn test_ping(pool: PgPool) {
    let repo = PgUrlRepository::new(Arc::new(pool));
    assert!(repo.ping().await.is_ok());
}
