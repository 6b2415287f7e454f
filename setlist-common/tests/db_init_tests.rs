//! Tests for database initialization
//!
//! Covers automatic creation, reopening, and the constraints the catalog
//! relies on (unique performer names, minimum recording length).

use setlist_common::db::init::{init_database, init_memory_database};
use tempfile::TempDir;

#[tokio::test]
async fn test_database_creation_when_missing() {
    let dir = TempDir::new().unwrap();
    let db_path = dir.path().join("nested").join("setlist.db");

    let result = init_database(&db_path).await;

    assert!(result.is_ok(), "Database initialization failed: {:?}", result.err());
    assert!(db_path.exists(), "Database file was not created");
}

#[tokio::test]
async fn test_database_opens_existing() {
    let dir = TempDir::new().unwrap();
    let db_path = dir.path().join("setlist.db");

    let pool1 = init_database(&db_path).await.unwrap();
    sqlx::query("INSERT INTO performers (name) VALUES ('Nova')")
        .execute(&pool1)
        .await
        .unwrap();
    pool1.close().await;

    let pool2 = init_database(&db_path).await;
    assert!(pool2.is_ok(), "Failed to open existing database: {:?}", pool2.err());

    let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM performers")
        .fetch_one(&pool2.unwrap())
        .await
        .unwrap();
    assert_eq!(count, 1, "Existing rows should survive reopening");
}

#[tokio::test]
async fn test_schema_version_recorded_once() {
    let pool = init_memory_database().await.unwrap();

    // Running schema creation again must not duplicate anything
    setlist_common::db::create_schema(&pool).await.unwrap();

    let versions: Vec<i64> = sqlx::query_scalar("SELECT version FROM schema_version")
        .fetch_all(&pool)
        .await
        .unwrap();
    assert_eq!(versions, vec![1]);
}

#[tokio::test]
async fn test_performer_name_unique_constraint() {
    let pool = init_memory_database().await.unwrap();

    sqlx::query("INSERT INTO performers (name) VALUES ('Nova')")
        .execute(&pool)
        .await
        .unwrap();
    let duplicate = sqlx::query("INSERT INTO performers (name) VALUES ('Nova')")
        .execute(&pool)
        .await;

    let err = duplicate.expect_err("duplicate name should be rejected");
    let db_err = err.as_database_error().expect("should be a database error");
    assert!(db_err.is_unique_violation());
}

#[tokio::test]
async fn test_performer_name_is_case_sensitive() {
    let pool = init_memory_database().await.unwrap();

    sqlx::query("INSERT INTO performers (name) VALUES ('Nova')")
        .execute(&pool)
        .await
        .unwrap();
    let result = sqlx::query("INSERT INTO performers (name) VALUES ('nova')")
        .execute(&pool)
        .await;

    assert!(result.is_ok());
}

#[tokio::test]
async fn test_recording_length_check_constraint() {
    let pool = init_memory_database().await.unwrap();

    let performer_id = sqlx::query("INSERT INTO performers (name) VALUES ('Nova')")
        .execute(&pool)
        .await
        .unwrap()
        .last_insert_rowid();

    let zero = sqlx::query(
        "INSERT INTO recordings (title, genre, length_seconds, performer_id) VALUES ('a', 'b', 0, ?)",
    )
    .bind(performer_id)
    .execute(&pool)
    .await;
    assert!(zero.is_err(), "length 0 must violate the CHECK constraint");

    let one = sqlx::query(
        "INSERT INTO recordings (title, genre, length_seconds, performer_id) VALUES ('a', 'b', 1, ?)",
    )
    .bind(performer_id)
    .execute(&pool)
    .await;
    assert!(one.is_ok());
}

#[tokio::test]
async fn test_recording_requires_existing_performer() {
    let pool = init_memory_database().await.unwrap();

    let result = sqlx::query(
        "INSERT INTO recordings (title, genre, length_seconds, performer_id) VALUES ('a', 'b', 10, 42)",
    )
    .execute(&pool)
    .await;

    assert!(result.is_err(), "foreign key should reject unknown performer");
}

#[tokio::test]
async fn test_memory_databases_are_independent() {
    let first = init_memory_database().await.unwrap();
    let second = init_memory_database().await.unwrap();

    sqlx::query("INSERT INTO performers (name) VALUES ('Nova')")
        .execute(&first)
        .await
        .unwrap();

    let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM performers")
        .fetch_one(&second)
        .await
        .unwrap();
    assert_eq!(count, 0);
}
