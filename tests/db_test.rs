// tests/db_test.rs

use campuslink::db;

#[tokio::test]
async fn pool_and_migrations_work_against_a_file_database() {
    let dir = tempfile::tempdir().expect("create temp dir");
    let db_path = dir.path().join("campuslink-test.db");
    let database_url = format!("sqlite://{}?mode=rwc", db_path.display());

    let pool = db::create_pool(&database_url, 5).await.expect("create pool");

    // Idempotent: safe to run at every startup.
    db::run_migrations(&pool).await.expect("first migration run");
    db::run_migrations(&pool).await.expect("second migration run");

    let tables: Vec<String> = sqlx::query_scalar(
        "SELECT name FROM sqlite_master WHERE type = 'table' ORDER BY name",
    )
    .fetch_all(&pool)
    .await
    .expect("list tables");

    for expected in ["users", "groups", "group_members", "events", "recommendation_scores"] {
        assert!(tables.iter().any(|t| t == expected), "missing table {expected}");
    }

    // The upsert key must be enforced by the schema itself.
    sqlx::query(
        "INSERT INTO recommendation_scores (user_id, entity_type, entity_id, score) \
         VALUES (1, 'group', '7', 0.5)",
    )
    .execute(&pool)
    .await
    .expect("first insert");

    let duplicate = sqlx::query(
        "INSERT INTO recommendation_scores (user_id, entity_type, entity_id, score) \
         VALUES (1, 'group', '7', 0.9)",
    )
    .execute(&pool)
    .await;
    assert!(duplicate.is_err(), "duplicate triple must violate the unique constraint");

    pool.close().await;
}
