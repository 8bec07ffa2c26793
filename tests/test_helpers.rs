// tests/test_helpers.rs
#![allow(dead_code)]

use chrono::{DateTime, Utc};
use sqlx::sqlite::SqlitePoolOptions;
use sqlx::SqlitePool;
use std::sync::Arc;

use campuslink::db;
use campuslink::state::AppState;

/// In-memory SQLite with the full schema applied. One connection so every
/// clone of the pool sees the same database.
pub async fn test_pool() -> SqlitePool {
    let pool = SqlitePoolOptions::new()
        .max_connections(1)
        .connect("sqlite::memory:")
        .await
        .expect("create in-memory sqlite");
    db::run_migrations(&pool).await.expect("run migrations");
    pool
}

/// Build a minimal AppState for router tests.
pub async fn create_test_app_state() -> (Arc<AppState>, SqlitePool) {
    let pool = test_pool().await;
    (Arc::new(AppState::new(pool.clone())), pool)
}

/// Insert a users row with an explicit id and return it.
pub async fn seed_profile(pool: &SqlitePool, id: i64, auth_user_id: &str) -> i64 {
    sqlx::query("INSERT INTO users (id, auth_user_id, name) VALUES (?, ?, ?)")
        .bind(id)
        .bind(auth_user_id)
        .bind(format!("Student {id}"))
        .execute(pool)
        .await
        .expect("seed user");
    id
}

pub async fn seed_group(pool: &SqlitePool, id: i64, name: &str) {
    sqlx::query(
        "INSERT INTO groups (id, name, description, group_type, rules) VALUES (?, ?, ?, ?, ?)",
    )
    .bind(id)
    .bind(name)
    .bind(format!("A community for students interested in {name}"))
    .bind("social")
    .bind("Be respectful.")
    .execute(pool)
    .await
    .expect("seed group");
}

pub async fn seed_member(pool: &SqlitePool, group_id: i64, user_id: i64, role: &str) {
    sqlx::query("INSERT INTO group_members (group_id, user_id, role) VALUES (?, ?, ?)")
        .bind(group_id)
        .bind(user_id)
        .bind(role)
        .execute(pool)
        .await
        .expect("seed group member");
}

pub async fn seed_event(pool: &SqlitePool, id: i64, group_id: i64, title: &str, time: DateTime<Utc>) {
    sqlx::query("INSERT INTO events (id, group_id, title, description, time) VALUES (?, ?, ?, ?, ?)")
        .bind(id)
        .bind(group_id)
        .bind(title)
        .bind("Open to all students!")
        .bind(time.naive_utc())
        .execute(pool)
        .await
        .expect("seed event");
}

pub async fn count_score_rows(pool: &SqlitePool) -> i64 {
    sqlx::query_scalar("SELECT COUNT(*) FROM recommendation_scores")
        .fetch_one(pool)
        .await
        .expect("count score rows")
}
