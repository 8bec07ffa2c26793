//! Database pool configuration and startup migrations

use anyhow::Result;
use sqlx::sqlite::{SqlitePool, SqlitePoolOptions};
use sqlx::Executor;
use std::time::Duration;
use tracing::info;

/// Create an optimized SQLite connection pool
pub async fn create_pool(database_url: &str, max_connections: u32) -> Result<SqlitePool> {
    SqlitePoolOptions::new()
        // SQLite is single-writer, but can have multiple readers
        .max_connections(max_connections)
        // Keep some connections ready
        .min_connections(2)
        // Don't wait too long for a connection
        .acquire_timeout(Duration::from_secs(10))
        // Recycle connections periodically
        .max_lifetime(Duration::from_secs(1800))
        // Close idle connections after a while
        .idle_timeout(Duration::from_secs(600))
        .connect(database_url)
        .await
        .map_err(|e| anyhow::anyhow!("Failed to connect to database: {}", e))
}

/// Profiles provisioned on first authenticated touch; `auth_user_id` is the
/// external identity subject.
const CREATE_USERS: &str = r#"
CREATE TABLE IF NOT EXISTS users (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    auth_user_id TEXT NOT NULL UNIQUE,
    name TEXT,
    created_at DATETIME NOT NULL DEFAULT CURRENT_TIMESTAMP
);
"#;

const CREATE_GROUPS: &str = r#"
CREATE TABLE IF NOT EXISTS groups (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    name TEXT NOT NULL,
    description TEXT,
    owner_id INTEGER REFERENCES users(id),
    group_type TEXT,
    rules TEXT,
    created_at DATETIME NOT NULL DEFAULT CURRENT_TIMESTAMP
);
"#;

const CREATE_GROUP_MEMBERS: &str = r#"
CREATE TABLE IF NOT EXISTS group_members (
    group_id INTEGER NOT NULL REFERENCES groups(id) ON DELETE CASCADE,
    user_id INTEGER NOT NULL REFERENCES users(id) ON DELETE CASCADE,
    role TEXT NOT NULL DEFAULT 'member',
    PRIMARY KEY (group_id, user_id)
);
"#;

const CREATE_EVENTS: &str = r#"
CREATE TABLE IF NOT EXISTS events (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    group_id INTEGER NOT NULL REFERENCES groups(id) ON DELETE CASCADE,
    title TEXT NOT NULL,
    description TEXT,
    time DATETIME NOT NULL,
    created_at DATETIME NOT NULL DEFAULT CURRENT_TIMESTAMP
);
"#;

/// Written only by the offline scorer through the bulk upsert endpoint.
/// The (user_id, entity_type, entity_id) triple is the upsert key. No FK on
/// user_id: scores may arrive before the profile's first login.
const CREATE_RECOMMENDATION_SCORES: &str = r#"
CREATE TABLE IF NOT EXISTS recommendation_scores (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    user_id INTEGER NOT NULL,
    entity_type TEXT NOT NULL CHECK (entity_type IN ('group', 'event')),
    entity_id TEXT NOT NULL,
    score REAL NOT NULL,
    updated_at DATETIME NOT NULL DEFAULT CURRENT_TIMESTAMP,
    UNIQUE (user_id, entity_type, entity_id)
);
"#;

const CREATE_INDICES: &str = r#"
CREATE INDEX IF NOT EXISTS idx_rec_scores_user_type_score
    ON recommendation_scores(user_id, entity_type, score DESC);
CREATE INDEX IF NOT EXISTS idx_group_members_group ON group_members(group_id);
CREATE INDEX IF NOT EXISTS idx_events_group ON events(group_id);
"#;

/// Runs all required migrations for the SQLite backend.
/// Safe to call at every startup (idempotent).
pub async fn run_migrations(pool: &SqlitePool) -> Result<()> {
    pool.execute(CREATE_USERS).await?;
    pool.execute(CREATE_GROUPS).await?;
    pool.execute(CREATE_GROUP_MEMBERS).await?;
    pool.execute(CREATE_EVENTS).await?;
    pool.execute(CREATE_RECOMMENDATION_SCORES).await?;
    pool.execute(CREATE_INDICES).await?;

    info!("Migrations complete");
    Ok(())
}
