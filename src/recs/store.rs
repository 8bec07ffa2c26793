// src/recs/store.rs
//! SQLite-backed storage for the score table the offline scorer writes into.

use async_trait::async_trait;
use sqlx::{Row, SqlitePool};

use crate::recs::traits::ScoreStore;
use crate::recs::types::{EntityKind, ScoreRecord};
use crate::recs::RecResult;

pub struct SqliteScoreStore {
    pub pool: SqlitePool, // Public so handlers and tests can reach the raw table
}

impl SqliteScoreStore {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl ScoreStore for SqliteScoreStore {
    async fn upsert_scores(&self, records: &[ScoreRecord]) -> RecResult<()> {
        // Single transaction: a failed batch leaves nothing behind.
        let mut tx = self.pool.begin().await?;

        for record in records {
            sqlx::query(
                r#"
                INSERT INTO recommendation_scores (user_id, entity_type, entity_id, score, updated_at)
                VALUES (?, ?, ?, ?, CURRENT_TIMESTAMP)
                ON CONFLICT (user_id, entity_type, entity_id)
                DO UPDATE SET score = excluded.score, updated_at = excluded.updated_at
                "#,
            )
            .bind(record.user_id)
            .bind(record.entity_type.to_string())
            .bind(&record.entity_id)
            .bind(record.score)
            .execute(&mut *tx)
            .await?;
        }

        tx.commit().await?;
        Ok(())
    }

    async fn top_scores(
        &self,
        user_id: i64,
        kind: EntityKind,
        limit: i64,
    ) -> RecResult<Vec<(String, f64)>> {
        let rows = sqlx::query(
            r#"
            SELECT entity_id, score
            FROM recommendation_scores
            WHERE user_id = ? AND entity_type = ?
            ORDER BY score DESC, entity_id ASC
            LIMIT ?
            "#,
        )
        .bind(user_id)
        .bind(kind.to_string())
        .bind(limit)
        .fetch_all(&self.pool)
        .await?;

        Ok(rows
            .into_iter()
            .map(|row| (row.get("entity_id"), row.get("score")))
            .collect())
    }

    async fn scores_for_user(
        &self,
        user_id: i64,
        kind: EntityKind,
        limit: i64,
    ) -> RecResult<Vec<ScoreRecord>> {
        let rows = sqlx::query(
            r#"
            SELECT user_id, entity_id, score
            FROM recommendation_scores
            WHERE user_id = ? AND entity_type = ?
            ORDER BY score DESC, entity_id ASC
            LIMIT ?
            "#,
        )
        .bind(user_id)
        .bind(kind.to_string())
        .bind(limit)
        .fetch_all(&self.pool)
        .await?;

        // entity_type is the query filter, no need to re-parse it per row.
        Ok(rows
            .into_iter()
            .map(|row| ScoreRecord {
                user_id: row.get("user_id"),
                entity_type: kind,
                entity_id: row.get("entity_id"),
                score: row.get("score"),
            })
            .collect())
    }
}
