// src/recs/traits.rs
//! Seams between the ranker and its storage collaborators.

use async_trait::async_trait;

use crate::directory::types::{Event, Group};
use crate::recs::types::{EntityKind, ScoreRecord};
use crate::recs::RecResult;

/// Keyed storage for externally computed recommendation scores.
#[async_trait]
pub trait ScoreStore: Send + Sync {
    /// Applies the whole batch, keyed on (user_id, entity_type, entity_id):
    /// existing triples are overwritten, new ones inserted. All or nothing.
    async fn upsert_scores(&self, records: &[ScoreRecord]) -> RecResult<()>;

    /// Top `limit` (entity_id, score) pairs for one user and kind,
    /// descending by score, ties broken by entity id ascending.
    /// Empty when the user has no scores of that kind.
    async fn top_scores(
        &self,
        user_id: i64,
        kind: EntityKind,
        limit: i64,
    ) -> RecResult<Vec<(String, f64)>>;

    /// Full score rows for one user and kind, same ordering and limit
    /// contract as `top_scores`.
    async fn scores_for_user(
        &self,
        user_id: i64,
        kind: EntityKind,
        limit: i64,
    ) -> RecResult<Vec<ScoreRecord>>;
}

/// Batched read access to live group/event records. Return order is
/// whatever the storage layer produces; callers must not rely on it.
#[async_trait]
pub trait EntityDirectory: Send + Sync {
    async fn groups_by_ids(&self, ids: &[i64]) -> RecResult<Vec<Group>>;
    async fn events_by_ids(&self, ids: &[i64]) -> RecResult<Vec<Event>>;
}
