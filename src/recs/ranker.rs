// src/recs/ranker.rs
//! Turns a user's stored scores into ranked, hydrated entities.
//!
//! Score lookup is cheap; hydration is the expensive step. The ranker
//! therefore short-circuits before hydration whenever it can, and always
//! hydrates the whole id set in one batched lookup.

use std::collections::HashMap;
use std::sync::Arc;

use tracing::debug;

use crate::directory::types::{Event, Group};
use crate::recs::traits::{EntityDirectory, ScoreStore};
use crate::recs::types::{EntityKind, Ranked};
use crate::recs::RecResult;

/// Internal profile identifier of a resolved caller.
pub type ProfileId = i64;

pub struct Ranker {
    scores: Arc<dyn ScoreStore>,
    directory: Arc<dyn EntityDirectory>,
}

impl Ranker {
    pub fn new(scores: Arc<dyn ScoreStore>, directory: Arc<dyn EntityDirectory>) -> Self {
        Self { scores, directory }
    }

    /// Ranked groups for `profile`, best first, at most `limit` entries.
    ///
    /// `None` profile and "no scores yet" are both legitimate empty results,
    /// not errors; storage failures propagate.
    pub async fn recommend_groups(
        &self,
        profile: Option<ProfileId>,
        limit: i64,
    ) -> RecResult<Vec<Ranked<Group>>> {
        let Some(user_id) = profile else {
            return Ok(Vec::new());
        };

        let scored = self.scores.top_scores(user_id, EntityKind::Group, limit).await?;
        if scored.is_empty() {
            return Ok(Vec::new());
        }

        let groups = self.directory.groups_by_ids(&numeric_ids(&scored)).await?;
        debug!(user_id, scored = scored.len(), hydrated = groups.len(), "ranked groups");
        Ok(rank_by_score(groups, &scored, |g| g.id))
    }

    /// Ranked events for `profile`; same contract as `recommend_groups`.
    pub async fn recommend_events(
        &self,
        profile: Option<ProfileId>,
        limit: i64,
    ) -> RecResult<Vec<Ranked<Event>>> {
        let Some(user_id) = profile else {
            return Ok(Vec::new());
        };

        let scored = self.scores.top_scores(user_id, EntityKind::Event, limit).await?;
        if scored.is_empty() {
            return Ok(Vec::new());
        }

        let events = self.directory.events_by_ids(&numeric_ids(&scored)).await?;
        debug!(user_id, scored = scored.len(), hydrated = events.len(), "ranked events");
        Ok(rank_by_score(events, &scored, |e| e.id))
    }
}

/// Scored ids that can hydrate against integer-keyed storage. Ids that do
/// not parse match no row anyway, so they are dropped before the lookup.
fn numeric_ids(scored: &[(String, f64)]) -> Vec<i64> {
    scored.iter().filter_map(|(id, _)| id.parse().ok()).collect()
}

/// Two-map merge followed by one deterministic sort.
///
/// Each hydrated entity gets the score stored under its stringified id,
/// 0.0 when the score row is gone. The sort is descending by score and is
/// mandatory: hydration returns rows in storage order, not score order.
/// Ties order by entity id ascending.
fn rank_by_score<T>(
    entities: Vec<T>,
    scored: &[(String, f64)],
    id_of: impl Fn(&T) -> i64,
) -> Vec<Ranked<T>> {
    let score_map: HashMap<&str, f64> = scored.iter().map(|(id, s)| (id.as_str(), *s)).collect();

    let mut ranked: Vec<Ranked<T>> = entities
        .into_iter()
        .map(|entity| {
            let key = id_of(&entity).to_string();
            let rec_score = score_map.get(key.as_str()).copied().unwrap_or(0.0);
            Ranked { entity, rec_score }
        })
        .collect();

    ranked.sort_by(|a, b| {
        b.rec_score
            .partial_cmp(&a.rec_score)
            .unwrap_or(std::cmp::Ordering::Equal)
            .then_with(|| id_of(&a.entity).cmp(&id_of(&b.entity)))
    });

    ranked
}
