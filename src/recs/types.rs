// src/recs/types.rs

use serde::{Deserialize, Serialize};

/// What kind of entity a score points at.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum EntityKind {
    Group,
    Event,
}

impl std::fmt::Display for EntityKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            EntityKind::Group => write!(f, "group"),
            EntityKind::Event => write!(f, "event"),
        }
    }
}

impl std::str::FromStr for EntityKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "group" => Ok(EntityKind::Group),
            "event" => Ok(EntityKind::Event),
            _ => Err(format!("Unknown entity kind: {s}")),
        }
    }
}

/// One precomputed relevance score from the offline scorer.
///
/// Unique per (user_id, entity_type, entity_id); a later write for the same
/// triple replaces the stored score. End-user actions never mutate these
/// rows, and stale scores persist until the scorer overwrites them.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ScoreRecord {
    pub user_id: i64,
    pub entity_type: EntityKind,
    pub entity_id: String,
    pub score: f64,
}

/// A hydrated entity annotated with its recommendation score.
///
/// `rec_score` falls back to 0.0 when the entity hydrated but its score row
/// is gone (deleted/recreated between scoring and serving).
#[derive(Debug, Clone, Serialize)]
pub struct Ranked<T> {
    #[serde(flatten)]
    pub entity: T,
    pub rec_score: f64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn entity_kind_round_trips_through_strings() {
        assert_eq!("group".parse::<EntityKind>().unwrap(), EntityKind::Group);
        assert_eq!("EVENT".parse::<EntityKind>().unwrap(), EntityKind::Event);
        assert_eq!(EntityKind::Group.to_string(), "group");
        assert!("meetup".parse::<EntityKind>().is_err());
    }

    #[test]
    fn score_record_serializes_lowercase_kind() {
        let record = ScoreRecord {
            user_id: 42,
            entity_type: EntityKind::Group,
            entity_id: "7".to_string(),
            score: 0.9,
        };
        let json = serde_json::to_value(&record).unwrap();
        assert_eq!(json["entity_type"], "group");
        assert_eq!(json["entity_id"], "7");
    }
}
