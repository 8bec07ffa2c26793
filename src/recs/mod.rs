// src/recs/mod.rs
pub mod ranker;
pub mod store;
pub mod traits;
pub mod types;

// Re-export for easy use elsewhere
pub use ranker::{ProfileId, Ranker};
pub use store::SqliteScoreStore;
pub use types::{EntityKind, Ranked, ScoreRecord};

/// Recommendation subsystem error types
#[derive(Debug, thiserror::Error)]
pub enum RecError {
    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),
}

pub type RecResult<T> = Result<T, RecError>;
