// src/state.rs

use std::sync::Arc;

use sqlx::SqlitePool;

use crate::directory::store::SqliteDirectory;
use crate::identity::ProfileStore;
use crate::recs::{Ranker, SqliteScoreStore};

#[derive(Clone)]
pub struct AppState {
    // -------- Storage --------
    pub score_store: Arc<SqliteScoreStore>,
    pub directory: Arc<SqliteDirectory>,
    pub profiles: Arc<ProfileStore>,

    // -------- Services --------
    pub ranker: Arc<Ranker>,
}

impl AppState {
    /// Wire every store off one pool; the ranker reads through the same
    /// handles the handlers do, so there is no second source of truth.
    pub fn new(pool: SqlitePool) -> Self {
        let score_store = Arc::new(SqliteScoreStore::new(pool.clone()));
        let directory = Arc::new(SqliteDirectory::new(pool.clone()));
        let profiles = Arc::new(ProfileStore::new(pool));
        let ranker = Arc::new(Ranker::new(score_store.clone(), directory.clone()));

        Self {
            score_store,
            directory,
            profiles,
            ranker,
        }
    }
}
