// src/identity/mod.rs
//! Maps external auth subjects onto profile rows in the users table.
//!
//! Auth itself lives outside this service; callers present the subject id
//! they authenticated as, and this store resolves or provisions the matching
//! profile. An unresolvable caller is a normal outcome, never an error.

use serde::{Deserialize, Serialize};
use sqlx::{Row, SqlitePool};

use crate::recs::RecResult;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Profile {
    pub id: i64,
    pub auth_user_id: String,
    pub name: Option<String>,
}

pub struct ProfileStore {
    pub pool: SqlitePool,
}

impl ProfileStore {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    /// Pure lookup of the profile for an external auth subject.
    pub async fn resolve(&self, auth_user_id: &str) -> RecResult<Option<Profile>> {
        let row = sqlx::query("SELECT id, auth_user_id, name FROM users WHERE auth_user_id = ?")
            .bind(auth_user_id)
            .fetch_optional(&self.pool)
            .await?;

        Ok(row.map(|row| Profile {
            id: row.get("id"),
            auth_user_id: row.get("auth_user_id"),
            name: row.get("name"),
        }))
    }

    /// Find-or-create. Concurrent first-login requests race on the unique
    /// auth_user_id; the losing insert is a no-op and the re-select returns
    /// the winner's row.
    pub async fn ensure_profile(
        &self,
        auth_user_id: &str,
        name: Option<&str>,
    ) -> RecResult<Profile> {
        if let Some(existing) = self.resolve(auth_user_id).await? {
            return Ok(existing);
        }

        sqlx::query(
            "INSERT INTO users (auth_user_id, name) VALUES (?, ?) \
             ON CONFLICT (auth_user_id) DO NOTHING",
        )
        .bind(auth_user_id)
        .bind(name)
        .execute(&self.pool)
        .await?;

        let row = sqlx::query("SELECT id, auth_user_id, name FROM users WHERE auth_user_id = ?")
            .bind(auth_user_id)
            .fetch_one(&self.pool)
            .await?;

        Ok(Profile {
            id: row.get("id"),
            auth_user_id: row.get("auth_user_id"),
            name: row.get("name"),
        })
    }
}
