// src/directory/store.rs
//! Batched reads against the live group/event tables.
//!
//! Hydration never goes one round-trip per id: groups take two queries
//! (rows + memberships for the whole batch), events take one.

use std::collections::HashMap;

use async_trait::async_trait;
use chrono::{NaiveDateTime, TimeZone, Utc};
use sqlx::{Row, SqlitePool};

use crate::directory::types::{Event, Group, GroupMember};
use crate::recs::traits::EntityDirectory;
use crate::recs::RecResult;

pub struct SqliteDirectory {
    pub pool: SqlitePool,
}

impl SqliteDirectory {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }
}

fn id_placeholders(n: usize) -> String {
    vec!["?"; n].join(", ")
}

#[async_trait]
impl EntityDirectory for SqliteDirectory {
    async fn groups_by_ids(&self, ids: &[i64]) -> RecResult<Vec<Group>> {
        if ids.is_empty() {
            return Ok(Vec::new());
        }

        let sql = format!(
            "SELECT id, name, description, owner_id, group_type, rules, created_at \
             FROM groups WHERE id IN ({})",
            id_placeholders(ids.len())
        );
        let mut query = sqlx::query(&sql);
        for id in ids {
            query = query.bind(id);
        }
        let rows = query.fetch_all(&self.pool).await?;

        // Memberships for the whole batch in one pass.
        let member_sql = format!(
            "SELECT group_id, user_id, role FROM group_members WHERE group_id IN ({})",
            id_placeholders(ids.len())
        );
        let mut member_query = sqlx::query(&member_sql);
        for id in ids {
            member_query = member_query.bind(id);
        }
        let member_rows = member_query.fetch_all(&self.pool).await?;

        let mut members_by_group: HashMap<i64, Vec<GroupMember>> = HashMap::new();
        for row in member_rows {
            let group_id: i64 = row.get("group_id");
            members_by_group.entry(group_id).or_default().push(GroupMember {
                user_id: row.get("user_id"),
                role: row.get("role"),
            });
        }

        let mut groups = Vec::with_capacity(rows.len());
        for row in rows {
            let id: i64 = row.get("id");
            let created_at: NaiveDateTime = row.get("created_at");
            groups.push(Group {
                id,
                name: row.get("name"),
                description: row.get("description"),
                owner_id: row.get("owner_id"),
                group_type: row.get("group_type"),
                rules: row.get("rules"),
                created_at: Utc.from_utc_datetime(&created_at),
                members: members_by_group.remove(&id).unwrap_or_default(),
            });
        }

        Ok(groups)
    }

    async fn events_by_ids(&self, ids: &[i64]) -> RecResult<Vec<Event>> {
        if ids.is_empty() {
            return Ok(Vec::new());
        }

        let sql = format!(
            "SELECT e.id, e.group_id, e.title, e.description, e.time, e.created_at, \
                    g.name AS group_name \
             FROM events e \
             LEFT JOIN groups g ON g.id = e.group_id \
             WHERE e.id IN ({})",
            id_placeholders(ids.len())
        );
        let mut query = sqlx::query(&sql);
        for id in ids {
            query = query.bind(id);
        }
        let rows = query.fetch_all(&self.pool).await?;

        let mut events = Vec::with_capacity(rows.len());
        for row in rows {
            let time: NaiveDateTime = row.get("time");
            let created_at: NaiveDateTime = row.get("created_at");
            events.push(Event {
                id: row.get("id"),
                group_id: row.get("group_id"),
                title: row.get("title"),
                description: row.get("description"),
                time: Utc.from_utc_datetime(&time),
                group_name: row.get("group_name"),
                created_at: Utc.from_utc_datetime(&created_at),
            });
        }

        Ok(events)
    }
}
