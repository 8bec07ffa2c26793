// src/directory/types.rs

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A student group, with its membership rows attached on hydration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Group {
    pub id: i64,
    pub name: String,
    pub description: Option<String>,
    pub owner_id: Option<i64>,
    #[serde(rename = "type")]
    pub group_type: Option<String>,
    pub rules: Option<String>,
    pub created_at: DateTime<Utc>,
    pub members: Vec<GroupMember>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GroupMember {
    pub user_id: i64,
    pub role: String,
}

/// A group event. `group_name` is denormalized from the owning group so
/// callers can render the event without another lookup.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Event {
    pub id: i64,
    pub group_id: i64,
    pub title: String,
    pub description: Option<String>,
    pub time: DateTime<Utc>,
    pub group_name: Option<String>,
    pub created_at: DateTime<Utc>,
}
