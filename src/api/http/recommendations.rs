// src/api/http/recommendations.rs
use std::sync::Arc;

use axum::{
    extract::{Query, State},
    http::HeaderMap,
    response::IntoResponse,
    Json,
};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::info;

use crate::{
    api::error::{ApiError, ApiResult, IntoApiError},
    config::CONFIG,
    directory::types::{Event, Group},
    identity::Profile,
    recs::traits::ScoreStore, // bring trait into scope so store calls resolve
    recs::types::{EntityKind, Ranked, ScoreRecord},
    state::AppState,
};

/// Header carrying the external auth subject of the caller.
pub const PROFILE_HEADER: &str = "x-profile-user";

#[derive(Debug, Serialize)]
struct ScoresData {
    data: Vec<ScoreRecord>,
}

#[derive(Debug, Serialize)]
struct RankedData<T> {
    data: Vec<Ranked<T>>,
}

#[derive(Debug, Serialize)]
struct UpsertOk {
    ok: bool,
}

#[derive(Debug, Deserialize)]
pub struct LimitQuery {
    limit: Option<i64>,
}

fn clamp_limit(requested: Option<i64>) -> i64 {
    requested
        .unwrap_or(CONFIG.rec_default_limit)
        .clamp(1, CONFIG.rec_max_limit)
}

/// Resolve the caller's profile, provisioning it on first authenticated
/// touch. No header or blank header means an anonymous caller: `None`.
async fn resolve_caller(app: &AppState, headers: &HeaderMap) -> ApiResult<Option<Profile>> {
    let subject = headers
        .get(PROFILE_HEADER)
        .and_then(|v| v.to_str().ok())
        .map(str::trim)
        .filter(|s| !s.is_empty());

    match subject {
        Some(subject) => {
            let profile = app
                .profiles
                .ensure_profile(subject, None)
                .await
                .into_api_error("Failed to resolve profile")?;
            Ok(Some(profile))
        }
        None => Ok(None),
    }
}

/// GET /recommendations
///
/// Raw top group scores for the caller, best first, capped at the feed
/// limit. An anonymous or unscored caller gets an empty `data` array; the
/// UI treats that as "recommendations not yet available".
pub async fn get_recommendations(
    State(app): State<Arc<AppState>>,
    headers: HeaderMap,
) -> ApiResult<impl IntoResponse> {
    let profile = resolve_caller(&app, &headers).await?;

    let data = match profile {
        Some(profile) => app
            .score_store
            .scores_for_user(profile.id, EntityKind::Group, CONFIG.rec_feed_limit)
            .await
            .into_api_error("Failed to load recommendations")?,
        None => Vec::new(),
    };

    Ok(Json(ScoresData { data }))
}

/// POST /recommendations
///
/// Bulk score upsert from the offline scorer. The body must be a JSON array
/// of score records; each row is narrowed to the four score fields. A
/// malformed batch is rejected before storage is touched.
pub async fn post_recommendations(
    State(app): State<Arc<AppState>>,
    Json(body): Json<Value>,
) -> ApiResult<impl IntoResponse> {
    let rows = body
        .as_array()
        .ok_or_else(|| ApiError::bad_request("Expected an array of recommendations"))?;

    let mut records = Vec::with_capacity(rows.len());
    for row in rows {
        let record: ScoreRecord = serde_json::from_value(row.clone())
            .map_err(|e| ApiError::bad_request(format!("Invalid recommendation record: {e}")))?;
        records.push(record);
    }

    app.score_store
        .upsert_scores(&records)
        .await
        .into_api_error("Failed to store recommendation scores")?;

    info!(count = records.len(), "stored recommendation scores");
    Ok(Json(UpsertOk { ok: true }))
}

/// GET /recommendations/groups?limit=N
pub async fn get_recommended_groups(
    State(app): State<Arc<AppState>>,
    Query(query): Query<LimitQuery>,
    headers: HeaderMap,
) -> ApiResult<impl IntoResponse> {
    let profile = resolve_caller(&app, &headers).await?;

    let data: Vec<Ranked<Group>> = app
        .ranker
        .recommend_groups(profile.map(|p| p.id), clamp_limit(query.limit))
        .await
        .into_api_error("Failed to rank groups")?;

    Ok(Json(RankedData { data }))
}

/// GET /recommendations/events?limit=N
pub async fn get_recommended_events(
    State(app): State<Arc<AppState>>,
    Query(query): Query<LimitQuery>,
    headers: HeaderMap,
) -> ApiResult<impl IntoResponse> {
    let profile = resolve_caller(&app, &headers).await?;

    let data: Vec<Ranked<Event>> = app
        .ranker
        .recommend_events(profile.map(|p| p.id), clamp_limit(query.limit))
        .await
        .into_api_error("Failed to rank events")?;

    Ok(Json(RankedData { data }))
}
