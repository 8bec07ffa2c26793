// src/api/http/router.rs
// HTTP router composition for REST API endpoints

use axum::{
    http::HeaderValue,
    routing::{get, post},
    Router,
};
use std::sync::Arc;
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::warn;

use super::{
    handlers::health_handler,
    recommendations::{
        get_recommendations, get_recommended_events, get_recommended_groups, post_recommendations,
    },
};
use crate::config::CONFIG;
use crate::state::AppState;

/// Main HTTP router for health and recommendation endpoints
pub fn http_router(app_state: Arc<AppState>) -> Router {
    Router::new()
        // Health
        .route("/health", get(health_handler))

        // Recommendation serving
        .route("/recommendations", get(get_recommendations))
        .route("/recommendations", post(post_recommendations))
        .route("/recommendations/groups", get(get_recommended_groups))
        .route("/recommendations/events", get(get_recommended_events))

        .layer(cors_layer())
        .layer(TraceLayer::new_for_http())
        .with_state(app_state)
}

fn cors_layer() -> CorsLayer {
    if CONFIG.cors_origin == "*" {
        return CorsLayer::permissive();
    }
    match CONFIG.cors_origin.parse::<HeaderValue>() {
        Ok(origin) => CorsLayer::new().allow_origin(origin),
        Err(_) => {
            warn!(origin = %CONFIG.cors_origin, "invalid CORS origin, falling back to permissive");
            CorsLayer::permissive()
        }
    }
}
