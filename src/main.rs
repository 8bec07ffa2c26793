// src/main.rs

use std::sync::Arc;

use tracing::{info, Level};
use tracing_subscriber::FmtSubscriber;

use campuslink::api::http::http_router;
use campuslink::config::CONFIG;
use campuslink::db;
use campuslink::state::AppState;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing
    let level = CONFIG.log_level.parse().unwrap_or(Level::INFO);
    let subscriber = FmtSubscriber::builder().with_max_level(level).finish();
    tracing::subscriber::set_global_default(subscriber)?;

    info!("Starting CampusLink recommendation backend");
    info!("Database: {}", CONFIG.database_url);

    // Create database pool and bring the schema up to date
    let pool = db::create_pool(&CONFIG.database_url, CONFIG.sqlite_max_connections).await?;
    db::run_migrations(&pool).await?;

    let app_state = Arc::new(AppState::new(pool));

    let app = http_router(app_state);

    // Start server
    let bind_address = format!("{}:{}", CONFIG.host, CONFIG.port);
    let listener = tokio::net::TcpListener::bind(&bind_address).await?;

    info!("Recommendation API listening on http://{}", bind_address);

    axum::serve(listener, app).await?;

    Ok(())
}
