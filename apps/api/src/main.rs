mod card;
mod config;
mod db;
mod errors;
mod links;
mod mazes;
mod models;
mod routes;
mod state;
mod subscription;
mod tier;

use anyhow::Result;
use std::net::SocketAddr;
use std::sync::Arc;
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::config::Config;
use crate::db::create_pool;
use crate::mazes::store::{MemoryMazeStore, PgMazeStore};
use crate::routes::build_router;
use crate::state::AppState;
use crate::subscription::store::{MemorySubscriptionStore, PgSubscriptionStore};

#[tokio::main]
async fn main() -> Result<()> {
    let config = Config::from_env()?;

    // Initialize structured logging
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| {
            EnvFilter::new(format!("maze_api={},tower_http={}", config.rust_log, config.rust_log))
        }))
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting Maze API v{}", env!("CARGO_PKG_VERSION"));

    let state = match &config.database_url {
        Some(url) => {
            let pool = create_pool(url, config.db_max_connections).await?;
            AppState {
                config: config.clone(),
                mazes: Arc::new(PgMazeStore::new(pool.clone())),
                subscriptions: Arc::new(PgSubscriptionStore::new(pool)),
            }
        }
        None => {
            info!("DATABASE_URL not set; mazes and subscriptions are kept in memory");
            AppState {
                config: config.clone(),
                mazes: Arc::new(MemoryMazeStore::new()),
                subscriptions: Arc::new(MemorySubscriptionStore::new()),
            }
        }
    };

    let app = build_router(state)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive()); // TODO: restrict origins once the editor has a fixed host

    let addr: SocketAddr = format!("0.0.0.0:{}", config.port).parse()?;
    info!("Listening on {addr}");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
