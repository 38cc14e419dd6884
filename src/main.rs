//! relay-gateway server entry point.
//!
//! Starts the Axum HTTP server with the WebSocket relay endpoint and the
//! REST operational surface.

use std::sync::Arc;
use std::time::Duration;

use anyhow::Context;
use axum::Router;
use axum::routing::get;
use sqlx::postgres::PgPoolOptions;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;
use tracing_subscriber::EnvFilter;

use relay_gateway::api;
use relay_gateway::app_state::AppState;
use relay_gateway::config::GatewayConfig;
use relay_gateway::push::{SessionMap, SessionPusher};
use relay_gateway::service::{BroadcastEngine, ConnectionRegistry};
use relay_gateway::store::{ConnectionStore, MemoryConnectionStore, PostgresConnectionStore};
use relay_gateway::ws::handler::ws_handler;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    // Load configuration
    let config = GatewayConfig::from_env()
        .map_err(|e| anyhow::anyhow!(e.to_string()))
        .context("failed to load configuration")?;
    tracing::info!(addr = %config.listen_addr, "starting relay-gateway");

    // Select the connection store
    let store: Arc<dyn ConnectionStore> = if config.persistence_enabled {
        let pool = PgPoolOptions::new()
            .max_connections(config.database_max_connections)
            .min_connections(config.database_min_connections)
            .acquire_timeout(Duration::from_secs(config.database_connect_timeout_secs))
            .connect(&config.database_url)
            .await
            .context("failed to connect to postgres")?;
        let store = PostgresConnectionStore::new(pool);
        store
            .init_schema()
            .await
            .context("failed to initialize schema")?;
        tracing::info!("using postgres connection store");
        Arc::new(store)
    } else {
        tracing::info!("persistence disabled; using in-memory connection store");
        Arc::new(MemoryConnectionStore::new())
    };

    // Build the registry and broadcast engine
    let registry = Arc::new(ConnectionRegistry::new(
        store,
        Duration::from_millis(config.store_op_timeout_ms),
    ));
    let sessions = SessionMap::new();
    let pusher = Arc::new(SessionPusher::new(sessions.clone()));
    let engine = Arc::new(BroadcastEngine::new(
        Arc::clone(&registry),
        pusher,
        Duration::from_millis(config.push_timeout_ms),
    ));

    // Build application state
    let app_state = AppState {
        registry,
        engine,
        sessions,
    };

    // Build router
    let app = Router::new()
        .merge(api::build_router())
        .route("/ws", get(ws_handler))
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(app_state);

    // Start server
    let listener = tokio::net::TcpListener::bind(config.listen_addr)
        .await
        .context("failed to bind listener")?;
    tracing::info!(addr = %config.listen_addr, "server listening");

    axum::serve(listener, app).await.context("server error")?;

    Ok(())
}
