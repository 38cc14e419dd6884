//! Axum WebSocket upgrade handler.

use axum::extract::State;
use axum::extract::ws::WebSocketUpgrade;
use axum::response::IntoResponse;

use super::connection::run_connection;
use crate::app_state::AppState;
use crate::domain::ConnectionId;

/// `GET /ws` — Upgrade HTTP connection to WebSocket.
///
/// Assigns the connection its opaque id at upgrade time; the id is the
/// only handle the registry and broadcast engine ever see.
pub async fn ws_handler(ws: WebSocketUpgrade, State(state): State<AppState>) -> impl IntoResponse {
    let conn_id = ConnectionId::new();
    tracing::info!(id = %conn_id, "websocket upgrade");
    ws.on_upgrade(move |socket| run_connection(socket, conn_id, state))
}
