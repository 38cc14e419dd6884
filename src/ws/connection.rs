//! Per-session read/write loop.
//!
//! Registers the session on entry, relays inbound frames through the
//! broadcast engine, forwards pushed payloads out verbatim, and cleans
//! up on exit. Disconnect cleanup is advisory: the broadcast engine's
//! pruning-on-failed-push is the authoritative mechanism, so a missed
//! disconnect leaves at worst one stale registry entry until the next
//! broadcast.

use axum::extract::ws::{Message, WebSocket};
use chrono::Utc;
use futures_util::{SinkExt, StreamExt};
use tokio::sync::mpsc;

use crate::app_state::AppState;
use crate::domain::ConnectionId;
use crate::error::GatewayError;

/// Runs the read/write loop for a single WebSocket session.
pub async fn run_connection(socket: WebSocket, conn_id: ConnectionId, state: AppState) {
    let (out_tx, mut out_rx) = mpsc::unbounded_channel::<Vec<u8>>();
    state.sessions.insert(conn_id.clone(), out_tx).await;

    if let Err(e) = state.registry.register(conn_id.clone(), Utc::now()).await {
        tracing::error!(id = %conn_id, error = %e, "failed to register connection");
        state.sessions.remove(&conn_id).await;
        return;
    }
    tracing::info!(id = %conn_id, "connection registered");

    let (mut ws_tx, mut ws_rx) = socket.split();

    loop {
        tokio::select! {
            // Payload pushed to this session by a broadcast
            outbound = out_rx.recv() => {
                match outbound {
                    Some(payload) => {
                        // Deliver verbatim: text frame when the payload is
                        // valid UTF-8, binary frame otherwise.
                        let frame = match String::from_utf8(payload) {
                            Ok(text) => Message::text(text),
                            Err(e) => Message::binary(e.into_bytes()),
                        };
                        if ws_tx.send(frame).await.is_err() {
                            break;
                        }
                    }
                    None => break,
                }
            }
            // Inbound frame from the client
            msg = ws_rx.next() => {
                match msg {
                    Some(Ok(Message::Text(text))) => {
                        relay(&state, &conn_id, text.as_bytes(), &mut ws_tx).await;
                    }
                    Some(Ok(Message::Binary(data))) => {
                        relay(&state, &conn_id, &data, &mut ws_tx).await;
                    }
                    Some(Ok(Message::Close(_))) | Some(Err(_)) | None => break,
                    _ => {}
                }
            }
        }
    }

    state.sessions.remove(&conn_id).await;
    if let Err(e) = state.registry.deregister(&conn_id).await {
        tracing::warn!(id = %conn_id, error = %e, "disconnect deregister failed");
    }
    tracing::info!(id = %conn_id, "connection closed");
}

/// Broadcasts one inbound payload, reporting a fatal registry failure
/// back to the originator as a JSON error frame.
async fn relay(
    state: &AppState,
    origin: &ConnectionId,
    payload: &[u8],
    ws_tx: &mut (impl SinkExt<Message> + Unpin),
) {
    match state.engine.broadcast(Some(origin), payload).await {
        Ok(outcome) => {
            tracing::debug!(
                id = %origin,
                delivered = outcome.delivered,
                pruned = outcome.pruned,
                "relayed event"
            );
        }
        Err(e) => {
            tracing::error!(id = %origin, error = %e, "broadcast failed");
            let _ = ws_tx.send(Message::text(error_frame(&e))).await;
        }
    }
}

fn error_frame(e: &GatewayError) -> String {
    serde_json::json!({
        "error": {
            "code": e.error_code(),
            "message": e.to_string(),
        }
    })
    .to_string()
}
