//! Connection registry endpoints: operational visibility into membership.

use axum::extract::State;
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::routing::get;
use axum::{Json, Router};
use chrono::{DateTime, Utc};
use serde::Serialize;
use utoipa::ToSchema;

use crate::app_state::AppState;
use crate::domain::Connection;
use crate::error::{ErrorResponse, GatewayError};

/// One registered connection as reported by the registry.
#[derive(Debug, Serialize, ToSchema)]
pub struct ConnectionDto {
    /// Transport-assigned connection id.
    pub id: String,
    /// Registration timestamp.
    pub created_at: DateTime<Utc>,
}

impl From<Connection> for ConnectionDto {
    fn from(conn: Connection) -> Self {
        Self {
            id: conn.id.into(),
            created_at: conn.created_at,
        }
    }
}

/// Registry listing response.
#[derive(Debug, Serialize, ToSchema)]
pub struct ConnectionListResponse {
    /// Registered connections at snapshot time.
    pub connections: Vec<ConnectionDto>,
    /// Number of registered connections.
    pub count: usize,
}

/// `GET /connections` — List all registered connections.
///
/// The listing is a point-in-time snapshot; an id being present does not
/// guarantee the endpoint is still reachable.
///
/// # Errors
///
/// Returns [`GatewayError::StoreUnavailable`] if the registry cannot be
/// read.
#[utoipa::path(
    get,
    path = "/api/v1/connections",
    tag = "Connections",
    summary = "List registered connections",
    description = "Returns a point-in-time snapshot of the connection registry.",
    responses(
        (status = 200, description = "Registry snapshot", body = ConnectionListResponse),
        (status = 503, description = "Connection store unavailable", body = ErrorResponse),
    )
)]
pub async fn list_connections(
    State(state): State<AppState>,
) -> Result<impl IntoResponse, GatewayError> {
    let snapshot = state.registry.snapshot().await?;
    let connections: Vec<ConnectionDto> = snapshot.into_iter().map(ConnectionDto::from).collect();
    let count = connections.len();

    Ok((
        StatusCode::OK,
        Json(ConnectionListResponse { connections, count }),
    ))
}

/// Connection routes.
pub fn routes() -> Router<AppState> {
    Router::new().route("/connections", get(list_connections))
}
