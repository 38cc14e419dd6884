//! Route handlers grouped by resource.

pub mod connections;
pub mod system;

use axum::Router;

use crate::app_state::AppState;

/// Routes mounted under `/api/v1`.
pub fn routes() -> Router<AppState> {
    Router::new().merge(connections::routes())
}
