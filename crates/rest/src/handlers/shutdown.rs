//! Shutdown endpoint handler.

use axum::{extract::State, http::StatusCode};
use todo_persistence::core::EntityStorage;
use tracing::info;

use crate::state::AppState;

/// Handler for `GET /shutdown`.
///
/// Answers 200, then the server stops accepting connections and exits once
/// in-flight requests have completed.
pub async fn shutdown_handler<S>(State(state): State<AppState<S>>) -> StatusCode
where
    S: EntityStorage + Send + Sync,
{
    info!("Shutdown requested over HTTP");
    state.shutdown().trigger();
    StatusCode::OK
}
