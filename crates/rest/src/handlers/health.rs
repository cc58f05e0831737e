//! Health check endpoint handler.
//!
//! Provides a simple health check endpoint for monitoring and load balancers.

use axum::{
    Json,
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use todo_persistence::core::EntityStorage;
use todo_persistence::types::EntityKind;
use tracing::debug;

use crate::error::RestResult;
use crate::state::AppState;

/// Handler for the health check endpoint.
///
/// Reports the backend in use and how many records of each kind it holds.
///
/// # HTTP Request
///
/// `GET [base]/health`
///
/// # Response
///
/// - `200 OK` - Server is healthy
///
/// ```json
/// {
///   "status": "healthy",
///   "backend": "memory",
///   "timestamp": "2026-10-18T09:30:00+00:00",
///   "counts": {"todos": 2, "projects": 1, "categories": 2}
/// }
/// ```
pub async fn health_handler<S>(State(state): State<AppState<S>>) -> RestResult<Response>
where
    S: EntityStorage + Send + Sync,
{
    debug!("Processing health check request");

    let mut counts = serde_json::Map::new();
    for kind in EntityKind::ALL {
        let count = state.storage().count(kind).await?;
        counts.insert(kind.plural().to_string(), count.into());
    }

    let health_response = serde_json::json!({
        "status": "healthy",
        "backend": state.storage().backend_name(),
        "timestamp": chrono::Utc::now().to_rfc3339(),
        "counts": counts
    });

    Ok((StatusCode::OK, Json(health_response)).into_response())
}
