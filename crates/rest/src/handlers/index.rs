//! Service index handler.

use axum::{Json, response::IntoResponse};
use todo_persistence::types::{EntityKind, Relation};

/// Handler for `GET /`.
///
/// Lists the entity collections and relationship routes the service exposes.
/// Clients also use it as a liveness ping.
pub async fn index_handler() -> impl IntoResponse {
    let entities: Vec<_> = EntityKind::ALL
        .iter()
        .map(|kind| format!("/{}", kind.plural()))
        .collect();
    let relationships: Vec<_> = Relation::ALL
        .iter()
        .map(|relation| format!("/{}/{{id}}/{}", relation.source(), relation.name()))
        .collect();

    Json(serde_json::json!({
        "name": "todo-manager",
        "version": env!("CARGO_PKG_VERSION"),
        "entities": entities,
        "relationships": relationships
    }))
}
