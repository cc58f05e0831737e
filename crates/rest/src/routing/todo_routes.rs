//! Todo manager route configuration.

use axum::{
    Router,
    routing::{any, get},
};
use todo_persistence::core::RelationshipStorage;

use crate::handlers;
use crate::state::AppState;

/// Creates all todo manager routes.
///
/// # Routes
///
/// ## Service
/// - `GET /` - Service index
/// - `GET /health` - Health check
/// - `GET /shutdown` - Stop the server
///
/// ## Entities (every method; see [`RouteShape`](super::shape::RouteShape))
/// - `/{entity}` - Collection
/// - `/{entity}/{id}` - Item
/// - `/{entity}/{id}/{relation}` - Sub-collection
/// - `/{entity}/{id}/{relation}/{target_id}` - Relationship item
pub fn create_routes<S>(state: AppState<S>) -> Router
where
    S: RelationshipStorage + Send + Sync + 'static,
{
    Router::new()
        // Service routes
        .route("/", get(handlers::index_handler))
        .route("/health", get(handlers::health_handler::<S>))
        .route("/shutdown", get(handlers::shutdown_handler::<S>))
        // Entity routes
        .route("/{entity}", any(handlers::collection_handler::<S>))
        .route("/{entity}/{id}", any(handlers::item_handler::<S>))
        .route(
            "/{entity}/{id}/{relation}",
            any(handlers::sub_collection_handler::<S>),
        )
        .route(
            "/{entity}/{id}/{relation}/{target_id}",
            any(handlers::relationship_item_handler::<S>),
        )
        .fallback(handlers::fallback_handler)
        // State
        .with_state(state)
}
