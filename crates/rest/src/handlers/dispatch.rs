//! Route-shape handlers.
//!
//! Each entity route accepts every method. The handler resolves the path into
//! a [`RouteShape`], looks the method up in the shape's table and runs the
//! selected interaction. Unknown entity or relation names are 404 for every
//! method; methods outside the table are 405 with an `Allow` header.
//!
//! `HEAD` is served like `GET` with the body removed.

use axum::{
    extract::{Path, State},
    http::Method,
    response::{IntoResponse, Response},
};
use todo_persistence::core::RelationshipStorage;
use tracing::{debug, warn};

use crate::error::{RestError, RestResult};
use crate::extractors::EntityBody;
use crate::handlers::{entities, relationships};
use crate::responses;
use crate::routing::shape::{Disposition, Interaction, RouteShape};
use crate::state::AppState;

/// Handler for `/{entity}`.
pub async fn collection_handler<S>(
    State(state): State<AppState<S>>,
    method: Method,
    Path(entity): Path<String>,
    body: EntityBody,
) -> Response
where
    S: RelationshipStorage + Send + Sync,
{
    let shape = RouteShape::collection(&entity);
    dispatch(&state, method, shape, format!("/{}", entity), body).await
}

/// Handler for `/{entity}/{id}`.
pub async fn item_handler<S>(
    State(state): State<AppState<S>>,
    method: Method,
    Path((entity, id)): Path<(String, String)>,
    body: EntityBody,
) -> Response
where
    S: RelationshipStorage + Send + Sync,
{
    let shape = RouteShape::item(&entity, &id);
    dispatch(&state, method, shape, format!("/{}/{}", entity, id), body).await
}

/// Handler for `/{entity}/{id}/{relation}`.
pub async fn sub_collection_handler<S>(
    State(state): State<AppState<S>>,
    method: Method,
    Path((entity, id, relation)): Path<(String, String, String)>,
    body: EntityBody,
) -> Response
where
    S: RelationshipStorage + Send + Sync,
{
    let shape = RouteShape::sub_collection(&entity, &id, &relation);
    let path = format!("/{}/{}/{}", entity, id, relation);
    dispatch(&state, method, shape, path, body).await
}

/// Handler for `/{entity}/{id}/{relation}/{target_id}`.
pub async fn relationship_item_handler<S>(
    State(state): State<AppState<S>>,
    method: Method,
    Path((entity, id, relation, target_id)): Path<(String, String, String, String)>,
    body: EntityBody,
) -> Response
where
    S: RelationshipStorage + Send + Sync,
{
    let shape = RouteShape::relationship_item(&entity, &id, &relation, &target_id);
    let path = format!("/{}/{}/{}/{}", entity, id, relation, target_id);
    dispatch(&state, method, shape, path, body).await
}

async fn dispatch<S>(
    state: &AppState<S>,
    method: Method,
    shape: Option<RouteShape>,
    path: String,
    body: EntityBody,
) -> Response
where
    S: RelationshipStorage + Send + Sync,
{
    let result = match shape {
        Some(shape) => serve(state, &method, shape, &body).await,
        None => Err(RestError::no_instances_at(&path)),
    };

    let response = match result {
        Ok(response) => response,
        Err(err) => {
            warn!(
                method = %method,
                path = %path,
                status = err.status().as_u16(),
                error = %err,
                "Request rejected"
            );
            err.into_response()
        }
    };

    if method == Method::HEAD {
        responses::without_body(response)
    } else {
        response
    }
}

async fn serve<S>(
    state: &AppState<S>,
    method: &Method,
    shape: RouteShape,
    body: &EntityBody,
) -> RestResult<Response>
where
    S: RelationshipStorage + Send + Sync,
{
    let interaction = match shape.disposition(method) {
        Disposition::Allowed(interaction) => interaction,
        Disposition::NotFound => return Err(RestError::no_instances_at(&shape.path())),
        Disposition::MethodNotAllowed => {
            return Err(RestError::MethodNotAllowed {
                method: method.clone(),
                path: shape.path(),
                allow: shape.allowed_methods(),
            });
        }
    };

    debug!(
        method = %method,
        path = %shape.path(),
        interaction = ?interaction,
        "Dispatching request"
    );

    match (interaction, shape) {
        (Interaction::List, RouteShape::Collection { kind }) => entities::list(state, kind).await,
        (Interaction::Create, RouteShape::Collection { kind }) => {
            entities::create(state, kind, body).await
        }
        (Interaction::Read, RouteShape::Item { kind, id }) => entities::read(state, kind, &id).await,
        (Interaction::Amend, RouteShape::Item { kind, id }) => {
            entities::amend(state, kind, &id, body).await
        }
        (Interaction::Replace, RouteShape::Item { kind, id }) => {
            entities::replace(state, kind, &id, body).await
        }
        (Interaction::Delete, RouteShape::Item { kind, id }) => {
            entities::delete(state, kind, &id).await
        }
        (Interaction::ListRelated, RouteShape::SubCollection { relation, id }) => {
            relationships::list_related(state, relation, &id).await
        }
        (Interaction::Link, RouteShape::SubCollection { relation, id }) => {
            relationships::link(state, relation, &id, body).await
        }
        (
            Interaction::Unlink,
            RouteShape::RelationshipItem {
                relation,
                id,
                target_id,
            },
        ) => relationships::unlink(state, relation, &id, &target_id).await,
        (interaction, shape) => Err(RestError::InternalError {
            message: format!("{:?} is not served on {}", interaction, shape.path()),
        }),
    }
}
