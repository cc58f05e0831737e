//! Relationship interaction handlers.
//!
//! - `GET /{entity}/{id}/{relation}` - records linked through the relation
//! - `POST /{entity}/{id}/{relation}` - link an existing record (`{"id": "2"}`)
//!   or create a new one from the body and link it
//! - `DELETE /{entity}/{id}/{relation}/{target_id}` - remove one edge

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
};
use todo_persistence::core::RelationshipStorage;
use todo_persistence::error::RelationshipError;
use todo_persistence::types::Relation;
use todo_persistence::validation::LinkRequest;
use tracing::debug;

use crate::error::{RestError, RestResult};
use crate::extractors::EntityBody;
use crate::responses;
use crate::state::AppState;

/// Lists the records linked to `id`, wrapped under the target's plural.
///
/// A missing source record yields an empty list.
pub async fn list_related<S>(state: &AppState<S>, relation: Relation, id: &str) -> RestResult<Response>
where
    S: RelationshipStorage,
{
    let records = state.storage().related(relation, id).await?;
    debug!(relation = %relation, id = %id, count = records.len(), "Listing related entities");
    Ok(responses::entity_list(relation.target().plural(), &records))
}

/// Links a record to `id`, creating it first when the body carries no `id`.
pub async fn link<S>(
    state: &AppState<S>,
    relation: Relation,
    id: &str,
    body: &EntityBody,
) -> RestResult<Response>
where
    S: RelationshipStorage,
{
    if !state.storage().exists(relation.source(), id).await? {
        return Err(RestError::not_found(
            RelationshipError::ParentNotFound {
                relation,
                id: id.to_string(),
            }
            .to_string(),
        ));
    }

    let payload = body.payload()?;
    let target = match LinkRequest::from_payload(relation.target(), &payload)? {
        LinkRequest::Existing(target_id) => {
            state.storage().link(relation, id, &target_id).await?
        }
        LinkRequest::Create(fields) => state.storage().link_new(relation, id, fields).await?,
    };

    debug!(relation = %relation, id = %id, target = %target.url(), "Linked entity");
    Ok(responses::entity(StatusCode::CREATED, &target))
}

/// Removes the edge between `id` and `target_id`.
pub async fn unlink<S>(
    state: &AppState<S>,
    relation: Relation,
    id: &str,
    target_id: &str,
) -> RestResult<Response>
where
    S: RelationshipStorage,
{
    state.storage().unlink(relation, id, target_id).await?;
    debug!(relation = %relation, id = %id, target_id = %target_id, "Unlinked entity");
    Ok(StatusCode::OK.into_response())
}
