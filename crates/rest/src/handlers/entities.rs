//! Entity interaction handlers.
//!
//! Implements the collection and item interactions:
//!
//! | Interaction | Request | Success |
//! |-------------|---------|---------|
//! | list | `GET /{entity}` | 200 `{"<plural>": [...]}` |
//! | create | `POST /{entity}` | 201 record, `Location` |
//! | read | `GET /{entity}/{id}` | 200 `{"<plural>": [record]}` |
//! | amend | `POST /{entity}/{id}` | 200 record |
//! | replace | `PUT /{entity}/{id}` | 200 record |
//! | delete | `DELETE /{entity}/{id}` | 200, empty body |

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
};
use todo_persistence::StorageError;
use todo_persistence::core::EntityStorage;
use todo_persistence::types::{EntityId, EntityKind, WriteMode};
use todo_persistence::validation::validate_fields;
use tracing::debug;

use crate::error::{RestError, RestResult};
use crate::extractors::EntityBody;
use crate::responses;
use crate::state::AppState;

/// Lists every record of a kind in creation order.
pub async fn list<S>(state: &AppState<S>, kind: EntityKind) -> RestResult<Response>
where
    S: EntityStorage,
{
    let records = state.storage().list(kind).await?;
    debug!(kind = %kind, count = records.len(), "Listing entities");
    Ok(responses::entity_list(kind.plural(), &records))
}

/// Creates a record from the body. Identifiers are assigned by the store.
pub async fn create<S>(state: &AppState<S>, kind: EntityKind, body: &EntityBody) -> RestResult<Response>
where
    S: EntityStorage,
{
    let payload = body.payload()?;
    let fields = validate_fields(kind, &payload, WriteMode::Create, None)?;
    let created = state.storage().create(fields).await?;

    debug!(url = %created.url(), "Created entity");
    Ok(responses::created(&created))
}

/// Reads one record.
pub async fn read<S>(state: &AppState<S>, kind: EntityKind, id: &str) -> RestResult<Response>
where
    S: EntityStorage,
{
    let record = state
        .storage()
        .get(kind, id)
        .await
        .map_err(|err| or_not_found(err, || RestError::instance_not_found(kind, id)))?;

    debug!(url = %record.url(), "Returning entity");
    Ok(responses::entity_list(kind.plural(), std::slice::from_ref(&record)))
}

/// Merges the body onto a record (POST).
pub async fn amend<S>(state: &AppState<S>, kind: EntityKind, id: &str, body: &EntityBody) -> RestResult<Response>
where
    S: EntityStorage,
{
    write(state, kind, id, body, WriteMode::Amend).await
}

/// Overwrites a record with the body (PUT).
pub async fn replace<S>(state: &AppState<S>, kind: EntityKind, id: &str, body: &EntityBody) -> RestResult<Response>
where
    S: EntityStorage,
{
    write(state, kind, id, body, WriteMode::Replace).await
}

async fn write<S>(
    state: &AppState<S>,
    kind: EntityKind,
    id: &str,
    body: &EntityBody,
    mode: WriteMode,
) -> RestResult<Response>
where
    S: EntityStorage,
{
    // Existence first: a missing record is 404 even when the body is unusable.
    if !state.storage().exists(kind, id).await? {
        return Err(RestError::no_such_instance(kind, id));
    }

    let payload = body.payload()?;
    let fields = validate_fields(kind, &payload, mode, EntityId::parse(id))?;

    let storage = state.storage();
    let result = match mode {
        WriteMode::Replace => storage.replace(kind, id, fields).await,
        WriteMode::Amend | WriteMode::Create => storage.update(kind, id, fields).await,
    };
    let record = result.map_err(|err| or_not_found(err, || RestError::no_such_instance(kind, id)))?;

    debug!(url = %record.url(), ?mode, "Updated entity");
    Ok(responses::entity(StatusCode::OK, &record))
}

/// Deletes a record and every relationship naming it.
pub async fn delete<S>(state: &AppState<S>, kind: EntityKind, id: &str) -> RestResult<Response>
where
    S: EntityStorage,
{
    state.storage().delete(kind, id).await.map_err(|err| {
        or_not_found(err, || {
            RestError::no_instances_at(&format!("{}/{}", kind.plural(), id))
        })
    })?;

    debug!(kind = %kind, id = %id, "Deleted entity");
    Ok(StatusCode::OK.into_response())
}

fn or_not_found(err: StorageError, not_found: impl FnOnce() -> RestError) -> RestError {
    if err.is_not_found() {
        not_found()
    } else {
        err.into()
    }
}
