//! Response bodies for entity interactions.

use std::collections::BTreeMap;

use axum::{
    Json,
    body::Body,
    http::{StatusCode, header},
    response::{IntoResponse, Response},
};
use todo_persistence::types::StoredEntity;

/// 200 with the records wrapped under a plural key, e.g. `{"todos": [...]}`.
pub fn entity_list(plural: &str, records: &[StoredEntity]) -> Response {
    let body = BTreeMap::from([(plural, records)]);
    (StatusCode::OK, Json(body)).into_response()
}

/// A single record as a bare object.
pub fn entity(status: StatusCode, record: &StoredEntity) -> Response {
    (status, Json(record)).into_response()
}

/// 201 with the new record and its `Location`.
pub fn created(record: &StoredEntity) -> Response {
    (
        StatusCode::CREATED,
        [(header::LOCATION, format!("/{}", record.url()))],
        Json(record),
    )
        .into_response()
}

/// Drops the body of a response, keeping status and headers.
pub fn without_body(response: Response) -> Response {
    let (parts, _) = response.into_parts();
    Response::from_parts(parts, Body::empty())
}

#[cfg(test)]
mod tests {
    use super::*;
    use todo_persistence::types::{EntityId, EntityKind, FieldValue};

    fn category() -> StoredEntity {
        StoredEntity::new(
            EntityKind::Category,
            EntityId::new(3),
            vec![FieldValue::from("ECSE 429"), FieldValue::from("")],
        )
    }

    #[test]
    fn test_created_sets_location() {
        let response = created(&category());
        assert_eq!(response.status(), StatusCode::CREATED);
        assert_eq!(response.headers()[header::LOCATION], "/categories/3");
    }

    #[test]
    fn test_without_body_keeps_headers() {
        let response = without_body(entity_list("categories", &[category()]));
        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(
            response.headers()[header::CONTENT_TYPE],
            "application/json"
        );
    }
}
