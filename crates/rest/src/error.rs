//! Error types for the todo manager REST API.
//!
//! Every error is rendered as a JSON body of the form
//! `{"errorMessages": ["..."]}`.
//!
//! # Error Mapping
//!
//! | Storage Error | HTTP Status |
//! |--------------|-------------|
//! | Resource(NotFound) | 404 |
//! | Relationship(ParentNotFound / TargetNotFound / EdgeNotFound) | 404 |
//! | Validation | 400 |

use axum::{
    Json,
    http::{HeaderValue, Method, StatusCode, header},
    response::{IntoResponse, Response},
};
use serde_json::json;
use thiserror::Error;
use todo_persistence::error::{StorageError, ValidationError, ValidationIssue};
use todo_persistence::types::EntityKind;

/// The primary error type for REST API operations.
#[derive(Debug, Error)]
pub enum RestError {
    /// Nothing at the addressed path (HTTP 404).
    #[error("{message}")]
    NotFound {
        /// Error message.
        message: String,
    },

    /// The request body was rejected (HTTP 400).
    #[error("{}", .messages.join("; "))]
    BadRequest {
        /// One message per problem found.
        messages: Vec<String>,
    },

    /// Method not allowed on this route shape (HTTP 405).
    #[error("Method {method} not allowed on {path}")]
    MethodNotAllowed {
        /// The method that was attempted.
        method: Method,
        /// The request path.
        path: String,
        /// Methods the route shape does accept.
        allow: Vec<Method>,
    },

    /// Request body exceeds the configured limit (HTTP 413).
    #[error("Request body too large: {message}")]
    PayloadTooLarge {
        /// Error message.
        message: String,
    },

    /// Internal server error (HTTP 500).
    #[error("Internal error: {message}")]
    InternalError {
        /// Error message.
        message: String,
    },
}

impl RestError {
    /// 404 with a single message.
    pub fn not_found(message: impl Into<String>) -> Self {
        RestError::NotFound {
            message: message.into(),
        }
    }

    /// 400 with a single message.
    pub fn bad_request(message: impl Into<String>) -> Self {
        RestError::BadRequest {
            messages: vec![message.into()],
        }
    }

    /// Item GET on a missing record.
    pub fn instance_not_found(kind: EntityKind, id: &str) -> Self {
        Self::not_found(format!("Could not find an instance with {}/{}", kind, id))
    }

    /// Item POST/PUT on a missing record.
    pub fn no_such_instance(kind: EntityKind, id: &str) -> Self {
        Self::not_found(format!(
            "No such {} entity instance with GUID or ID {} found",
            kind.singular(),
            id
        ))
    }

    /// DELETE or any lookup by path that matched nothing.
    pub fn no_instances_at(path: &str) -> Self {
        Self::not_found(format!(
            "Could not find any instances with {}",
            path.trim_start_matches('/')
        ))
    }

    /// Returns the HTTP status for this error.
    pub fn status(&self) -> StatusCode {
        match self {
            RestError::NotFound { .. } => StatusCode::NOT_FOUND,
            RestError::BadRequest { .. } => StatusCode::BAD_REQUEST,
            RestError::MethodNotAllowed { .. } => StatusCode::METHOD_NOT_ALLOWED,
            RestError::PayloadTooLarge { .. } => StatusCode::PAYLOAD_TOO_LARGE,
            RestError::InternalError { .. } => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Returns the messages placed in the `errorMessages` body.
    pub fn messages(&self) -> Vec<String> {
        match self {
            RestError::BadRequest { messages } => messages.clone(),
            other => vec![other.to_string()],
        }
    }
}

impl IntoResponse for RestError {
    fn into_response(self) -> Response {
        let status = self.status();
        let body = error_body(self.messages());
        let mut response = (status, Json(body)).into_response();

        if let RestError::MethodNotAllowed { allow, .. } = &self {
            let allow = allow
                .iter()
                .map(Method::as_str)
                .collect::<Vec<_>>()
                .join(", ");
            if let Ok(value) = HeaderValue::from_str(&allow) {
                response.headers_mut().insert(header::ALLOW, value);
            }
        }

        response
    }
}

/// Creates an `errorMessages` body.
pub fn error_body<I, M>(messages: I) -> serde_json::Value
where
    I: IntoIterator<Item = M>,
    M: Into<String>,
{
    let messages: Vec<String> = messages.into_iter().map(Into::into).collect();
    json!({ "errorMessages": messages })
}

// Implement conversions from storage errors

impl From<StorageError> for RestError {
    fn from(err: StorageError) -> Self {
        match err {
            StorageError::Resource(e) => RestError::not_found(e.to_string()),
            StorageError::Relationship(e) => RestError::not_found(e.to_string()),
            StorageError::Validation(e) => e.into(),
        }
    }
}

impl From<ValidationError> for RestError {
    fn from(err: ValidationError) -> Self {
        RestError::BadRequest {
            messages: err.messages(),
        }
    }
}

impl From<ValidationIssue> for RestError {
    fn from(issue: ValidationIssue) -> Self {
        RestError::bad_request(issue.to_string())
    }
}

/// Result type alias for REST operations.
pub type RestResult<T> = Result<T, RestError>;

#[cfg(test)]
mod tests {
    use super::*;
    use todo_persistence::error::{RelationshipError, ResourceError};
    use todo_persistence::types::Relation;

    #[test]
    fn test_not_found_messages() {
        assert_eq!(
            RestError::instance_not_found(EntityKind::Todo, "3").to_string(),
            "Could not find an instance with todos/3"
        );
        assert_eq!(
            RestError::no_such_instance(EntityKind::Todo, "3").to_string(),
            "No such todo entity instance with GUID or ID 3 found"
        );
        assert_eq!(
            RestError::no_instances_at("/todos/3").to_string(),
            "Could not find any instances with todos/3"
        );
    }

    #[test]
    fn test_storage_error_mapping() {
        let err: RestError = StorageError::from(ResourceError::NotFound {
            kind: EntityKind::Category,
            id: "9".to_string(),
        })
        .into();
        assert_eq!(err.status(), StatusCode::NOT_FOUND);

        let err: RestError = StorageError::from(RelationshipError::TargetNotFound {
            relation: Relation::TodoCategories,
            id: "10".to_string(),
        })
        .into();
        assert_eq!(err.messages(), vec!["Could not find thing matching value for id: 10"]);

        let err: RestError = StorageError::from(ValidationIssue::IdOnCreate).into();
        assert_eq!(err.status(), StatusCode::BAD_REQUEST);
    }

    #[test]
    fn test_validation_keeps_every_message() {
        let err: RestError = ValidationError::new(vec![
            ValidationIssue::UnknownField {
                field: "a".to_string(),
            },
            ValidationIssue::UnknownField {
                field: "b".to_string(),
            },
        ])
        .into();
        assert_eq!(err.messages().len(), 2);
    }

    #[test]
    fn test_method_not_allowed_sets_allow_header() {
        let response = RestError::MethodNotAllowed {
            method: Method::PUT,
            path: "/categories".to_string(),
            allow: vec![Method::GET, Method::HEAD, Method::POST],
        }
        .into_response();

        assert_eq!(response.status(), StatusCode::METHOD_NOT_ALLOWED);
        assert_eq!(response.headers()[header::ALLOW], "GET, HEAD, POST");
    }

    #[test]
    fn test_error_body() {
        assert_eq!(
            error_body(["x"]),
            json!({"errorMessages": ["x"]})
        );
    }
}
