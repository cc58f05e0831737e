//! Error types for the persistence layer.
//!
//! Errors are split by the component that raises them: the entity store
//! ([`ResourceError`]), the relationship index ([`RelationshipError`]) and the
//! validation engine ([`ValidationError`]). All of them fold into
//! [`StorageError`].

// Error enum variant fields are self-documenting via their #[error(...)] messages
#![allow(missing_docs)]

use std::fmt;

use thiserror::Error;

use crate::types::{EntityKind, FieldType, Relation};

/// The primary error type for all storage operations.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum StorageError {
    /// Entity store errors
    #[error(transparent)]
    Resource(#[from] ResourceError),

    /// Relationship index errors
    #[error(transparent)]
    Relationship(#[from] RelationshipError),

    /// Payload validation errors
    #[error(transparent)]
    Validation(#[from] ValidationError),
}

impl StorageError {
    /// Returns true if this error means something addressed does not exist.
    pub fn is_not_found(&self) -> bool {
        matches!(
            self,
            StorageError::Resource(_) | StorageError::Relationship(_)
        )
    }
}

/// Errors raised by the entity store.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ResourceError {
    /// No record of this kind has the given id.
    #[error("Could not find an instance with {kind}/{id}")]
    NotFound { kind: EntityKind, id: String },
}

/// Errors raised by the relationship index.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum RelationshipError {
    /// The record on the path side of the relation does not exist.
    #[error("Could not find parent thing for relationship {}/{id}/{}", .relation.source(), .relation.name())]
    ParentNotFound { relation: Relation, id: String },

    /// The record named in a link payload does not exist.
    #[error("Could not find thing matching value for id: {id}")]
    TargetNotFound { relation: Relation, id: String },

    /// No edge joins the two records.
    #[error("Could not find any instances with {}/{parent}/{}/{target}", .relation.source(), .relation.name())]
    EdgeNotFound {
        relation: Relation,
        parent: String,
        target: String,
    },
}

/// A single problem found in a request payload.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ValidationIssue {
    /// The field is not declared by the entity kind.
    #[error("Could not find field: {field}")]
    UnknownField { field: String },

    /// The field value has the wrong JSON type.
    #[error("Failed Validation: {field} should be {}", .expected.label())]
    WrongType { field: String, expected: FieldType },

    /// Identifiers are assigned by the store.
    #[error("Invalid Creation: Failed Validation: Not allowed to create with id")]
    IdOnCreate,

    /// An amend/replace body names a different id than the path.
    #[error("Failed Validation: Can not amend id from {expected} to {found}")]
    IdMismatch { expected: String, found: String },

    /// The body could not be read as a JSON object.
    #[error("Failed to parse request body: {message}")]
    MalformedBody { message: String },

    /// The body is not JSON at all.
    #[error("Unsupported content type: {content_type}")]
    UnsupportedContentType { content_type: String },
}

/// Validation failure: one or more issues with a payload.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationError {
    issues: Vec<ValidationIssue>,
}

impl ValidationError {
    /// Creates a validation error from a non-empty list of issues.
    pub fn new(issues: Vec<ValidationIssue>) -> Self {
        debug_assert!(!issues.is_empty());
        Self { issues }
    }

    /// Returns the individual issues.
    pub fn issues(&self) -> &[ValidationIssue] {
        &self.issues
    }

    /// Returns one human-readable message per issue.
    pub fn messages(&self) -> Vec<String> {
        self.issues.iter().map(ToString::to_string).collect()
    }
}

impl From<ValidationIssue> for ValidationError {
    fn from(issue: ValidationIssue) -> Self {
        Self {
            issues: vec![issue],
        }
    }
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let messages = self.messages();
        write!(f, "{}", messages.join("; "))
    }
}

impl std::error::Error for ValidationError {}

impl From<ValidationIssue> for StorageError {
    fn from(issue: ValidationIssue) -> Self {
        StorageError::Validation(issue.into())
    }
}

impl From<serde_json::Error> for ValidationIssue {
    fn from(err: serde_json::Error) -> Self {
        ValidationIssue::MalformedBody {
            message: err.to_string(),
        }
    }
}

/// Result type alias for storage operations.
pub type StorageResult<T> = Result<T, StorageError>;
