//! Request body extractor.
//!
//! Buffers the body without interpreting it, so handlers can check that the
//! addressed record exists before a malformed body turns into a 400.

use axum::{
    body::Bytes,
    extract::{FromRequest, Request},
    http::{StatusCode, header},
};
use todo_persistence::error::ValidationIssue;
use todo_persistence::types::Payload;

use crate::error::RestError;

/// Axum extractor for an entity request body.
///
/// # Example
///
/// ```rust,ignore
/// use todo_rest::extractors::EntityBody;
///
/// async fn handler(body: EntityBody) {
///     let payload = body.payload()?;
/// }
/// ```
#[derive(Debug, Clone, Default)]
pub struct EntityBody {
    content_type: Option<String>,
    bytes: Bytes,
}

impl EntityBody {
    /// Creates a body from its parts.
    pub fn new(content_type: Option<&str>, bytes: impl Into<Bytes>) -> Self {
        Self {
            content_type: content_type.map(str::to_string),
            bytes: bytes.into(),
        }
    }

    /// Returns the declared content type, if any.
    pub fn content_type(&self) -> Option<&str> {
        self.content_type.as_deref()
    }

    /// Returns the raw bytes.
    pub fn bytes(&self) -> &Bytes {
        &self.bytes
    }

    /// Parses the body as a JSON object.
    ///
    /// A missing content type is read as JSON; any other non-JSON type is
    /// rejected without looking at the bytes.
    pub fn payload(&self) -> Result<Payload, ValidationIssue> {
        if let Some(content_type) = self.content_type.as_deref()
            && !is_json(content_type)
        {
            return Err(ValidationIssue::UnsupportedContentType {
                content_type: content_type.to_string(),
            });
        }
        Payload::from_slice(&self.bytes)
    }
}

fn is_json(content_type: &str) -> bool {
    let essence = content_type
        .split(';')
        .next()
        .unwrap_or_default()
        .trim()
        .to_ascii_lowercase();
    essence == "application/json" || essence == "text/json" || essence.ends_with("+json")
}

impl<S> FromRequest<S> for EntityBody
where
    S: Send + Sync,
{
    type Rejection = RestError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        // Check content type (must own the string before moving req)
        let content_type = req
            .headers()
            .get(header::CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
            .map(str::to_string);

        let bytes = Bytes::from_request(req, state)
            .await
            .map_err(|rejection| {
                if rejection.status() == StatusCode::PAYLOAD_TOO_LARGE {
                    RestError::PayloadTooLarge {
                        message: rejection.body_text(),
                    }
                } else {
                    RestError::bad_request(rejection.body_text())
                }
            })?;

        Ok(Self {
            content_type,
            bytes,
        })
    }
}
