//! Fallback for paths no route matches.

use axum::http::Uri;

use crate::error::RestError;

/// Every unmatched path is 404, whatever the method.
pub async fn fallback_handler(uri: Uri) -> RestError {
    RestError::no_instances_at(uri.path())
}
