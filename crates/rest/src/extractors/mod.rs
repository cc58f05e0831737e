//! Axum extractors for the todo manager.
//!
//! - [`EntityBody`] - Buffered request body, parsed on demand

pub mod entity_body;

pub use entity_body::EntityBody;
