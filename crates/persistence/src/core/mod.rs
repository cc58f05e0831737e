//! Core storage traits.
//!
//! - [`EntityStorage`] - CRUD over the three entity kinds
//! - [`RelationshipStorage`] - linking, unlinking and traversal of relations
//!
//! ```text
//! EntityStorage
//!     └── RelationshipStorage
//! ```
//!
//! Identifiers are passed as the raw path segment (`&str`). Backends treat
//! anything that does not parse as an [`EntityId`](crate::types::EntityId)
//! as naming no record, so callers never need to pre-validate ids.

mod storage;

pub use storage::{EntityStorage, RelationshipStorage};
