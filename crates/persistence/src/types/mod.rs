//! Core types for the persistence layer.
//!
//! - [`EntityKind`], [`FieldSpec`], [`FieldValue`], [`EntityId`] - the data model
//! - [`Relation`], [`EdgeSet`] - relationship declarations
//! - [`Payload`], [`FieldSet`], [`WriteMode`] - request bodies and validated fields
//! - [`StoredEntity`] - a record snapshot as returned by storage
//!
//! # Example
//!
//! ```
//! use todo_persistence::types::{EntityKind, FieldSet, FieldValue};
//!
//! let fields = FieldSet::empty(EntityKind::Project).with("title", "Office Work");
//! let values = fields.into_values();
//!
//! assert_eq!(values[0], FieldValue::from("Office Work"));
//! assert_eq!(values[2], FieldValue::Flag(false));
//! ```

mod entity;
mod payload;
mod relation;
mod stored_entity;

pub use entity::{EntityId, EntityKind, FieldSpec, FieldType, FieldValue};
pub use payload::{FieldSet, Payload, WriteMode};
pub use relation::{EdgeSet, Relation};
pub use stored_entity::StoredEntity;
