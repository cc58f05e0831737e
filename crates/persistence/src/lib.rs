//! Todo Manager Persistence Layer
//!
//! This crate holds the records of the todo manager: todos, projects and
//! categories, the many-to-many relationships between them, and the
//! validation of request payloads before they reach storage.
//!
//! # Architecture
//!
//! - [`types`] - Entity kinds, field declarations, relations, payloads and stored records
//! - [`validation`] - Payload checking that collects every issue
//! - [`error`] - Error types for all operations
//! - [`core`] - Storage traits
//! - [`backends`] - Backend implementations
//!
//! # Quick Start
//!
//! ```
//! use todo_persistence::backends::memory::InMemoryBackend;
//! use todo_persistence::core::{EntityStorage, RelationshipStorage};
//! use todo_persistence::types::{EntityKind, Payload, Relation, WriteMode};
//! use todo_persistence::validation::validate_fields;
//!
//! # tokio_test::block_on(async {
//! let storage = InMemoryBackend::with_sample_data();
//!
//! let payload = Payload::from_slice(br#"{"title": "ECSE 429"}"#)?;
//! let fields = validate_fields(EntityKind::Category, &payload, WriteMode::Create, None)?;
//! let category = storage.create(fields).await?;
//! assert_eq!(category.url(), "categories/3");
//!
//! storage.link(Relation::CategoryTodos, "3", "2").await?;
//! let todos = storage.related(Relation::CategoryTodos, "3").await?;
//! assert_eq!(todos[0].text("title"), Some("file paperwork"));
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! # }).unwrap();
//! ```
//!
//! # Relationships
//!
//! Edges are undirected. Each edge set is reachable from both endpoint kinds
//! under its own route name; see [`types::Relation`].

pub mod backends;
pub mod core;
pub mod error;
pub mod types;
pub mod validation;

pub use error::{StorageError, StorageResult};
