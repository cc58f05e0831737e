//! Storage backend implementations.
//!
//! | Backend | Description |
//! |---------|-------------|
//! | [`memory`] | Process-local tables behind a single lock; contents are lost on exit |
//!
//! # Example
//!
//! ```
//! use todo_persistence::backends::memory::InMemoryBackend;
//! use todo_persistence::core::EntityStorage;
//!
//! // An empty store
//! let backend = InMemoryBackend::new();
//! assert_eq!(backend.backend_name(), "memory");
//!
//! // Or one seeded with the sample todos, project and categories
//! let backend = InMemoryBackend::with_sample_data();
//! ```

pub mod memory;
