//! HTTP request handlers.
//!
//! - [`dispatch`] - Route-shape handlers that pick an interaction per method
//! - [`entities`] - List, create, read, amend, replace and delete
//! - [`relationships`] - List related, link and unlink
//! - [`health`] - Health check endpoint
//! - [`index`] - Service index
//! - [`shutdown`] - Remote shutdown
//! - [`fallback`] - 404 for unmatched paths

pub mod dispatch;
pub mod entities;
pub mod fallback;
pub mod health;
pub mod index;
pub mod relationships;
pub mod shutdown;

// Re-export handlers for convenience
pub use dispatch::{
    collection_handler, item_handler, relationship_item_handler, sub_collection_handler,
};
pub use fallback::fallback_handler;
pub use health::health_handler;
pub use index::index_handler;
pub use shutdown::shutdown_handler;
