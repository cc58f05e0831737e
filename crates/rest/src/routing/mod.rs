//! Route configuration for the todo manager REST API.
//!
//! - [`shape`] - Route shapes and their method tables
//! - [`todo_routes`] - The axum router

pub mod shape;
pub mod todo_routes;

pub use shape::{Disposition, Interaction, RouteShape};
pub use todo_routes::create_routes;
