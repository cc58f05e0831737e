//! Common test utilities for REST API testing.
//!
//! - [`harness`] - Test server over the in-memory backend
//! - [`fixtures`] - Request bodies
//! - [`assertions`] - HTTP response assertions

#![allow(dead_code)]

pub mod assertions;
pub mod fixtures;
pub mod harness;
