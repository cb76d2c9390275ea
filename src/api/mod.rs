//! JSON API layer.
//!
//! Translates HTTP requests into [`crate::application::services`] calls and
//! formats responses according to the API contract.
//!
//! # Modules
//!
//! - [`dto`] - Request/response bodies
//! - [`handlers`] - HTTP request handlers
//! - [`middleware`] - Request tracing
//! - [`routes`] - Route configuration

pub mod dto;
pub mod handlers;
pub mod middleware;
pub mod routes;
