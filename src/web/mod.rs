//! Web dashboard layer for browser-based UI.
//!
//! Server-rendered HTML pages built with Askama templates from `templates/`.
//!
//! # Modules
//!
//! - [`handlers`] - Template rendering handlers
//! - [`routes`] - Page route configuration
//! - [`view`] - Search, filter, sort and display formatting

pub mod handlers;
pub mod routes;
pub mod view;
