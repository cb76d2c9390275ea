//! Application layer services implementing business logic.
//!
//! Services coordinate repository calls with validation and business rules,
//! and give HTTP handlers and the admin CLI one shared API.
//!
//! # Available Services
//!
//! - [`services::link_service::LinkService`] - Create, list, get and delete links
//! - [`services::redirect_service::RedirectService`] - Resolve codes and count visits
//! - [`services::code_allocator::CodeAllocator`] - Pick free short codes

pub mod services;
