//! Link store implementations.
//!
//! - [`PgLinkRepository`] - PostgreSQL via SQLx, used by the server and CLI
//! - [`MemoryLinkRepository`] - process-local map, used by tests and local demos

pub mod memory_link_repository;
pub mod pg_link_repository;

pub use memory_link_repository::MemoryLinkRepository;
pub use pg_link_repository::PgLinkRepository;
