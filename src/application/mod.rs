//! Application layer services implementing business logic.
//!
//! Services consume repository traits and provide a clean API for HTTP
//! handlers and the admin CLI.
//!
//! # Available Services
//!
//! - [`services::url_registry::UrlRegistry`] - Idempotent short URL creation,
//!   click-tracked resolution, and read-only lookup

pub mod services;
