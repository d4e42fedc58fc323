//! Helpers shared by the registry and the HTTP layer.
//!
//! - [`code_generator`] - random short code generation
//! - [`url_validator`] - acceptance rules for submitted URLs

pub mod code_generator;
pub mod url_validator;
