//! Core domain entities.
//!
//! - [`UrlRecord`] - a stored mapping from short code to original URL
//! - [`NewUrlRecord`] - input for creating one, built from explicit inputs

pub mod url_record;

pub use url_record::{NewUrlRecord, UrlRecord};
