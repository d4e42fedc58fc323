//! Domain layer: the URL record model, the storage contract, and the time source.
//!
//! - [`entities`] - [`entities::UrlRecord`] and its explicit constructor
//! - [`repositories`] - the [`repositories::UrlRepository`] storage trait
//! - [`clock`] - injectable wall clock used when records are created
//!
//! Nothing here depends on HTTP or on a concrete database. The registry in
//! [`crate::application::services`] drives these types; backends live in
//! [`crate::infrastructure::persistence`].

pub mod clock;
pub mod entities;
pub mod repositories;
