//! Shared state injected into every handler.

use std::sync::Arc;

use crate::application::services::UrlRegistry;

/// Process-wide handles created once at startup.
#[derive(Clone)]
pub struct AppState {
    pub registry: Arc<UrlRegistry>,
}

impl AppState {
    pub fn new(registry: Arc<UrlRegistry>) -> Self {
        Self { registry }
    }
}
