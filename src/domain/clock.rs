//! Wall-clock abstraction for record timestamps.

use chrono::{DateTime, Utc};

/// Source of the current time.
///
/// Injected into [`crate::application::services::UrlRegistry`] so that creation
/// timestamps are deterministic under test.
pub trait Clock: Send + Sync {
    fn now(&self) -> DateTime<Utc>;
}

/// [`Clock`] backed by the system time.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> DateTime<Utc> {
        Utc::now()
    }
}
