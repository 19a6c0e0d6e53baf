//! Timestamps and the clock used to stamp client-created records.
//!
//! The API exchanges ISO-8601 / RFC 3339 strings (`2024-05-01T12:00:00.000Z`).

use chrono::{DateTime, Utc};

/// A UTC instant as exchanged with the API.
pub type Timestamp = DateTime<Utc>;

/// Source of the current time.
///
/// Production code uses [`SystemClock`]; tests inject a fixed clock so that
/// request bodies are deterministic.
pub trait Clock: Send + Sync {
    fn now(&self) -> Timestamp;
}

/// Wall-clock time.
#[derive(Clone, Copy, Debug, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> Timestamp {
        Utc::now()
    }
}
