//! Shared utilities for the custody client.

pub mod logging;

pub use logging::{init_logging, LogFormat, ParseLogFormatError};
