//! Nullable infrastructure for deterministic testing.
//!
//! External dependencies (the wall clock and the custody API server) are
//! abstracted behind traits. This crate provides test-friendly implementations
//! that:
//! - Return deterministic values
//! - Can be controlled programmatically
//! - Never touch the network
//!
//! Usage: swap real implementations for nullables in tests.

pub mod api;
pub mod clock;

pub use api::{ApiCall, NullCustodyApi};
pub use clock::NullClock;
