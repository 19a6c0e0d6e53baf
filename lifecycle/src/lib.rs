//! Access request lifecycle for evidence custody.
//!
//! An access request is created `pending` and moves exactly once to
//! `approved` or `denied`. Who may create evidence, see a request and decide
//! it is governed by the role table in `custody-policy`.
//!
//! All state lives behind the [`custody_api::CustodyApi`] contract. The
//! [`LifecycleManager`] keeps the last fetched [`Snapshot`] and refetches it
//! after every successful mutation; it never updates the snapshot optimistically.

pub mod browse;
pub mod error;
pub mod forms;
pub mod manager;
pub mod session;
pub mod snapshot;
pub mod stats;
pub mod visibility;

pub use browse::{unique_case_ids, EvidenceQuery};
pub use error::LifecycleError;
pub use forms::{AccessRequestForm, EvidenceSubmission};
pub use manager::LifecycleManager;
pub use session::Session;
pub use snapshot::Snapshot;
pub use stats::{dashboard_stats, Stat};
pub use visibility::{list_visible_requests, visible_with_evidence, VisibleRequest};
