//! Fundamental types for evidence custody.
//!
//! This crate defines the data model shared by every other crate in the workspace:
//! actors and their roles, evidence records, access requests, content hashes and
//! the clock used to stamp client-created records.

pub mod actor;
pub mod error;
pub mod evidence;
pub mod hash;
pub mod request;
pub mod time;

pub use actor::{Actor, ActorId, Role};
pub use error::TypesError;
pub use evidence::{BlockchainStatus, EvidenceId, EvidenceRecord, NewEvidence};
pub use hash::ContentHash;
pub use request::{
    AccessRequest, Decision, DecisionBody, NewAccessRequest, RequestId, RequestStatus, RequestType,
};
pub use time::{Clock, SystemClock, Timestamp};
