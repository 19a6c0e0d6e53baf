//! Client side of the external evidence custody API.
//!
//! The API server owns all persistent state. This crate defines the contract
//! the rest of the workspace consumes ([`CustodyApi`]) and a reqwest-backed
//! implementation of it ([`HttpCustodyApi`]).
//!
//! Endpoints (JSON over HTTP):
//! - `POST /api/evidence`, `GET /api/evidence`
//! - `POST /api/access-requests`, `GET /api/access-requests`
//! - `POST /api/access-requests/{id}/approve`, `POST /api/access-requests/{id}/deny`

pub mod client;
pub mod config;
pub mod error;

pub use client::HttpCustodyApi;
pub use config::ClientConfig;
pub use error::ApiError;

use async_trait::async_trait;
use custody_types::{
    AccessRequest, Decision, DecisionBody, EvidenceRecord, NewAccessRequest, NewEvidence,
    RequestId,
};

/// The request/response contract of the custody API.
///
/// Implementations perform exactly one remote call per method and never
/// retry; failures are returned to the caller as [`ApiError`].
#[async_trait]
pub trait CustodyApi: Send + Sync {
    /// `POST /api/evidence`. Returns the stored record with its server id.
    async fn create_evidence(&self, evidence: &NewEvidence) -> Result<EvidenceRecord, ApiError>;

    /// `GET /api/evidence`, in server order.
    async fn list_evidence(&self) -> Result<Vec<EvidenceRecord>, ApiError>;

    /// `POST /api/access-requests`. Returns the stored request.
    async fn create_access_request(
        &self,
        request: &NewAccessRequest,
    ) -> Result<AccessRequest, ApiError>;

    /// `GET /api/access-requests`, in server order.
    async fn list_access_requests(&self) -> Result<Vec<AccessRequest>, ApiError>;

    /// `POST /api/access-requests/{id}/approve` or `.../deny`.
    async fn decide_access_request(
        &self,
        id: &RequestId,
        decision: Decision,
        body: &DecisionBody,
    ) -> Result<(), ApiError>;
}
