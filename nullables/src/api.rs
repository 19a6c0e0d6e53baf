//! Nullable custody API: an in-memory stand-in for the HTTP server.
//!
//! Behaves like the real server for the operations the client uses: assigns
//! sequential ids, stamps records with the null clock, starts evidence in
//! `pending` chain status and applies approve/deny by overwriting the status.
//! Like the real server it does no authorization; that is the client's job.

use crate::clock::NullClock;
use async_trait::async_trait;
use custody_api::{ApiError, CustodyApi};
use custody_types::{
    AccessRequest, BlockchainStatus, Clock, Decision, DecisionBody, EvidenceId, EvidenceRecord,
    NewAccessRequest, NewEvidence, RequestId, RequestStatus,
};
use std::sync::Mutex;

/// One call received by [`NullCustodyApi`], for assertions.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ApiCall {
    CreateEvidence(NewEvidence),
    ListEvidence,
    CreateAccessRequest(NewAccessRequest),
    ListAccessRequests,
    Decide {
        id: RequestId,
        decision: Decision,
        body: DecisionBody,
    },
}

/// Which calls a queued failure applies to.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum FailOn {
    AnyCall,
    Read,
}

/// A test API that keeps records in memory instead of calling a server.
/// Thread-safe for use with tokio's multi-threaded runtime.
pub struct NullCustodyApi {
    clock: NullClock,
    evidence: Mutex<Vec<EvidenceRecord>>,
    requests: Mutex<Vec<AccessRequest>>,
    calls: Mutex<Vec<ApiCall>>,
    next_id: Mutex<u64>,
    /// Failures to return, in order, before normal service resumes.
    failures: Mutex<Vec<(FailOn, ApiError)>>,
}

impl NullCustodyApi {
    pub fn new() -> Self {
        Self::with_clock(NullClock::default())
    }

    pub fn with_clock(clock: NullClock) -> Self {
        Self {
            clock,
            evidence: Mutex::new(Vec::new()),
            requests: Mutex::new(Vec::new()),
            calls: Mutex::new(Vec::new()),
            next_id: Mutex::new(1),
            failures: Mutex::new(Vec::new()),
        }
    }

    /// The clock used for server-side timestamps.
    pub fn clock(&self) -> &NullClock {
        &self.clock
    }

    /// Make the next call fail with `error`. Queued failures are consumed in order.
    pub fn fail_next(&self, error: ApiError) {
        self.failures.lock().unwrap().push((FailOn::AnyCall, error));
    }

    /// Make the next list call fail with `error`; creates and decisions are unaffected.
    pub fn fail_next_read(&self, error: ApiError) {
        self.failures.lock().unwrap().push((FailOn::Read, error));
    }

    /// Insert a record as if another client had created it.
    pub fn seed_evidence(&self, record: EvidenceRecord) {
        self.evidence.lock().unwrap().push(record);
    }

    /// Insert a request as if another client had created it.
    pub fn seed_request(&self, request: AccessRequest) {
        self.requests.lock().unwrap().push(request);
    }

    /// Simulate the chain confirming (or failing) an evidence anchor.
    pub fn set_blockchain_status(&self, id: &EvidenceId, status: BlockchainStatus) {
        if let Some(record) = self
            .evidence
            .lock()
            .unwrap()
            .iter_mut()
            .find(|r| &r.id == id)
        {
            record.blockchain_status = status;
        }
    }

    /// Current server-side copy of a request.
    pub fn request(&self, id: &RequestId) -> Option<AccessRequest> {
        self.requests
            .lock()
            .unwrap()
            .iter()
            .find(|r| &r.id == id)
            .cloned()
    }

    /// All calls received so far (for assertions).
    pub fn calls(&self) -> Vec<ApiCall> {
        self.calls.lock().unwrap().clone()
    }

    /// Number of mutating calls received so far.
    pub fn mutation_count(&self) -> usize {
        self.calls
            .lock()
            .unwrap()
            .iter()
            .filter(|c| !matches!(c, ApiCall::ListEvidence | ApiCall::ListAccessRequests))
            .count()
    }

    fn record(&self, call: ApiCall) -> Result<(), ApiError> {
        let is_read = matches!(call, ApiCall::ListEvidence | ApiCall::ListAccessRequests);
        self.calls.lock().unwrap().push(call);
        let mut failures = self.failures.lock().unwrap();
        match failures
            .iter()
            .position(|(on, _)| *on == FailOn::AnyCall || (is_read && *on == FailOn::Read))
        {
            Some(pos) => Err(failures.remove(pos).1),
            None => Ok(()),
        }
    }

    fn allocate_id(&self, prefix: &str) -> String {
        let mut next = self.next_id.lock().unwrap();
        let id = format!("{prefix}-{}", *next);
        *next += 1;
        id
    }
}

impl Default for NullCustodyApi {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl CustodyApi for NullCustodyApi {
    async fn create_evidence(&self, evidence: &NewEvidence) -> Result<EvidenceRecord, ApiError> {
        self.record(ApiCall::CreateEvidence(evidence.clone()))?;
        let record = EvidenceRecord {
            id: EvidenceId::new(self.allocate_id("ev")),
            hash: evidence.hash.to_string(),
            original_filename: evidence.original_filename.clone(),
            case_id: evidence.case_id.clone(),
            description: evidence.description.clone(),
            location: evidence.location.clone(),
            timestamp: evidence.timestamp,
            uploaded_by: evidence.uploaded_by.clone(),
            blockchain_status: BlockchainStatus::Pending,
            tx_hash: None,
            file_size: evidence.file_size,
            file_type: evidence.file_type.clone(),
            mime_type: Some(evidence.mime_type.clone()),
            ipfs_cid: evidence.ipfs_cid.clone(),
            metadata_cid: None,
            owner_wallet: None,
            tags: evidence.tags.clone(),
        };
        self.evidence.lock().unwrap().push(record.clone());
        Ok(record)
    }

    async fn list_evidence(&self) -> Result<Vec<EvidenceRecord>, ApiError> {
        self.record(ApiCall::ListEvidence)?;
        Ok(self.evidence.lock().unwrap().clone())
    }

    async fn create_access_request(
        &self,
        request: &NewAccessRequest,
    ) -> Result<AccessRequest, ApiError> {
        self.record(ApiCall::CreateAccessRequest(request.clone()))?;
        let stored = AccessRequest {
            id: RequestId::new(self.allocate_id("req")),
            evidence_id: request.evidence_id.clone(),
            case_id: request.case_id.clone(),
            requested_by: request.requested_by.clone(),
            reason: request.reason.clone(),
            justification: request.justification.clone(),
            request_type: request.request_type,
            status: RequestStatus::Pending,
            timestamp: self.clock.now(),
            approved_by: None,
            approval_timestamp: None,
        };
        self.requests.lock().unwrap().push(stored.clone());
        Ok(stored)
    }

    async fn list_access_requests(&self) -> Result<Vec<AccessRequest>, ApiError> {
        self.record(ApiCall::ListAccessRequests)?;
        Ok(self.requests.lock().unwrap().clone())
    }

    async fn decide_access_request(
        &self,
        id: &RequestId,
        decision: Decision,
        body: &DecisionBody,
    ) -> Result<(), ApiError> {
        self.record(ApiCall::Decide {
            id: id.clone(),
            decision,
            body: body.clone(),
        })?;
        let mut requests = self.requests.lock().unwrap();
        let request = requests
            .iter_mut()
            .find(|r| &r.id == id)
            .ok_or_else(|| ApiError::Status {
                status: 404,
                message: "Access request not found".into(),
            })?;
        request.status = decision.status();
        request.approved_by = Some(body.approved_by.clone());
        request.approval_timestamp = Some(self.clock.now());
        Ok(())
    }
}
