//! The last fetched view of the API's collections.

use custody_types::{AccessRequest, ActorId, EvidenceId, EvidenceRecord, RequestId};

/// Evidence and access requests as last returned by the API, in server order.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Snapshot {
    pub evidence: Vec<EvidenceRecord>,
    pub requests: Vec<AccessRequest>,
}

impl Snapshot {
    pub fn new(evidence: Vec<EvidenceRecord>, requests: Vec<AccessRequest>) -> Self {
        Self { evidence, requests }
    }

    pub fn evidence_by_id(&self, id: &EvidenceId) -> Option<&EvidenceRecord> {
        self.evidence.iter().find(|e| &e.id == id)
    }

    pub fn request_by_id(&self, id: &RequestId) -> Option<&AccessRequest> {
        self.requests.iter().find(|r| &r.id == id)
    }

    /// Uploader of the evidence `request` references, if it is in the snapshot.
    pub fn evidence_owner(&self, request: &AccessRequest) -> Option<&ActorId> {
        request
            .evidence_id
            .as_ref()
            .and_then(|id| self.evidence_by_id(id))
            .map(|e| &e.uploaded_by)
    }
}
