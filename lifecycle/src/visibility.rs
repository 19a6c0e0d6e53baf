//! Actor-scoped views over fetched collections.
//!
//! These functions do no I/O and never reorder: the output is the input with
//! invisible entries removed.

use custody_policy::may_view;
use custody_types::{AccessRequest, Actor, ActorId, EvidenceId, EvidenceRecord};
use std::collections::HashMap;

/// An access request paired with the evidence it references, when known.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct VisibleRequest<'a> {
    pub request: &'a AccessRequest,
    pub evidence: Option<&'a EvidenceRecord>,
}

impl VisibleRequest<'_> {
    /// Filename to display for the request; `None` for case-only requests.
    pub fn evidence_filename(&self) -> Option<&str> {
        self.evidence.map(|e| e.original_filename.as_str())
    }
}

fn index_evidence(evidence: &[EvidenceRecord]) -> HashMap<&EvidenceId, &EvidenceRecord> {
    evidence.iter().map(|e| (&e.id, e)).collect()
}

fn owner<'a>(
    index: &HashMap<&EvidenceId, &'a EvidenceRecord>,
    request: &AccessRequest,
) -> Option<&'a ActorId> {
    request
        .evidence_id
        .as_ref()
        .and_then(|id| index.get(id).copied())
        .map(|e| &e.uploaded_by)
}

/// Requests `actor` may see, in input order.
///
/// - investigator: requests whose referenced evidence they uploaded
/// - analyst: requests they submitted
/// - prosecutor, judge, admin: everything
pub fn list_visible_requests<'a>(
    actor: &Actor,
    requests: &'a [AccessRequest],
    evidence: &[EvidenceRecord],
) -> Vec<&'a AccessRequest> {
    let index = index_evidence(evidence);
    requests
        .iter()
        .filter(|r| may_view(actor, r, owner(&index, r)))
        .collect()
}

/// Like [`list_visible_requests`], with each request's evidence attached.
pub fn visible_with_evidence<'a>(
    actor: &Actor,
    requests: &'a [AccessRequest],
    evidence: &'a [EvidenceRecord],
) -> Vec<VisibleRequest<'a>> {
    let index = index_evidence(evidence);
    requests
        .iter()
        .filter(|r| may_view(actor, r, owner(&index, r)))
        .map(|request| VisibleRequest {
            request,
            evidence: request
                .evidence_id
                .as_ref()
                .and_then(|id| index.get(id).copied()),
        })
        .collect()
}
