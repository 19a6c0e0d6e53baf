//! Actor-scoped checks derived from the policy table.
//!
//! `evidence_owner` is the uploader of the evidence a request references, as
//! found in the caller's snapshot. It is `None` for case-only requests and for
//! requests whose evidence is not in the snapshot; such requests are never
//! owned by an investigator and fall to the global-oversight roles.

use crate::capabilities::{policy_for, ApprovalScope, ViewScope};
use custody_types::{AccessRequest, Actor, ActorId, Role};

/// Whether the actor's role may submit evidence records.
pub fn may_submit_evidence(role: Role) -> bool {
    policy_for(role).submit_evidence
}

/// Whether `request` is visible to `actor`.
pub fn may_view(actor: &Actor, request: &AccessRequest, evidence_owner: Option<&ActorId>) -> bool {
    match policy_for(actor.role()).view {
        ViewScope::All => true,
        ViewScope::OwnRequests => &request.requested_by == actor.id(),
        ViewScope::OwnEvidence => evidence_owner == Some(actor.id()),
    }
}

/// Whether the actor may approve or deny a request whose evidence is owned by
/// `evidence_owner`. Status is not considered here.
pub fn may_decide(actor: &Actor, evidence_owner: Option<&ActorId>) -> bool {
    match policy_for(actor.role()).approve {
        ApprovalScope::None => false,
        ApprovalScope::Any => true,
        ApprovalScope::OwnEvidence => evidence_owner == Some(actor.id()),
    }
}
