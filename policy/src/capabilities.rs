//! The role-to-capability table.

use crate::error::PolicyError;
use custody_types::Role;
use serde::{Deserialize, Serialize};

/// Which access requests a role may list.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ViewScope {
    /// Requests against evidence the actor uploaded.
    OwnEvidence,
    /// Requests the actor submitted.
    OwnRequests,
    /// Every request.
    All,
}

/// Which access requests a role may approve or deny.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ApprovalScope {
    None,
    /// Only requests against evidence the actor uploaded.
    OwnEvidence,
    /// Any request (global oversight).
    Any,
}

/// One row of the policy table.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct RolePolicy {
    pub role: Role,
    pub submit_evidence: bool,
    pub view: ViewScope,
    pub approve: ApprovalScope,
}

/// Flattened capability flags for a role.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Capabilities {
    pub can_submit_evidence: bool,
    pub can_view_all_requests: bool,
    pub can_approve_own_evidence_requests: bool,
    pub can_approve_any_request: bool,
}

impl Capabilities {
    /// Whether the role may approve or deny at least some requests.
    pub fn can_decide(&self) -> bool {
        self.can_approve_own_evidence_requests || self.can_approve_any_request
    }
}

pub const POLICY_TABLE: [RolePolicy; 5] = [
    RolePolicy {
        role: Role::Investigator,
        submit_evidence: true,
        view: ViewScope::OwnEvidence,
        approve: ApprovalScope::OwnEvidence,
    },
    RolePolicy {
        role: Role::Analyst,
        submit_evidence: false,
        view: ViewScope::OwnRequests,
        approve: ApprovalScope::None,
    },
    RolePolicy {
        role: Role::Prosecutor,
        submit_evidence: false,
        view: ViewScope::All,
        approve: ApprovalScope::Any,
    },
    RolePolicy {
        role: Role::Judge,
        submit_evidence: false,
        view: ViewScope::All,
        approve: ApprovalScope::Any,
    },
    RolePolicy {
        role: Role::Admin,
        submit_evidence: true,
        view: ViewScope::All,
        approve: ApprovalScope::Any,
    },
];

/// Look up the table row for a role.
pub fn policy_for(role: Role) -> RolePolicy {
    // Role::ALL and POLICY_TABLE share the same order.
    POLICY_TABLE[role as usize]
}

/// Capability flags for a role.
pub fn capabilities_for(role: Role) -> Capabilities {
    let policy = policy_for(role);
    Capabilities {
        can_submit_evidence: policy.submit_evidence,
        can_view_all_requests: policy.view == ViewScope::All,
        can_approve_own_evidence_requests: policy.approve == ApprovalScope::OwnEvidence,
        can_approve_any_request: policy.approve == ApprovalScope::Any,
    }
}

/// Resolve a role by wire name and return its capabilities.
pub fn resolve(name: &str) -> Result<(Role, Capabilities), PolicyError> {
    let role: Role = name
        .parse()
        .map_err(|_| PolicyError::UnknownRole(name.to_string()))?;
    Ok((role, capabilities_for(role)))
}
