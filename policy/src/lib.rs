//! Role resolver for evidence custody.
//!
//! Every authorization decision in the workspace goes through one table,
//! [`capabilities::POLICY_TABLE`]. Visibility ("who can see") and decision
//! rights ("who can act") are both derived from it so the two cannot drift.

pub mod authorize;
pub mod capabilities;
pub mod error;

pub use authorize::{may_decide, may_submit_evidence, may_view};
pub use capabilities::{
    capabilities_for, policy_for, resolve, ApprovalScope, Capabilities, RolePolicy, ViewScope,
};
pub use error::PolicyError;
