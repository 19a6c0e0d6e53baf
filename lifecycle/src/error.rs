use custody_api::ApiError;
use custody_policy::PolicyError;
use custody_types::{ActorId, RequestId, RequestStatus, Role};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum LifecycleError {
    #[error("unknown role: {0}")]
    UnknownRole(String),

    #[error("{actor} ({role}) is not permitted to {action}")]
    Permission {
        actor: ActorId,
        role: Role,
        action: &'static str,
    },

    #[error("invalid input: {0}")]
    Validation(String),

    #[error("access request {id} has already been decided ({status})")]
    InvalidState { id: RequestId, status: RequestStatus },

    #[error("access request {0} not found")]
    RequestNotFound(RequestId),

    #[error("custody API call failed: {0}")]
    Transport(#[from] ApiError),

    /// The mutation was applied but refetching the snapshot afterwards failed.
    #[error("change applied but refresh failed: {0}")]
    StaleSnapshot(#[source] ApiError),
}

impl LifecycleError {
    /// Whether the caller can carry on in the same session.
    ///
    /// Only an unknown role is fatal: no policy can be applied to the actor.
    pub fn is_recoverable(&self) -> bool {
        !matches!(self, LifecycleError::UnknownRole(_))
    }
}

impl From<PolicyError> for LifecycleError {
    fn from(e: PolicyError) -> Self {
        match e {
            PolicyError::UnknownRole(name) => LifecycleError::UnknownRole(name),
        }
    }
}
