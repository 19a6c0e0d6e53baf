use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PolicyError {
    /// The role name is not one of the five known roles. No policy applies.
    #[error("unknown role: {0}")]
    UnknownRole(String),
}
