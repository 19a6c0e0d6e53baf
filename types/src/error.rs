//! Errors raised while parsing wire values into typed model values.

use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TypesError {
    #[error("unknown role: {0}")]
    UnknownRole(String),

    #[error("unknown request type: {0}")]
    UnknownRequestType(String),

    #[error("invalid content hash: {0}")]
    InvalidHash(String),
}
