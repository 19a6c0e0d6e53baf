use thiserror::Error;

#[derive(Debug, Error)]
pub enum ApiError {
    /// The server answered with a non-2xx status. `message` is the server's
    /// `error` field when present, else the status reason text.
    #[error("{message} (HTTP {status})")]
    Status { status: u16, message: String },

    #[error("HTTP request to custody API failed: {0}")]
    RequestFailed(String),

    #[error("invalid response from custody API: {0}")]
    InvalidResponse(String),

    #[error("custody API unreachable: {0}")]
    Unreachable(String),

    #[error("invalid client configuration: {0}")]
    Config(String),
}

impl ApiError {
    /// HTTP status code, if the server answered at all.
    pub fn status(&self) -> Option<u16> {
        match self {
            ApiError::Status { status, .. } => Some(*status),
            _ => None,
        }
    }
}

impl From<reqwest::Error> for ApiError {
    fn from(e: reqwest::Error) -> Self {
        if e.is_timeout() {
            ApiError::Unreachable(format!("request timed out: {e}"))
        } else if e.is_connect() {
            ApiError::Unreachable(format!("connection failed: {e}"))
        } else if e.is_decode() {
            ApiError::InvalidResponse(e.to_string())
        } else {
            ApiError::RequestFailed(e.to_string())
        }
    }
}
