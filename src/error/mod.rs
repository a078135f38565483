use serde::Deserialize;
use std::fmt;

/// One error record from a Vantiq error response body.
///
/// The server reports failures as records carrying a stable error code, a
/// human-readable message, and the message's interpolation parameters.
#[derive(Debug, Clone, Deserialize)]
pub struct ApiError {
    pub code: String,
    pub message: String,
    #[serde(default)]
    pub params: Vec<serde_json::Value>,
}

/// Errors produced by Vantiq client calls.
#[derive(Debug)]
pub enum VantiqError {
    /// The request could not be completed (connect, send, or body decode).
    Http(reqwest::Error),
    /// The server answered with a non-2xx status, with whatever error
    /// records it included in the body.
    Server { status: u16, errors: Vec<ApiError> },
    /// An operation that requires a session was called before `authenticate`.
    NotAuthenticated,
}

impl VantiqError {
    /// HTTP status of a server-reported failure, if this is one.
    pub fn status(&self) -> Option<u16> {
        match self {
            VantiqError::Server { status, .. } => Some(*status),
            _ => None,
        }
    }
}

impl fmt::Display for VantiqError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            VantiqError::Http(e) => write!(f, "Vantiq request failed: {}", e),
            VantiqError::Server { status, errors } => {
                if errors.is_empty() {
                    write!(f, "Vantiq server error: status {}", status)
                } else {
                    let detail: Vec<String> = errors
                        .iter()
                        .map(|e| format!("{}: {}", e.code, e.message))
                        .collect();
                    write!(f, "Vantiq server error: status {} ({})", status, detail.join("; "))
                }
            }
            VantiqError::NotAuthenticated => {
                write!(f, "not authenticated: call authenticate() first")
            }
        }
    }
}

impl std::error::Error for VantiqError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            VantiqError::Http(e) => Some(e),
            _ => None,
        }
    }
}

impl From<reqwest::Error> for VantiqError {
    fn from(e: reqwest::Error) -> Self {
        VantiqError::Http(e)
    }
}
