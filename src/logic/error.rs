use thiserror::Error;

/// Failure of a request to the Wake-on-LAN server.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ApiError {
    /// The server answered with a non-success status and a reason meant for the user.
    #[error("server rejected the request ({status}): {reason}")]
    Rejected { status: u16, reason: String },
    /// The request did not complete or the response could not be decoded.
    #[error("request failed: {0}")]
    Transport(String),
}

impl From<reqwest::Error> for ApiError {
    fn from(err: reqwest::Error) -> Self {
        ApiError::Transport(err.to_string())
    }
}

impl From<serde_json::Error> for ApiError {
    fn from(err: serde_json::Error) -> Self {
        ApiError::Transport(format!("malformed response: {err}"))
    }
}

pub type Result<T> = std::result::Result<T, ApiError>;
