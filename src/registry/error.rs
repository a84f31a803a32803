use thiserror::Error;

/// Failures a registry call can end in.
///
/// `Rejected` is the server saying no (`success: false`), `Transport` and
/// `Status` mean the request itself went wrong, `Malformed` means the body
/// could not be decoded.
#[derive(Debug, Error)]
pub enum ClientError {
    #[error("registry rejected the request")]
    Rejected,

    #[error("HTTP request failed: {0}")]
    Transport(String),

    #[error("Connection timeout")]
    Timeout,

    #[error("HTTP {status}: {reason}")]
    Status { status: u16, reason: String },

    #[error("malformed response: {0}")]
    Malformed(String),

    #[error("Invalid URL: {0}")]
    InvalidUrl(String),

    #[error("invalid IMEI: {0}")]
    InvalidImei(String),
}

impl ClientError {
    /// True when the server answered and said no, as opposed to the call
    /// failing on the way.
    pub fn is_rejection(&self) -> bool {
        matches!(self, ClientError::Rejected | ClientError::Status { .. })
    }
}

impl From<serde_json::Error> for ClientError {
    fn from(value: serde_json::Error) -> Self {
        ClientError::Malformed(value.to_string())
    }
}

impl From<reqwest::Error> for ClientError {
    fn from(value: reqwest::Error) -> Self {
        if value.is_timeout() {
            ClientError::Timeout
        } else if value.is_decode() {
            ClientError::Malformed(value.to_string())
        } else {
            ClientError::Transport(value.to_string())
        }
    }
}

pub type Result<T> = std::result::Result<T, ClientError>;
