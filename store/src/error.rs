//! Store error type.

/// Errors from talking to the map-editor backend.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    /// A configuration value is missing or invalid.
    #[error("config error: {0}")]
    Config(String),

    /// The underlying HTTP client could not be constructed.
    #[error("HTTP client build failed: {0}")]
    HttpClientBuild(String),

    /// The request could not be sent, or its body could not be read.
    #[error("request failed: {0}")]
    Request(String),

    /// The backend answered with a non-success status or `success: false`.
    #[error("backend rejected request: status {status}")]
    Rejected { status: u16, message: Option<String> },

    /// The response body could not be deserialized.
    #[error("response parse failed: {0}")]
    Parse(String),
}

impl StoreError {
    /// The backend-supplied `message`, when one was sent and is not blank.
    #[must_use]
    pub fn server_message(&self) -> Option<&str> {
        match self {
            Self::Rejected { message: Some(message), .. } if !message.trim().is_empty() => Some(message.as_str()),
            _ => None,
        }
    }

    /// Transport failures and 429/5xx responses may succeed when repeated.
    #[must_use]
    pub fn retryable(&self) -> bool {
        matches!(self, Self::Request(_) | Self::Rejected { status: 429 | 500..=599, .. })
    }
}
