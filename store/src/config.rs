//! Backend connection settings.

use crate::error::StoreError;

pub const DEFAULT_REQUEST_TIMEOUT_SECS: u64 = 30;
pub const DEFAULT_CONNECT_TIMEOUT_SECS: u64 = 10;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StoreTimeouts {
    pub request_secs: u64,
    pub connect_secs: u64,
}

impl Default for StoreTimeouts {
    fn default() -> Self {
        Self { request_secs: DEFAULT_REQUEST_TIMEOUT_SECS, connect_secs: DEFAULT_CONNECT_TIMEOUT_SECS }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoreConfig {
    /// API root, without a trailing slash.
    pub base_url: String,
    /// Bearer token sent on every request when present.
    pub token: Option<String>,
    pub timeouts: StoreTimeouts,
}

impl StoreConfig {
    /// Validate and normalize connection settings.
    ///
    /// A blank token is treated as absent.
    ///
    /// # Errors
    ///
    /// `Config` when the base URL is blank or is not http(s).
    pub fn new(base_url: &str, token: Option<String>, timeouts: StoreTimeouts) -> Result<Self, StoreError> {
        let base_url = base_url.trim().trim_end_matches('/');
        if base_url.is_empty() {
            return Err(StoreError::Config("base URL is empty".into()));
        }
        if !(base_url.starts_with("http://") || base_url.starts_with("https://")) {
            return Err(StoreError::Config(format!("base URL must be http(s): {base_url}")));
        }
        let token = token.map(|t| t.trim().to_owned()).filter(|t| !t.is_empty());
        Ok(Self { base_url: base_url.to_owned(), token, timeouts })
    }
}

#[cfg(test)]
#[path = "config_test.rs"]
mod tests;
