//! Error types for the fetch layer

use std::fmt;

/// Errors that can occur while fetching remote content
#[derive(Debug)]
pub enum FetchError {
    /// Transport failure or unexpected HTTP status
    Http(String),

    /// The response body could not be decoded
    Decode(String),

    /// Client construction or configuration error
    Config(String),
}

impl fmt::Display for FetchError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Http(msg) => write!(f, "HTTP request failed: {msg}"),
            Self::Decode(msg) => write!(f, "Failed to decode response: {msg}"),
            Self::Config(msg) => write!(f, "Configuration error: {msg}"),
        }
    }
}

impl std::error::Error for FetchError {}

impl From<FetchError> for augments_core::Error {
    fn from(err: FetchError) -> Self {
        match err {
            FetchError::Config(msg) => augments_core::Error::config(msg),
            other => augments_core::Error::fetch(other.to_string()),
        }
    }
}
