use thiserror::Error;

/// Result type for augments operations
pub type Result<T> = std::result::Result<T, Error>;

/// Main error type for augments operations
#[derive(Error, Debug)]
pub enum Error {
    /// Configuration related errors
    #[error("Configuration error: {0}")]
    Config(String),

    /// Fetching remote content failed
    #[error("Fetch error: {0}")]
    Fetch(String),
}

impl Error {
    /// Creates a configuration error
    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config(msg.into())
    }

    /// Creates a fetch error
    pub fn fetch(msg: impl Into<String>) -> Self {
        Self::Fetch(msg.into())
    }
}
