//! FTD client error types

use thiserror::Error;

/// Errors raised while setting up a client
#[derive(Debug, Error)]
pub enum FtdClientError {
    /// HTTP client could not be built (TLS backend, invalid settings)
    #[error("failed to build HTTP client for '{host}': {message}")]
    ClientBuild { host: String, message: String },
}

impl FtdClientError {
    /// Create client build error
    pub fn client_build(host: impl Into<String>, message: impl Into<String>) -> Self {
        Self::ClientBuild {
            host: host.into(),
            message: message.into(),
        }
    }
}

/// Result alias
pub type Result<T> = std::result::Result<T, FtdClientError>;
