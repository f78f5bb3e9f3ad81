//! Dispatcher error types
//!
//! `Display` of every variant is the user-facing module failure message.

use contracts::{ContractError, TransportError};
use thiserror::Error;

/// Dispatcher-specific errors
#[derive(Debug, Error)]
pub enum DispatchError {
    /// No catalog entry for the operation
    #[error("Operation with specified name is not found: {operation}")]
    OperationNotFound { operation: String },

    /// Operation exists but is not an upload endpoint
    #[error(
        "Invalid upload operation: {operation}. The operation must make POST request and return UploadStatus model."
    )]
    InvalidOperationKind { operation: String },

    /// Device answered the upload with an error status
    #[error(
        "Upload request for {operation} operation failed. Status code: {code}. Server response: {response}."
    )]
    UploadRejected {
        operation: String,
        code: u16,
        response: String,
    },

    /// Upload never got a usable answer (local file, connection, bad body)
    #[error("Upload request for {operation} operation failed: {source}")]
    UploadFailed {
        operation: String,
        #[source]
        source: TransportError,
    },

    /// Catalog backend could not be queried
    #[error("Failed to look up operation {operation}: {source}")]
    Catalog {
        operation: String,
        #[source]
        source: ContractError,
    },
}

impl DispatchError {
    /// Create operation not found error
    pub fn operation_not_found(operation: impl Into<String>) -> Self {
        Self::OperationNotFound {
            operation: operation.into(),
        }
    }

    /// Create invalid operation kind error
    pub fn invalid_operation_kind(operation: impl Into<String>) -> Self {
        Self::InvalidOperationKind {
            operation: operation.into(),
        }
    }

    /// Classify a transport failure for `operation`
    pub fn from_transport(operation: impl Into<String>, err: TransportError) -> Self {
        let operation = operation.into();
        match err {
            TransportError::Server(server) => Self::UploadRejected {
                operation,
                code: server.code,
                response: server.raw,
            },
            source => Self::UploadFailed { operation, source },
        }
    }
}
