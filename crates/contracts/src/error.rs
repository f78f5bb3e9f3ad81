//! Layered error definitions
//!
//! Categorized by source: config / catalog / transport

use std::path::PathBuf;

use serde_json::Value;
use thiserror::Error;

/// Unified error type
#[derive(Debug, Error)]
pub enum ContractError {
    // ===== Configuration Errors =====
    /// Configuration parse error
    #[error("config parse error: {message}")]
    ConfigParse {
        message: String,
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    /// Configuration validation error
    #[error("config validation error at '{field}': {message}")]
    ConfigValidation { field: String, message: String },

    // ===== Catalog Errors =====
    /// Operation catalog could not be queried
    #[error("catalog error: {message}")]
    Catalog { message: String },
}

impl ContractError {
    /// Create configuration parse error
    pub fn config_parse(message: impl Into<String>) -> Self {
        Self::ConfigParse {
            message: message.into(),
            source: None,
        }
    }

    /// Create configuration validation error
    pub fn config_validation(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self::ConfigValidation {
            field: field.into(),
            message: message.into(),
        }
    }

    /// Create catalog error
    pub fn catalog(message: impl Into<String>) -> Self {
        Self::Catalog {
            message: message.into(),
        }
    }
}

/// Error response returned by the device API.
///
/// `response` holds the parsed JSON body, or the raw text when the body is not JSON.
/// `raw` is the body exactly as received.
#[derive(Debug, Clone, PartialEq)]
pub struct ServerError {
    pub code: u16,
    pub response: Value,
    pub raw: String,
}

impl ServerError {
    pub fn new(code: u16, response: impl Into<Value>) -> Self {
        let response = response.into();
        let raw = match &response {
            Value::String(s) => s.clone(),
            other => other.to_string(),
        };
        Self {
            code,
            response,
            raw,
        }
    }

    /// Build from a raw HTTP body, keeping JSON structure when there is one.
    pub fn from_body(code: u16, body: &str) -> Self {
        let response = serde_json::from_str(body).unwrap_or_else(|_| Value::String(body.to_string()));
        Self {
            code,
            response,
            raw: body.to_string(),
        }
    }

    /// Body as the device sent it
    pub fn body_text(&self) -> &str {
        &self.raw
    }
}

impl std::fmt::Display for ServerError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "server returned status {}: {}", self.code, self.body_text())
    }
}

impl std::error::Error for ServerError {}

/// Upload transport error
#[derive(Debug, Error)]
pub enum TransportError {
    /// Device answered with an error status
    #[error(transparent)]
    Server(#[from] ServerError),

    /// Local file could not be read
    #[error("failed to read '{}': {source}", path.display())]
    FileRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Request never produced a response (DNS, TLS, refused, timeout)
    #[error("connection error: {message}")]
    Connection { message: String },

    /// Device answered 2xx with a body that is not valid JSON
    #[error("invalid JSON response: {message}")]
    InvalidResponse { message: String },
}

impl TransportError {
    /// Create connection error
    pub fn connection(message: impl Into<String>) -> Self {
        Self::Connection {
            message: message.into(),
        }
    }

    /// Create invalid response error
    pub fn invalid_response(message: impl Into<String>) -> Self {
        Self::InvalidResponse {
            message: message.into(),
        }
    }
}
