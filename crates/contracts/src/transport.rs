//! Transport trait - file upload to the device

use std::path::Path;

use serde_json::Value;

use crate::TransportError;

/// Device upload transport
///
/// Implementations own session handling (authentication, TLS, timeouts).
#[trait_variant::make(Transport: Send)]
pub trait LocalTransport {
    /// Upload `path` as multipart form data to the API path `url`
    ///
    /// # Errors
    /// `TransportError::Server` when the device answers with an error status;
    /// other variants for local or connection failures.
    async fn upload_file(&self, path: &Path, url: &str) -> Result<Value, TransportError>;
}
