//! UploadRequest - one module invocation's input

use std::path::PathBuf;

/// Request to upload a local file through a named device operation
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UploadRequest {
    /// Catalog name of the operation (e.g. "postuploaddiskfile")
    pub operation: String,

    /// Local file to upload
    pub file_to_upload: PathBuf,

    /// Fact name the response is registered under
    pub register_as: Option<String>,
}

impl UploadRequest {
    pub fn new(operation: impl Into<String>, file_to_upload: impl Into<PathBuf>) -> Self {
        Self {
            operation: operation.into(),
            file_to_upload: file_to_upload.into(),
            register_as: None,
        }
    }

    pub fn with_register_as(mut self, register_as: impl Into<String>) -> Self {
        self.register_as = Some(register_as.into());
        self
    }
}
