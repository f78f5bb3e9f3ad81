//! OperationSpec - catalog entry for a device API operation

use serde::{Deserialize, Serialize};

/// HTTP verb of a device operation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum HttpMethod {
    Get,
    Post,
    Put,
    Delete,
}

impl HttpMethod {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Get => "GET",
            Self::Post => "POST",
            Self::Put => "PUT",
            Self::Delete => "DELETE",
        }
    }
}

impl std::fmt::Display for HttpMethod {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Operation exposed by the device management API
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OperationSpec {
    /// HTTP verb
    pub method: HttpMethod,

    /// Absolute API path (e.g. "/api/fdm/v2/action/uploaddiskfile")
    pub url: String,

    /// Name of the response model
    pub model_name: String,

    /// Free-form description (optional)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

impl OperationSpec {
    pub fn new(method: HttpMethod, url: impl Into<String>, model_name: impl Into<String>) -> Self {
        Self {
            method,
            url: url.into(),
            model_name: model_name.into(),
            description: None,
        }
    }
}
