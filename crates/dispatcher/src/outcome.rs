//! UploadOutcome - terminal result of one dispatch

use serde_json::{json, Map, Value};

/// Result of a single upload invocation
#[derive(Debug, Clone, PartialEq)]
pub enum UploadOutcome {
    /// Check mode: validated, nothing uploaded
    Unchanged,
    /// File uploaded
    Uploaded {
        response: Value,
        facts: Map<String, Value>,
    },
    /// User-facing failure
    Failed { msg: String },
}

impl UploadOutcome {
    pub fn failed(msg: impl Into<String>) -> Self {
        Self::Failed { msg: msg.into() }
    }

    pub fn is_failed(&self) -> bool {
        matches!(self, Self::Failed { .. })
    }

    pub fn changed(&self) -> bool {
        matches!(self, Self::Uploaded { .. })
    }

    /// Ansible module result object
    pub fn to_module_json(&self) -> Value {
        match self {
            Self::Unchanged => json!({ "changed": false }),
            Self::Uploaded { response, facts } => json!({
                "changed": true,
                "response": response,
                "ansible_facts": facts,
            }),
            Self::Failed { msg } => json!({
                "failed": true,
                "changed": false,
                "msg": msg,
            }),
        }
    }
}
