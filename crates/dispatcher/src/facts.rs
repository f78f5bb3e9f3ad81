//! Ansible fact construction from device responses

use contracts::UploadRequest;
use serde_json::{Map, Value};

/// Builds the `ansible_facts` mapping registered after a successful upload
pub trait FactBuilder: Send + Sync {
    fn build(&self, response: &Value, request: &UploadRequest) -> Map<String, Value>;
}

/// FTD collection rules
///
/// - empty response: no facts
/// - body is `response.items` when present, else the response itself
/// - `register_as` set: `{register_as: body}`
/// - body with string `name` and `type`: `{"<type>_<name>": body}`, name normalized
#[derive(Debug, Clone, Copy, Default)]
pub struct AnsibleFactBuilder;

impl FactBuilder for AnsibleFactBuilder {
    fn build(&self, response: &Value, request: &UploadRequest) -> Map<String, Value> {
        let mut facts = Map::new();
        if !is_truthy(response) {
            return facts;
        }

        let body = match response.get("items") {
            Some(items) if response.is_object() => items,
            _ => response,
        };

        if let Some(register_as) = request.register_as.as_deref().filter(|s| !s.is_empty()) {
            facts.insert(register_as.to_string(), body.clone());
        } else if let (Some(name), Some(kind)) = (non_empty_str(body, "name"), non_empty_str(body, "type")) {
            facts.insert(format!("{kind}_{}", identifier(name)), body.clone());
        }
        facts
    }
}

fn non_empty_str<'a>(body: &'a Value, key: &str) -> Option<&'a str> {
    body.get(key).and_then(Value::as_str).filter(|s| !s.is_empty())
}

/// Lowercase, every char outside `[a-zA-Z0-9_]` replaced by `_`
fn identifier(name: &str) -> String {
    name.to_lowercase()
        .chars()
        .map(|c| if c.is_ascii_alphanumeric() || c == '_' { c } else { '_' })
        .collect()
}

fn is_truthy(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(b) => *b,
        Value::Number(n) => n.as_f64().is_some_and(|f| f != 0.0),
        Value::String(s) => !s.is_empty(),
        Value::Array(a) => !a.is_empty(),
        Value::Object(o) => !o.is_empty(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn request() -> UploadRequest {
        UploadRequest::new("postuploaddiskfile", "/tmp/test1.txt")
    }

    #[test]
    fn test_empty_response_has_no_facts() {
        let builder = AnsibleFactBuilder;
        assert!(builder.build(&json!({}), &request()).is_empty());
        assert!(builder.build(&Value::Null, &request()).is_empty());
        assert!(builder
            .build(&json!({}), &request().with_register_as("upload"))
            .is_empty());
    }

    #[test]
    fn test_register_as_wins() {
        let response = json!({"name": "test1.txt", "type": "fileuploadstatus"});
        let facts = AnsibleFactBuilder.build(&response, &request().with_register_as("upload_result"));
        assert_eq!(facts.len(), 1);
        assert_eq!(facts["upload_result"], response);
    }

    #[test]
    fn test_name_and_type_derive_fact_name() {
        let response = json!({"id": "a1", "name": "Disk File-01.txt", "type": "fileuploadstatus"});
        let facts = AnsibleFactBuilder.build(&response, &request());
        assert_eq!(facts["fileuploadstatus_disk_file_01_txt"], response);
    }

    #[test]
    fn test_items_unwrapped() {
        let response = json!({"items": [{"id": 1}], "paging": {}});
        let facts = AnsibleFactBuilder.build(&response, &request().with_register_as("files"));
        assert_eq!(facts["files"], json!([{"id": 1}]));
    }

    #[test]
    fn test_without_name_or_type_no_facts() {
        let facts = AnsibleFactBuilder.build(&json!({"status": "queued", "id": 42}), &request());
        assert!(facts.is_empty());
    }

    #[test]
    fn test_empty_register_as_is_ignored() {
        let response = json!({"name": "a", "type": "t"});
        let facts = AnsibleFactBuilder.build(&response, &request().with_register_as(""));
        assert!(facts.contains_key("t_a"));
    }
}
