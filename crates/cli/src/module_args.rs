//! Ansible module arguments.
//!
//! Argument spec of the module:
//! - `operation` (str, required)
//! - `file_to_upload` (path, required)
//! - `register_as` (str)
//!
//! Keys starting with `_ansible_` are internal parameters; only
//! `_ansible_check_mode` is honored.

use std::path::PathBuf;

use contracts::UploadRequest;
use serde_json::{Map, Value};

use crate::error::{CliError, Result};

pub const MODULE_NAME: &str = "ftd_file_upload";

const OPERATION: &str = "operation";
const FILE_TO_UPLOAD: &str = "file_to_upload";
const REGISTER_AS: &str = "register_as";
const SUPPORTED: [&str; 3] = [FILE_TO_UPLOAD, OPERATION, REGISTER_AS];
const REQUIRED: [&str; 2] = [FILE_TO_UPLOAD, OPERATION];

const INTERNAL_PREFIX: &str = "_ansible_";
const CHECK_MODE: &str = "_ansible_check_mode";

/// Validated module input
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ModuleArgs {
    pub request: UploadRequest,
    pub check_mode: bool,
}

/// Parse and validate the raw arguments JSON
///
/// Accepts both the bare argument object and the `{"ANSIBLE_MODULE_ARGS": {...}}` wrapper.
pub fn parse_module_args(raw: &str) -> Result<ModuleArgs> {
    let value: Value = serde_json::from_str(raw).map_err(|e| CliError::args_parse(e.to_string()))?;
    let mut params = match value {
        Value::Object(map) => map,
        other => {
            return Err(CliError::args_parse(format!(
                "expected a JSON object, got {}",
                type_name(&other)
            )))
        }
    };
    if let Some(Value::Object(inner)) = params.remove("ANSIBLE_MODULE_ARGS") {
        params = inner;
    }

    check_unsupported(&params)?;
    check_required(&params)?;

    let operation = string_arg(&params, OPERATION)?.unwrap_or_default();
    let file_to_upload = string_arg(&params, FILE_TO_UPLOAD)?
        .map(|p| expand_path(&p))
        .unwrap_or_default();
    let register_as = string_arg(&params, REGISTER_AS)?;
    let check_mode = params
        .get(CHECK_MODE)
        .map(is_true)
        .unwrap_or(false);

    Ok(ModuleArgs {
        request: UploadRequest {
            operation,
            file_to_upload: PathBuf::from(file_to_upload),
            register_as,
        },
        check_mode,
    })
}

fn check_unsupported(params: &Map<String, Value>) -> Result<()> {
    let mut unsupported: Vec<String> = params
        .keys()
        .filter(|k| !k.starts_with(INTERNAL_PREFIX) && !SUPPORTED.contains(&k.as_str()))
        .cloned()
        .collect();
    if unsupported.is_empty() {
        return Ok(());
    }
    unsupported.sort();
    Err(CliError::Unsupported {
        module: MODULE_NAME.to_string(),
        names: unsupported,
        supported: SUPPORTED.iter().map(|s| s.to_string()).collect(),
    })
}

fn check_required(params: &Map<String, Value>) -> Result<()> {
    let missing: Vec<String> = REQUIRED
        .iter()
        .filter(|name| params.get(**name).is_none_or(Value::is_null))
        .map(|name| name.to_string())
        .collect();
    if missing.is_empty() {
        Ok(())
    } else {
        Err(CliError::MissingRequired { names: missing })
    }
}

/// Fetch a `str` option, converting scalars the way Ansible does
fn string_arg(params: &Map<String, Value>, name: &str) -> Result<Option<String>> {
    match params.get(name) {
        None | Some(Value::Null) => Ok(None),
        Some(Value::String(s)) => Ok(Some(s.clone())),
        Some(Value::Bool(b)) => Ok(Some(if *b { "True" } else { "False" }.to_string())),
        Some(Value::Number(n)) => Ok(Some(n.to_string())),
        Some(other) => Err(CliError::invalid_type(name, type_name(other), "str")),
    }
}

fn is_true(value: &Value) -> bool {
    match value {
        Value::Bool(b) => *b,
        Value::String(s) => matches!(s.to_ascii_lowercase().as_str(), "true" | "yes" | "1"),
        Value::Number(n) => n.as_i64() == Some(1),
        _ => false,
    }
}

fn type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "NoneType",
        Value::Bool(_) => "bool",
        Value::Number(n) if n.is_f64() => "float",
        Value::Number(_) => "int",
        Value::String(_) => "str",
        Value::Array(_) => "list",
        Value::Object(_) => "dict",
    }
}

/// `path` option semantics: environment variables, then a leading `~`
fn expand_path(raw: &str) -> String {
    expand_user(&expand_vars(raw))
}

fn expand_user(path: &str) -> String {
    let rest = match path.strip_prefix('~') {
        Some(rest) if rest.is_empty() || rest.starts_with('/') => rest,
        _ => return path.to_string(),
    };
    match std::env::var("HOME") {
        Ok(home) => format!("{}{}", home.trim_end_matches('/'), rest),
        Err(_) => path.to_string(),
    }
}

/// Expand `$NAME` and `${NAME}`; unknown variables are left untouched
fn expand_vars(input: &str) -> String {
    let mut out = String::with_capacity(input.len());
    let mut rest = input;

    while let Some(pos) = rest.find('$') {
        out.push_str(&rest[..pos]);
        let after = &rest[pos + 1..];

        let (name, consumed) = if let Some(braced) = after.strip_prefix('{') {
            match braced.find('}') {
                Some(end) => (&braced[..end], end + 2),
                None => ("", 0),
            }
        } else {
            let end = after
                .find(|c: char| !(c.is_ascii_alphanumeric() || c == '_'))
                .unwrap_or(after.len());
            (&after[..end], end)
        };

        let value = if is_var_name(name) {
            std::env::var(name).ok()
        } else {
            None
        };
        match value {
            Some(value) => out.push_str(&value),
            None => out.push_str(&rest[pos..pos + 1 + consumed]),
        }
        rest = &after[consumed..];
    }
    out.push_str(rest);
    out
}

fn is_var_name(name: &str) -> bool {
    !name.is_empty() && name.chars().all(|c| c.is_ascii_alphanumeric() || c == '_')
}
