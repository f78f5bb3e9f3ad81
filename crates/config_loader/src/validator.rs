//! 配置校验模块
//!
//! 校验规则：
//! - device 字段 (derive: host 为 URL, username 非空, timeout 范围)
//! - host 协议为 http / https
//! - token_path 以 '/' 开头
//! - 操作名非空, 操作 url 以 '/' 开头

use contracts::{ContractError, UploaderConfig};
use validator::{Validate, ValidationErrors, ValidationErrorsKind};

/// 校验 UploaderConfig 配置
///
/// 返回第一个遇到的错误，或 Ok(())。
pub fn validate(config: &UploaderConfig) -> Result<(), ContractError> {
    validate_fields(config)?;
    validate_host_scheme(config)?;
    validate_token_path(config)?;
    validate_operations(config)?;
    Ok(())
}

/// derive 规则
fn validate_fields(config: &UploaderConfig) -> Result<(), ContractError> {
    config.validate().map_err(|errors| {
        let (field, message) = first_error("", &errors)
            .unwrap_or_else(|| (String::from("config"), errors.to_string()));
        ContractError::config_validation(field, message)
    })
}

/// Flatten nested validator errors down to the first failing field, in field-name order.
fn first_error(prefix: &str, errors: &ValidationErrors) -> Option<(String, String)> {
    let mut entries: Vec<_> = errors.errors().iter().collect();
    entries.sort_by(|a, b| a.0.cmp(b.0));

    for (name, kind) in entries {
        let path = if prefix.is_empty() {
            name.to_string()
        } else {
            format!("{prefix}.{name}")
        };
        match kind {
            ValidationErrorsKind::Field(field_errors) => {
                if let Some(err) = field_errors.first() {
                    let message = err
                        .message
                        .as_ref()
                        .map(|m| m.to_string())
                        .unwrap_or_else(|| err.code.to_string());
                    return Some((path, message));
                }
            }
            ValidationErrorsKind::Struct(nested) => {
                if let Some(found) = first_error(&path, nested) {
                    return Some(found);
                }
            }
            ValidationErrorsKind::List(items) => {
                for (idx, nested) in items {
                    if let Some(found) = first_error(&format!("{path}[{idx}]"), nested) {
                        return Some(found);
                    }
                }
            }
        }
    }
    None
}

/// 校验 host 协议
fn validate_host_scheme(config: &UploaderConfig) -> Result<(), ContractError> {
    let host = config.device.host.to_ascii_lowercase();
    if !(host.starts_with("http://") || host.starts_with("https://")) {
        return Err(ContractError::config_validation(
            "device.host",
            format!("host must use http or https, got '{}'", config.device.host),
        ));
    }
    Ok(())
}

/// 校验 token 路径
fn validate_token_path(config: &UploaderConfig) -> Result<(), ContractError> {
    if !config.device.token_path.starts_with('/') {
        return Err(ContractError::config_validation(
            "device.token_path",
            format!(
                "token_path must start with '/', got '{}'",
                config.device.token_path
            ),
        ));
    }
    Ok(())
}

/// 校验操作目录
fn validate_operations(config: &UploaderConfig) -> Result<(), ContractError> {
    for (name, spec) in &config.operations {
        if name.trim().is_empty() {
            return Err(ContractError::config_validation(
                "operations",
                "operation name cannot be empty",
            ));
        }
        if !spec.url.starts_with('/') {
            return Err(ContractError::config_validation(
                format!("operations.{name}.url"),
                format!("url must start with '/', got '{}'", spec.url),
            ));
        }
    }
    Ok(())
}
