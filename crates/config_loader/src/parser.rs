//! 配置解析模块
//!
//! 支持 TOML (主要) 和 JSON (可选) 格式。

use std::collections::BTreeMap;

use contracts::{ContractError, OperationSpec, UploaderConfig};
use serde::de::DeserializeOwned;

/// 配置文件格式
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfigFormat {
    /// TOML 格式 (推荐)
    Toml,
    /// JSON 格式
    Json,
}

impl ConfigFormat {
    /// 从文件扩展名推断格式
    pub fn from_extension(ext: &str) -> Option<Self> {
        match ext.to_lowercase().as_str() {
            "toml" => Some(Self::Toml),
            "json" => Some(Self::Json),
            _ => None,
        }
    }
}

fn parse_toml<T: DeserializeOwned>(content: &str) -> Result<T, ContractError> {
    toml::from_str(content).map_err(|e| ContractError::ConfigParse {
        message: format!("TOML parse error: {e}"),
        source: Some(Box::new(e)),
    })
}

fn parse_json<T: DeserializeOwned>(content: &str) -> Result<T, ContractError> {
    serde_json::from_str(content).map_err(|e| ContractError::ConfigParse {
        message: format!("JSON parse error: {e}"),
        source: Some(Box::new(e)),
    })
}

/// 根据格式解析配置
pub fn parse(content: &str, format: ConfigFormat) -> Result<UploaderConfig, ContractError> {
    match format {
        ConfigFormat::Toml => parse_toml(content),
        ConfigFormat::Json => parse_json(content),
    }
}

/// 解析外部操作目录 (name -> OperationSpec)
pub fn parse_catalog(
    content: &str,
    format: ConfigFormat,
) -> Result<BTreeMap<String, OperationSpec>, ContractError> {
    match format {
        ConfigFormat::Toml => parse_toml(content),
        ConfigFormat::Json => parse_json(content),
    }
}
