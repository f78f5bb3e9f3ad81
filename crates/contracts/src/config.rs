//! UploaderConfig - Config Loader output
//!
//! 描述设备连接参数与可用的操作目录。

use std::collections::BTreeMap;
use std::path::PathBuf;

use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::OperationSpec;

/// 完整的上传器配置
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct UploaderConfig {
    /// 设备连接
    #[validate(nested)]
    pub device: DeviceConfig,

    /// External operation catalog (JSON or TOML map), relative to the config file
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub catalog_file: Option<PathBuf>,

    /// Operation name -> spec
    #[serde(default)]
    pub operations: BTreeMap<String, OperationSpec>,
}

/// Device management endpoint and credentials
#[derive(Clone, Serialize, Deserialize, Validate)]
pub struct DeviceConfig {
    /// Base URL (e.g. "https://ftd.example.com")
    #[serde(default)]
    #[validate(url(message = "host must be an absolute URL"))]
    pub host: String,

    #[serde(default)]
    #[validate(length(min = 1, message = "username cannot be empty"))]
    pub username: String,

    #[serde(default)]
    pub password: String,

    /// Token endpoint path
    #[serde(default = "default_token_path")]
    pub token_path: String,

    /// Verify the device TLS certificate
    #[serde(default = "default_verify_tls")]
    pub verify_tls: bool,

    /// Per-request timeout (seconds)
    #[serde(default = "default_timeout_secs")]
    #[validate(range(min = 1, max = 3600, message = "timeout_secs must be within 1..=3600"))]
    pub timeout_secs: u64,
}

fn default_token_path() -> String {
    "/api/fdm/v2/fdm/token".to_string()
}

fn default_verify_tls() -> bool {
    true
}

fn default_timeout_secs() -> u64 {
    60
}

impl std::fmt::Debug for DeviceConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DeviceConfig")
            .field("host", &self.host)
            .field("username", &self.username)
            .field("password", &"********")
            .field("token_path", &self.token_path)
            .field("verify_tls", &self.verify_tls)
            .field("timeout_secs", &self.timeout_secs)
            .finish()
    }
}

impl Default for DeviceConfig {
    fn default() -> Self {
        Self {
            host: String::new(),
            username: String::new(),
            password: String::new(),
            token_path: default_token_path(),
            verify_tls: default_verify_tls(),
            timeout_secs: default_timeout_secs(),
        }
    }
}
