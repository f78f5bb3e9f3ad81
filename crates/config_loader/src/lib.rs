//! # Config Loader
//!
//! Configuration loading and parsing module.
//!
//! Responsibilities:
//! - Parse TOML/JSON configuration files
//! - Merge the external operation catalog file, if any
//! - Apply device overrides (CLI flags / environment)
//! - Validate configuration legality
//!
//! # Example
//!
//! ```no_run
//! use config_loader::ConfigLoader;
//! use std::path::Path;
//!
//! let config = ConfigLoader::load_from_path(Path::new("ftd.toml")).unwrap();
//! println!("Device: {}", config.device.host);
//! ```

mod parser;
mod validator;

pub use contracts::UploaderConfig;
pub use parser::ConfigFormat;

use contracts::ContractError;
use std::path::Path;
use tracing::debug;

/// Device settings that take precedence over the configuration file
#[derive(Debug, Clone, Default)]
pub struct DeviceOverrides {
    pub host: Option<String>,
    pub username: Option<String>,
    pub password: Option<String>,
}

impl DeviceOverrides {
    fn apply(&self, config: &mut UploaderConfig) {
        if let Some(host) = &self.host {
            config.device.host = host.clone();
        }
        if let Some(username) = &self.username {
            config.device.username = username.clone();
        }
        if let Some(password) = &self.password {
            config.device.password = password.clone();
        }
    }
}

/// Configuration loader
///
/// Provides static methods to load configuration from files or strings.
pub struct ConfigLoader;

impl ConfigLoader {
    /// Load configuration from file path
    ///
    /// Automatically detects format from file extension (.toml / .json).
    ///
    /// # Errors
    /// - File read failure
    /// - Unsupported format
    /// - Parse failure
    /// - Validation failure
    pub fn load_from_path(path: &Path) -> Result<UploaderConfig, ContractError> {
        Self::load_from_path_with(path, &DeviceOverrides::default())
    }

    /// Load configuration from file path, then apply `overrides` before validation
    pub fn load_from_path_with(
        path: &Path,
        overrides: &DeviceOverrides,
    ) -> Result<UploaderConfig, ContractError> {
        let format = Self::detect_format(path)?;
        let content = Self::read_file(path)?;
        let mut config = parser::parse(&content, format)?;

        if let Some(catalog_file) = config.catalog_file.clone() {
            let base = path.parent().unwrap_or_else(|| Path::new("."));
            Self::merge_catalog_file(&mut config, &base.join(catalog_file))?;
        }

        overrides.apply(&mut config);
        validator::validate(&config)?;
        Ok(config)
    }

    /// Load configuration from string
    ///
    /// `catalog_file` is not resolved here since there is no base directory.
    ///
    /// # Errors
    /// - Parse failure
    /// - Validation failure
    pub fn load_from_str(
        content: &str,
        format: ConfigFormat,
    ) -> Result<UploaderConfig, ContractError> {
        let config = parser::parse(content, format)?;
        validator::validate(&config)?;
        Ok(config)
    }
}

impl ConfigLoader {
    /// Infer configuration format from file extension
    fn detect_format(path: &Path) -> Result<ConfigFormat, ContractError> {
        let ext = path.extension().and_then(|e| e.to_str()).ok_or_else(|| {
            ContractError::config_parse("cannot determine file format from extension")
        })?;

        ConfigFormat::from_extension(ext).ok_or_else(|| {
            ContractError::config_parse(format!("unsupported config format: .{ext}"))
        })
    }

    /// Read configuration file content
    fn read_file(path: &Path) -> Result<String, ContractError> {
        std::fs::read_to_string(path).map_err(|e| ContractError::ConfigParse {
            message: format!("cannot read '{}': {e}", path.display()),
            source: Some(Box::new(e)),
        })
    }

    /// Merge an external catalog; inline `[operations]` entries win on name clashes
    fn merge_catalog_file(config: &mut UploaderConfig, path: &Path) -> Result<(), ContractError> {
        let format = Self::detect_format(path)?;
        let content = Self::read_file(path)?;
        let catalog = parser::parse_catalog(&content, format)?;

        debug!(
            catalog = %path.display(),
            operations = catalog.len(),
            "Merging operation catalog"
        );

        for (name, spec) in catalog {
            config.operations.entry(name).or_insert(spec);
        }
        Ok(())
    }
}
