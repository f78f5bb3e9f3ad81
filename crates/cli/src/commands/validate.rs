//! `--validate-config` implementation.

use anyhow::{Context, Result};
use serde::Serialize;
use tracing::info;

use config_loader::{ConfigLoader, DeviceOverrides};
use dispatcher::is_upload_operation;

use crate::cli::Cli;

/// Validation result for JSON output
#[derive(Serialize)]
struct ValidationResult {
    valid: bool,
    config_path: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    error: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    warnings: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    summary: Option<ConfigSummary>,
}

#[derive(Serialize)]
struct ConfigSummary {
    host: String,
    operation_count: usize,
    upload_operations: Vec<String>,
}

/// Validate the configuration and print the result as JSON
pub fn run_validate(cli: &Cli) -> Result<bool> {
    info!(config = %cli.config.display(), "Validating configuration");

    let result = validate_config(cli);
    let json = serde_json::to_string_pretty(&result)
        .context("Failed to serialize validation result")?;
    println!("{}", json);

    Ok(result.valid)
}

fn validate_config(cli: &Cli) -> ValidationResult {
    let config_path = cli.config.display().to_string();
    let overrides = DeviceOverrides {
        host: cli.host.clone(),
        username: cli.username.clone(),
        password: cli.password.clone(),
    };

    match ConfigLoader::load_from_path_with(&cli.config, &overrides) {
        Ok(config) => {
            let upload_operations: Vec<String> = config
                .operations
                .iter()
                .filter(|(_, spec)| is_upload_operation(spec))
                .map(|(name, _)| name.clone())
                .collect();
            let warnings = collect_warnings(&config, &upload_operations);

            ValidationResult {
                valid: true,
                config_path,
                error: None,
                warnings: if warnings.is_empty() {
                    None
                } else {
                    Some(warnings)
                },
                summary: Some(ConfigSummary {
                    host: config.device.host.clone(),
                    operation_count: config.operations.len(),
                    upload_operations,
                }),
            }
        }
        Err(e) => ValidationResult {
            valid: false,
            config_path,
            error: Some(e.to_string()),
            warnings: None,
            summary: None,
        },
    }
}

/// Collect configuration warnings (non-fatal issues)
fn collect_warnings(config: &contracts::UploaderConfig, upload_operations: &[String]) -> Vec<String> {
    let mut warnings = Vec::new();

    if config.operations.is_empty() {
        warnings.push("No operations configured - every upload will fail lookup".to_string());
    } else if upload_operations.is_empty() {
        warnings.push("No configured operation accepts file uploads".to_string());
    }

    if config.device.password.is_empty() {
        warnings.push("device.password is empty".to_string());
    }

    if !config.device.verify_tls {
        warnings.push("TLS certificate verification is disabled".to_string());
    }

    warnings
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;

    #[test]
    fn test_summary_lists_upload_operations() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("ftd.json");
        std::fs::write(
            &path,
            r#"{
                "device": { "host": "https://ftd", "username": "admin", "verify_tls": false },
                "operations": {
                    "postuploadbackup": { "method": "POST", "url": "/api/fdm/v2/action/uploadbackup", "model_name": "FileUploadStatus" },
                    "getsystemstatus": { "method": "GET", "url": "/api/fdm/v2/operational/systemstatus", "model_name": "SystemStatus" }
                }
            }"#,
        )
        .unwrap();
        let cli = Cli::parse_from(["ftd_file_upload", "--validate-config", "--config", path.to_str().unwrap()]);

        let result = validate_config(&cli);

        assert!(result.valid);
        let summary = result.summary.unwrap();
        assert_eq!(summary.operation_count, 2);
        assert_eq!(summary.upload_operations, vec!["postuploadbackup"]);
        let warnings = result.warnings.unwrap();
        assert!(warnings.iter().any(|w| w.contains("TLS")));
    }

    #[test]
    fn test_invalid_config_reported() {
        let cli = Cli::parse_from(["ftd_file_upload", "--validate-config", "--config", "/nonexistent/ftd.toml"]);
        let result = validate_config(&cli);
        assert!(!result.valid);
        assert!(result.error.is_some());
    }
}
