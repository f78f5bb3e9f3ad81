//! Module invocation: arguments -> configuration -> dispatch.

use anyhow::{Context, Result};
use std::io::Read;
use tracing::{debug, info, warn};

use config_loader::{ConfigLoader, DeviceOverrides};
use dispatcher::{UploadDispatcher, UploadOutcome};
use ftd_client::{FtdHttpClient, StaticCatalog};

use crate::cli::Cli;
use crate::error::CliError;
use crate::module_args::{parse_module_args, ModuleArgs};

/// Run one module invocation to its outcome
///
/// Every failure, including bad arguments or configuration, becomes
/// `UploadOutcome::Failed` so the caller always has a result object to emit.
pub async fn run_upload(cli: &Cli) -> UploadOutcome {
    let args = match read_args(cli).and_then(|raw| parse_module_args(&raw)) {
        Ok(args) => args,
        Err(e) => return UploadOutcome::failed(e.to_string()),
    };

    match dispatch(cli, &args).await {
        Ok(outcome) => outcome,
        Err(e) => UploadOutcome::failed(format!("{e:#}")),
    }
}

fn read_args(cli: &Cli) -> crate::error::Result<String> {
    read_args_from(cli, std::io::stdin())
}

/// Arguments file when given, otherwise the whole of `input`
fn read_args_from(cli: &Cli, mut input: impl Read) -> crate::error::Result<String> {
    match &cli.args_file {
        Some(path) => std::fs::read_to_string(path)
            .map_err(|e| CliError::args_read(path.display().to_string(), e.to_string())),
        None => {
            let mut raw = String::new();
            input
                .read_to_string(&mut raw)
                .map_err(|e| CliError::args_read("stdin", e.to_string()))?;
            Ok(raw)
        }
    }
}

async fn dispatch(cli: &Cli, args: &ModuleArgs) -> Result<UploadOutcome> {
    info!(config = %cli.config.display(), "Loading configuration");

    let overrides = DeviceOverrides {
        host: cli.host.clone(),
        username: cli.username.clone(),
        password: cli.password.clone(),
    };
    let config = ConfigLoader::load_from_path_with(&cli.config, &overrides)
        .with_context(|| format!("Failed to load configuration '{}'", cli.config.display()))?;

    let catalog = StaticCatalog::from_config(&config);
    if catalog.is_empty() {
        warn!(config = %cli.config.display(), "No operations configured");
    }
    debug!(
        host = %config.device.host,
        operations = ?catalog.names().collect::<Vec<_>>(),
        "Configuration loaded"
    );

    let client = FtdHttpClient::new(&config.device)?;
    let dispatcher = UploadDispatcher::new(catalog, client)
        .with_check_mode(args.check_mode || cli.check);

    let outcome = dispatcher.execute(&args.request).await;
    dispatcher.transport().logout().await;

    Ok(outcome)
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;
    use std::ffi::OsStr;
    use std::io::Write;

    const CONFIG: &str = r#"
[device]
host = "https://127.0.0.1:1"
username = "admin"
password = "secret"

[operations.postuploaddiskfile]
method = "POST"
url = "/api/fdm/v2/action/uploaddiskfile"
model_name = "FileUploadStatus"

[operations.getsystemstatus]
method = "GET"
url = "/api/fdm/v2/operational/systemstatus"
model_name = "SystemStatus"
"#;

    struct Fixture {
        _dir: tempfile::TempDir,
        config: std::path::PathBuf,
        args: std::path::PathBuf,
    }

    fn fixture(args: &str) -> Fixture {
        let dir = tempfile::tempdir().unwrap();
        let config = dir.path().join("ftd.toml");
        std::fs::write(&config, CONFIG).unwrap();
        let args_path = dir.path().join("args");
        let mut file = std::fs::File::create(&args_path).unwrap();
        file.write_all(args.as_bytes()).unwrap();
        Fixture {
            _dir: dir,
            config,
            args: args_path,
        }
    }

    fn cli(fixture: &Fixture) -> Cli {
        Cli::parse_from([
            OsStr::new("ftd_file_upload"),
            fixture.args.as_os_str(),
            OsStr::new("--config"),
            fixture.config.as_os_str(),
        ])
    }

    #[tokio::test]
    async fn test_check_mode_without_device() {
        let fixture = fixture(
            r#"{"operation": "postuploaddiskfile", "file_to_upload": "/tmp/test1.txt", "_ansible_check_mode": true}"#,
        );
        let outcome = run_upload(&cli(&fixture)).await;
        assert_eq!(outcome, UploadOutcome::Unchanged);
    }

    #[tokio::test]
    async fn test_invalid_operation_reported() {
        let fixture = fixture(r#"{"operation": "getsystemstatus", "file_to_upload": "/tmp/test1.txt"}"#);
        let outcome = run_upload(&cli(&fixture)).await;
        match outcome {
            UploadOutcome::Failed { msg } => {
                assert!(msg.starts_with("Invalid upload operation: getsystemstatus."), "got: {msg}")
            }
            other => panic!("unexpected outcome: {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_argument_errors_reported() {
        let fixture = fixture(r#"{"operation": "postuploaddiskfile"}"#);
        let outcome = run_upload(&cli(&fixture)).await;
        assert_eq!(
            outcome,
            UploadOutcome::failed("missing required arguments: file_to_upload")
        );
    }

    #[tokio::test]
    async fn test_missing_args_file_reported() {
        let fixture = fixture("{}");
        let mut cli = cli(&fixture);
        cli.args_file = Some("/nonexistent/args".into());
        let outcome = run_upload(&cli).await;
        match outcome {
            UploadOutcome::Failed { msg } => assert!(
                msg.starts_with("Failed to read module arguments from /nonexistent/args"),
                "got: {msg}"
            ),
            other => panic!("unexpected outcome: {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_config_errors_reported() {
        let fixture = fixture(r#"{"operation": "postuploaddiskfile", "file_to_upload": "/tmp/x"}"#);
        let mut cli = cli(&fixture);
        cli.config = "/nonexistent/ftd.toml".into();
        let outcome = run_upload(&cli).await;
        match outcome {
            UploadOutcome::Failed { msg } => {
                assert!(msg.starts_with("Failed to load configuration"), "got: {msg}")
            }
            other => panic!("unexpected outcome: {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_check_flag_enables_check_mode() {
        let fixture = fixture(r#"{"operation": "postuploaddiskfile", "file_to_upload": "/tmp/test1.txt"}"#);
        let cli = Cli::parse_from([
            OsStr::new("ftd_file_upload"),
            fixture.args.as_os_str(),
            OsStr::new("--config"),
            fixture.config.as_os_str(),
            OsStr::new("--check"),
        ]);
        let outcome = run_upload(&cli).await;
        assert_eq!(outcome, UploadOutcome::Unchanged);
    }

    #[test]
    fn test_args_read_from_input_without_args_file() {
        let fixture = fixture("{}");
        let mut cli = cli(&fixture);
        cli.args_file = None;
        let input = std::io::Cursor::new(r#"{"operation": "postuploaddiskfile"}"#);

        let raw = read_args_from(&cli, input).unwrap();

        assert_eq!(raw, r#"{"operation": "postuploaddiskfile"}"#);
    }

    #[test]
    fn test_args_file_wins_over_input() {
        let fixture = fixture(r#"{"operation": "from_file"}"#);
        let raw = read_args_from(&cli(&fixture), std::io::Cursor::new("ignored")).unwrap();
        assert_eq!(raw, r#"{"operation": "from_file"}"#);
    }

    #[test]
    fn test_unreadable_input_reported() {
        struct Broken;
        impl Read for Broken {
            fn read(&mut self, _buf: &mut [u8]) -> std::io::Result<usize> {
                Err(std::io::Error::other("closed"))
            }
        }

        let fixture = fixture("{}");
        let mut cli = cli(&fixture);
        cli.args_file = None;

        let err = read_args_from(&cli, Broken).unwrap_err();

        assert_eq!(err.to_string(), "Failed to read module arguments from stdin: closed");
    }
}
