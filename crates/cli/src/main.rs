//! # ftd_file_upload
//!
//! Ansible binary module entry point.
//!
//! 提供：
//! - 模块参数读取与校验
//! - 配置加载与设备连接
//! - 单个 JSON 结果对象输出到 stdout (日志走 stderr)

mod cli;
mod commands;
mod error;
mod module_args;

use std::process::ExitCode;

use clap::error::ErrorKind;
use clap::Parser;
use dispatcher::UploadOutcome;
use tracing::info;

use cli::Cli;
use commands::{run_upload, run_validate};
use observability::ObservabilityConfig;

#[tokio::main(flavor = "current_thread")]
async fn main() -> ExitCode {
    // Load .env file if present
    dotenvy::dotenv().ok();

    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        Err(e) => return report_usage_error(e),
    };

    // Logging is best-effort; stdout must still carry the result
    if let Err(e) = init_logging(&cli) {
        eprintln!("{e:#}");
    }

    info!(version = env!("CARGO_PKG_VERSION"), "ftd_file_upload starting");

    if cli.validate_config {
        return match run_validate(&cli) {
            Ok(true) => ExitCode::SUCCESS,
            Ok(false) => ExitCode::FAILURE,
            Err(e) => {
                tracing::error!(error = %e, "Validation failed");
                ExitCode::FAILURE
            }
        };
    }

    let outcome = run_upload(&cli).await;
    if let UploadOutcome::Failed { ref msg } = outcome {
        tracing::error!(error = %msg, "Module failed");
    }

    println!("{}", outcome.to_module_json());

    if outcome.is_failed() {
        ExitCode::FAILURE
    } else {
        ExitCode::SUCCESS
    }
}

/// Initialize logging based on CLI options
fn init_logging(cli: &Cli) -> anyhow::Result<()> {
    let default_log_level = if cli.quiet {
        "error"
    } else {
        match cli.verbose {
            0 => "warn",
            1 => "info",
            2 => "debug",
            _ => "trace",
        }
    };

    observability::init_with_config(ObservabilityConfig {
        log_format: cli.log_format.into(),
        default_log_level: default_log_level.to_string(),
    })
}

/// Help and version go to the terminal; anything else is a module failure on stdout
fn report_usage_error(err: clap::Error) -> ExitCode {
    match usage_failure(&err) {
        Some(outcome) => {
            println!("{}", outcome.to_module_json());
            ExitCode::FAILURE
        }
        None => {
            let _ = err.print();
            ExitCode::SUCCESS
        }
    }
}

fn usage_failure(err: &clap::Error) -> Option<UploadOutcome> {
    match err.kind() {
        ErrorKind::DisplayHelp
        | ErrorKind::DisplayVersion
        | ErrorKind::DisplayHelpOnMissingArgumentOrSubcommand => None,
        _ => {
            let rendered = err.render().to_string();
            let first_line = rendered.lines().next().unwrap_or_default();
            let message = first_line.trim_start_matches("error: ").trim();
            Some(UploadOutcome::failed(format!("Invalid module invocation: {message}")))
        }
    }
}
