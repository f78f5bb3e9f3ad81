//! CLI argument definitions using clap.

use clap::{Parser, ValueEnum};
use std::path::PathBuf;

/// ftd_file_upload - Ansible module uploading files to Cisco FTD devices
#[derive(Parser, Debug)]
#[command(
    name = "ftd_file_upload",
    author,
    version,
    about = "Uploads files to Cisco FTD devices over HTTP(S)",
    long_about = "Ansible binary module that uploads disk files, backups and upgrade packages \n\
                  to Cisco FTD devices.\n\n\
                  Ansible invokes it with the path of the module arguments file; without \n\
                  that path the arguments JSON is read from stdin. Exactly one JSON result \n\
                  object is written to stdout."
)]
pub struct Cli {
    /// Path to the module arguments file (JSON)
    pub args_file: Option<PathBuf>,

    /// Path to configuration file (TOML or JSON)
    #[arg(
        short,
        long,
        default_value = "ftd.toml",
        env = "FTD_UPLOAD_CONFIG"
    )]
    pub config: PathBuf,

    /// Override device URL from configuration
    #[arg(long, env = "FTD_HOST")]
    pub host: Option<String>,

    /// Override device username from configuration
    #[arg(long, env = "FTD_USERNAME")]
    pub username: Option<String>,

    /// Override device password from configuration
    #[arg(long, env = "FTD_PASSWORD", hide_env_values = true)]
    pub password: Option<String>,

    /// Run in check mode (validate only, never upload)
    #[arg(long)]
    pub check: bool,

    /// Validate the configuration, print a summary and exit
    #[arg(long, conflicts_with = "args_file")]
    pub validate_config: bool,

    /// Increase logging verbosity (-v for info, -vv for debug, -vvv for trace)
    #[arg(short, long, action = clap::ArgAction::Count, env = "FTD_UPLOAD_VERBOSE")]
    pub verbose: u8,

    /// Suppress all logging except errors
    #[arg(short, long, conflicts_with = "verbose")]
    pub quiet: bool,

    /// Log output format (logs go to stderr)
    #[arg(
        long,
        value_enum,
        default_value = "compact",
        env = "FTD_UPLOAD_LOG_FORMAT"
    )]
    pub log_format: LogFormat,
}

/// Log output format
#[derive(ValueEnum, Clone, Copy, Debug, Default)]
pub enum LogFormat {
    /// JSON structured logging
    Json,
    /// Human-readable pretty format
    Pretty,
    /// Compact single-line format
    #[default]
    Compact,
}

impl From<LogFormat> for observability::LogFormat {
    fn from(format: LogFormat) -> Self {
        match format {
            LogFormat::Json => Self::Json,
            LogFormat::Pretty => Self::Pretty,
            LogFormat::Compact => Self::Compact,
        }
    }
}
