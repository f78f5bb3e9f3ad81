//! Error types for module argument handling.

use thiserror::Error;

/// Module argument errors; `Display` is the module failure message
#[derive(Error, Debug)]
pub enum CliError {
    /// Arguments file could not be read
    #[error("Failed to read module arguments from {source_name}: {message}")]
    ArgsRead {
        source_name: String,
        message: String,
    },

    /// Arguments are not a JSON object
    #[error("Failed to parse module arguments: {message}")]
    ArgsParse { message: String },

    /// Required arguments missing
    #[error("missing required arguments: {}", .names.join(", "))]
    MissingRequired { names: Vec<String> },

    /// Arguments outside the module's argument spec
    #[error(
        "Unsupported parameters for ({module}) module: {}. Supported parameters include: {}.",
        .names.join(", "),
        .supported.join(", ")
    )]
    Unsupported {
        module: String,
        names: Vec<String>,
        supported: Vec<String>,
    },

    /// Value cannot be converted to the option's type
    #[error("argument '{name}' is of type {found} and we were unable to convert to {expected}")]
    InvalidType {
        name: String,
        found: String,
        expected: String,
    },
}

impl CliError {
    pub fn args_read(source_name: impl Into<String>, message: impl Into<String>) -> Self {
        Self::ArgsRead {
            source_name: source_name.into(),
            message: message.into(),
        }
    }

    pub fn args_parse(message: impl Into<String>) -> Self {
        Self::ArgsParse {
            message: message.into(),
        }
    }

    pub fn invalid_type(
        name: impl Into<String>,
        found: impl Into<String>,
        expected: impl Into<String>,
    ) -> Self {
        Self::InvalidType {
            name: name.into(),
            found: found.into(),
            expected: expected.into(),
        }
    }
}

/// Result type alias for CLI operations
pub type Result<T> = std::result::Result<T, CliError>;
