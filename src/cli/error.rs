//! CLI-level errors (top of the error chain)

use thiserror::Error;

use crate::errors::TemplateError;

/// Top-level errors, displayed to the user and mapped to exit codes.
#[derive(Error, Debug)]
pub enum CliError {
    #[error("{0}")]
    Template(#[from] TemplateError),

    #[error("invalid arguments: {0}")]
    InvalidArgs(String),
}

/// Result type for CLI operations.
pub type CliResult<T> = Result<T, CliError>;

impl CliError {
    /// Get the appropriate exit code for this error.
    pub fn exit_code(&self) -> i32 {
        match self {
            CliError::InvalidArgs(_) => crate::exitcode::USAGE,
            CliError::Template(e) => match e {
                TemplateError::FileWrite { .. } => crate::exitcode::CANTCREAT,
                TemplateError::DirCreate { .. } => crate::exitcode::IOERR,
                TemplateError::ConfigLoad { .. } | TemplateError::ConfigPersist { .. } => {
                    crate::exitcode::CONFIG
                }
            },
        }
    }
}
