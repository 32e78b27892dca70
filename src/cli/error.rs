//! CLI-level errors (wraps application errors)

use thiserror::Error;

use crate::application::{ApplicationError, ParseError};

/// CLI errors are the top-level error type.
/// These are what get displayed to the user.
#[derive(Error, Debug)]
pub enum CliError {
    #[error("{0}")]
    Application(#[from] ApplicationError),

    #[error("I/O error: {context}")]
    Io {
        context: String,
        #[source]
        source: std::io::Error,
    },

    #[error("{invalid} of {total} numerals invalid")]
    InvalidNumerals { invalid: usize, total: usize },
}

impl From<ParseError> for CliError {
    fn from(e: ParseError) -> Self {
        CliError::Application(ApplicationError::Parse(e))
    }
}

impl CliError {
    /// Create an I/O error with context.
    pub fn io(context: impl Into<String>, source: std::io::Error) -> Self {
        Self::Io {
            context: context.into(),
            source,
        }
    }

    /// Get the appropriate exit code for this error.
    pub fn exit_code(&self) -> i32 {
        match self {
            CliError::InvalidNumerals { .. } => crate::exitcode::DATAERR,
            CliError::Io { .. } => crate::exitcode::IOERR,
            CliError::Application(e) => match e {
                ApplicationError::Parse(_) => crate::exitcode::DATAERR,
                ApplicationError::Config { .. } => crate::exitcode::CONFIG,
            },
        }
    }
}

/// Result type for CLI operations.
pub type CliResult<T> = Result<T, CliError>;
