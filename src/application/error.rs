//! Application-level errors (wraps domain errors)

use thiserror::Error;

use crate::domain::FormatError;

/// The single failure kind reported by the parser.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ParseError {
    #[error("invalid Roman numeral {input:?} at position {position}: {reason}")]
    InvalidFormat {
        input: String,
        /// 0-based character position where parsing stopped
        position: usize,
        #[source]
        reason: FormatError,
    },
}

impl ParseError {
    pub fn reason(&self) -> &FormatError {
        match self {
            ParseError::InvalidFormat { reason, .. } => reason,
        }
    }
}

/// Application errors wrap parse errors and add configuration concerns.
#[derive(Error, Debug)]
pub enum ApplicationError {
    #[error("{0}")]
    Parse(#[from] ParseError),

    #[error("config error: {message}")]
    Config { message: String },
}

/// Result type for application layer operations.
pub type ApplicationResult<T> = Result<T, ApplicationError>;
