use crate::lowering::ConversionError;
use miette::Diagnostic;
use thiserror::Error;

/// Result type for converter operations
pub type Result<T> = std::result::Result<T, Error>;

/// Errors surfaced by the converter and the command-line front end
#[derive(Error, Debug, Diagnostic, Clone)]
pub enum Error {
    #[error("I/O error: {0}")]
    #[diagnostic(code(vb2cs::io_error))]
    Io(String),

    #[error("Invalid input document: {message}")]
    #[diagnostic(
        code(vb2cs::invalid_input),
        help("the input must be a JSON conversion unit with `routines` and optional `semantics`")
    )]
    InvalidInput { message: String },

    #[error("Failed to convert `{routine}`: {source}")]
    #[diagnostic(
        code(vb2cs::conversion_error),
        help("rerun with `--on-error placeholder` to keep converting the remaining routines")
    )]
    Conversion {
        routine: String,
        source: ConversionError,
    },

    #[error("Internal error: {message}")]
    #[diagnostic(code(vb2cs::internal_error))]
    Internal { message: String },
}

impl Error {
    pub fn conversion(routine: impl Into<String>, source: ConversionError) -> Self {
        Error::Conversion {
            routine: routine.into(),
            source,
        }
    }

    /// Create an internal error
    pub fn internal(message: impl Into<String>) -> Self {
        Error::Internal {
            message: message.into(),
        }
    }
}

impl From<std::io::Error> for Error {
    fn from(err: std::io::Error) -> Self {
        Error::Io(err.to_string())
    }
}

impl From<serde_json::Error> for Error {
    fn from(err: serde_json::Error) -> Self {
        Error::InvalidInput {
            message: err.to_string(),
        }
    }
}
