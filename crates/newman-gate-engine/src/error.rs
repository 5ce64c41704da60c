use std::fmt;
use std::path::PathBuf;

/// Result type for newman-gate-engine operations
pub type Result<T> = std::result::Result<T, Error>;

/// Error types that can occur in the engine layer
#[derive(Debug)]
pub enum Error {
    /// Log or report file is missing or unreadable
    InputUnavailable {
        path: PathBuf,
        source: std::io::Error,
    },

    /// Structured report is not valid Newman JSON
    MalformedReport {
        path: PathBuf,
        source: serde_json::Error,
    },

    /// A configured pattern failed to compile
    Pattern(regex::Error),

    /// Types layer error (threshold validation)
    Types(newman_gate_types::Error),
}

impl Error {
    /// True for configuration problems, as opposed to unusable input.
    pub fn is_configuration(&self) -> bool {
        matches!(self, Error::Pattern(_) | Error::Types(_))
    }
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::InputUnavailable { path, .. } => {
                write!(f, "Input not available: {}", path.display())
            }
            Error::MalformedReport { path, .. } => {
                write!(f, "Malformed report {}", path.display())
            }
            Error::Pattern(_) => write!(f, "Invalid configuration: bad pattern"),
            Error::Types(err) => write!(f, "{}", err),
        }
    }
}

impl std::error::Error for Error {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Error::InputUnavailable { source, .. } => Some(source),
            Error::MalformedReport { source, .. } => Some(source),
            Error::Pattern(err) => Some(err),
            // Display already forwards the inner message
            Error::Types(err) => std::error::Error::source(err),
        }
    }
}

impl From<regex::Error> for Error {
    fn from(err: regex::Error) -> Self {
        Error::Pattern(err)
    }
}

impl From<newman_gate_types::Error> for Error {
    fn from(err: newman_gate_types::Error) -> Self {
        Error::Types(err)
    }
}
