use std::fmt;

use lablens_types::ValidationError;

/// Result type for lablens-runtime operations
pub type Result<T> = std::result::Result<T, Error>;

/// Error types that can occur in the runtime layer
#[derive(Debug)]
pub enum Error {
    /// Record source could not be read
    Loader(lablens_loader::Error),

    /// Filter or request parameters were rejected
    Validation(ValidationError),

    /// IO operation failed
    Io(std::io::Error),

    /// Configuration error
    Config(String),

    /// No records are loaded
    DataUnavailable(String),

    /// Named entity is absent from the dataset
    NotFound(String),
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::Loader(err) => write!(f, "Load error: {}", err),
            Error::Validation(err) => write!(f, "Invalid request: {}", err),
            Error::Io(err) => write!(f, "IO error: {}", err),
            Error::Config(msg) => write!(f, "Configuration error: {}", msg),
            Error::DataUnavailable(msg) => write!(f, "Data unavailable: {}", msg),
            Error::NotFound(msg) => write!(f, "Not found: {}", msg),
        }
    }
}

impl std::error::Error for Error {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Error::Loader(err) => Some(err),
            Error::Validation(err) => Some(err),
            Error::Io(err) => Some(err),
            Error::Config(_) | Error::DataUnavailable(_) | Error::NotFound(_) => None,
        }
    }
}

impl From<lablens_loader::Error> for Error {
    fn from(err: lablens_loader::Error) -> Self {
        Error::Loader(err)
    }
}

impl From<ValidationError> for Error {
    fn from(err: ValidationError) -> Self {
        Error::Validation(err)
    }
}

impl From<std::io::Error> for Error {
    fn from(err: std::io::Error) -> Self {
        Error::Io(err)
    }
}

impl From<toml::de::Error> for Error {
    fn from(err: toml::de::Error) -> Self {
        Error::Config(err.to_string())
    }
}

impl From<toml::ser::Error> for Error {
    fn from(err: toml::ser::Error) -> Self {
        Error::Config(err.to_string())
    }
}
