use std::fmt;

/// Result type for lablens-loader operations
pub type Result<T> = std::result::Result<T, Error>;

/// Error types that can occur while reading a record source
#[derive(Debug)]
pub enum Error {
    /// IO operation failed
    Io(std::io::Error),

    /// CSV decoding failed
    Csv(csv::Error),

    /// JSON parsing failed
    Json(serde_json::Error),

    /// A required source column is absent from the header
    MissingColumn(String),

    /// File extension does not match any source
    UnsupportedFormat(String),
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::Io(err) => write!(f, "IO error: {}", err),
            Error::Csv(err) => write!(f, "CSV error: {}", err),
            Error::Json(err) => write!(f, "JSON error: {}", err),
            Error::MissingColumn(name) => write!(f, "Missing required column: {}", name),
            Error::UnsupportedFormat(ext) => {
                write!(f, "Unsupported record source '{}' (expected .csv or .json)", ext)
            }
        }
    }
}

impl std::error::Error for Error {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Error::Io(err) => Some(err),
            Error::Csv(err) => Some(err),
            Error::Json(err) => Some(err),
            Error::MissingColumn(_) | Error::UnsupportedFormat(_) => None,
        }
    }
}

impl From<std::io::Error> for Error {
    fn from(err: std::io::Error) -> Self {
        Error::Io(err)
    }
}

impl From<csv::Error> for Error {
    fn from(err: csv::Error) -> Self {
        Error::Csv(err)
    }
}

impl From<serde_json::Error> for Error {
    fn from(err: serde_json::Error) -> Self {
        Error::Json(err)
    }
}
