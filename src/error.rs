use thiserror::Error;

/// Result type for configinventory operations
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur in the configinventory library
#[derive(Error, Debug)]
pub enum Error {
    /// A required client integration is not available in this build
    #[error("Dependency unavailable: {0}")]
    Dependency(String),

    /// The calling principal is not authorized for the aggregate query
    #[error("Authorization error: {0}")]
    Authorization(String),

    /// Bad aggregator name, missing option, or unparseable configuration file
    #[error("Configuration error: {0}")]
    Configuration(String),

    /// A raw aggregator result does not parse under the expected literal format
    #[error("Malformed record: {0}")]
    MalformedRecord(String),

    /// Errors related to I/O operations
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// General internal errors
    #[error("Internal error: {0}")]
    Internal(String),
}

impl From<Box<dyn std::error::Error + Send + Sync>> for Error {
    fn from(err: Box<dyn std::error::Error + Send + Sync>) -> Self {
        Error::Internal(err.to_string())
    }
}
