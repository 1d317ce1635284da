//! Error types for the library

use thiserror::Error;

/// Result type alias for the library
pub type Result<T> = std::result::Result<T, Error>;

/// Error types that can occur in the library
#[derive(Error, Debug)]
pub enum Error {
    /// File system errors while loading configuration
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Frame encoding errors
    #[error("Protocol error: {0}")]
    Protocol(String),

    /// Invalid parameter errors
    #[error("Invalid parameter: {0}")]
    InvalidParameter(String),

    /// Configuration file or value errors
    #[error("Config error: {0}")]
    Config(String),
}

impl From<barco_projector_core::Error> for Error {
    fn from(err: barco_projector_core::Error) -> Self {
        match err {
            barco_projector_core::Error::MissingParameter => Error::Protocol(err.to_string()),
            barco_projector_core::Error::InvalidParameter(msg) => Error::InvalidParameter(msg.to_string()),
            barco_projector_core::Error::UnknownVariant => Error::Config(err.to_string()),
        }
    }
}

impl From<toml::de::Error> for Error {
    fn from(err: toml::de::Error) -> Self {
        Error::Config(err.to_string())
    }
}
