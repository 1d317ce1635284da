//! Error types for the core library

use core::fmt;

/// Result type alias for the core library
pub type Result<T> = core::result::Result<T, Error>;

/// Error types that can occur while building frames
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Error {
    /// The variant requires a parameter but none was supplied
    MissingParameter,
    /// A parameter string could not be normalized to a single byte
    InvalidParameter(&'static str),
    /// Unrecognized projector model name
    UnknownVariant,
}

#[cfg(feature = "std")]
impl std::error::Error for Error {}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::MissingParameter => write!(f, "Missing parameter"),
            Error::InvalidParameter(msg) => write!(f, "Invalid parameter: {}", msg),
            Error::UnknownVariant => write!(f, "Unknown projector model"),
        }
    }
}
