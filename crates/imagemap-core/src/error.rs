//! Error handling for imagemap
//!
//! Provides error types for the layers of the overlay engine:
//! - Shape errors (decoding shape definitions and point lists)
//! - Host errors (link resolution, storage, navigation collaborators)
//!
//! All error types use `thiserror` for ergonomic error handling.

use thiserror::Error;

/// Shape error type
///
/// Represents failures while decoding a shape definition from its wire form.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ShapeError {
    /// The JSON text could not be parsed
    #[error("Invalid shape JSON: {reason}")]
    InvalidJson {
        /// The parser message.
        reason: String,
    },

    /// A JSON value had a type the decoder does not accept
    #[error("Unsupported shape definition: expected {expected}, got {actual}")]
    UnsupportedDefinition {
        /// What the decoder expected.
        expected: String,
        /// What it found instead.
        actual: String,
    },

    /// A polygon point was not an `x,y` pair of numbers
    #[error("Invalid polygon point '{point}'")]
    InvalidPoint {
        /// The offending token.
        point: String,
    },

    /// A polygon had fewer vertices than a polygon needs
    #[error("Polygon needs at least 3 points, got {count}")]
    TooFewPoints {
        /// Number of decoded points.
        count: usize,
    },

    /// A region object could not be decoded
    #[error("Invalid region #{index}: {reason}")]
    InvalidRegion {
        /// Position of the region in its sequence.
        index: usize,
        /// The decoder message.
        reason: String,
    },
}

impl From<serde_json::Error> for ShapeError {
    fn from(err: serde_json::Error) -> Self {
        ShapeError::InvalidJson {
            reason: err.to_string(),
        }
    }
}

/// Host error type
///
/// Represents failures reported by the host collaborators: the store,
/// link resolution, navigation and image loading.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum HostError {
    /// The requested file does not exist
    #[error("File not found: {path}")]
    NotFound {
        /// The path that was looked up.
        path: String,
    },

    /// The store refused access
    #[error("Permission denied: {path}")]
    PermissionDenied {
        /// The path that was accessed.
        path: String,
    },

    /// Any other I/O failure
    #[error("I/O error on {path}: {reason}")]
    Io {
        /// The path being read or written.
        path: String,
        /// The underlying message.
        reason: String,
    },

    /// The collaborator is not available in this host
    #[error("Host service unavailable: {service}")]
    Unavailable {
        /// The missing service.
        service: String,
    },

    /// The image was dropped before it finished loading
    #[error("Image never finished loading")]
    ImageNotLoaded,
}

impl HostError {
    /// Map a `std::io::Error` for `path` onto the host error kinds.
    pub fn from_io(path: impl Into<String>, err: &std::io::Error) -> Self {
        let path = path.into();
        match err.kind() {
            std::io::ErrorKind::NotFound => HostError::NotFound { path },
            std::io::ErrorKind::PermissionDenied => HostError::PermissionDenied { path },
            _ => HostError::Io {
                path,
                reason: err.to_string(),
            },
        }
    }
}

/// Main error type for imagemap
///
/// A unified error type that can represent any error from all layers.
#[derive(Error, Debug)]
pub enum Error {
    /// Shape decoding error
    #[error(transparent)]
    Shape(#[from] ShapeError),

    /// Host collaborator error
    #[error(transparent)]
    Host(#[from] HostError),

    /// JSON (de)serialization error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Standard I/O error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Generic error
    #[error("{0}")]
    Other(String),
}

impl Error {
    /// Create an error from a string message
    pub fn other(msg: impl Into<String>) -> Self {
        Error::Other(msg.into())
    }

    /// Check if this is a shape decoding error
    pub fn is_shape_error(&self) -> bool {
        matches!(self, Error::Shape(_))
    }

    /// Check if this is a host collaborator error
    pub fn is_host_error(&self) -> bool {
        matches!(self, Error::Host(_))
    }
}

/// Result type using Error
pub type Result<T> = std::result::Result<T, Error>;
