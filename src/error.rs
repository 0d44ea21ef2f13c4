//! Error types for polygon construction, mutation and persistence.

use thiserror::Error;

/// Errors raised by polygon operations.
///
/// Degenerate rings (fewer than three points) are not errors: they are
/// tolerated so shapes can be edited point by point.
#[derive(Error, Debug)]
pub enum PolygonError {
    /// Construction or mutation arguments that cannot form a polygon
    #[error("Invalid argument: {message}")]
    InvalidArgument {
        /// Description of the problem
        message: String,
    },

    /// Ring index past the end of the ring list
    #[error("Ring {index} out of range ({len} rings)")]
    RingOutOfRange { index: usize, len: usize },

    /// Point index past the end of a ring
    #[error("Point {index} out of range in ring {ring} ({len} points)")]
    PointOutOfRange {
        ring: usize,
        index: usize,
        len: usize,
    },

    /// A ring has no screen points yet, so no path can be built
    #[error("Ring {ring} has not been projected")]
    NotProjected { ring: usize },

    /// The polygon was disposed and can no longer be used
    #[error("Polygon has been disposed")]
    Disposed,

    /// JSON parsing or serialization error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// TOML parsing error
    #[error("TOML error: {0}")]
    Toml(#[from] toml::de::Error),

    /// I/O error during file operations
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl PolygonError {
    pub fn invalid_argument(message: impl Into<String>) -> Self {
        Self::InvalidArgument {
            message: message.into(),
        }
    }
}

pub type Result<T> = std::result::Result<T, PolygonError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_messages() {
        let err = PolygonError::invalid_argument("no rings");
        assert_eq!(err.to_string(), "Invalid argument: no rings");

        let err = PolygonError::PointOutOfRange {
            ring: 1,
            index: 7,
            len: 4,
        };
        assert_eq!(err.to_string(), "Point 7 out of range in ring 1 (4 points)");

        let err = PolygonError::NotProjected { ring: 0 };
        assert_eq!(err.to_string(), "Ring 0 has not been projected");
    }
}
