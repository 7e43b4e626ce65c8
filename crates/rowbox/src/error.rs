//! Error types for rowbox.
//!
//! Structural misuse of a [`ListModel`](crate::model::ListModel) (an
//! out-of-range position, a malformed batch) panics. The errors here cover the
//! recoverable edge: loading and validating configuration.

use std::path::PathBuf;

/// Result type alias for rowbox operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors raised while handling configuration.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// The TOML text could not be parsed into a configuration.
    #[error("invalid list configuration: {0}")]
    Parse(#[from] toml::de::Error),

    /// The configuration could not be written as TOML.
    #[error("failed to serialize list configuration: {0}")]
    Serialize(#[from] toml::ser::Error),

    /// File I/O error.
    #[error("failed to read configuration '{path}': {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// A header or footer height that cannot be rendered.
    #[error("invalid {slot} height {height}: must be finite and positive")]
    InvalidHeight { slot: &'static str, height: f64 },
}

impl Error {
    /// Create an I/O error.
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }

    /// Create a height error.
    pub fn invalid_height(slot: &'static str, height: f64) -> Self {
        Self::InvalidHeight { slot, height }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_invalid_height_message() {
        let err = Error::invalid_height("header", -1.0);
        assert_eq!(
            err.to_string(),
            "invalid header height -1: must be finite and positive"
        );
    }

    #[test]
    fn test_io_error_keeps_source() {
        use std::error::Error as _;

        let err = Error::io(
            "list.toml",
            std::io::Error::new(std::io::ErrorKind::NotFound, "gone"),
        );
        assert!(err.to_string().contains("list.toml"));
        assert!(err.source().is_some());
    }
}
