//! Custom error types for renderlint.
//!
//! Provides structured error handling with clear error categories.
//! Anything caused by the scanned project's content is absorbed into the
//! diagnostic stream by the engine; only configuration mistakes and
//! caller-level IO problems surface as these errors.

use std::path::PathBuf;
use thiserror::Error;

/// A type alias for `Result<T, Error>`.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur during renderlint operation.
#[derive(Debug, Error)]
pub enum Error {
    /// Failed to parse a source file.
    #[error("Failed to parse {path}: {message}")]
    Parse {
        /// Path to the file that failed to parse.
        path: PathBuf,
        /// Description of the parse error.
        message: String,
    },

    /// Failed to read or access a file.
    #[error("IO error for {path}: {source}")]
    Io {
        /// Path to the file that caused the error.
        path: PathBuf,
        /// Underlying IO error.
        #[source]
        source: std::io::Error,
    },

    /// The project manifest (package.json) is missing or unparseable.
    /// The scanner absorbs this into `framework = None`.
    #[error("Cannot read manifest {path}: {message}")]
    ManifestRead {
        /// Path to the manifest file.
        path: PathBuf,
        /// Description of the read/parse failure.
        message: String,
    },

    /// Invalid engine configuration (duplicate rule ID, unknown rule enabled).
    /// Rejected before any file is scanned.
    #[error("Configuration error: {message}")]
    Config {
        /// Description of the configuration error.
        message: String,
    },

    /// Generic IO error without path context.
    #[error("IO error: {0}")]
    IoGeneric(#[from] std::io::Error),
}

impl Error {
    /// Create a parse error for a specific file.
    pub fn parse(path: impl Into<PathBuf>, message: impl Into<String>) -> Self {
        Self::Parse {
            path: path.into(),
            message: message.into(),
        }
    }

    /// Create an IO error for a specific file.
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }

    /// Create a manifest read error.
    pub fn manifest(path: impl Into<PathBuf>, message: impl Into<String>) -> Self {
        Self::ManifestRead {
            path: path.into(),
            message: message.into(),
        }
    }

    /// Create a configuration error.
    pub fn config(message: impl Into<String>) -> Self {
        Self::Config {
            message: message.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_error_display() {
        let err = Error::parse("/path/to/App.jsx", "unexpected token");
        let msg = err.to_string();
        assert!(msg.contains("/path/to/App.jsx"));
        assert!(msg.contains("unexpected token"));
    }

    #[test]
    fn test_io_error_display() {
        let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "no such file");
        let err = Error::io("/proj/src/App.jsx", io_err);
        let msg = err.to_string();
        assert!(msg.contains("App.jsx"));
        assert!(msg.contains("no such file"));
    }

    #[test]
    fn test_manifest_error_display() {
        let err = Error::manifest("/proj/package.json", "expected value at line 1");
        let msg = err.to_string();
        assert!(msg.contains("package.json"));
        assert!(msg.contains("expected value"));
    }

    #[test]
    fn test_config_error_display() {
        let err = Error::config("duplicate rule ID: missing-list-key");
        assert!(err.to_string().contains("duplicate rule ID"));
    }

    #[test]
    fn test_io_generic_from() {
        let io_err = std::io::Error::new(std::io::ErrorKind::PermissionDenied, "access denied");
        let err: Error = io_err.into();
        assert!(matches!(err, Error::IoGeneric(_)));
    }
}
