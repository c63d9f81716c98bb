//! Result and error types for covsrc.

use std::path::PathBuf;
use thiserror::Error;

/// Result type for covsrc operations
pub type SourceResult<T> = Result<T, SourceError>;

/// Errors that can occur while reconciling sources with coverage data
///
/// A file that cannot be found is not an error: loaders report it as `Ok(None)`.
#[derive(Debug, Error)]
pub enum SourceError {
    /// The requested path resolves to a directory or escapes its root
    #[error("Invalid source path {path}: {reason}")]
    InvalidPath {
        /// Requested path
        path: String,
        /// Why the path was rejected
        reason: String,
    },

    /// Reading a resolved file failed
    #[error("Failed to read {}: {source}", path.display())]
    FileRead {
        /// File that could not be read
        path: PathBuf,
        /// Underlying I/O error
        #[source]
        source: std::io::Error,
    },

    /// Coverage data contains an impossible hit count
    #[error("Invalid coverage data for line {line}: hit count {hits} is negative")]
    InvalidCoverageData {
        /// 1-based line number
        line: u32,
        /// Offending hit count
        hits: i64,
    },

    /// Configuration is missing or malformed
    #[error("Configuration error: {message}")]
    Config {
        /// Error message
        message: String,
    },

    /// A coverage tracefile could not be parsed
    #[error("Coverage parse error at line {line}: {message}")]
    CoverageParse {
        /// 1-based line in the tracefile
        line: usize,
        /// Error message
        message: String,
    },

    /// I/O error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl SourceError {
    /// Create an invalid path error
    #[must_use]
    pub fn invalid_path(path: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::InvalidPath {
            path: path.into(),
            reason: reason.into(),
        }
    }

    /// Create a file read error
    #[must_use]
    pub fn file_read(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::FileRead {
            path: path.into(),
            source,
        }
    }

    /// Create a configuration error
    #[must_use]
    pub fn config(message: impl Into<String>) -> Self {
        Self::Config {
            message: message.into(),
        }
    }

    /// Create a coverage parse error
    #[must_use]
    pub fn coverage_parse(line: usize, message: impl Into<String>) -> Self {
        Self::CoverageParse {
            line,
            message: message.into(),
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::*;

    #[test]
    fn test_invalid_path_display() {
        let err = SourceError::invalid_path("src", "is a directory");
        assert_eq!(err.to_string(), "Invalid source path src: is a directory");
    }

    #[test]
    fn test_file_read_keeps_source() {
        use std::error::Error as _;
        let io = std::io::Error::new(std::io::ErrorKind::PermissionDenied, "denied");
        let err = SourceError::file_read("/tmp/Foo.java", io);
        assert!(err.to_string().contains("/tmp/Foo.java"));
        assert!(err.source().is_some());
    }

    #[test]
    fn test_invalid_coverage_display() {
        let err = SourceError::InvalidCoverageData { line: 3, hits: -1 };
        assert!(err.to_string().contains("line 3"));
        assert!(err.to_string().contains("-1"));
    }
}
