//! Error types for pathwalk.

use thiserror::Error;

/// Result type alias using pathwalk's Error type.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur during path arithmetic and traversal.
#[derive(Error, Debug)]
pub enum Error {
    /// I/O error occurred during file operations.
    #[error("I/O error: {source}")]
    Io {
        #[from]
        source: std::io::Error,
    },

    /// Path string contains a forbidden byte or is otherwise malformed.
    #[error("Invalid path: {reason}")]
    InvalidPath { reason: String },

    /// A strict-bounds join would ascend above its accumulation root.
    #[error("Sub-path is out of bounds: {subpath}")]
    PathOutOfBounds { subpath: String },

    /// A secure-join segment is `.`, `..`, or empty.
    #[error("Path security violation: {reason}")]
    PathSecurityViolation { reason: String },

    /// `rel()` called with a root that is not a prefix of the path.
    #[error("Path '{path}' is not a subpath of '{root}'")]
    NotASubpath { path: String, root: String },

    /// A directory could not be opened for traversal.
    #[error("Cannot open directory '{path}': {source}")]
    FileAccess {
        path: String,
        source: std::io::Error,
    },

    /// A path does not have the asserted or expected type on disk.
    #[error("Filesystem error at '{path}': {reason}")]
    Filesystem { path: String, reason: String },

    /// A pattern search completed without a match.
    #[error("No file matching pattern: {pattern}")]
    FileNotFound { pattern: String },

    /// A walk filter is not a valid glob pattern.
    #[error("Invalid filter pattern: {source}")]
    InvalidFilter {
        #[from]
        source: globset::Error,
    },
}

impl Error {
    /// Create an InvalidPath error.
    pub fn invalid_path(reason: impl Into<String>) -> Self {
        Error::InvalidPath {
            reason: reason.into(),
        }
    }

    /// Create a PathOutOfBounds error.
    pub fn out_of_bounds(subpath: impl Into<String>) -> Self {
        Error::PathOutOfBounds {
            subpath: subpath.into(),
        }
    }

    /// Create a PathSecurityViolation error.
    pub fn security_violation(reason: impl Into<String>) -> Self {
        Error::PathSecurityViolation {
            reason: reason.into(),
        }
    }

    /// Create a NotASubpath error.
    pub fn not_a_subpath(path: impl Into<String>, root: impl Into<String>) -> Self {
        Error::NotASubpath {
            path: path.into(),
            root: root.into(),
        }
    }

    /// Create a FileAccess error.
    pub fn file_access(path: impl Into<String>, source: std::io::Error) -> Self {
        Error::FileAccess {
            path: path.into(),
            source,
        }
    }

    /// Create a Filesystem error.
    pub fn filesystem(path: impl Into<String>, reason: impl Into<String>) -> Self {
        Error::Filesystem {
            path: path.into(),
            reason: reason.into(),
        }
    }

    /// Create a FileNotFound error.
    pub fn file_not_found(pattern: impl Into<String>) -> Self {
        Error::FileNotFound {
            pattern: pattern.into(),
        }
    }
}
