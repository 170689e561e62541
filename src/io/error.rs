//! Error types and path context for signal grid operations

use std::fmt;
use std::path::{Path, PathBuf};

/// Main error type for all signal grid operations
#[derive(Debug)]
pub enum SignalGridError {
    /// A construction parameter is outside its domain
    InvalidParameter {
        /// Name of the invalid parameter
        parameter: &'static str,
        /// Provided value that failed validation
        value: String,
        /// Explanation of why the value is invalid
        reason: String,
    },

    /// An argument's length does not match the grid
    InvalidArgument {
        /// Name of the argument
        argument: &'static str,
        /// Length the grid requires
        expected: usize,
        /// Length that was provided
        actual: usize,
    },

    /// Configuration could not be parsed or failed validation
    InvalidConfiguration {
        /// What is wrong with the configuration
        reason: String,
    },

    /// A session snapshot is malformed or belongs to a different grid
    InvalidSnapshot {
        /// What is wrong with the snapshot
        reason: String,
    },

    /// General file system operation failure
    FileSystem {
        /// Path involved in the operation
        path: PathBuf,
        /// Description of the operation that failed
        operation: &'static str,
        /// Underlying I/O error
        source: std::io::Error,
    },

    /// JSON encoding or decoding of a snapshot failed
    Serialization {
        /// Snapshot path
        path: PathBuf,
        /// Underlying serde error
        source: serde_json::Error,
    },

    /// Failed to write a heat-map image
    ImageExport {
        /// Path where export was attempted
        path: PathBuf,
        /// Underlying image export error
        source: image::ImageError,
    },

    /// Numerical computation produced an invalid result
    Computation {
        /// Name of the computation that failed
        operation: &'static str,
        /// Description of the failure
        reason: String,
    },
}

impl fmt::Display for SignalGridError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidParameter {
                parameter,
                value,
                reason,
            } => {
                write!(f, "Invalid parameter '{parameter}' = '{value}': {reason}")
            }
            Self::InvalidArgument {
                argument,
                expected,
                actual,
            } => {
                write!(
                    f,
                    "Invalid argument '{argument}': expected {expected} elements, got {actual}"
                )
            }
            Self::InvalidConfiguration { reason } => {
                write!(f, "Invalid configuration: {reason}")
            }
            Self::InvalidSnapshot { reason } => {
                write!(f, "Invalid snapshot: {reason}")
            }
            Self::FileSystem {
                path,
                operation,
                source,
            } => {
                write!(
                    f,
                    "File system error during {operation} on '{}': {source}",
                    path.display()
                )
            }
            Self::Serialization { path, source } => {
                write!(
                    f,
                    "Failed to (de)serialize snapshot '{}': {source}",
                    path.display()
                )
            }
            Self::ImageExport { path, source } => {
                write!(
                    f,
                    "Failed to export image to '{}': {source}",
                    path.display()
                )
            }
            Self::Computation { operation, reason } => {
                write!(f, "Computation error in {operation}: {reason}")
            }
        }
    }
}

impl std::error::Error for SignalGridError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::FileSystem { source, .. } => Some(source),
            Self::Serialization { source, .. } => Some(source),
            Self::ImageExport { source, .. } => Some(source),
            _ => None,
        }
    }
}

/// Convenience type alias for signal grid results
pub type Result<T> = std::result::Result<T, SignalGridError>;

/// Attaches a path and operation name to I/O failures
pub trait WithPath<T> {
    /// Convert an I/O error into [`SignalGridError::FileSystem`]
    ///
    /// # Errors
    ///
    /// Propagates the original error with the path and operation applied
    fn with_path(self, path: &Path, operation: &'static str) -> Result<T>;
}

impl<T> WithPath<T> for std::result::Result<T, std::io::Error> {
    fn with_path(self, path: &Path, operation: &'static str) -> Result<T> {
        self.map_err(|source| SignalGridError::FileSystem {
            path: path.to_path_buf(),
            operation,
            source,
        })
    }
}

impl From<std::io::Error> for SignalGridError {
    fn from(err: std::io::Error) -> Self {
        Self::FileSystem {
            path: PathBuf::from("<unknown>"),
            operation: "unknown",
            source: err,
        }
    }
}

impl From<image::ImageError> for SignalGridError {
    fn from(err: image::ImageError) -> Self {
        Self::ImageExport {
            path: PathBuf::from("<unknown>"),
            source: err,
        }
    }
}

/// Create an invalid parameter error
pub fn invalid_parameter(
    parameter: &'static str,
    value: &impl ToString,
    reason: &impl ToString,
) -> SignalGridError {
    SignalGridError::InvalidParameter {
        parameter,
        value: value.to_string(),
        reason: reason.to_string(),
    }
}

/// Create a computation error
pub fn computation_error(operation: &'static str, reason: &impl ToString) -> SignalGridError {
    SignalGridError::Computation {
        operation,
        reason: reason.to_string(),
    }
}
