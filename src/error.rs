//! Error types for tfshift.
//!
//! This module defines the error hierarchy using `thiserror` for proper
//! error handling throughout the application. All errors include context
//! and can be easily propagated using the `?` operator.
//!
//! # Error Categories
//!
//! - **IO errors**: reading and overwriting `main.tf` files
//! - **Config errors**: invalid configuration files or flag combinations
//! - **Report errors**: report serialization failures
//!
//! # Example
//!
//! ```rust
//! use tfshift::error::{Result, TfShiftError};
//!
//! fn read_file(path: &str) -> Result<String> {
//!     std::fs::read_to_string(path)
//!         .map_err(|e| TfShiftError::io(path, e, file!(), line!()))
//! }
//! ```

use std::path::PathBuf;
use thiserror::Error;

/// Macro to create errors with automatic source location tracking.
///
/// Usage:
/// ```ignore
/// return Err(err!(ConfigValue { key: "tag_version".to_string(), message: "empty".to_string() }));
/// ```
#[macro_export]
macro_rules! err {
    ($variant:ident { $($field:ident: $value:expr),* $(,)? }) => {
        $crate::error::TfShiftError::$variant {
            $($field: $value,)*
            src_path: file!(),
            src_line: line!(),
        }
    };
}

/// A specialized Result type for tfshift operations.
pub type Result<T> = std::result::Result<T, TfShiftError>;

/// The main error type for tfshift.
///
/// This enum covers all error conditions that can occur during
/// discovery, rewriting, and reporting.
#[derive(Error, Debug)]
pub enum TfShiftError {
    // =========================================================================
    // I/O and File System Errors
    // =========================================================================
    /// I/O error with path context.
    #[error("I/O error at '{path}' ({src_path}:{src_line}): {source}")]
    Io {
        /// The path where the error occurred
        path: PathBuf,
        /// The underlying I/O error
        #[source]
        source: std::io::Error,
        /// Source file path
        src_path: &'static str,
        /// Source line number
        src_line: u32,
    },

    /// File not found.
    #[error("File not found: {path} ({src_path}:{src_line})")]
    FileNotFound {
        /// The missing file path
        path: PathBuf,
        /// Source file path
        src_path: &'static str,
        /// Source line number
        src_line: u32,
    },

    // =========================================================================
    // Configuration Errors
    // =========================================================================
    /// Configuration parsing error.
    #[error("Failed to parse configuration ({src_path}:{src_line}): {message}")]
    ConfigParse {
        /// Error message
        message: String,
        /// The underlying error (if any)
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
        /// Source file path
        src_path: &'static str,
        /// Source line number
        src_line: u32,
    },

    /// Invalid configuration value.
    #[error("Invalid configuration value for '{key}' ({src_path}:{src_line}): {message}")]
    ConfigValue {
        /// The configuration key
        key: String,
        /// Error message
        message: String,
        /// Source file path
        src_path: &'static str,
        /// Source line number
        src_line: u32,
    },

    /// Both rewrite modes requested at once.
    ///
    /// `update_tag` and `to_github` select different source-matching
    /// predicates, so enabling both is ambiguous and rejected up front.
    #[error(
        "Conflicting rewrite modes ({src_path}:{src_line}): \
         'update_tag' and 'to_github' cannot both be enabled"
    )]
    ModeConflict {
        /// Source file path
        src_path: &'static str,
        /// Source line number
        src_line: u32,
    },

    // =========================================================================
    // Report Errors
    // =========================================================================
    /// Report generation error.
    #[error("Failed to generate report ({src_path}:{src_line}): {message}")]
    ReportGeneration {
        /// Error message
        message: String,
        /// Source file path
        src_path: &'static str,
        /// Source line number
        src_line: u32,
    },

    // =========================================================================
    // Generic Errors
    // =========================================================================
    /// Internal error (should not happen in normal operation).
    #[error("Internal error ({src_path}:{src_line}): {message}")]
    Internal {
        /// Error message
        message: String,
        /// Source file path
        src_path: &'static str,
        /// Source line number
        src_line: u32,
    },

    /// Multiple errors occurred.
    #[error("Multiple errors occurred ({count} total)")]
    Multiple {
        /// Number of errors
        count: usize,
        /// The individual errors
        errors: Vec<TfShiftError>,
    },
}

impl TfShiftError {
    /// Creates an `Io` error.
    #[must_use]
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error, src_path: &'static str, src_line: u32) -> Self {
        Self::Io { path: path.into(), source, src_path, src_line }
    }

    /// Determines if the error is recoverable (e.g., should continue
    /// rewriting other files when `continue_on_error` is enabled).
    ///
    /// Configuration and mode errors invalidate the whole run and are
    /// never recoverable; per-file I/O failures are.
    #[must_use]
    pub fn is_recoverable(&self) -> bool {
        matches!(self, Self::Io { .. } | Self::FileNotFound { .. })
    }

    /// Returns the appropriate exit code for the error.
    #[must_use]
    pub fn exit_code(&self) -> i32 {
        match self {
            Self::Io { source, .. } if source.kind() == std::io::ErrorKind::PermissionDenied => 13,
            Self::FileNotFound { .. } => 14,
            Self::ConfigParse { .. } => 18,
            Self::ConfigValue { .. } => 19,
            Self::ModeConflict { .. } => 20,
            Self::Multiple { .. } => 21,
            _ => 1, // Generic unhandled error
        }
    }

    /// Consolidates multiple errors into a single `TfShiftError::Multiple` if there's more than one.
    /// Otherwise, returns the single error or `Ok(())` if no errors.
    pub fn collect(errors: Vec<Self>) -> Result<()> {
        if errors.is_empty() {
            Ok(())
        } else if errors.len() == 1 {
            Err(errors.into_iter().next().unwrap())
        } else {
            Err(Self::Multiple {
                count: errors.len(),
                errors,
            })
        }
    }
}

impl From<std::io::Error> for TfShiftError {
    fn from(source: std::io::Error) -> Self {
        // This conversion is typically used when a PathBuf is not readily available
        // For errors where a path is known, prefer TfShiftError::io(path, source, file!(), line!())
        Self::Io {
            path: PathBuf::new(),
            source,
            src_path: file!(),
            src_line: line!(),
        }
    }
}

impl From<serde_json::Error> for TfShiftError {
    fn from(source: serde_json::Error) -> Self {
        Self::Internal {
            message: format!("JSON serialization/deserialization error: {}", source),
            src_path: file!(),
            src_line: line!(),
        }
    }
}

/// A utility for collecting multiple errors during processing.
#[derive(Debug, Default)]
pub struct ErrorCollector {
    errors: Vec<TfShiftError>,
}

impl ErrorCollector {
    /// Create a new error collector.
    #[must_use]
    pub fn new() -> Self {
        Self { errors: Vec::new() }
    }

    /// Add an error to the collection.
    pub fn add(&mut self, error: TfShiftError) {
        self.errors.push(error);
    }

    /// Get the number of collected errors.
    #[must_use]
    pub fn count(&self) -> usize {
        self.errors.len()
    }

    /// Check if there are any errors.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.errors.is_empty()
    }

    /// Convert to a Result, returning Multiple error if there are any errors.
    pub fn into_result(self) -> Result<()> {
        TfShiftError::collect(self.errors)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mode_conflict_display() {
        let err = crate::err!(ModeConflict {});
        let msg = err.to_string();
        assert!(msg.contains("update_tag"));
        assert!(msg.contains("to_github"));
    }

    #[test]
    fn test_exit_codes() {
        assert_eq!(crate::err!(ModeConflict {}).exit_code(), 20);
        assert_eq!(
            crate::err!(ConfigParse { message: "bad".to_string(), source: None }).exit_code(),
            18
        );
        let not_found = std::io::Error::new(std::io::ErrorKind::NotFound, "missing");
        assert_eq!(TfShiftError::io("x", not_found, file!(), line!()).exit_code(), 1);
    }

    #[test]
    fn test_collect_empty_is_ok() {
        assert!(TfShiftError::collect(Vec::new()).is_ok());
    }

    #[test]
    fn test_collect_many_wraps_multiple() {
        let errors = vec![crate::err!(ModeConflict {}), crate::err!(ModeConflict {})];
        match TfShiftError::collect(errors) {
            Err(TfShiftError::Multiple { count, .. }) => assert_eq!(count, 2),
            other => panic!("Expected Multiple error, got {other:?}"),
        }
    }

    #[test]
    fn test_io_is_recoverable() {
        let e = TfShiftError::io(
            "main.tf",
            std::io::Error::new(std::io::ErrorKind::PermissionDenied, "denied"),
            file!(),
            line!(),
        );
        assert!(e.is_recoverable());
        assert!(!crate::err!(ModeConflict {}).is_recoverable());
    }
}
