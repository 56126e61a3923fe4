//! Error types for pageflow.
//!
//! This module defines the error taxonomy using `thiserror`. Errors compose via `?`
//! and `From` conversions up to [`AppError`], which the binary reports before exiting.
//!
//! # Error Hierarchy
//!
//! - [`AppError`] - Top-level application error wrapping all failure modes
//!   - [`InputError`] - Text file reading failures (file not found, IO)
//!   - [`MeasurementFailure`] - The measurement collaborator could not measure a string
//!   - [`crate::config::ConfigError`] - Configuration file read/parse failures
//!   - [`crate::logging::LoggingError`] - Tracing subscriber setup failures
//!   - `std::io::Error` - Terminal rendering failures
//!
//! # Boundary Conditions Are Not Errors
//!
//! Navigation at the start or end of the document, an empty document, a zero-sized
//! viewport and stale or out-of-range jump requests are all absorbed as no-ops by the
//! viewport. The only failure the core itself can produce is [`MeasurementFailure`],
//! which is propagated to the caller and never retried.

use crate::config::ConfigError;
use crate::logging::LoggingError;
use std::path::PathBuf;
use thiserror::Error;

/// Top-level application error encompassing all failure modes.
///
/// All domain-specific error types convert to `AppError` via `From`, so the binary
/// can use `?` throughout its setup and event loop.
#[derive(Debug, Error)]
pub enum AppError {
    /// Failed to read the text file.
    #[error("Failed to read input: {0}")]
    Input(#[from] InputError),

    /// Configuration file exists but is unusable.
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// Logging could not be initialized.
    #[error("Logging error: {0}")]
    Logging(#[from] LoggingError),

    /// The text measurer failed during layout.
    ///
    /// Fatal for the running view: the caller must supply a working measurer.
    #[error("Layout error: {0}")]
    Measurement(#[from] MeasurementFailure),

    /// Terminal or TUI rendering error.
    #[error("Terminal error: {0}")]
    Terminal(#[from] std::io::Error),
}

/// Errors encountered when reading text input from disk.
#[derive(Debug, Error)]
pub enum InputError {
    /// The specified text file does not exist at the given path.
    ///
    /// # Examples
    ///
    /// ```
    /// use std::path::PathBuf;
    /// use pageflow::model::error::InputError;
    ///
    /// let err = InputError::FileNotFound {
    ///     path: PathBuf::from("/tmp/missing.txt")
    /// };
    /// assert!(err.to_string().contains("/tmp/missing.txt"));
    /// ```
    #[error("File not found: {path}")]
    FileNotFound {
        /// The filesystem path that was not found.
        path: PathBuf,
    },

    /// Generic I/O failure (permissions, disk errors).
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// The measurement collaborator failed to measure a string.
///
/// Carries the text that was being measured (truncated for display) and the
/// collaborator's own description of the failure.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("failed to measure {text:?}: {reason}")]
pub struct MeasurementFailure {
    /// Text being measured when the failure occurred.
    pub text: String,
    /// Collaborator-provided reason.
    pub reason: String,
}

impl MeasurementFailure {
    /// Longest excerpt of the measured text kept in the error.
    const MAX_EXCERPT_CHARS: usize = 32;

    /// Build a failure for `text`, keeping only a short excerpt of it.
    pub fn new(text: &str, reason: impl Into<String>) -> Self {
        Self {
            text: text.chars().take(Self::MAX_EXCERPT_CHARS).collect(),
            reason: reason.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn measurement_failure_truncates_long_text() {
        let long = "x".repeat(100);
        let err = MeasurementFailure::new(&long, "font not loaded");
        assert_eq!(err.text.chars().count(), 32);
        assert_eq!(err.reason, "font not loaded");
    }

    #[test]
    fn measurement_failure_display_names_reason() {
        let err = MeasurementFailure::new("abc", "glyph cache poisoned");
        let msg = err.to_string();
        assert!(msg.contains("\"abc\""), "got: {}", msg);
        assert!(msg.contains("glyph cache poisoned"), "got: {}", msg);
    }

    #[test]
    fn input_error_converts_to_app_error() {
        fn read() -> Result<(), InputError> {
            Err(InputError::FileNotFound {
                path: PathBuf::from("book.txt"),
            })
        }
        fn run() -> Result<(), AppError> {
            read()?;
            Ok(())
        }
        let err = run().unwrap_err();
        assert!(matches!(err, AppError::Input(InputError::FileNotFound { .. })));
        assert!(err.to_string().contains("book.txt"));
    }

    #[test]
    fn measurement_failure_converts_to_app_error() {
        let err: AppError = MeasurementFailure::new("a", "boom").into();
        assert!(matches!(err, AppError::Measurement(_)));
    }

    #[test]
    fn io_error_converts_to_input_error() {
        let io = std::io::Error::new(std::io::ErrorKind::PermissionDenied, "denied");
        let err: InputError = io.into();
        assert!(matches!(err, InputError::Io(_)));
    }
}
