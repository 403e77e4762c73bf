//! Error types for silence detection.

use std::path::PathBuf;
use thiserror::Error;

/// Result type for detection operations.
pub type MediaResult<T> = Result<T, MediaError>;

/// Errors that can occur while running or interpreting the analyzer.
#[derive(Debug, Error)]
pub enum MediaError {
    #[error("FFmpeg not found: {0}")]
    FfmpegNotFound(String),

    #[error("FFmpeg command failed: {message}")]
    FfmpegFailed {
        message: String,
        stderr: Option<String>,
        exit_code: Option<i32>,
    },

    #[error("malformed {marker} value {value:?} on line {line}")]
    MalformedEvent {
        marker: &'static str,
        value: String,
        line: usize,
    },

    #[error("analyzer output did not include duration information")]
    InsufficientDurationInfo,

    #[error("Invalid configuration: {0}")]
    InvalidConfiguration(String),

    #[error("File not found: {0}")]
    FileNotFound(PathBuf),

    #[error("Operation cancelled")]
    Cancelled,

    #[error("Operation timed out after {0} seconds")]
    Timeout(u64),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl MediaError {
    /// Create an FFmpeg failure error.
    pub fn ffmpeg_failed(
        message: impl Into<String>,
        stderr: Option<String>,
        exit_code: Option<i32>,
    ) -> Self {
        Self::FfmpegFailed {
            message: message.into(),
            stderr,
            exit_code,
        }
    }

    /// Create a malformed event error for the given marker and raw value.
    pub fn malformed(marker: &'static str, value: impl Into<String>, line: usize) -> Self {
        Self::MalformedEvent {
            marker,
            value: value.into(),
            line,
        }
    }

    /// Create an invalid configuration error.
    pub fn invalid_configuration(message: impl Into<String>) -> Self {
        Self::InvalidConfiguration(message.into())
    }
}
