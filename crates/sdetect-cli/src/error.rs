//! CLI error types.

use std::path::PathBuf;
use thiserror::Error;

pub type CliResult<T> = Result<T, CliError>;

#[derive(Debug, Error)]
pub enum CliError {
    #[error("invalid URL: {0}")]
    InvalidUrl(#[from] url::ParseError),

    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Download failed: {0}")]
    DownloadFailed(String),

    #[error("failed to stat input {path:?}: {source}")]
    InputUnavailable {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("input {0:?} is a directory, expected a file")]
    InputIsDirectory(PathBuf),

    #[error("{0}")]
    InvalidArgument(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON encode error: {0}")]
    Json(#[from] serde_json::Error),
}

impl CliError {
    pub fn download_failed(msg: impl Into<String>) -> Self {
        Self::DownloadFailed(msg.into())
    }

    pub fn invalid_argument(msg: impl Into<String>) -> Self {
        Self::InvalidArgument(msg.into())
    }
}
