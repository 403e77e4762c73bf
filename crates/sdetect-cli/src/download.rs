//! Fetching remote inputs into temporary files.

use std::path::Path;
use std::time::Duration;

use tempfile::TempPath;
use tokio::io::AsyncWriteExt;
use tracing::debug;
use url::Url;

use crate::error::{CliError, CliResult};

/// Timeout for the whole download.
pub const DOWNLOAD_TIMEOUT: Duration = Duration::from_secs(120);

/// Whether `input` is an http(s) URL.
pub fn is_remote_input(input: &str) -> bool {
    if input.is_empty() {
        return false;
    }
    match Url::parse(input) {
        // Url lowercases the scheme
        Ok(url) => matches!(url.scheme(), "http" | "https"),
        Err(_) => false,
    }
}

/// Download `raw_url` into a temporary file.
///
/// The file keeps the URL path's extension so FFmpeg can probe it, and is
/// removed when the returned [`TempPath`] is dropped.
pub async fn download_remote_input(raw_url: &str, timeout: Duration) -> CliResult<TempPath> {
    let url = Url::parse(raw_url)?;

    let client = reqwest::Client::builder().timeout(timeout).build()?;
    let mut response = client.get(url.clone()).send().await?;

    let status = response.status();
    if !status.is_success() {
        return Err(CliError::download_failed(format!(
            "unexpected HTTP status {status}"
        )));
    }

    let suffix = Path::new(url.path())
        .extension()
        .map(|ext| format!(".{}", ext.to_string_lossy()))
        .unwrap_or_default();
    let temp = tempfile::Builder::new()
        .prefix("silence-detector-")
        .suffix(&suffix)
        .tempfile()?;

    let mut file = tokio::fs::File::from_std(temp.reopen()?);
    let mut written: u64 = 0;
    while let Some(chunk) = response.chunk().await? {
        file.write_all(&chunk).await?;
        written += chunk.len() as u64;
    }
    file.flush().await?;
    drop(file);

    debug!(
        url = %url,
        path = %temp.path().display(),
        bytes = written,
        "Downloaded remote input"
    );

    Ok(temp.into_temp_path())
}
