//! Resolving the `--input` argument to a local file.

use std::path::{Component, Path, PathBuf};

use tempfile::TempPath;
use tracing::info;

use crate::download::{download_remote_input, is_remote_input, DOWNLOAD_TIMEOUT};
use crate::error::{CliError, CliResult};

/// A local file ready for analysis.
///
/// Remote inputs are backed by a temporary download that is removed when
/// this value is dropped.
#[derive(Debug)]
pub struct ResolvedInput {
    path: PathBuf,
    download: Option<TempPath>,
}

impl ResolvedInput {
    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn is_downloaded(&self) -> bool {
        self.download.is_some()
    }
}

/// Turn `input` into a local regular file, downloading it if it is a URL.
pub async fn resolve_input(input: &str) -> CliResult<ResolvedInput> {
    let input = input.trim();

    let resolved = if is_remote_input(input) {
        info!(url = %input, "Downloading remote input");
        let temp = download_remote_input(input, DOWNLOAD_TIMEOUT).await?;
        ResolvedInput {
            path: temp.to_path_buf(),
            download: Some(temp),
        }
    } else {
        ResolvedInput {
            path: PathBuf::from(input),
            download: None,
        }
    };

    let metadata =
        tokio::fs::metadata(&resolved.path)
            .await
            .map_err(|source| CliError::InputUnavailable {
                path: PathBuf::from(input),
                source,
            })?;
    if metadata.is_dir() {
        return Err(CliError::InputIsDirectory(resolved.path));
    }

    Ok(resolved)
}

/// How the input is shown in reports: URLs verbatim, paths cleaned.
pub fn display_input(input: &str) -> String {
    if is_remote_input(input) {
        input.to_string()
    } else {
        clean_path(Path::new(input)).display().to_string()
    }
}

/// Lexically normalise a path: drop `.` segments and fold `..` where possible.
fn clean_path(path: &Path) -> PathBuf {
    let mut parts: Vec<Component> = Vec::new();
    for component in path.components() {
        match component {
            Component::CurDir => {}
            Component::ParentDir => match parts.last().copied() {
                Some(Component::Normal(_)) => {
                    parts.pop();
                }
                Some(Component::RootDir) | Some(Component::Prefix(_)) => {}
                _ => parts.push(component),
            },
            other => parts.push(other),
        }
    }

    if parts.is_empty() {
        return PathBuf::from(".");
    }
    parts.iter().collect()
}
