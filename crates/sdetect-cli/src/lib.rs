//! Command-line front end for `sdetect-media`.
//!
//! Resolves the input (downloading http(s) URLs to a temporary file), runs
//! silence detection and renders the report.

pub mod args;
pub mod download;
pub mod error;
pub mod input;
pub mod logging;
pub mod report;

use anyhow::Context;
use tracing::debug;

use sdetect_media::{SilenceDetector, DEFAULT_FULL_SILENCE_TOLERANCE};

pub use args::{Cli, OutputFormat};
pub use error::{CliError, CliResult};

use crate::input::{display_input, resolve_input};
use crate::report::{render_json, render_text, ReportContext};

/// Run one detection and return the rendered report.
pub async fn run(cli: &Cli, detector: &SilenceDetector) -> anyhow::Result<String> {
    let original = cli.input.trim();

    let resolved = resolve_input(original)
        .await
        .with_context(|| format!("failed to resolve input {original:?}"))?;

    if cli.silence_duration <= 0.0 {
        return Err(CliError::invalid_argument("--silence-duration must be greater than zero").into());
    }

    let options = cli.detection_options();
    debug!(
        input = %resolved.path().display(),
        downloaded = resolved.is_downloaded(),
        ffmpeg = %detector.ffmpeg_path().display(),
        "Running detection"
    );

    let result = detector
        .detect(resolved.path(), &options)
        .await
        .context("silence detection failed")?;

    if cli.check_full_silence {
        result
            .full_silence_verdict(DEFAULT_FULL_SILENCE_TOLERANCE)
            .context("cannot determine full silence")?;
    }

    let ctx = ReportContext {
        input: display_input(original),
        options,
        check_full_silence: cli.check_full_silence,
    };

    let rendered = match cli.output {
        OutputFormat::Json => render_json(&result, &ctx)?,
        OutputFormat::Text => render_text(&result, &ctx),
    };
    Ok(rendered)
}
