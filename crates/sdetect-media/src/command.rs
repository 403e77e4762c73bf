//! FFmpeg command builder and runner.

use std::path::{Path, PathBuf};
use std::process::Stdio;
use std::time::Duration;

use async_trait::async_trait;
use tokio::process::Command;
use tokio::sync::watch;
use tracing::{debug, info, warn};

use crate::error::{MediaError, MediaResult};

/// Number of trailing stderr lines kept on failure.
const STDERR_TAIL_LINES: usize = 20;

/// Builder for a `silencedetect` analysis run.
///
/// The run decodes the input and discards it (`-f null -`); only the
/// diagnostic text is of interest.
#[derive(Debug, Clone)]
pub struct AnalyzerCommand {
    /// Input file path
    input: PathBuf,
    /// Noise threshold in dB
    noise_db: f64,
    /// Minimum silence length in seconds
    min_duration: f64,
}

impl AnalyzerCommand {
    /// Create a new analysis command.
    pub fn new(input: impl AsRef<Path>, noise_db: f64, min_duration: f64) -> Self {
        Self {
            input: input.as_ref().to_path_buf(),
            noise_db,
            min_duration,
        }
    }

    /// The `silencedetect` filter expression.
    pub fn filter(&self) -> String {
        format!("silencedetect=noise={}dB:d={}", self.noise_db, self.min_duration)
    }

    /// Build the command arguments.
    pub fn build_args(&self) -> Vec<String> {
        let mut args = vec!["-hide_banner".to_string(), "-nostdin".to_string()];

        args.push("-i".to_string());
        args.push(self.input.to_string_lossy().to_string());

        args.push("-af".to_string());
        args.push(self.filter());

        // No media output
        args.push("-f".to_string());
        args.push("null".to_string());
        args.push("-".to_string());

        args
    }
}

/// Executes the analyzer and hands back everything it printed.
#[async_trait]
pub trait AnalyzerRunner: Send + Sync {
    /// Run `program` with `args`, returning combined stdout and stderr.
    ///
    /// The two streams are concatenated, stdout first, not interleaved.
    /// `silencedetect` writes everything to stderr and the null muxer
    /// writes nothing to stdout, so marker order is preserved.
    async fn run(&self, program: &Path, args: &[String]) -> MediaResult<String>;
}

/// Runs the analyzer as a child process with timeout and cancellation.
#[derive(Debug, Default, Clone)]
pub struct ProcessRunner {
    /// Cancellation signal receiver
    cancel_rx: Option<watch::Receiver<bool>>,
    /// Timeout
    timeout: Option<Duration>,
}

impl ProcessRunner {
    /// Create a new runner.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set cancellation signal.
    pub fn with_cancel(mut self, cancel_rx: watch::Receiver<bool>) -> Self {
        self.cancel_rx = Some(cancel_rx);
        self
    }

    /// Set timeout.
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    async fn wait_for_cancel(cancel_rx: Option<watch::Receiver<bool>>) {
        match cancel_rx {
            Some(mut rx) => {
                if rx.wait_for(|cancelled| *cancelled).await.is_err() {
                    // Sender dropped without cancelling
                    std::future::pending::<()>().await;
                }
            }
            None => std::future::pending::<()>().await,
        }
    }
}

#[async_trait]
impl AnalyzerRunner for ProcessRunner {
    async fn run(&self, program: &Path, args: &[String]) -> MediaResult<String> {
        let program = resolve_program(program)?;
        debug!("Running FFmpeg: {} {}", program.display(), args.join(" "));

        let child = Command::new(&program)
            .args(args)
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .kill_on_drop(true)
            .spawn()?;

        let timeout = self.timeout.unwrap_or(Duration::MAX);
        let output = tokio::select! {
            output = tokio::time::timeout(timeout, child.wait_with_output()) => match output {
                Ok(output) => output?,
                Err(_) => {
                    // Dropping the future kills the child
                    let secs = timeout_secs(timeout);
                    warn!("FFmpeg timed out after {} seconds, killing process", secs);
                    return Err(MediaError::Timeout(secs));
                }
            },
            _ = Self::wait_for_cancel(self.cancel_rx.clone()) => {
                info!("FFmpeg cancelled, killing process");
                return Err(MediaError::Cancelled);
            }
        };

        let stdout = String::from_utf8_lossy(&output.stdout);
        let stderr = String::from_utf8_lossy(&output.stderr);

        if !output.status.success() {
            return Err(MediaError::ffmpeg_failed(
                "FFmpeg exited with non-zero status",
                Some(stderr_tail(&stderr)),
                output.status.code(),
            ));
        }

        let mut combined = String::with_capacity(stdout.len() + stderr.len() + 1);
        combined.push_str(&stdout);
        if !combined.is_empty() && !combined.ends_with('\n') {
            combined.push('\n');
        }
        combined.push_str(&stderr);
        Ok(combined)
    }
}

/// Locate the analyzer binary, either as a path or on `PATH`.
pub fn resolve_program(program: &Path) -> MediaResult<PathBuf> {
    which::which(program).map_err(|_| MediaError::FfmpegNotFound(program.display().to_string()))
}

/// Whole seconds for error reporting, rounded up so sub-second timeouts are not `0`.
fn timeout_secs(timeout: Duration) -> u64 {
    timeout
        .as_secs()
        .saturating_add(u64::from(timeout.subsec_nanos() > 0))
}

fn stderr_tail(stderr: &str) -> String {
    let lines: Vec<&str> = stderr.lines().collect();
    let start = lines.len().saturating_sub(STDERR_TAIL_LINES);
    lines[start..].join("\n")
}
