//! Silence detection entry point.

use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Instant;

use tracing::{debug, info};

use crate::command::{AnalyzerCommand, AnalyzerRunner, ProcessRunner};
use crate::config::{DetectionOptions, DetectorConfig};
use crate::error::{MediaError, MediaResult};
use crate::reconstruct::reconstruct;
use crate::result::DetectionResult;

/// Runs FFmpeg's `silencedetect` and interprets the output.
///
/// Holds no per-run state, so one detector can serve concurrent calls.
#[derive(Clone)]
pub struct SilenceDetector {
    ffmpeg_path: PathBuf,
    runner: Arc<dyn AnalyzerRunner>,
}

impl Default for SilenceDetector {
    fn default() -> Self {
        Self::new(&DetectorConfig::default())
    }
}

impl SilenceDetector {
    /// Create a detector that spawns FFmpeg according to `config`.
    pub fn new(config: &DetectorConfig) -> Self {
        Self {
            ffmpeg_path: config.ffmpeg_path.clone(),
            runner: Arc::new(ProcessRunner::new().with_timeout(config.timeout)),
        }
    }

    /// Override the FFmpeg binary.
    pub fn with_ffmpeg_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.ffmpeg_path = path.into();
        self
    }

    /// Replace how the analyzer is executed.
    pub fn with_runner(mut self, runner: Arc<dyn AnalyzerRunner>) -> Self {
        self.runner = runner;
        self
    }

    /// The FFmpeg binary this detector invokes.
    pub fn ffmpeg_path(&self) -> &Path {
        &self.ffmpeg_path
    }

    /// Detect silence in `input`.
    pub async fn detect(
        &self,
        input: impl AsRef<Path>,
        options: &DetectionOptions,
    ) -> MediaResult<DetectionResult> {
        let input = input.as_ref();
        options.validate()?;

        if !input.exists() {
            return Err(MediaError::FileNotFound(input.to_path_buf()));
        }

        let cmd = AnalyzerCommand::new(
            input,
            options.noise_level_db,
            options.min_silence_duration,
        );
        debug!(
            path = %input.display(),
            filter = %cmd.filter(),
            "Starting silence detection"
        );

        let started = Instant::now();
        let output = self.runner.run(&self.ffmpeg_path, &cmd.build_args()).await?;
        let result = reconstruct(&output)?;

        info!(
            path = %input.display(),
            intervals = result.intervals.len(),
            input_duration = result.input_duration,
            total_silence = result.total_silence(),
            elapsed_ms = started.elapsed().as_millis() as u64,
            "Silence detection complete"
        );

        Ok(result)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use std::sync::Mutex;

    /// Returns canned output and records the invocation.
    struct CannedRunner {
        output: String,
        calls: Mutex<Vec<(PathBuf, Vec<String>)>>,
    }

    impl CannedRunner {
        fn new(output: &str) -> Arc<Self> {
            Arc::new(Self {
                output: output.to_string(),
                calls: Mutex::new(Vec::new()),
            })
        }
    }

    #[async_trait]
    impl AnalyzerRunner for CannedRunner {
        async fn run(&self, program: &Path, args: &[String]) -> MediaResult<String> {
            self.calls
                .lock()
                .unwrap()
                .push((program.to_path_buf(), args.to_vec()));
            Ok(self.output.clone())
        }
    }

    struct FailingRunner;

    #[async_trait]
    impl AnalyzerRunner for FailingRunner {
        async fn run(&self, _program: &Path, _args: &[String]) -> MediaResult<String> {
            Err(MediaError::ffmpeg_failed("boom", None, Some(1)))
        }
    }

    #[tokio::test]
    async fn test_detect_passes_filter_and_parses_output() {
        let input = tempfile::NamedTempFile::new().unwrap();
        let runner = CannedRunner::new(
            "[silencedetect @ 0x1] silence_start: 0\n\
             [silencedetect @ 0x1] silence_end: 1.5 | silence_duration: 1.5\n\
             size=N/A time=00:00:04.00 bitrate=N/A speed=90x\n",
        );
        let detector = SilenceDetector::default()
            .with_ffmpeg_path("/opt/ffmpeg/bin/ffmpeg")
            .with_runner(runner.clone());

        let options = DetectionOptions::default()
            .with_noise_level_db(-45.0)
            .with_min_silence_duration(1.0);
        let result = detector.detect(input.path(), &options).await.unwrap();

        assert_eq!(result.intervals.len(), 1);
        assert!((result.input_duration - 4.0).abs() < 1e-9);

        let calls = runner.calls.lock().unwrap();
        assert_eq!(calls.len(), 1);
        assert_eq!(calls[0].0, PathBuf::from("/opt/ffmpeg/bin/ffmpeg"));
        assert!(calls[0]
            .1
            .contains(&"silencedetect=noise=-45dB:d=1".to_string()));
    }

    #[tokio::test]
    async fn test_invalid_options_rejected_before_running() {
        let input = tempfile::NamedTempFile::new().unwrap();
        let runner = CannedRunner::new("");
        let detector = SilenceDetector::default().with_runner(runner.clone());

        let options = DetectionOptions::default().with_min_silence_duration(0.0);
        let err = detector.detect(input.path(), &options).await.unwrap_err();

        assert!(matches!(err, MediaError::InvalidConfiguration(_)));
        assert!(runner.calls.lock().unwrap().is_empty());
    }

    #[test]
    fn test_missing_input() {
        let detector = SilenceDetector::default().with_runner(CannedRunner::new(""));
        let err = tokio_test::block_on(
            detector.detect("/nonexistent/input.wav", &DetectionOptions::default()),
        )
        .unwrap_err();
        assert!(matches!(err, MediaError::FileNotFound(_)));
    }

    #[tokio::test]
    async fn test_runner_failure_propagates() {
        let input = tempfile::NamedTempFile::new().unwrap();
        let detector = SilenceDetector::default().with_runner(Arc::new(FailingRunner));
        let err = detector
            .detect(input.path(), &DetectionOptions::default())
            .await
            .unwrap_err();
        assert!(matches!(err, MediaError::FfmpegFailed { exit_code: Some(1), .. }));
    }

    #[tokio::test]
    async fn test_malformed_output_fails_detection() {
        let input = tempfile::NamedTempFile::new().unwrap();
        let detector = SilenceDetector::default()
            .with_runner(CannedRunner::new("silence_start: 1\nsilence_end: x | silence_duration: 1"));
        let err = detector
            .detect(input.path(), &DetectionOptions::default())
            .await
            .unwrap_err();
        assert!(matches!(err, MediaError::MalformedEvent { .. }));
    }
}
