//! Command-line arguments.

use std::path::PathBuf;

use clap::{Parser, ValueEnum};

use sdetect_media::{DetectionOptions, DetectorConfig};

/// Report format written to stdout.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum, Default)]
pub enum OutputFormat {
    #[default]
    Text,
    Json,
}

/// Detect silent intervals in an audio or video file using FFmpeg.
#[derive(Parser, Debug, Clone)]
#[command(name = "silence-detector", author, version, about, long_about = None)]
pub struct Cli {
    /// Path or http(s) URL of the input media file
    #[arg(long)]
    pub input: String,

    /// Silence noise threshold in dB
    #[arg(long, default_value_t = -30.0, allow_negative_numbers = true)]
    pub silence_noise: f64,

    /// Minimum silence duration in seconds
    #[arg(long, default_value_t = 0.5, allow_negative_numbers = true)]
    pub silence_duration: f64,

    /// Output format
    #[arg(long, value_enum, ignore_case = true, default_value_t = OutputFormat::Text)]
    pub output: OutputFormat,

    /// Path to the ffmpeg binary
    #[arg(long, env = "SILENCE_DETECTOR_FFMPEG")]
    pub ffmpeg: Option<PathBuf>,

    /// Report whether the entire input is silent
    #[arg(long)]
    pub check_full_silence: bool,

    /// Analyzer timeout in seconds
    #[arg(long, env = "SILENCE_DETECTOR_TIMEOUT_SECS")]
    pub timeout: Option<u64>,

    /// Enable debug logging
    #[arg(long, short)]
    pub verbose: bool,
}

impl Cli {
    /// Detection thresholds requested on the command line.
    pub fn detection_options(&self) -> DetectionOptions {
        DetectionOptions::default()
            .with_noise_level_db(self.silence_noise)
            .with_min_silence_duration(self.silence_duration)
    }

    /// Environment configuration with command-line overrides applied.
    pub fn detector_config(&self) -> DetectorConfig {
        let mut config = DetectorConfig::from_env();
        if let Some(path) = &self.ffmpeg {
            config.ffmpeg_path = path.clone();
        }
        if let Some(secs) = self.timeout {
            config.timeout = std::time::Duration::from_secs(secs);
        }
        config
    }
}
