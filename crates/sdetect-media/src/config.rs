//! Detection configuration.

use std::path::PathBuf;
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::error::{MediaError, MediaResult};

/// Thresholds passed to the `silencedetect` filter.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DetectionOptions {
    /// Noise threshold in dB; quieter audio counts as silence
    pub noise_level_db: f64,
    /// Minimum silence length in seconds
    pub min_silence_duration: f64,
}

impl Default for DetectionOptions {
    fn default() -> Self {
        Self {
            noise_level_db: -30.0,
            min_silence_duration: 0.5,
        }
    }
}

impl DetectionOptions {
    /// Builder-style setter for the noise threshold.
    pub fn with_noise_level_db(mut self, db: f64) -> Self {
        self.noise_level_db = db;
        self
    }

    /// Builder-style setter for the minimum silence duration.
    pub fn with_min_silence_duration(mut self, secs: f64) -> Self {
        self.min_silence_duration = secs;
        self
    }

    /// Reject options FFmpeg would not accept.
    pub fn validate(&self) -> MediaResult<()> {
        if !self.noise_level_db.is_finite() {
            return Err(MediaError::invalid_configuration(
                "noise level must be a finite number",
            ));
        }
        if !self.min_silence_duration.is_finite() || self.min_silence_duration <= 0.0 {
            return Err(MediaError::invalid_configuration(
                "minimum silence duration must be greater than zero",
            ));
        }
        Ok(())
    }
}

/// Detector runtime configuration.
#[derive(Debug, Clone)]
pub struct DetectorConfig {
    /// FFmpeg binary name or path
    pub ffmpeg_path: PathBuf,
    /// Analyzer timeout
    pub timeout: Duration,
}

impl Default for DetectorConfig {
    fn default() -> Self {
        Self {
            ffmpeg_path: PathBuf::from("ffmpeg"),
            timeout: Duration::from_secs(300), // 5 minutes
        }
    }
}

impl DetectorConfig {
    /// Create config from environment variables.
    pub fn from_env() -> Self {
        Self {
            ffmpeg_path: std::env::var("SILENCE_DETECTOR_FFMPEG")
                .map(PathBuf::from)
                .unwrap_or_else(|_| PathBuf::from("ffmpeg")),
            timeout: Duration::from_secs(
                std::env::var("SILENCE_DETECTOR_TIMEOUT_SECS")
                    .ok()
                    .and_then(|s| s.parse().ok())
                    .unwrap_or(300),
            ),
        }
    }
}
