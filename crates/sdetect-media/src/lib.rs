//! FFmpeg `silencedetect` wrapper.
//!
//! This crate provides:
//! - Type-safe analyzer command building
//! - A replaceable runner for the FFmpeg subprocess, with timeout and cancellation
//! - Classification of `silence_start` / `silence_end` / `time=` diagnostic lines
//! - Reconstruction of silence intervals, including unterminated trailing silence
//! - A "fully silent" verdict over the reconstructed intervals

pub mod command;
pub mod config;
pub mod detector;
pub mod error;
pub mod events;
pub mod reconstruct;
pub mod result;

pub use command::{AnalyzerCommand, AnalyzerRunner, ProcessRunner};
pub use config::{DetectionOptions, DetectorConfig};
pub use detector::SilenceDetector;
pub use error::{MediaError, MediaResult};
pub use events::{parse_events, SilenceEvent};
pub use reconstruct::{reconstruct, IntervalReconstructor};
pub use result::{DetectionResult, SilenceInterval, DEFAULT_FULL_SILENCE_TOLERANCE};
