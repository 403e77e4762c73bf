//! Rebuilds silence intervals from the analyzer's event stream.
//!
//! The fold keeps at most one open silence start. FFmpeg never opens a second
//! silent region before closing the first, so a repeated start simply
//! replaces the pending one.
//!
//! FFmpeg can report a slightly negative `silence_start` for the first
//! frame; interval starts are clamped to `0`.

use tracing::debug;

use crate::error::MediaResult;
use crate::events::{parse_events, SilenceEvent};
use crate::result::{DetectionResult, SilenceInterval};

/// Single-pass accumulator over [`SilenceEvent`]s.
#[derive(Debug, Default)]
pub struct IntervalReconstructor {
    pending_start: Option<f64>,
    last_progress: f64,
    intervals: Vec<SilenceInterval>,
}

impl IntervalReconstructor {
    pub fn new() -> Self {
        Self::default()
    }

    /// Feed one event.
    pub fn apply(&mut self, event: SilenceEvent) {
        match event {
            SilenceEvent::SilenceStart(start) => {
                let start = start.max(0.0);
                if let Some(previous) = self.pending_start.replace(start) {
                    debug!(previous, start, "Replacing unterminated silence start");
                }
            }
            SilenceEvent::SilenceEnd { end, duration } => {
                // A truncated log may lose the start marker.
                let start = self
                    .pending_start
                    .take()
                    .unwrap_or_else(|| (end - duration).max(0.0));
                self.intervals.push(SilenceInterval {
                    start,
                    end,
                    duration,
                });
            }
            SilenceEvent::Progress(timestamp) => {
                self.last_progress = timestamp;
            }
        }
    }

    /// Close any trailing silence and produce the result.
    ///
    /// An open start is only closed if progress moved past it; otherwise it
    /// is dropped.
    pub fn finish(mut self) -> DetectionResult {
        if let Some(start) = self.pending_start.take() {
            if self.last_progress > start {
                self.intervals.push(SilenceInterval {
                    start,
                    end: self.last_progress,
                    duration: self.last_progress - start,
                });
            } else {
                debug!(
                    start,
                    last_progress = self.last_progress,
                    "Dropping unterminated silence start"
                );
            }
        }

        DetectionResult {
            intervals: self.intervals,
            input_duration: self.last_progress,
        }
    }
}

/// Parse captured analyzer output into a [`DetectionResult`].
///
/// The first malformed marker aborts the whole parse.
pub fn reconstruct(output: &str) -> MediaResult<DetectionResult> {
    let mut reconstructor = IntervalReconstructor::new();
    for event in parse_events(output) {
        reconstructor.apply(event?);
    }
    Ok(reconstructor.finish())
}
