//! Detection result model.

use serde::{Deserialize, Serialize};

use crate::error::{MediaError, MediaResult};

/// Tolerance (seconds) used when judging whether an input is entirely silent.
pub const DEFAULT_FULL_SILENCE_TOLERANCE: f64 = 1e-3;

/// A closed silent range of the input.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct SilenceInterval {
    /// Start in seconds, never negative
    pub start: f64,
    /// End in seconds
    pub end: f64,
    /// Length in seconds
    pub duration: f64,
}

/// Silence intervals found in an input, plus its total duration.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DetectionResult {
    /// Chronological, non-overlapping intervals
    pub intervals: Vec<SilenceInterval>,
    /// Total input duration in seconds; `0` when the analyzer never reported progress
    pub input_duration: f64,
}

impl DetectionResult {
    /// Whether the intervals cover `[0, input_duration]` with no gap larger
    /// than `tolerance`.
    ///
    /// Overlapping intervals count as contiguous. Returns `false` when the
    /// duration is unknown or nothing was detected.
    pub fn fully_silent(&self, tolerance: f64) -> bool {
        if self.input_duration <= 0.0 {
            return false;
        }
        let (first, last) = match (self.intervals.first(), self.intervals.last()) {
            (Some(first), Some(last)) => (first, last),
            _ => return false,
        };

        if first.start > tolerance {
            return false;
        }

        let has_gap = self
            .intervals
            .windows(2)
            .any(|pair| pair[1].start - pair[0].end > tolerance);
        if has_gap {
            return false;
        }

        (last.end - self.input_duration).abs() <= tolerance
    }

    /// Like [`fully_silent`](Self::fully_silent), but an unknown duration is an
    /// error instead of a `false` verdict.
    pub fn full_silence_verdict(&self, tolerance: f64) -> MediaResult<bool> {
        if self.input_duration <= 0.0 {
            return Err(MediaError::InsufficientDurationInfo);
        }
        Ok(self.fully_silent(tolerance))
    }

    /// Sum of all interval durations.
    pub fn total_silence(&self) -> f64 {
        self.intervals.iter().map(|i| i.duration).sum()
    }

    /// Whether any silence was detected.
    pub fn is_empty(&self) -> bool {
        self.intervals.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn interval(start: f64, end: f64) -> SilenceInterval {
        SilenceInterval {
            start,
            end,
            duration: end - start,
        }
    }

    #[test]
    fn test_contiguous_intervals_are_fully_silent() {
        let result = DetectionResult {
            input_duration: 6.0,
            intervals: vec![interval(0.0, 2.0), interval(2.0, 4.0), interval(4.0, 6.0)],
        };
        assert!(result.fully_silent(1e-6));
    }

    #[test]
    fn test_partial_silence_is_not_fully_silent() {
        let result = DetectionResult {
            input_duration: 5.0,
            intervals: vec![interval(0.0, 1.0)],
        };
        assert!(!result.fully_silent(1e-6));
    }

    #[test]
    fn test_unknown_duration_or_no_intervals() {
        let no_duration = DetectionResult {
            input_duration: 0.0,
            intervals: vec![interval(0.0, 1.0)],
        };
        assert!(!no_duration.fully_silent(1.0));

        let no_intervals = DetectionResult {
            input_duration: 3.0,
            intervals: vec![],
        };
        assert!(!no_intervals.fully_silent(1.0));
    }

    #[test]
    fn test_gap_at_start_and_in_middle() {
        let late_start = DetectionResult {
            input_duration: 4.0,
            intervals: vec![interval(0.5, 4.0)],
        };
        assert!(!late_start.fully_silent(0.1));
        assert!(late_start.fully_silent(0.5));

        let middle_gap = DetectionResult {
            input_duration: 4.0,
            intervals: vec![interval(0.0, 1.0), interval(1.5, 4.0)],
        };
        assert!(!middle_gap.fully_silent(0.1));
    }

    #[test]
    fn test_overlap_counts_as_contiguous() {
        let result = DetectionResult {
            input_duration: 4.0,
            intervals: vec![interval(0.0, 2.5), interval(2.0, 4.0)],
        };
        assert!(result.fully_silent(1e-6));
    }

    #[test]
    fn test_end_mismatch_in_either_direction() {
        let short = DetectionResult {
            input_duration: 4.0,
            intervals: vec![interval(0.0, 3.9)],
        };
        assert!(!short.fully_silent(0.01));

        let long = DetectionResult {
            input_duration: 4.0,
            intervals: vec![interval(0.0, 4.1)],
        };
        assert!(!long.fully_silent(0.01));
        assert!(long.fully_silent(0.2));
    }

    #[test]
    fn test_fully_silent_is_repeatable() {
        let result = DetectionResult {
            input_duration: 6.0,
            intervals: vec![interval(0.0, 6.0)],
        };
        assert_eq!(result.fully_silent(1e-3), result.fully_silent(1e-3));
    }

    #[test]
    fn test_verdict_requires_duration() {
        let result = DetectionResult::default();
        assert!(matches!(
            result.full_silence_verdict(DEFAULT_FULL_SILENCE_TOLERANCE),
            Err(MediaError::InsufficientDurationInfo)
        ));

        let result = DetectionResult {
            input_duration: 2.0,
            intervals: vec![interval(0.0, 2.0)],
        };
        assert!(result.full_silence_verdict(DEFAULT_FULL_SILENCE_TOLERANCE).unwrap());
    }

    #[test]
    fn test_interval_serializes_with_capitalized_keys() {
        let json = serde_json::to_value(interval(1.0, 2.5)).unwrap();
        assert_eq!(json["Start"], 1.0);
        assert_eq!(json["End"], 2.5);
        assert_eq!(json["Duration"], 1.5);
    }
}
