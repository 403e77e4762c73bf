//! Text and JSON rendering of detection results.

use std::fmt::Write;

use serde::Serialize;

use sdetect_media::{DetectionOptions, DetectionResult, SilenceInterval, DEFAULT_FULL_SILENCE_TOLERANCE};

use crate::error::CliResult;

/// What a report describes besides the result itself.
#[derive(Debug, Clone)]
pub struct ReportContext {
    /// Input as shown to the user
    pub input: String,
    pub options: DetectionOptions,
    /// Include the fully-silent verdict
    pub check_full_silence: bool,
}

#[derive(Debug, Serialize)]
struct JsonReport<'a> {
    input: &'a str,
    noise_db: f64,
    min_duration: f64,
    duration: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    fully_silent: Option<bool>,
    intervals: &'a [SilenceInterval],
}

/// Human-readable report.
pub fn render_text(result: &DetectionResult, ctx: &ReportContext) -> String {
    let mut out = String::new();

    // Writing to a String cannot fail
    let _ = writeln!(out, "Silence detection for {}", ctx.input);
    let _ = writeln!(
        out,
        "Noise threshold: {:.2}dB, Minimum duration: {:.2}s",
        ctx.options.noise_level_db, ctx.options.min_silence_duration
    );
    if result.input_duration > 0.0 {
        let _ = writeln!(out, "Input duration: {:.3}s", result.input_duration);
    }

    if result.is_empty() {
        out.push_str("No silence intervals detected.\n");
        if ctx.check_full_silence {
            out.push_str("Entire file is not silent.\n");
        }
        return out;
    }

    let _ = writeln!(out, "Detected {} silence interval(s):", result.intervals.len());
    for (i, interval) in result.intervals.iter().enumerate() {
        let _ = writeln!(
            out,
            "{}. start={:.3}s end={:.3}s duration={:.3}s",
            i + 1,
            interval.start,
            interval.end,
            interval.duration
        );
    }

    if ctx.check_full_silence {
        if result.fully_silent(DEFAULT_FULL_SILENCE_TOLERANCE) {
            out.push_str("Entire file is silent.\n");
        } else {
            out.push_str("Entire file is not silent.\n");
        }
    }

    out
}

/// Pretty-printed JSON report, newline terminated.
pub fn render_json(result: &DetectionResult, ctx: &ReportContext) -> CliResult<String> {
    let report = JsonReport {
        input: &ctx.input,
        noise_db: ctx.options.noise_level_db,
        min_duration: ctx.options.min_silence_duration,
        duration: result.input_duration,
        fully_silent: ctx
            .check_full_silence
            .then(|| result.fully_silent(DEFAULT_FULL_SILENCE_TOLERANCE)),
        intervals: &result.intervals,
    };

    let mut json = serde_json::to_string_pretty(&report)?;
    json.push('\n');
    Ok(json)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ctx(check_full_silence: bool) -> ReportContext {
        ReportContext {
            input: "media/a.wav".to_string(),
            options: DetectionOptions::default(),
            check_full_silence,
        }
    }

    fn sample_result() -> DetectionResult {
        DetectionResult {
            intervals: vec![
                SilenceInterval {
                    start: 0.0,
                    end: 3.5,
                    duration: 3.5,
                },
                SilenceInterval {
                    start: 10.0,
                    end: 12.0,
                    duration: 2.0,
                },
            ],
            input_duration: 12.0,
        }
    }

    #[test]
    fn test_text_report() {
        let text = render_text(&sample_result(), &ctx(true));
        assert_eq!(
            text,
            "Silence detection for media/a.wav\n\
             Noise threshold: -30.00dB, Minimum duration: 0.50s\n\
             Input duration: 12.000s\n\
             Detected 2 silence interval(s):\n\
             1. start=0.000s end=3.500s duration=3.500s\n\
             2. start=10.000s end=12.000s duration=2.000s\n\
             Entire file is not silent.\n"
        );
    }

    #[test]
    fn test_text_report_without_silence() {
        let result = DetectionResult::default();
        let text = render_text(&result, &ctx(false));
        assert!(!text.contains("Input duration"));
        assert!(text.ends_with("No silence intervals detected.\n"));

        let text = render_text(&result, &ctx(true));
        assert!(text.ends_with("No silence intervals detected.\nEntire file is not silent.\n"));
    }

    #[test]
    fn test_text_report_fully_silent() {
        let result = DetectionResult {
            intervals: vec![SilenceInterval {
                start: 0.0,
                end: 4.0,
                duration: 4.0,
            }],
            input_duration: 4.0,
        };
        assert!(render_text(&result, &ctx(true)).ends_with("Entire file is silent.\n"));
    }

    #[test]
    fn test_json_report_fields() {
        let json = render_json(&sample_result(), &ctx(false)).unwrap();
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();

        assert_eq!(value["input"], "media/a.wav");
        assert_eq!(value["noise_db"], -30.0);
        assert_eq!(value["min_duration"], 0.5);
        assert_eq!(value["duration"], 12.0);
        assert!(value.get("fully_silent").is_none());
        assert_eq!(value["intervals"][1]["Start"], 10.0);
        assert_eq!(value["intervals"][1]["Duration"], 2.0);
    }

    #[test]
    fn test_json_report_includes_verdict_when_requested() {
        let json = render_json(&sample_result(), &ctx(true)).unwrap();
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();
        assert_eq!(value["fully_silent"], false);
    }

    #[test]
    fn test_json_empty_intervals_is_array() {
        let json = render_json(&DetectionResult::default(), &ctx(false)).unwrap();
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();
        assert_eq!(value["intervals"], serde_json::json!([]));
    }
}
