//! Classification of FFmpeg `silencedetect` diagnostic lines.
//!
//! FFmpeg interleaves three kinds of lines we care about with its usual
//! banner and stream information:
//!
//! ```text
//! [silencedetect @ 0x5581] silence_start: 4.2
//! [silencedetect @ 0x5581] silence_end: 6.7 | silence_duration: 2.5
//! size=N/A time=00:00:07.04 bitrate=N/A speed= 412x
//! ```
//!
//! Everything else is ignored.

use std::sync::LazyLock;

use regex::Regex;

use crate::error::{MediaError, MediaResult};

static SILENCE_START: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"silence_start:\s*(\S+)").expect("valid silence_start pattern"));

static SILENCE_END: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"silence_end:\s*(\S+)\s*\|\s*silence_duration:\s*(\S+)")
        .expect("valid silence_end pattern")
});

// `\b` keeps `out_time=` from the -progress protocol from matching.
static PROGRESS_TIME: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\btime=(\d+):(\d+):([\d.]+)").expect("valid progress pattern")
});

/// A single event recognised in analyzer output.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum SilenceEvent {
    /// Analyzer entered a silent region at the given timestamp (seconds).
    SilenceStart(f64),
    /// Analyzer left a silent region.
    SilenceEnd {
        /// End timestamp in seconds
        end: f64,
        /// Duration reported by the analyzer in seconds
        duration: f64,
    },
    /// Progress marker: how far into the input the analyzer has got (seconds).
    Progress(f64),
}

/// Lazily classify every line of `text`, preserving order.
///
/// Lines that match no marker produce nothing. Carriage returns split lines
/// too, because FFmpeg redraws its stats line in place with `\r`.
pub fn parse_events(text: &str) -> impl Iterator<Item = MediaResult<SilenceEvent>> + '_ {
    text.lines()
        .enumerate()
        .flat_map(|(idx, line)| line.split('\r').map(move |segment| (idx + 1, segment)))
        .filter_map(|(line_no, segment)| parse_line(segment, line_no).transpose())
}

/// Classify a single line. `line_no` is only used for error context.
pub fn parse_line(line: &str, line_no: usize) -> MediaResult<Option<SilenceEvent>> {
    if let Some(caps) = SILENCE_START.captures(line) {
        let start = parse_seconds("silence_start", &caps[1], line_no)?;
        return Ok(Some(SilenceEvent::SilenceStart(start)));
    }

    if let Some(caps) = SILENCE_END.captures(line) {
        let end = parse_seconds("silence_end", &caps[1], line_no)?;
        let duration = parse_seconds("silence_duration", &caps[2], line_no)?;
        return Ok(Some(SilenceEvent::SilenceEnd { end, duration }));
    }

    if let Some(caps) = PROGRESS_TIME.captures(line) {
        let hours: u64 = caps[1]
            .parse()
            .map_err(|_| MediaError::malformed("time hours", &caps[1], line_no))?;
        let minutes: u64 = caps[2]
            .parse()
            .map_err(|_| MediaError::malformed("time minutes", &caps[2], line_no))?;
        let seconds = parse_seconds("time seconds", &caps[3], line_no)?;
        let whole = hours
            .checked_mul(3600)
            .and_then(|h| minutes.checked_mul(60).and_then(|m| h.checked_add(m)))
            .ok_or_else(|| MediaError::malformed("time hours", &caps[1], line_no))?;
        let total = whole as f64 + seconds;
        return Ok(Some(SilenceEvent::Progress(total)));
    }

    Ok(None)
}

fn parse_seconds(marker: &'static str, raw: &str, line_no: usize) -> MediaResult<f64> {
    match raw.parse::<f64>() {
        Ok(value) if value.is_finite() => Ok(value),
        _ => Err(MediaError::malformed(marker, raw, line_no)),
    }
}
