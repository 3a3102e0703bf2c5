//! Typing telemetry
//!
//! Words-per-minute from timestamps captured by the caller before and after
//! text entry. Keystrokes are never observed here.

use chrono::{DateTime, Utc};

use crate::analyzer::round_half_up;
use crate::models::TypingTelemetry;

const MILLIS_PER_MINUTE: f64 = 60_000.0;

/// Both outputs are zero unless both timestamps are present.
/// A non-positive duration yields `wpm = 0` with the real word count.
pub fn telemetry(
    text: &str,
    typing_start: Option<DateTime<Utc>>,
    typing_end: Option<DateTime<Utc>>,
) -> TypingTelemetry {
    let (Some(start), Some(end)) = (typing_start, typing_end) else {
        return TypingTelemetry::default();
    };

    let word_count = text.split_whitespace().count();
    let minutes = (end - start).num_milliseconds() as f64 / MILLIS_PER_MINUTE;

    let wpm = if minutes > 0.0 {
        round_half_up(word_count as f64 / minutes).max(0) as u64
    } else {
        0
    };

    TypingTelemetry {
        wpm,
        word_count: word_count as u64,
    }
}
