#![forbid(unsafe_code)]

//! Reading-time estimate shown next to an outline.

use std::time::Duration;

use unicode_segmentation::UnicodeSegmentation;

/// Average adult silent-reading speed.
pub const DEFAULT_WORDS_PER_MINUTE: u32 = 200;

/// Estimated time to read a text.
#[derive(Debug, Clone, PartialEq)]
pub struct ReadingTime {
    /// Number of words counted.
    pub words: usize,
    /// Unrounded minutes.
    pub minutes: f64,
    /// Unrounded duration, millisecond precision.
    pub time: Duration,
    /// Label such as `"3 min read"`.
    pub text: String,
}

/// Estimate reading time at [`DEFAULT_WORDS_PER_MINUTE`].
pub fn reading_time(text: &str) -> ReadingTime {
    reading_time_with_wpm(text, DEFAULT_WORDS_PER_MINUTE)
}

/// Estimate reading time at `words_per_minute` (0 is treated as 1).
///
/// Words follow Unicode word boundaries, so each CJK ideograph counts as a
/// word. The label rounds minutes to two decimals and then up to the next
/// whole minute.
pub fn reading_time_with_wpm(text: &str, words_per_minute: u32) -> ReadingTime {
    let words = text.unicode_words().count();
    let minutes = words as f64 / f64::from(words_per_minute.max(1));
    let millis = (minutes * 60_000.0).round() as u64;
    let displayed = ((minutes * 100.0).round() / 100.0).ceil() as u64;

    ReadingTime {
        words,
        minutes,
        time: Duration::from_millis(millis),
        text: format!("{displayed} min read"),
    }
}
