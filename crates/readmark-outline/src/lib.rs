#![forbid(unsafe_code)]

//! Outline: headings, the section filter, section heights, and row projection.
//!
//! Everything in this crate is pure and single-shot. The stateful part of
//! tracking lives in `readmark-runtime`.

pub mod heading;
pub mod heights;
pub mod outline;
pub mod reading_time;
pub mod rows;

pub use heading::{
    HeadingEntry, SECTION_MAX_DEPTH, Section, filter_sections, filter_sections_to_depth,
};
pub use heights::{SectionHeights, SectionKey};
pub use outline::{Outline, OutlineError};
pub use reading_time::{DEFAULT_WORDS_PER_MINUTE, ReadingTime, reading_time, reading_time_with_wpm};
pub use rows::{OutlineRow, OutlineView, RowMarks, project, row_marks};
