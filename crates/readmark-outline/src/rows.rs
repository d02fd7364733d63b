#![forbid(unsafe_code)]

//! Row projection for outline renderers.
//!
//! Joins the immutable [`Outline`], the measured [`SectionHeights`], and
//! the latest [`ScrollState`] into the flat list a renderer draws: a
//! spacer for the region above the first section, then one row per
//! section with its proportional height and status marks.

use bitflags::bitflags;
use readmark_core::ScrollState;

use crate::heights::SectionHeights;
use crate::outline::Outline;

bitflags! {
    /// Status marks of an outline row. Marks combine: at 100% progress the
    /// active row is both `CURRENT` and `COMPLETED`.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
    pub struct RowMarks: u8 {
        /// Section has been read (checkmark).
        const COMPLETED = 1 << 0;
        /// Section is the active one (highlighted label).
        const CURRENT = 1 << 1;
        /// In-progress dot, shown on the active row until the end is reached.
        const INDICATOR = 1 << 2;
    }
}

/// Marks for the section at 1-based `position`.
pub fn row_marks(position: usize, state: ScrollState) -> RowMarks {
    let mut marks = RowMarks::empty();
    if state.is_completed(position) {
        marks |= RowMarks::COMPLETED;
    }
    if state.is_current(position) {
        marks |= RowMarks::CURRENT;
        if !state.is_complete() {
            marks |= RowMarks::INDICATOR;
        }
    }
    marks
}

/// One section row.
#[derive(Debug, Clone, PartialEq)]
pub struct OutlineRow<'a> {
    /// 1-based section position.
    pub position: usize,
    /// Anchor identifier.
    pub slug: &'a str,
    /// Display label.
    pub text: &'a str,
    /// Share of the outline's height, in percent.
    pub height_percent: f64,
    /// Status marks.
    pub marks: RowMarks,
}

impl OutlineRow<'_> {
    /// In-page link target.
    pub fn href(&self) -> String {
        format!("#{}", self.slug)
    }

    /// Whether assistive tech should announce this row as the current step.
    #[inline]
    pub fn aria_current(&self) -> bool {
        self.marks.contains(RowMarks::CURRENT)
    }
}

/// Everything a renderer needs for one frame of the outline.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct OutlineView<'a> {
    /// Height of the leading spacer row; 0 when there are no rows.
    pub before_percent: f64,
    /// Section rows in document order.
    pub rows: Vec<OutlineRow<'a>>,
    /// Length of the progress line, in percent.
    pub progress: u8,
}

impl OutlineView<'_> {
    /// Row currently marked `CURRENT`, if any.
    pub fn current_row(&self) -> Option<&OutlineRow<'_>> {
        self.rows.iter().find(|row| row.aria_current())
    }
}

/// Project outline, heights, and state into renderable rows.
pub fn project<'a>(
    outline: &'a Outline,
    heights: &SectionHeights,
    state: ScrollState,
) -> OutlineView<'a> {
    let rows: Vec<_> = outline
        .iter()
        .map(|(position, section)| OutlineRow {
            position,
            slug: section.slug.as_str(),
            text: section.text.as_str(),
            height_percent: heights.get(&section.slug),
            marks: row_marks(position, state),
        })
        .collect();

    let before_percent = if rows.is_empty() {
        0.0
    } else {
        heights.before()
    };

    OutlineView {
        before_percent,
        rows,
        progress: state.progress,
    }
}
