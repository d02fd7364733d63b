#![forbid(unsafe_code)]

//! Scroll-to-section tracking.
//!
//! [`ScrollTracker`] turns live layout into the published [`ScrollState`].
//! It has two inputs:
//!
//! 1. **Measure** (once on mount, again on layout change when enabled):
//!    reads heading offsets and derives [`SectionHeights`].
//! 2. **Recompute** (every scroll notification): re-reads scroll position
//!    and document size, then updates progress and the active section.
//!
//! # Active section rule
//!
//! Each measured heading `i` is placed at `offset_i / scroll_height * 100`
//! and compared against the unrounded progress. How a passed heading moves
//! the index depends on [`ActivePolicy`]:
//!
//! - [`ActivePolicy::ForwardBiased`]: a passed heading `i` advances the
//!   index to `i + 1`, never lowers it. Only heading 0 can reset the index,
//!   all the way to 0, when the reader is back above it.
//! - [`ActivePolicy::Recount`]: the index is the number of passed headings,
//!   recomputed from scratch, so it follows the reader in both directions.
//!
//! # Failure Modes
//!
//! | Condition | Behavior |
//! |-----------|----------|
//! | `scroll_height - viewport_height <= 0` | progress 0 |
//! | `scroll_height <= 0` | every heading sits at 0% |
//! | no measured headings | index stays 0, heights empty |
//! | fewer headings after reflow | index clamped to heading count |
//!
//! Each recompute is O(number of measured headings).

use std::fmt;

use readmark_core::ScrollState;
use readmark_outline::SectionHeights;

use crate::provider::{GeometryProvider, LayoutProvider};

/// How the active section index reacts to passed headings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum ActivePolicy {
    /// Advance-only index with a full reset above the first heading.
    #[default]
    ForwardBiased,
    /// Bidirectional count of passed headings.
    Recount,
}

impl ActivePolicy {
    pub(crate) fn parse(value: &str) -> Option<Self> {
        match value.trim().to_ascii_lowercase().as_str() {
            "forward" | "forward-biased" | "forward_biased" => Some(Self::ForwardBiased),
            "recount" | "bidirectional" => Some(Self::Recount),
            _ => None,
        }
    }

    /// Stable name used in configuration and logs.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::ForwardBiased => "forward",
            Self::Recount => "recount",
        }
    }
}

impl fmt::Display for ActivePolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Next active section index.
///
/// `heading_percents` are heading positions as percent of document height,
/// in document order; `progress` is the unrounded read progress. The
/// result never exceeds the number of headings.
pub fn next_section<I>(current: usize, heading_percents: I, progress: f64, policy: ActivePolicy) -> usize
where
    I: IntoIterator<Item = f64>,
{
    match policy {
        ActivePolicy::ForwardBiased => {
            let mut next = current;
            let mut count = 0;
            for (index, percent) in heading_percents.into_iter().enumerate() {
                count = index + 1;
                if percent <= progress {
                    next = next.max(index + 1);
                } else if index == 0 {
                    next = 0;
                }
            }
            next.min(count)
        }
        ActivePolicy::Recount => heading_percents
            .into_iter()
            .filter(|percent| *percent <= progress)
            .count(),
    }
}

/// Progress and active-section state machine for one document.
#[derive(Debug, Clone, Default)]
pub struct ScrollTracker {
    policy: ActivePolicy,
    heights: SectionHeights,
    state: ScrollState,
    measure_count: u64,
    update_count: u64,
}

impl ScrollTracker {
    /// Create a tracker in the zero state.
    pub fn new(policy: ActivePolicy) -> Self {
        Self {
            policy,
            ..Self::default()
        }
    }

    /// Active section policy.
    #[inline]
    pub fn policy(&self) -> ActivePolicy {
        self.policy
    }

    /// Latest published state.
    #[inline]
    pub fn state(&self) -> ScrollState {
        self.state
    }

    /// Latest measured section heights.
    #[inline]
    pub fn heights(&self) -> &SectionHeights {
        &self.heights
    }

    /// Number of measurement passes so far.
    #[inline]
    pub fn measure_count(&self) -> u64 {
        self.measure_count
    }

    /// Number of recompute passes so far.
    #[inline]
    pub fn update_count(&self) -> u64 {
        self.update_count
    }

    /// Measure heading regions and store the resulting heights.
    pub fn measure<G: GeometryProvider + ?Sized>(&mut self, geometry: &G) -> &SectionHeights {
        let headings = geometry.section_offsets();
        let scroll_height = geometry.document_scroll_height();
        self.heights = SectionHeights::measure(&headings, scroll_height);
        self.measure_count += 1;
        tracing::debug!(
            headings = headings.len(),
            scroll_height,
            entries = self.heights.len(),
            "measured section heights"
        );
        &self.heights
    }

    /// Recompute progress and the active section from live layout.
    pub fn recompute<L: LayoutProvider + ?Sized>(&mut self, layout: &L) -> ScrollState {
        let metrics = layout.metrics();
        let progress_percent = metrics.progress_percent();
        let headings = layout.section_offsets();

        let current = next_section(
            self.state.current_section,
            headings
                .iter()
                .map(|heading| heading.percent_of_document(metrics.scroll_height)),
            progress_percent,
            self.policy,
        );

        self.state = ScrollState::new(metrics.progress(), current);
        self.update_count += 1;
        tracing::trace!(
            scroll_y = metrics.scroll_y,
            progress = self.state.progress,
            current_section = self.state.current_section,
            headings = headings.len(),
            "scroll recompute"
        );
        self.state
    }

    /// Return to the zero state, dropping measurements.
    pub fn reset(&mut self) {
        self.heights = SectionHeights::empty();
        self.state = ScrollState::default();
    }
}
