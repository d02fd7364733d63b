#![forbid(unsafe_code)]

//! readmark public facade crate.
//!
//! Re-exports the outline, tracker, and widget types from the internal
//! crates and offers a prelude for day-to-day usage.
//!
//! ```
//! use readmark::prelude::*;
//!
//! let headings = [
//!     HeadingEntry::new(2, "intro", "Intro"),
//!     HeadingEntry::new(2, "usage", "Usage"),
//! ];
//! let mut sim = DocumentSimulator::new(
//!     FixedLayout::new(1000.0, 200.0).headings([("intro", 100.0), ("usage", 500.0)]),
//! );
//! let widget = sim.mount(&headings, TrackerConfig::default());
//!
//! sim.scroll_to(800.0);
//! assert_eq!(widget.state(), ScrollState::new(100, 2));
//! ```

use std::fmt;

// --- Core re-exports -------------------------------------------------------

pub use readmark_core::event::{Event, ResizeEvent, ScrollEvent};
pub use readmark_core::event_coalescer::EventCoalescer;
pub use readmark_core::{DocumentMetrics, HeadingOffset, ScrollState, percent_of};

// --- Outline re-exports ----------------------------------------------------

pub use readmark_outline::{
    HeadingEntry, Outline, OutlineError, OutlineRow, OutlineView, ReadingTime, RowMarks,
    SECTION_MAX_DEPTH, Section, SectionHeights, SectionKey, filter_sections, project,
    reading_time,
};

// --- Runtime re-exports ----------------------------------------------------

pub use readmark_runtime::{
    ActivePolicy, ConfigError, ConfigParse, DocumentSimulator, FixedLayout, GeometryProvider,
    LayoutProvider, ScrollBus, ScrollProvider, ScrollTracker, Subscription, TocWidget,
    TrackerConfig,
};

// --- Errors ---------------------------------------------------------------

/// Top-level error type for strict mounting.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Error {
    /// Configuration violated its constraints.
    Config(Vec<ConfigError>),
    /// The heading outline is malformed.
    Outline(Vec<OutlineError>),
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Config(errors) => write_list(f, "invalid config", errors),
            Self::Outline(errors) => write_list(f, "invalid outline", errors),
        }
    }
}

fn write_list<E: fmt::Display>(f: &mut fmt::Formatter<'_>, label: &str, errors: &[E]) -> fmt::Result {
    write!(f, "{label}: ")?;
    for (i, err) in errors.iter().enumerate() {
        if i > 0 {
            f.write_str("; ")?;
        }
        write!(f, "{err}")?;
    }
    Ok(())
}

impl std::error::Error for Error {}

impl From<Vec<ConfigError>> for Error {
    fn from(errors: Vec<ConfigError>) -> Self {
        Self::Config(errors)
    }
}

impl From<Vec<OutlineError>> for Error {
    fn from(errors: Vec<OutlineError>) -> Self {
        Self::Outline(errors)
    }
}

/// Standard result type for readmark APIs.
pub type Result<T> = std::result::Result<T, Error>;

/// Mount a widget, rejecting invalid config and duplicate section slugs.
///
/// [`TocWidget::mount`] is lenient and only logs these problems.
pub fn try_mount<L: LayoutProvider + 'static>(
    headings: &[HeadingEntry],
    layout: L,
    bus: &ScrollBus,
    config: TrackerConfig,
) -> Result<TocWidget<L>> {
    config.validate()?;
    Outline::with_max_depth(headings, config.max_depth).validate()?;
    Ok(TocWidget::mount(headings, layout, bus, config))
}

// --- Prelude --------------------------------------------------------------

pub mod prelude {
    pub use crate::{
        ActivePolicy, DocumentSimulator, Error, Event, FixedLayout, GeometryProvider,
        HeadingEntry, Result, ScrollBus, ScrollProvider, ScrollState, TocWidget, TrackerConfig,
        try_mount,
    };

    pub use crate::{core, outline, runtime};
}

pub use readmark_core as core;
pub use readmark_outline as outline;
pub use readmark_runtime as runtime;
