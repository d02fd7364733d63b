#![forbid(unsafe_code)]

//! Core: scroll geometry, published state, document events, and logging.

pub mod event;
pub mod event_coalescer;
pub mod geometry;
pub mod logging;
pub mod state;

pub use geometry::{DocumentMetrics, HeadingOffset, percent_of};
pub use state::ScrollState;

#[cfg(feature = "tracing")]
pub use logging::trace;
