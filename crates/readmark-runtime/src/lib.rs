#![forbid(unsafe_code)]

//! readmark runtime
//!
//! Keeps a document outline in sync with the reader's scroll position.
//!
//! # Key Components
//!
//! - [`GeometryProvider`] / [`ScrollProvider`] - live layout capabilities supplied by the host
//! - [`ScrollTracker`] - progress and active-section state machine
//! - [`ScrollBus`] / [`Subscription`] - notification fan-out with scoped listeners
//! - [`TocWidget`] - mount/unmount lifecycle tying the pieces together
//! - [`TrackerConfig`] - env-overridable configuration
//! - [`DocumentSimulator`] - deterministic page for tests and benchmarks
//!
//! # How it fits in the system
//! `readmark-outline` turns headings into sections and sections into rows.
//! This crate adds time: it measures the document once, listens for scroll
//! notifications, and republishes [`ScrollState`](readmark_core::ScrollState)
//! whenever the reader moves.

pub mod config;
pub mod provider;
pub mod simulator;
pub mod subscription;
pub mod tracker;
pub mod widget;

pub use config::{ConfigError, ConfigParse, TrackerConfig};
pub use provider::{FixedLayout, GeometryProvider, LayoutProvider, ScrollProvider};
pub use simulator::{DeliveryRecord, DocumentSimulator, SharedLayout};
pub use subscription::{ScrollBus, SubId, Subscription};
pub use tracker::{ActivePolicy, ScrollTracker, next_section};
pub use widget::TocWidget;
