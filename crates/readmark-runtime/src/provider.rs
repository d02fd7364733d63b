#![forbid(unsafe_code)]

//! Layout capabilities consumed by the tracker.
//!
//! The tracker never reads a rendering surface directly. Hosts implement
//! [`GeometryProvider`] and [`ScrollProvider`] over whatever they render
//! into; tests use [`FixedLayout`].
//!
//! Providers are read live on every recompute and never cached between
//! passes, since the document can resize or reflow at any time.

use std::cell::RefCell;
use std::rc::Rc;

use readmark_core::{DocumentMetrics, HeadingOffset};

/// Where the measured headings render and how tall the document is.
pub trait GeometryProvider {
    /// Measured headings in document order.
    fn section_offsets(&self) -> Vec<HeadingOffset>;

    /// Total scrollable height of the document.
    fn document_scroll_height(&self) -> f64;
}

/// Where the viewport currently is.
pub trait ScrollProvider {
    /// Current vertical scroll offset.
    fn scroll_y(&self) -> f64;

    /// Height of the visible viewport.
    fn viewport_height(&self) -> f64;
}

/// Both capabilities together.
pub trait LayoutProvider: GeometryProvider + ScrollProvider {
    /// Snapshot of scroll position and document size.
    fn metrics(&self) -> DocumentMetrics {
        DocumentMetrics::new(
            self.scroll_y(),
            self.document_scroll_height(),
            self.viewport_height(),
        )
    }
}

impl<T: GeometryProvider + ScrollProvider + ?Sized> LayoutProvider for T {}

impl<T: GeometryProvider + ?Sized> GeometryProvider for &T {
    fn section_offsets(&self) -> Vec<HeadingOffset> {
        (**self).section_offsets()
    }

    fn document_scroll_height(&self) -> f64 {
        (**self).document_scroll_height()
    }
}

impl<T: ScrollProvider + ?Sized> ScrollProvider for &T {
    fn scroll_y(&self) -> f64 {
        (**self).scroll_y()
    }

    fn viewport_height(&self) -> f64 {
        (**self).viewport_height()
    }
}

impl<T: GeometryProvider + ?Sized> GeometryProvider for Rc<RefCell<T>> {
    fn section_offsets(&self) -> Vec<HeadingOffset> {
        self.borrow().section_offsets()
    }

    fn document_scroll_height(&self) -> f64 {
        self.borrow().document_scroll_height()
    }
}

impl<T: ScrollProvider + ?Sized> ScrollProvider for Rc<RefCell<T>> {
    fn scroll_y(&self) -> f64 {
        self.borrow().scroll_y()
    }

    fn viewport_height(&self) -> f64 {
        self.borrow().viewport_height()
    }
}

/// A layout with fixed numbers, mutable between recomputes.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct FixedLayout {
    headings: Vec<HeadingOffset>,
    scroll_height: f64,
    viewport_height: f64,
    scroll_y: f64,
}

impl FixedLayout {
    /// A document of `scroll_height` seen through a `viewport_height` viewport.
    pub fn new(scroll_height: f64, viewport_height: f64) -> Self {
        Self {
            headings: Vec::new(),
            scroll_height,
            viewport_height,
            scroll_y: 0.0,
        }
    }

    /// Append a measured heading.
    #[must_use]
    pub fn heading(mut self, slug: impl Into<String>, offset: f64) -> Self {
        self.headings.push(HeadingOffset::new(slug, offset));
        self
    }

    /// Append several measured headings.
    #[must_use]
    pub fn headings<S: Into<String>>(mut self, headings: impl IntoIterator<Item = (S, f64)>) -> Self {
        self.headings.extend(
            headings
                .into_iter()
                .map(|(slug, offset)| HeadingOffset::new(slug, offset)),
        );
        self
    }

    /// Set the scroll offset.
    pub fn set_scroll_y(&mut self, scroll_y: f64) {
        self.scroll_y = scroll_y;
    }

    /// Set the viewport height.
    pub fn set_viewport_height(&mut self, viewport_height: f64) {
        self.viewport_height = viewport_height;
    }

    /// Replace the document height and heading positions.
    pub fn reflow(&mut self, headings: Vec<HeadingOffset>, scroll_height: f64) {
        self.headings = headings;
        self.scroll_height = scroll_height;
    }

    /// Scroll offset that puts `percent` of the scrollable distance behind.
    pub fn offset_for_percent(&self, percent: f64) -> f64 {
        let distance = (self.scroll_height - self.viewport_height).max(0.0);
        distance * percent.clamp(0.0, 100.0) / 100.0
    }
}

impl GeometryProvider for FixedLayout {
    fn section_offsets(&self) -> Vec<HeadingOffset> {
        self.headings.clone()
    }

    fn document_scroll_height(&self) -> f64 {
        self.scroll_height
    }
}

impl ScrollProvider for FixedLayout {
    fn scroll_y(&self) -> f64 {
        self.scroll_y
    }

    fn viewport_height(&self) -> f64 {
        self.viewport_height
    }
}
