#![forbid(unsafe_code)]

//! Scroll geometry primitives.
//!
//! All lengths are in the host's vertical coordinate space (CSS pixels,
//! terminal rows, ...) measured from the top of the document. Percentages
//! are plain `f64` in `0.0..=100.0`.

/// Express `part` as a percentage of `whole`.
///
/// Returns `0.0` when `whole` is not strictly positive, when either input is
/// not finite, or when the quotient overflows. Degenerate layouts never
/// produce `NaN` or infinities.
#[inline]
pub fn percent_of(part: f64, whole: f64) -> f64 {
    if !part.is_finite() || !whole.is_finite() || whole <= 0.0 {
        return 0.0;
    }
    let pct = part / whole * 100.0;
    if pct.is_finite() { pct } else { 0.0 }
}

/// A measured heading: its identifier and vertical offset from the document top.
#[derive(Debug, Clone, PartialEq)]
pub struct HeadingOffset {
    /// Anchor identifier of the rendered heading.
    pub slug: String,
    /// Distance from the top of the document.
    pub offset: f64,
}

impl HeadingOffset {
    /// Create a new heading measurement.
    pub fn new(slug: impl Into<String>, offset: f64) -> Self {
        Self {
            slug: slug.into(),
            offset,
        }
    }

    /// Offset as a percentage of the document scroll height.
    #[inline]
    pub fn percent_of_document(&self, scroll_height: f64) -> f64 {
        percent_of(self.offset, scroll_height)
    }
}

/// Live document measurements read at the start of a recompute pass.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct DocumentMetrics {
    /// Current vertical scroll offset.
    pub scroll_y: f64,
    /// Total scrollable height of the document.
    pub scroll_height: f64,
    /// Height of the visible viewport.
    pub viewport_height: f64,
}

impl DocumentMetrics {
    /// Create a new set of measurements.
    #[inline]
    pub const fn new(scroll_y: f64, scroll_height: f64, viewport_height: f64) -> Self {
        Self {
            scroll_y,
            scroll_height,
            viewport_height,
        }
    }

    /// Distance the viewport can travel: `scroll_height - viewport_height`.
    #[inline]
    pub fn scrollable_distance(&self) -> f64 {
        self.scroll_height - self.viewport_height
    }

    /// Whether the document can scroll at all.
    #[inline]
    pub fn is_scrollable(&self) -> bool {
        let distance = self.scrollable_distance();
        distance.is_finite() && distance > 0.0
    }

    /// Unrounded read progress, clamped to `0.0..=100.0`.
    ///
    /// A document that does not scroll reports `0.0`. Overscroll (negative
    /// offsets or offsets past the end) is clamped.
    pub fn progress_percent(&self) -> f64 {
        if !self.is_scrollable() {
            return 0.0;
        }
        percent_of(self.scroll_y, self.scrollable_distance()).clamp(0.0, 100.0)
    }

    /// Read progress rounded to the nearest whole percent.
    #[inline]
    pub fn progress(&self) -> u8 {
        // progress_percent is clamped to 0..=100, so the cast is lossless.
        self.progress_percent().round() as u8
    }
}
