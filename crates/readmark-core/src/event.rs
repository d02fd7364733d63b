#![forbid(unsafe_code)]

//! Document notifications delivered to outline trackers.
//!
//! Events are hints: the tracker re-reads live geometry from its providers
//! when it handles one, so the payloads are only used for coalescing and
//! diagnostics.

/// A notification from the host document.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Event {
    /// The document scrolled.
    Scroll(ScrollEvent),
    /// The viewport changed size.
    Resize(ResizeEvent),
    /// Content reflowed without a viewport change (late images, fonts).
    Reflow,
    /// An animation frame boundary. Listeners that batch notifications
    /// apply what they collected since the previous frame.
    Frame,
}

impl Event {
    /// Shorthand for a scroll notification at `scroll_y`.
    #[inline]
    pub const fn scroll(scroll_y: f64) -> Self {
        Self::Scroll(ScrollEvent { scroll_y })
    }

    /// Shorthand for a resize notification.
    #[inline]
    pub const fn resize(viewport_height: f64) -> Self {
        Self::Resize(ResizeEvent { viewport_height })
    }

    /// Whether this event changes layout rather than position.
    #[inline]
    pub const fn is_layout_change(&self) -> bool {
        matches!(self, Self::Resize(_) | Self::Reflow)
    }
}

/// Scroll position reported with a scroll tick.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct ScrollEvent {
    /// Vertical offset at the time of the tick.
    pub scroll_y: f64,
}

/// New viewport height reported with a resize.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct ResizeEvent {
    /// Height of the viewport after the resize.
    pub viewport_height: f64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn constructors() {
        assert_eq!(
            Event::scroll(12.0),
            Event::Scroll(ScrollEvent { scroll_y: 12.0 })
        );
        assert_eq!(
            Event::resize(600.0),
            Event::Resize(ResizeEvent {
                viewport_height: 600.0
            })
        );
    }

    #[test]
    fn layout_changes() {
        assert!(!Event::scroll(0.0).is_layout_change());
        assert!(Event::resize(1.0).is_layout_change());
        assert!(Event::Reflow.is_layout_change());
        assert!(!Event::Frame.is_layout_change());
    }
}
