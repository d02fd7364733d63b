#![forbid(unsafe_code)]

//! Event coalescing for high-frequency document notifications.
//!
//! A continuous scroll gesture can deliver a notification per frame or
//! faster. Hosts that batch work per animation frame can feed notifications
//! through [`EventCoalescer`] and recompute once per batch instead of once
//! per tick.
//!
//! # Design
//!
//! The coalescer uses a "latest wins" strategy:
//! - Scroll: keep only the most recent position, count the ticks
//! - Resize: keep only the most recent viewport height
//!
//! [`Event::Reflow`] and [`Event::Frame`] are not coalescable and pass
//! through immediately.
//! The caller is responsible for flushing pending events.
//!
//! # Usage
//!
//! ```
//! use readmark_core::event::Event;
//! use readmark_core::event_coalescer::EventCoalescer;
//!
//! let mut coalescer = EventCoalescer::new();
//!
//! assert!(coalescer.push(Event::scroll(10.0)).is_none());
//! assert!(coalescer.push(Event::scroll(25.0)).is_none());
//! assert_eq!(coalescer.pending_scroll_count(), 2);
//!
//! let pending = coalescer.flush();
//! assert_eq!(pending, vec![Event::scroll(25.0)]);
//! ```

use crate::event::{Event, ResizeEvent, ScrollEvent};

/// Coalesces bursts of scroll and resize notifications.
///
/// Not thread-safe; use it from the thread that dispatches document events.
/// Holds at most one pending scroll and one pending resize.
#[derive(Debug, Clone, Default)]
pub struct EventCoalescer {
    /// Latest scroll position and how many ticks it stands for.
    pending_scroll: Option<(ScrollEvent, u32)>,

    /// Latest viewport size.
    pending_resize: Option<ResizeEvent>,
}

impl EventCoalescer {
    /// Create an empty coalescer.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Push an event into the coalescer.
    ///
    /// Returns `Some(event)` if the event should be processed immediately,
    /// or `None` if it was absorbed into a pending one.
    ///
    /// # Coalescing Rules
    ///
    /// - **Scroll**: replaces the pending scroll position, count increments.
    /// - **Resize**: replaces the pending resize.
    /// - **Reflow** and **Frame**: returned immediately. Flush is NOT automatic; call
    ///   [`flush`](Self::flush) first if ordering against pending events matters.
    pub fn push(&mut self, event: Event) -> Option<Event> {
        match event {
            Event::Scroll(scroll) => {
                let count = self
                    .pending_scroll
                    .map_or(0, |(_, count)| count)
                    .saturating_add(1);
                self.pending_scroll = Some((scroll, count));
                None
            }
            Event::Resize(resize) => {
                self.pending_resize = Some(resize);
                None
            }
            Event::Reflow | Event::Frame => Some(event),
        }
    }

    /// Flush all pending coalesced events.
    ///
    /// Order: resize first, then scroll, so a recompute triggered by the
    /// scroll sees the new layout. The coalescer is empty afterwards.
    #[must_use]
    pub fn flush(&mut self) -> Vec<Event> {
        let mut events = Vec::with_capacity(2);
        self.flush_each(|event| events.push(event));
        events
    }

    /// Flush pending events, calling a closure for each.
    pub fn flush_each<F>(&mut self, mut f: F)
    where
        F: FnMut(Event),
    {
        if let Some(resize) = self.pending_resize.take() {
            f(Event::Resize(resize));
        }
        if let Some((scroll, _)) = self.pending_scroll.take() {
            f(Event::Scroll(scroll));
        }
    }

    /// Check if there are any pending coalesced events.
    #[must_use]
    pub fn has_pending(&self) -> bool {
        self.pending_scroll.is_some() || self.pending_resize.is_some()
    }

    /// Number of scroll ticks folded into the pending scroll, 0 if none.
    #[must_use]
    pub fn pending_scroll_count(&self) -> u32 {
        self.pending_scroll.map_or(0, |(_, count)| count)
    }

    /// Drop pending events without delivering them.
    pub fn clear(&mut self) {
        self.pending_scroll = None;
        self.pending_resize = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_coalescer_has_no_pending() {
        let coalescer = EventCoalescer::new();
        assert!(!coalescer.has_pending());
        assert_eq!(coalescer.pending_scroll_count(), 0);
    }

    #[test]
    fn scroll_latest_position_wins() {
        let mut coalescer = EventCoalescer::new();
        for y in [10.0, 20.0, 35.0] {
            assert!(coalescer.push(Event::scroll(y)).is_none());
        }
        assert_eq!(coalescer.pending_scroll_count(), 3);

        let pending = coalescer.flush();
        assert_eq!(pending, vec![Event::scroll(35.0)]);
        assert!(!coalescer.has_pending());
    }

    #[test]
    fn resize_latest_wins() {
        let mut coalescer = EventCoalescer::new();
        coalescer.push(Event::resize(600.0));
        coalescer.push(Event::resize(720.0));
        assert_eq!(coalescer.flush(), vec![Event::resize(720.0)]);
    }

    #[test]
    fn reflow_passes_through() {
        let mut coalescer = EventCoalescer::new();
        assert_eq!(coalescer.push(Event::Reflow), Some(Event::Reflow));
        assert_eq!(coalescer.push(Event::Frame), Some(Event::Frame));
        assert!(!coalescer.has_pending());
    }

    #[test]
    fn flush_orders_resize_before_scroll() {
        let mut coalescer = EventCoalescer::new();
        coalescer.push(Event::scroll(100.0));
        coalescer.push(Event::resize(500.0));
        coalescer.push(Event::scroll(140.0));

        let pending = coalescer.flush();
        assert_eq!(pending, vec![Event::resize(500.0), Event::scroll(140.0)]);
    }

    #[test]
    fn flush_each_empties() {
        let mut coalescer = EventCoalescer::new();
        coalescer.push(Event::scroll(1.0));
        let mut seen = Vec::new();
        coalescer.flush_each(|e| seen.push(e));
        assert_eq!(seen.len(), 1);
        assert!(coalescer.flush().is_empty());
    }

    #[test]
    fn clear_discards_pending() {
        let mut coalescer = EventCoalescer::new();
        coalescer.push(Event::scroll(1.0));
        coalescer.push(Event::resize(2.0));
        coalescer.clear();
        assert!(!coalescer.has_pending());
        assert!(coalescer.flush().is_empty());
    }

    #[test]
    fn scroll_count_saturates() {
        let mut coalescer = EventCoalescer::new();
        coalescer.pending_scroll = Some((ScrollEvent { scroll_y: 0.0 }, u32::MAX));
        coalescer.push(Event::scroll(1.0));
        assert_eq!(coalescer.pending_scroll_count(), u32::MAX);
    }
}
