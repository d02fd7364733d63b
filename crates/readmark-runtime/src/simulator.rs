#![forbid(unsafe_code)]

//! Deterministic document simulator for testing.
//!
//! `DocumentSimulator` stands in for a browser page: it owns a
//! [`FixedLayout`] and a [`ScrollBus`], moves the viewport, and delivers
//! the matching notifications, so widgets can be driven without a real
//! rendering surface.
//!
//! # Example
//!
//! ```
//! use readmark_outline::HeadingEntry;
//! use readmark_runtime::{DocumentSimulator, FixedLayout, TrackerConfig};
//!
//! let layout = FixedLayout::new(1000.0, 200.0).heading("intro", 100.0);
//! let mut sim = DocumentSimulator::new(layout);
//! let widget = sim.mount(&[HeadingEntry::new(2, "intro", "Intro")], TrackerConfig::default());
//!
//! sim.scroll_to_percent(50.0);
//! assert_eq!(widget.state().progress, 50);
//! assert_eq!(widget.state().current_section, 1);
//! ```

use std::cell::RefCell;
use std::rc::Rc;

use readmark_core::HeadingOffset;
use readmark_core::event::Event;
use readmark_outline::HeadingEntry;

use crate::config::TrackerConfig;
use crate::provider::{FixedLayout, ScrollProvider};
use crate::subscription::ScrollBus;
use crate::widget::TocWidget;

/// Shared layout handle the simulator and its widgets read from.
pub type SharedLayout = Rc<RefCell<FixedLayout>>;

/// Record of a notification handed to the bus.
#[derive(Debug, Clone, PartialEq)]
pub enum DeliveryRecord {
    /// Delivered immediately to this many listeners.
    Emitted { event: Event, listeners: usize },
    /// Queued for the next frame flush.
    Queued(Event),
    /// Frame flush delivered this many notifications in total.
    Flushed(usize),
}

/// Deterministic page simulator.
#[derive(Debug)]
pub struct DocumentSimulator {
    layout: SharedLayout,
    bus: ScrollBus,
    coalesce: bool,
    delivery_log: Vec<DeliveryRecord>,
}

impl DocumentSimulator {
    /// Create a simulator over `layout`, scrolled to the top.
    pub fn new(layout: FixedLayout) -> Self {
        Self {
            layout: Rc::new(RefCell::new(layout)),
            bus: ScrollBus::new(),
            coalesce: false,
            delivery_log: Vec::new(),
        }
    }

    /// Batch notifications on the bus and deliver them at [`frame`](Self::frame),
    /// the way a host that throttles to animation frames would.
    ///
    /// This applies to every listener. A single widget can batch on its own
    /// with [`TrackerConfig::coalesce_scroll`].
    #[must_use]
    pub fn with_coalescing(mut self, enabled: bool) -> Self {
        self.coalesce = enabled;
        self
    }

    /// Mount a widget against this page.
    pub fn mount(
        &self,
        headings: &[HeadingEntry],
        config: TrackerConfig,
    ) -> TocWidget<SharedLayout> {
        TocWidget::mount(headings, Rc::clone(&self.layout), &self.bus, config)
    }

    /// Shared layout handle.
    pub fn layout(&self) -> &SharedLayout {
        &self.layout
    }

    /// Bus that widgets subscribe to.
    pub fn bus(&self) -> &ScrollBus {
        &self.bus
    }

    /// Current scroll offset.
    pub fn scroll_y(&self) -> f64 {
        self.layout.borrow().scroll_y()
    }

    /// Scroll to an absolute offset.
    pub fn scroll_to(&mut self, scroll_y: f64) {
        self.inject_event(Event::scroll(scroll_y));
    }

    /// Scroll by a relative amount.
    pub fn scroll_by(&mut self, delta: f64) {
        let target = self.scroll_y() + delta;
        self.scroll_to(target);
    }

    /// Scroll so that `percent` of the scrollable distance is behind.
    pub fn scroll_to_percent(&mut self, percent: f64) {
        let target = self.layout.borrow().offset_for_percent(percent);
        self.scroll_to(target);
    }

    /// Change the viewport height.
    pub fn resize(&mut self, viewport_height: f64) {
        self.inject_event(Event::resize(viewport_height));
    }

    /// Replace heading positions and document height.
    pub fn reflow(&mut self, headings: Vec<HeadingOffset>, scroll_height: f64) {
        self.layout.borrow_mut().reflow(headings, scroll_height);
        self.inject_event(Event::Reflow);
    }

    /// Apply and deliver several notifications, then end the frame.
    pub fn inject_events(&mut self, events: &[Event]) {
        for event in events {
            self.inject_event(*event);
        }
        self.frame();
    }

    /// Apply and deliver one notification.
    ///
    /// With bus coalescing, the notification waits for [`frame`](Self::frame).
    pub fn inject_event(&mut self, event: Event) {
        self.apply(&event);
        self.deliver(event);
    }

    /// End the current frame: flush queued notifications, then emit
    /// [`Event::Frame`]. Returns the number of flushed deliveries.
    pub fn frame(&mut self) -> usize {
        let delivered = self.bus.flush();
        self.delivery_log.push(DeliveryRecord::Flushed(delivered));
        let listeners = self.bus.emit(Event::Frame);
        self.delivery_log.push(DeliveryRecord::Emitted {
            event: Event::Frame,
            listeners,
        });
        delivered
    }

    /// Notifications handed to the bus so far.
    pub fn delivery_log(&self) -> &[DeliveryRecord] {
        &self.delivery_log
    }

    /// Clear the delivery log.
    pub fn clear_log(&mut self) {
        self.delivery_log.clear();
    }

    fn apply(&self, event: &Event) {
        let mut layout = self.layout.borrow_mut();
        match event {
            Event::Scroll(scroll) => layout.set_scroll_y(scroll.scroll_y),
            Event::Resize(resize) => layout.set_viewport_height(resize.viewport_height),
            Event::Reflow | Event::Frame => {}
        }
    }

    fn deliver(&mut self, event: Event) {
        if self.coalesce {
            self.bus.push(event);
            self.delivery_log.push(DeliveryRecord::Queued(event));
        } else {
            let listeners = self.bus.emit(event);
            self.delivery_log
                .push(DeliveryRecord::Emitted { event, listeners });
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use readmark_core::ScrollState;

    fn page() -> DocumentSimulator {
        DocumentSimulator::new(
            FixedLayout::new(1000.0, 200.0).headings([("a", 100.0), ("b", 400.0), ("c", 700.0)]),
        )
    }

    fn headings() -> Vec<HeadingEntry> {
        ["a", "b", "c"]
            .into_iter()
            .map(|slug| HeadingEntry::new(2, slug, slug.to_uppercase()))
            .collect()
    }

    #[test]
    fn scroll_drives_widget() {
        let mut sim = page();
        let widget = sim.mount(&headings(), TrackerConfig::default());

        sim.scroll_to(400.0);
        assert_eq!(widget.state(), ScrollState::new(50, 2));

        sim.scroll_by(400.0);
        assert_eq!(widget.state(), ScrollState::new(100, 3));
        assert_eq!(
            sim.delivery_log().last(),
            Some(&DeliveryRecord::Emitted {
                event: Event::scroll(800.0),
                listeners: 1
            })
        );
    }

    #[test]
    fn coalescing_widget_applies_latest_scroll_per_frame() {
        let mut sim = page();
        let config = TrackerConfig::default().with_coalesce_scroll(true);
        let widget = sim.mount(&headings(), config);

        sim.inject_events(&[Event::scroll(100.0), Event::scroll(200.0), Event::scroll(400.0)]);

        assert_eq!(widget.update_count(), 1);
        assert_eq!(widget.state(), ScrollState::new(50, 2));
        assert_eq!(
            sim.delivery_log().last(),
            Some(&DeliveryRecord::Emitted {
                event: Event::Frame,
                listeners: 1
            })
        );
    }

    #[test]
    fn widgets_keep_their_own_delivery_mode() {
        let mut sim = page();
        let batched = sim.mount(
            &headings(),
            TrackerConfig::default().with_coalesce_scroll(true),
        );
        let immediate = sim.mount(&headings(), TrackerConfig::default());

        sim.scroll_to(400.0);
        assert_eq!(batched.update_count(), 0);
        assert_eq!(immediate.update_count(), 1);

        sim.frame();
        assert_eq!(batched.update_count(), 1);
        assert_eq!(immediate.update_count(), 1);
        assert_eq!(batched.state(), immediate.state());
    }

    #[test]
    fn bus_coalescing_queues_until_frame() {
        let mut sim = page().with_coalescing(true);
        let widget = sim.mount(&headings(), TrackerConfig::default());

        sim.scroll_to(100.0);
        sim.scroll_to(400.0);
        assert_eq!(widget.update_count(), 0);
        assert_eq!(sim.delivery_log()[0], DeliveryRecord::Queued(Event::scroll(100.0)));

        assert_eq!(sim.frame(), 1);
        assert_eq!(widget.update_count(), 1);
        assert_eq!(widget.state(), ScrollState::new(50, 2));
    }

    #[test]
    fn resize_without_remeasure_keeps_state() {
        let mut sim = page();
        let widget = sim.mount(&headings(), TrackerConfig::default());
        sim.scroll_to(400.0);

        sim.resize(600.0);
        assert_eq!(widget.state(), ScrollState::new(50, 2));
    }

    #[test]
    fn resize_with_remeasure_recomputes() {
        let mut sim = page();
        let config = TrackerConfig::default().with_remeasure_on_resize(true);
        let widget = sim.mount(&headings(), config);
        sim.scroll_to(400.0);

        // Scrollable distance shrinks from 800 to 400, so 400px is the end.
        sim.resize(600.0);
        assert_eq!(widget.state(), ScrollState::new(100, 3));
    }

    #[test]
    fn reflow_remeasures_heights() {
        let mut sim = page();
        let config = TrackerConfig::default().with_remeasure_on_resize(true);
        let widget = sim.mount(&headings(), config);

        sim.reflow(
            vec![
                HeadingOffset::new("a", 500.0),
                HeadingOffset::new("b", 1000.0),
                HeadingOffset::new("c", 1500.0),
            ],
            2000.0,
        );
        let heights = widget.heights();
        assert!((heights.before() - 25.0).abs() < 1e-9);
        assert!((heights.get("c") - 25.0).abs() < 1e-9);
    }

    #[test]
    fn dropped_widget_receives_nothing() {
        let mut sim = page();
        let widget = sim.mount(&headings(), TrackerConfig::default());
        drop(widget);

        sim.scroll_to(400.0);
        assert_eq!(
            sim.delivery_log(),
            &[DeliveryRecord::Emitted {
                event: Event::scroll(400.0),
                listeners: 0
            }]
        );
    }

    #[test]
    fn clear_log() {
        let mut sim = page();
        sim.scroll_to_percent(25.0);
        assert_eq!(sim.scroll_y(), 200.0);
        sim.clear_log();
        assert!(sim.delivery_log().is_empty());
    }
}
