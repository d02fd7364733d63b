#![forbid(unsafe_code)]

//! Table-of-contents widget lifecycle.
//!
//! [`TocWidget`] owns one outline and one [`ScrollTracker`] for the
//! lifetime of a page view:
//!
//! - **mount**: filter headings into sections, measure section heights,
//!   subscribe to the document's [`ScrollBus`].
//! - **scroll**: recompute progress and the active section, then notify
//!   the observer if the state changed.
//! - **resize / reflow**: re-measure and recompute, only when
//!   [`TrackerConfig::remeasure_on_resize`] is set.
//! - **frame**: with [`TrackerConfig::coalesce_scroll`], scroll and resize
//!   notifications are held (latest wins) and applied together on the
//!   next [`Event::Frame`]. A reflow applies held notifications at once.
//! - **unmount**: release the subscription. Dropping the widget does the
//!   same.
//!
//! A widget mounted with no sections never subscribes and stays in the
//! zero state.
//!
//! The bus listener only holds weak references into the widget, so a
//! notification delivered after the widget is gone is ignored.

use std::cell::RefCell;
use std::fmt;
use std::rc::{Rc, Weak};

use readmark_core::ScrollState;
use readmark_core::event::Event;
use readmark_core::event_coalescer::EventCoalescer;
use readmark_outline::{
    HeadingEntry, Outline, OutlineView, ReadingTime, SectionHeights, project,
    reading_time_with_wpm,
};

use crate::config::TrackerConfig;
use crate::provider::LayoutProvider;
use crate::subscription::{ScrollBus, Subscription};
use crate::tracker::ScrollTracker;

type Observer = Box<dyn FnMut(ScrollState)>;

struct Shared<L> {
    layout: L,
    tracker: ScrollTracker,
    /// Notifications held until the next [`Event::Frame`] when coalescing.
    pending: Option<EventCoalescer>,
}

impl<L: LayoutProvider> Shared<L> {
    fn handle(&mut self, event: &Event, remeasure_on_resize: bool) -> Option<ScrollState> {
        let batch = match (self.pending.as_mut(), event) {
            (None, Event::Frame) => return None,
            (None, _) => vec![*event],
            (Some(pending), Event::Frame) => pending.flush(),
            (Some(pending), _) => {
                let immediate = pending.push(*event)?;
                let mut batch = pending.flush();
                batch.push(immediate);
                batch
            }
        };
        self.apply(&batch, remeasure_on_resize)
    }

    /// Apply a batch with at most one measurement and one recompute.
    fn apply(&mut self, batch: &[Event], remeasure_on_resize: bool) -> Option<ScrollState> {
        let layout_changed = batch.iter().any(Event::is_layout_change);
        let scrolled = batch.iter().any(|event| matches!(event, Event::Scroll(_)));

        if layout_changed && remeasure_on_resize {
            self.tracker.measure(&self.layout);
        } else if !scrolled {
            return None;
        }
        self.recompute()
    }

    /// Recompute and return the new state if it changed.
    fn recompute(&mut self) -> Option<ScrollState> {
        let before = self.tracker.state();
        let after = self.tracker.recompute(&self.layout);
        (after != before).then_some(after)
    }
}

/// Outline widget bound to a document layout and its scroll bus.
pub struct TocWidget<L: LayoutProvider + 'static> {
    outline: Outline,
    config: TrackerConfig,
    shared: Rc<RefCell<Shared<L>>>,
    observer: Rc<RefCell<Option<Observer>>>,
    subscription: Option<Subscription>,
}

impl<L: LayoutProvider + 'static> fmt::Debug for TocWidget<L> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TocWidget")
            .field("sections", &self.outline.len())
            .field("config", &self.config)
            .field("mounted", &self.is_mounted())
            .finish()
    }
}

impl<L: LayoutProvider + 'static> TocWidget<L> {
    /// Build the outline, take the initial measurement, and subscribe.
    ///
    /// Duplicate section slugs are logged; lookups resolve to the first
    /// occurrence. Progress is not computed until the first notification
    /// or [`refresh`](Self::refresh).
    pub fn mount(
        headings: &[HeadingEntry],
        layout: L,
        bus: &ScrollBus,
        config: TrackerConfig,
    ) -> Self {
        let outline = Outline::with_max_depth(headings, config.max_depth);
        if let Err(errors) = outline.validate() {
            for error in &errors {
                tracing::warn!(%error, "outline validation failed");
            }
        }

        let shared = Rc::new(RefCell::new(Shared {
            layout,
            tracker: ScrollTracker::new(config.policy),
            pending: config.coalesce_scroll.then(EventCoalescer::new),
        }));
        let observer: Rc<RefCell<Option<Observer>>> = Rc::new(RefCell::new(None));

        let subscription = if outline.is_empty() {
            tracing::debug!(headings = headings.len(), "no sections; outline widget inactive");
            None
        } else {
            {
                let mut guard = shared.borrow_mut();
                let Shared { layout, tracker, .. } = &mut *guard;
                tracker.measure(&*layout);
            }
            let weak_shared = Rc::downgrade(&shared);
            let weak_observer = Rc::downgrade(&observer);
            let remeasure = config.remeasure_on_resize;
            Some(bus.subscribe(move |event| {
                deliver(&weak_shared, &weak_observer, event, remeasure);
            }))
        };

        tracing::debug!(
            sections = outline.len(),
            policy = %config.policy,
            remeasure_on_resize = config.remeasure_on_resize,
            coalesce_scroll = config.coalesce_scroll,
            "outline widget mounted"
        );

        Self {
            outline,
            config,
            shared,
            observer,
            subscription,
        }
    }

    /// Register a callback invoked with each new state.
    pub fn set_observer<F>(&mut self, observer: F)
    where
        F: FnMut(ScrollState) + 'static,
    {
        *self.observer.borrow_mut() = Some(Box::new(observer));
    }

    /// Builder form of [`set_observer`](Self::set_observer).
    #[must_use]
    pub fn with_observer<F>(mut self, observer: F) -> Self
    where
        F: FnMut(ScrollState) + 'static,
    {
        self.set_observer(observer);
        self
    }

    /// Remove the observer.
    pub fn clear_observer(&mut self) {
        *self.observer.borrow_mut() = None;
    }

    /// Sections shown by this widget.
    #[inline]
    pub fn outline(&self) -> &Outline {
        &self.outline
    }

    /// Configuration the widget was mounted with.
    #[inline]
    pub fn config(&self) -> &TrackerConfig {
        &self.config
    }

    /// Latest published state.
    pub fn state(&self) -> ScrollState {
        self.shared.borrow().tracker.state()
    }

    /// Latest measured section heights.
    pub fn heights(&self) -> SectionHeights {
        self.shared.borrow().tracker.heights().clone()
    }

    /// Renderable rows for the current state.
    pub fn view(&self) -> OutlineView<'_> {
        let shared = self.shared.borrow();
        project(
            &self.outline,
            shared.tracker.heights(),
            shared.tracker.state(),
        )
    }

    /// Run `f` against the layout provider.
    pub fn with_layout<R>(&self, f: impl FnOnce(&L) -> R) -> R {
        f(&self.shared.borrow().layout)
    }

    /// Whether the widget is still subscribed.
    pub fn is_mounted(&self) -> bool {
        self.subscription
            .as_ref()
            .is_some_and(Subscription::is_active)
    }

    /// Number of recomputes applied so far.
    pub fn update_count(&self) -> u64 {
        self.shared.borrow().tracker.update_count()
    }

    /// Recompute from live layout without waiting for a notification.
    ///
    /// Does nothing once unmounted.
    pub fn refresh(&mut self) -> ScrollState {
        if self.is_mounted() {
            let changed = self.shared.borrow_mut().recompute();
            notify(&self.observer, changed);
        }
        self.state()
    }

    /// Re-measure section heights, then recompute.
    ///
    /// Does nothing once unmounted.
    pub fn remeasure(&mut self) -> ScrollState {
        if self.is_mounted() {
            let changed = {
                let mut guard = self.shared.borrow_mut();
                let Shared { layout, tracker, .. } = &mut *guard;
                tracker.measure(&*layout);
                guard.recompute()
            };
            notify(&self.observer, changed);
        }
        self.state()
    }

    /// Reading-time estimate for the document text.
    pub fn reading_time(&self, text: &str) -> ReadingTime {
        reading_time_with_wpm(text, self.config.words_per_minute)
    }

    /// Release the scroll subscription. Safe to call more than once.
    pub fn unmount(&mut self) {
        if let Some(subscription) = self.subscription.take() {
            subscription.release();
            tracing::debug!(sections = self.outline.len(), "outline widget unmounted");
        }
    }
}

impl<L: LayoutProvider + 'static> Drop for TocWidget<L> {
    fn drop(&mut self) {
        self.unmount();
    }
}

fn deliver<L: LayoutProvider>(
    shared: &Weak<RefCell<Shared<L>>>,
    observer: &Weak<RefCell<Option<Observer>>>,
    event: &Event,
    remeasure_on_resize: bool,
) {
    let Some(shared) = shared.upgrade() else {
        return;
    };
    let changed = match shared.try_borrow_mut() {
        Ok(mut guard) => guard.handle(event, remeasure_on_resize),
        Err(_) => {
            tracing::warn!(?event, "tracker busy; notification skipped");
            return;
        }
    };
    if let Some(observer) = observer.upgrade() {
        notify(&observer, changed);
    }
}

fn notify(observer: &RefCell<Option<Observer>>, changed: Option<ScrollState>) {
    let Some(state) = changed else {
        return;
    };
    if let Ok(mut slot) = observer.try_borrow_mut()
        && let Some(callback) = slot.as_mut()
    {
        callback(state);
    }
}
