#![forbid(unsafe_code)]

//! Scroll notification bus and scoped subscriptions.
//!
//! The host owns one [`ScrollBus`] per document and forwards every scroll,
//! resize, and reflow notification into it. Widgets call
//! [`ScrollBus::subscribe`] on mount and hold the returned
//! [`Subscription`] for as long as they are live.
//!
//! # How it works
//!
//! 1. `subscribe` registers a listener and returns a guard.
//! 2. `emit` delivers an event synchronously to every registered listener,
//!    in registration order, each to completion before the next.
//! 3. Dropping the guard (or calling [`Subscription::release`]) deregisters
//!    the listener. This also happens while unwinding, so a listener never
//!    outlives the widget that registered it.
//!
//! The bus is single-threaded (`Rc`/`RefCell`). A listener that triggers a
//! nested `emit` does not receive the nested event itself; the nested
//! delivery is skipped rather than overlapped.

use std::cell::RefCell;
use std::fmt;
use std::rc::{Rc, Weak};

use readmark_core::event::Event;
use readmark_core::event_coalescer::EventCoalescer;

/// A unique identifier for a subscription.
pub type SubId = u64;

type Listener = Rc<RefCell<dyn FnMut(&Event)>>;

#[derive(Default)]
struct Registry {
    next_id: SubId,
    listeners: Vec<(SubId, Listener)>,
    coalescer: EventCoalescer,
}

impl Registry {
    fn contains(&self, id: SubId) -> bool {
        self.listeners.iter().any(|(sub_id, _)| *sub_id == id)
    }

    fn remove(&mut self, id: SubId) -> bool {
        let before = self.listeners.len();
        self.listeners.retain(|(sub_id, _)| *sub_id != id);
        self.listeners.len() != before
    }
}

/// Single-threaded fan-out of document notifications.
///
/// Cloning a bus yields another handle to the same listener set.
#[derive(Clone, Default)]
pub struct ScrollBus {
    registry: Rc<RefCell<Registry>>,
}

impl fmt::Debug for ScrollBus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ScrollBus")
            .field("active", &self.active_count())
            .finish()
    }
}

impl ScrollBus {
    /// Create a bus with no listeners.
    pub fn new() -> Self {
        Self::default()
    }

    /// Register `listener` until the returned guard is released or dropped.
    pub fn subscribe<F>(&self, listener: F) -> Subscription
    where
        F: FnMut(&Event) + 'static,
    {
        let listener: Listener = Rc::new(RefCell::new(listener));
        let mut registry = self.registry.borrow_mut();
        let id = registry.next_id;
        registry.next_id += 1;
        registry.listeners.push((id, listener));
        tracing::debug!(
            sub_id = id,
            active = registry.listeners.len(),
            "starting scroll subscription"
        );

        Subscription {
            id,
            registry: Some(Rc::downgrade(&self.registry)),
        }
    }

    /// Deliver `event` to every registered listener.
    ///
    /// Returns how many listeners ran.
    pub fn emit(&self, event: Event) -> usize {
        let snapshot: Vec<(SubId, Listener)> = self.registry.borrow().listeners.clone();
        let mut delivered = 0;

        for (id, listener) in snapshot {
            // An earlier listener may have torn this one down.
            if !self.registry.borrow().contains(id) {
                continue;
            }
            match listener.try_borrow_mut() {
                Ok(mut listener) => {
                    (&mut *listener)(&event);
                    delivered += 1;
                }
                Err(_) => {
                    tracing::warn!(sub_id = id, "skipping re-entrant scroll delivery");
                }
            }
        }

        delivered
    }

    /// Queue `event` for coalesced delivery.
    ///
    /// Scroll and resize bursts collapse to the latest value and are
    /// delivered by [`flush`](Self::flush). Events that cannot be coalesced
    /// flush the queue and are delivered immediately. Returns how many
    /// listener invocations happened.
    pub fn push(&self, event: Event) -> usize {
        let immediate = self.registry.borrow_mut().coalescer.push(event);
        match immediate {
            Some(event) => self.flush() + self.emit(event),
            None => 0,
        }
    }

    /// Deliver everything queued by [`push`](Self::push).
    pub fn flush(&self) -> usize {
        let pending = self.registry.borrow_mut().coalescer.flush();
        pending.into_iter().map(|event| self.emit(event)).sum()
    }

    /// Number of live subscriptions.
    pub fn active_count(&self) -> usize {
        self.registry.borrow().listeners.len()
    }
}

/// Guard for a registered listener.
///
/// Released exactly once: by [`release`](Self::release), or on drop.
#[must_use = "dropping a Subscription unregisters its listener immediately"]
pub struct Subscription {
    id: SubId,
    registry: Option<Weak<RefCell<Registry>>>,
}

impl fmt::Debug for Subscription {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Subscription")
            .field("id", &self.id)
            .field("active", &self.is_active())
            .finish()
    }
}

impl Subscription {
    /// Identifier assigned by the bus.
    #[inline]
    pub fn id(&self) -> SubId {
        self.id
    }

    /// Whether the listener is still registered.
    pub fn is_active(&self) -> bool {
        self.registry
            .as_ref()
            .and_then(Weak::upgrade)
            .is_some_and(|registry| registry.borrow().contains(self.id))
    }

    /// Unregister the listener now.
    pub fn release(mut self) {
        self.release_inner();
    }

    fn release_inner(&mut self) {
        let Some(registry) = self.registry.take().and_then(|weak| weak.upgrade()) else {
            return;
        };
        let removed = registry.borrow_mut().remove(self.id);
        tracing::debug!(sub_id = self.id, removed, "stopping scroll subscription");
    }
}

impl Drop for Subscription {
    fn drop(&mut self) {
        self.release_inner();
    }
}
