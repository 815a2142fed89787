//! Single-threaded publish/subscribe for editor notifications.
//!
//! Editors that do not sit on top of DOM events (the headless editor, or a
//! host's own model) can use [`EventBus`] to satisfy
//! [`RichTextEditor::observe`](crate::RichTextEditor::observe) and
//! [`RichTextEditor::fire`](crate::RichTextEditor::fire).

use std::cell::RefCell;
use std::rc::{Rc, Weak};

use crate::editor::EditorEvent;

type Callback = Rc<dyn Fn()>;

#[derive(Default)]
struct Listeners {
    next_id: u64,
    entries: Vec<(u64, EditorEvent, Callback)>,
}

/// Event bus keyed by [`EditorEvent`].
///
/// Cloning yields another handle to the same bus.
#[derive(Clone, Default)]
pub struct EventBus {
    listeners: Rc<RefCell<Listeners>>,
}

impl EventBus {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register `callback` for `event`. The subscription lasts until the
    /// returned guard is dropped.
    pub fn subscribe(&self, event: EditorEvent, callback: impl Fn() + 'static) -> BusSubscription {
        let mut listeners = self.listeners.borrow_mut();
        let id = listeners.next_id;
        listeners.next_id += 1;
        listeners.entries.push((id, event, Rc::new(callback)));
        BusSubscription {
            id,
            listeners: Rc::downgrade(&self.listeners),
        }
    }

    /// Call every subscriber of `event` in subscription order.
    ///
    /// Subscribers are snapshotted first, so a callback may emit or subscribe
    /// re-entrantly. Returns the number of callbacks invoked.
    pub fn emit(&self, event: EditorEvent) -> usize {
        let callbacks: Vec<Callback> = self
            .listeners
            .borrow()
            .entries
            .iter()
            .filter(|(_, ev, _)| *ev == event)
            .map(|(_, _, cb)| Rc::clone(cb))
            .collect();
        for callback in &callbacks {
            callback();
        }
        callbacks.len()
    }

    /// Number of live subscriptions for `event`.
    pub fn subscriber_count(&self, event: EditorEvent) -> usize {
        self.listeners
            .borrow()
            .entries
            .iter()
            .filter(|(_, ev, _)| *ev == event)
            .count()
    }
}

impl std::fmt::Debug for EventBus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("EventBus")
            .field("subscribers", &self.listeners.borrow().entries.len())
            .finish()
    }
}

/// Subscription guard returned by [`EventBus::subscribe`].
#[must_use = "dropping the subscription unsubscribes immediately"]
pub struct BusSubscription {
    id: u64,
    listeners: Weak<RefCell<Listeners>>,
}

impl Drop for BusSubscription {
    fn drop(&mut self) {
        if let Some(listeners) = self.listeners.upgrade() {
            listeners
                .borrow_mut()
                .entries
                .retain(|(id, _, _)| *id != self.id);
        }
    }
}

#[cfg(test)]
mod tests {
    use std::cell::Cell;

    use super::*;

    #[test]
    fn test_emit_only_reaches_matching_event() {
        let bus = EventBus::new();
        let hits = Rc::new(Cell::new(0));

        let h = Rc::clone(&hits);
        let _sub = bus.subscribe(EditorEvent::CursorMove, move || h.set(h.get() + 1));

        assert_eq!(bus.emit(EditorEvent::Change), 0);
        assert_eq!(bus.emit(EditorEvent::CursorMove), 1);
        assert_eq!(hits.get(), 1);
    }

    #[test]
    fn test_drop_unsubscribes() {
        let bus = EventBus::new();
        let hits = Rc::new(Cell::new(0));

        let h = Rc::clone(&hits);
        let sub = bus.subscribe(EditorEvent::Change, move || h.set(h.get() + 1));
        assert_eq!(bus.subscriber_count(EditorEvent::Change), 1);

        drop(sub);
        assert_eq!(bus.subscriber_count(EditorEvent::Change), 0);
        bus.emit(EditorEvent::Change);
        assert_eq!(hits.get(), 0);
    }

    #[test]
    fn test_reentrant_emit() {
        // A change listener that announces a cursor move, the way the toolbar
        // chains notifications.
        let bus = EventBus::new();
        let order = Rc::new(RefCell::new(Vec::new()));

        let inner_bus = bus.clone();
        let o = Rc::clone(&order);
        let _a = bus.subscribe(EditorEvent::Change, move || {
            o.borrow_mut().push("change");
            inner_bus.emit(EditorEvent::CursorMove);
        });
        let o = Rc::clone(&order);
        let _b = bus.subscribe(EditorEvent::CursorMove, move || {
            o.borrow_mut().push("cursormove")
        });

        bus.emit(EditorEvent::Change);
        assert_eq!(*order.borrow(), vec!["change", "cursormove"]);
    }

    #[test]
    fn test_subscription_outlives_bus() {
        let bus = EventBus::new();
        let sub = bus.subscribe(EditorEvent::Change, || {});
        drop(bus);
        // Must not panic.
        drop(sub);
    }
}
