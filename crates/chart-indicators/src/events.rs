// File: crates/chart-indicators/src/events.rs
// Summary: Synchronous event hub: named events on chart/series/axis targets, with owned
// `Subscription` handles that cancel on drop.
// Notes:
// - Dispatch releases the registry borrow before invoking callbacks, so a callback may
//   subscribe, cancel, or fire further events.
// - One-shot listeners are removed from the registry before their single invocation.

use std::cell::{Cell, RefCell};
use std::rc::{Rc, Weak};

use tracing::warn;

/// Fired on a series after its raw data changed.
pub const UPDATED_DATA: &str = "updatedData";
/// Fired on an x axis after its visible range changed.
pub const AFTER_SET_EXTREMES: &str = "afterSetExtremes";
/// Fired on the chart at the end of every redraw.
pub const RENDER: &str = "render";

#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub enum EventTarget {
    Chart,
    /// Series by identifier.
    Series(String),
    /// X axis by index.
    Axis(usize),
}

pub type SubscriptionId = u64;

type Callback = Rc<RefCell<dyn FnMut()>>;

struct Listener {
    id: SubscriptionId,
    target: EventTarget,
    event: String,
    once: bool,
    callback: Callback,
}

#[derive(Default)]
struct Registry {
    next_id: SubscriptionId,
    listeners: Vec<Listener>,
}

impl Registry {
    // The listener is handed back so its callback is dropped after the borrow ends.
    fn take(&mut self, id: SubscriptionId) -> Option<Listener> {
        let pos = self.listeners.iter().position(|l| l.id == id)?;
        Some(self.listeners.remove(pos))
    }

    fn contains(&self, id: SubscriptionId) -> bool {
        self.listeners.iter().any(|l| l.id == id)
    }
}

/// Shared, single-threaded event hub. Clones refer to the same listener set.
#[derive(Clone, Default)]
pub struct EventHub {
    registry: Rc<RefCell<Registry>>,
}

impl EventHub {
    pub fn new() -> Self { Self::default() }

    /// Register `callback` for every firing of `event` on `target`.
    #[must_use = "dropping the Subscription cancels it"]
    pub fn subscribe<F>(&self, target: EventTarget, event: &str, callback: F) -> Subscription
    where
        F: FnMut() + 'static,
    {
        self.insert(target, event, false, Rc::new(RefCell::new(callback)))
    }

    /// Register `callback` for the next firing only.
    #[must_use = "dropping the Subscription cancels it"]
    pub fn subscribe_once<F>(&self, target: EventTarget, event: &str, callback: F) -> Subscription
    where
        F: FnMut() + 'static,
    {
        self.insert(target, event, true, Rc::new(RefCell::new(callback)))
    }

    fn insert(&self, target: EventTarget, event: &str, once: bool, callback: Callback) -> Subscription {
        let mut reg = self.registry.borrow_mut();
        reg.next_id += 1;
        let id = reg.next_id;
        reg.listeners.push(Listener { id, target, event: event.to_string(), once, callback });
        Subscription { id, registry: Rc::downgrade(&self.registry), cancelled: Cell::new(false) }
    }

    /// Invoke every listener registered for `event` on `target`, in subscription order.
    /// Returns the number of callbacks run.
    pub fn fire(&self, target: &EventTarget, event: &str) -> usize {
        let matched: Vec<(SubscriptionId, bool, Callback)> = self
            .registry
            .borrow()
            .listeners
            .iter()
            .filter(|l| &l.target == target && l.event == event)
            .map(|l| (l.id, l.once, Rc::clone(&l.callback)))
            .collect();

        let mut invoked = 0;
        for (id, once, callback) in matched {
            // An earlier callback in this dispatch may have cancelled this one.
            let live = if once {
                self.registry.borrow_mut().take(id).is_some()
            } else {
                self.registry.borrow().contains(id)
            };
            if !live {
                continue;
            }
            match callback.try_borrow_mut() {
                Ok(mut f) => {
                    (&mut *f)();
                    invoked += 1;
                }
                Err(_) => warn!(subscription = id, event, "skipping re-entrant listener"),
            }
        }
        invoked
    }

    pub fn listener_count(&self) -> usize { self.registry.borrow().listeners.len() }

    pub fn listener_count_for(&self, target: &EventTarget, event: &str) -> usize {
        self.registry
            .borrow()
            .listeners
            .iter()
            .filter(|l| &l.target == target && l.event == event)
            .count()
    }
}

/// Handle to one registered listener. Cancelling is idempotent and happens on drop.
pub struct Subscription {
    id: SubscriptionId,
    registry: Weak<RefCell<Registry>>,
    cancelled: Cell<bool>,
}

impl Subscription {
    pub fn id(&self) -> SubscriptionId { self.id }

    /// Remove the listener. Returns `true` only if this call removed it.
    pub fn cancel(&self) -> bool {
        if self.cancelled.replace(true) {
            return false;
        }
        let Some(reg) = self.registry.upgrade() else { return false };
        let removed = reg.borrow_mut().take(self.id);
        removed.is_some()
    }

    /// Still registered with a live hub. One-shot listeners turn inactive once fired.
    pub fn is_active(&self) -> bool {
        !self.cancelled.get()
            && self.registry.upgrade().is_some_and(|reg| reg.borrow().contains(self.id))
    }
}

impl Drop for Subscription {
    fn drop(&mut self) {
        self.cancel();
    }
}

impl std::fmt::Debug for Subscription {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Subscription").field("id", &self.id).field("active", &self.is_active()).finish()
    }
}
