//! Value sources: how live data reaches an instrument.
//!
//! Three input channels converge on one `set_target` call:
//!
//! 1. Declarative configuration (`Instrument::configure`) — range and
//!    geometry, rarely changes.
//! 2. Imperative assignment (`Instrument::set_value`) — applies
//!    immediately.
//! 3. An observable store (`Instrument::bind_source`) — emissions land in
//!    a coalescing [`UpdateInbox`]; the instrument drains it at frame
//!    start, so a store emitting faster than the display refreshes costs
//!    exactly one target update per frame.
//!
//! The core is polymorphic over [`ValueSource`]; any store with a readable
//! numeric field and drop-to-unsubscribe subscriptions qualifies.
//! [`SharedValue`] is the reference implementation used by the demo and
//! tests.
//!
//! Everything here is single-threaded: `Rc`/`RefCell`/`Cell`, no locks.

use std::{
    cell::{Cell, RefCell},
    rc::Rc,
};

use tracing::debug;

/// Callback invoked with each newly stored value.
pub type Listener = Rc<dyn Fn(f32)>;

/// A store an instrument can bind to.
pub trait ValueSource {
    /// The value currently held by the store.
    fn current(&self) -> f32;

    /// Register a listener for future changes. Dropping the returned
    /// [`Subscription`] unsubscribes.
    fn subscribe(&self, listener: Listener) -> Subscription;
}

// =============================================================================
// Subscription
// =============================================================================

/// Guard for an active store subscription. Unsubscribes on drop, so a
/// rebind or dispose cannot leak a listener.
pub struct Subscription {
    unsubscribe: Option<Box<dyn FnOnce()>>,
}

impl Subscription {
    pub fn new(unsubscribe: impl FnOnce() + 'static) -> Self {
        Self { unsubscribe: Some(Box::new(unsubscribe)) }
    }
}

impl Drop for Subscription {
    fn drop(&mut self) {
        if let Some(unsubscribe) = self.unsubscribe.take() {
            unsubscribe();
        }
    }
}

// =============================================================================
// UpdateInbox
// =============================================================================

/// Single-slot mailbox between store emissions and the frame step.
/// Posting overwrites: only the latest value before a frame survives.
#[derive(Clone, Default)]
pub struct UpdateInbox {
    slot: Rc<Cell<Option<f32>>>,
}

impl UpdateInbox {
    pub fn new() -> Self {
        Self::default()
    }

    /// Deposit a value, replacing any value not yet drained.
    #[inline]
    pub fn post(&self, value: f32) {
        self.slot.set(Some(value));
    }

    /// Drain the inbox. Called once per frame.
    #[inline]
    pub fn take(&self) -> Option<f32> {
        self.slot.take()
    }
}

// =============================================================================
// SharedValue
// =============================================================================

struct SharedValueInner {
    value: f32,
    listeners: Vec<(u64, Listener)>,
    next_id: u64,
}

/// A shared observable scalar. Cheap to clone; all clones view the same
/// cell. The owner calls [`set`](SharedValue::set); instruments only read
/// and subscribe.
#[derive(Clone)]
pub struct SharedValue {
    inner: Rc<RefCell<SharedValueInner>>,
}

impl SharedValue {
    pub fn new(value: f32) -> Self {
        Self {
            inner: Rc::new(RefCell::new(SharedValueInner {
                value,
                listeners: Vec::new(),
                next_id: 0,
            })),
        }
    }

    pub fn get(&self) -> f32 {
        self.inner.borrow().value
    }

    /// Store a new value and notify every listener.
    pub fn set(&self, value: f32) {
        // clone the listener list out so a callback may subscribe or read
        // without hitting a RefCell double-borrow
        let listeners: Vec<Listener> = {
            let mut inner = self.inner.borrow_mut();
            inner.value = value;
            inner.listeners.iter().map(|(_, l)| Rc::clone(l)).collect()
        };
        for listener in listeners {
            listener(value);
        }
    }

    /// Number of live subscriptions. Used by tests to prove rebinds and
    /// disposals drop their listeners.
    pub fn listener_count(&self) -> usize {
        self.inner.borrow().listeners.len()
    }
}

impl ValueSource for SharedValue {
    fn current(&self) -> f32 {
        self.get()
    }

    fn subscribe(&self, listener: Listener) -> Subscription {
        let id = {
            let mut inner = self.inner.borrow_mut();
            let id = inner.next_id;
            inner.next_id += 1;
            inner.listeners.push((id, listener));
            id
        };
        debug!(id, "store listener registered");

        let weak = Rc::downgrade(&self.inner);
        Subscription::new(move || {
            if let Some(inner) = weak.upgrade() {
                inner.borrow_mut().listeners.retain(|(lid, _)| *lid != id);
                debug!(id, "store listener removed");
            }
        })
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
