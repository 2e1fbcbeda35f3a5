//! Ordered, single-threaded observer list with unsubscribe handles.
//!
//! DESIGN
//! ======
//! Callbacks are keyed by a monotonic id in a `BTreeMap`, so iteration order
//! is registration order. `notify` snapshots the callbacks before calling
//! them, which lets a callback subscribe or unsubscribe without tripping the
//! `RefCell`; those changes take effect from the next value.
//!
//! A `notify` issued from inside a callback is queued, not delivered
//! recursively. The outermost `notify` drains the queue in FIFO order, so
//! every callback sees values in the order they were notified and the last
//! value it sees is the last one notified.

use std::cell::RefCell;
use std::collections::{BTreeMap, VecDeque};
use std::fmt;
use std::rc::{Rc, Weak};

type Callback<T> = Rc<dyn Fn(T)>;

struct Observers<T> {
    next_id: u64,
    entries: BTreeMap<u64, Callback<T>>,
    pending: VecDeque<T>,
    notifying: bool,
}

/// Clears the draining flag when the outermost `notify` ends, panics included.
struct DrainGuard<'a, T>(&'a RefCell<Observers<T>>);

impl<T> Drop for DrainGuard<'_, T> {
    fn drop(&mut self) {
        if let Ok(mut observers) = self.0.try_borrow_mut() {
            observers.notifying = false;
            observers.pending.clear();
        }
    }
}

/// Observer list notified in registration order.
pub struct ObserverList<T> {
    inner: Rc<RefCell<Observers<T>>>,
}

impl<T: Copy + 'static> ObserverList<T> {
    pub fn new() -> Self {
        Self { inner: Rc::new(RefCell::new(Observers {
                next_id: 0,
                entries: BTreeMap::new(),
                pending: VecDeque::new(),
                notifying: false,
            })) }
    }

    /// Register `callback`; it stays registered until the returned handle
    /// is used to unsubscribe.
    pub fn subscribe<F>(&self, callback: F) -> Subscription
    where
        F: Fn(T) + 'static,
    {
        let id = {
            let mut observers = self.inner.borrow_mut();
            let id = observers.next_id;
            observers.next_id += 1;
            observers.entries.insert(id, Rc::new(callback));
            id
        };
        tracing::debug!(observer_id = id, "observer registered");

        let weak: Weak<RefCell<Observers<T>>> = Rc::downgrade(&self.inner);
        Subscription::new(move || {
            let Some(inner) = weak.upgrade() else {
                return;
            };
            if inner.borrow_mut().entries.remove(&id).is_some() {
                tracing::debug!(observer_id = id, "observer removed");
            }
        })
    }

    /// Call every registered callback once with `value`.
    ///
    /// Called from inside a callback, `value` is queued and delivered after
    /// the current value has reached every callback.
    pub fn notify(&self, value: T) {
        {
            let mut observers = self.inner.borrow_mut();
            observers.pending.push_back(value);
            if observers.notifying {
                return;
            }
            observers.notifying = true;
        }
        let _guard = DrainGuard(self.inner.as_ref());

        loop {
            let (value, callbacks) = {
                let mut observers = self.inner.borrow_mut();
                let Some(value) = observers.pending.pop_front() else {
                    break;
                };
                let callbacks: Vec<Callback<T>> = observers.entries.values().cloned().collect();
                (value, callbacks)
            };
            for callback in callbacks {
                callback(value);
            }
        }
    }

    pub fn len(&self) -> usize {
        self.inner.borrow().entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl<T: Copy + 'static> Default for ObserverList<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> fmt::Debug for ObserverList<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ObserverList")
            .field("observers", &self.inner.borrow().entries.len())
            .finish()
    }
}

/// Capability to remove one registered callback.
///
/// Dropping the handle does not unsubscribe; call [`Subscription::unsubscribe`].
pub struct Subscription {
    remove: Box<dyn FnOnce()>,
}

impl Subscription {
    fn new<F>(remove: F) -> Self
    where
        F: FnOnce() + 'static,
    {
        Self { remove: Box::new(remove) }
    }

    /// Remove the callback. No-op if its list no longer exists.
    pub fn unsubscribe(self) {
        (self.remove)();
    }
}

impl fmt::Debug for Subscription {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("Subscription")
    }
}

#[cfg(test)]
#[path = "observer_test.rs"]
mod tests;
