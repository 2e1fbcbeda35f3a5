//! Observable theme state seeded from, and kept in sync with, the OS.
//!
//! SYSTEM CONTEXT
//! ==============
//! One store is built at startup and cloned into every consumer. The
//! persistence sink is attached as the first subscriber, so the initial
//! value and every later change reach storage and the document root before
//! any other subscriber runs.
//!
//! TRADE-OFFS
//! ==========
//! The store is `Rc`-based and `!Send`; all updates happen on the host's
//! event-loop thread. The OS change handler holds a weak reference, so the
//! source never keeps a dropped store alive.

use std::cell::Cell;
use std::fmt;
use std::rc::{Rc, Weak};

use crate::observer::{ObserverList, Subscription};
use crate::preference::PreferenceSource;
use crate::sink::PersistenceSink;
use crate::theme::Theme;

struct StoreInner {
    value: Cell<Theme>,
    observers: ObserverList<Theme>,
}

/// Shared handle to the current theme. Clones observe the same state.
#[derive(Clone)]
pub struct ThemeStore {
    inner: Rc<StoreInner>,
}

impl ThemeStore {
    /// Build a fully wired store: seeded from `source`, persisted through
    /// `sink` (initial value included), and following `source` changes.
    pub fn new(source: &dyn PreferenceSource, sink: Box<dyn PersistenceSink>) -> Self {
        let store = Self::initialize(source);
        // The sink lives for the store's lifetime; its subscription is never removed.
        let _ = store.subscribe(move |theme| {
            if let Err(e) = sink.persist(theme) {
                tracing::warn!(error = %e, %theme, "theme persistence failed");
            }
        });
        store.subscribe_to_os_changes(source);
        tracing::info!(theme = %store.get(), "theme store initialized");
        store
    }

    /// Seed a store from the current OS preference. No side effects.
    pub fn initialize(source: &dyn PreferenceSource) -> Self {
        let value = Theme::from_prefers_dark(source.prefers_dark());
        Self { inner: Rc::new(StoreInner { value: Cell::new(value), observers: ObserverList::new() }) }
    }

    /// Follow every later OS preference change for the lifetime of `source`.
    pub fn subscribe_to_os_changes(&self, source: &dyn PreferenceSource) {
        let weak: Weak<StoreInner> = Rc::downgrade(&self.inner);
        source.on_change(Box::new(move |matches| {
            let Some(inner) = weak.upgrade() else {
                return;
            };
            tracing::debug!(prefers_dark = matches, "OS color scheme changed");
            ThemeStore { inner }.set(Theme::from_prefers_dark(matches));
        }));
    }

    pub fn get(&self) -> Theme {
        self.inner.value.get()
    }

    /// Replace the value and notify every subscriber, in subscription
    /// order, before returning.
    ///
    /// Every call notifies and persists, including one that repeats the
    /// current value; this store does not skip equal values. A `set` made
    /// by a subscriber while a notification is running is queued and
    /// delivered once the current one completes, so the last value every
    /// subscriber sees matches [`ThemeStore::get`].
    pub fn set(&self, theme: Theme) {
        let previous = self.inner.value.replace(theme);
        if previous != theme {
            tracing::info!(from = %previous, to = %theme, "theme changed");
        }
        self.inner.observers.notify(theme);
    }

    /// Set the value computed from the current one.
    pub fn update<F>(&self, f: F)
    where
        F: FnOnce(Theme) -> Theme,
    {
        self.set(f(self.get()));
    }

    /// Switch to the other theme and return it.
    pub fn toggle(&self) -> Theme {
        let next = self.get().toggled();
        self.set(next);
        next
    }

    /// Register `callback`. It is called once right away with the current
    /// value, then on every later [`ThemeStore::set`].
    ///
    /// The callback is registered before the first call, so a `set` it makes
    /// during that call is delivered back to it.
    pub fn subscribe<F>(&self, callback: F) -> Subscription
    where
        F: Fn(Theme) + 'static,
    {
        let callback: Rc<dyn Fn(Theme)> = Rc::new(callback);
        let registered = callback.clone();
        let subscription = self.inner.observers.subscribe(move |theme| registered(theme));
        callback(self.get());
        subscription
    }

    /// Registered subscribers, the persistence subscriber included.
    pub fn subscriber_count(&self) -> usize {
        self.inner.observers.len()
    }
}

impl fmt::Debug for ThemeStore {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ThemeStore")
            .field("value", &self.get())
            .field("subscribers", &self.subscriber_count())
            .finish()
    }
}

#[cfg(test)]
#[path = "store_test.rs"]
mod tests;
