//! OS color-scheme preference sources.
//!
//! A source answers "does the user prefer dark?" and reports later changes
//! to registered handlers. Handlers are never removed: the store listens
//! for the lifetime of the host.

use std::cell::{Cell, RefCell};
use std::fmt;
use std::rc::Rc;

use dark_light::{Mode as OsThemeMode, detect as detect_os_theme};

type ChangeHandler = Rc<dyn Fn(bool)>;

/// Host facility reporting the OS color-scheme preference.
pub trait PreferenceSource {
    /// Current preference: `true` when the OS prefers a dark scheme.
    fn prefers_dark(&self) -> bool;

    /// Register `handler` to receive every later preference change.
    fn on_change(&self, handler: Box<dyn Fn(bool)>);
}

#[derive(Default)]
struct Handlers(RefCell<Vec<ChangeHandler>>);

impl Handlers {
    fn push(&self, handler: Box<dyn Fn(bool)>) {
        self.0.borrow_mut().push(Rc::from(handler));
    }

    fn dispatch(&self, matches: bool) {
        let handlers: Vec<ChangeHandler> = self.0.borrow().clone();
        for handler in handlers {
            handler(matches);
        }
    }

    fn len(&self) -> usize {
        self.0.borrow().len()
    }
}

// =============================================================================
// MANUAL
// =============================================================================

/// In-process preference driven by explicit [`ManualPreference::emit`] calls.
///
/// Clones share state, so one clone can be handed to a store while another
/// drives it.
#[derive(Clone)]
pub struct ManualPreference {
    prefers_dark: Rc<Cell<bool>>,
    handlers: Rc<Handlers>,
}

impl ManualPreference {
    pub fn new(prefers_dark: bool) -> Self {
        Self { prefers_dark: Rc::new(Cell::new(prefers_dark)), handlers: Rc::new(Handlers::default()) }
    }

    /// Record a preference change and deliver it to every handler.
    pub fn emit(&self, matches: bool) {
        self.prefers_dark.set(matches);
        tracing::debug!(matches, "manual preference change");
        self.handlers.dispatch(matches);
    }

    pub fn handler_count(&self) -> usize {
        self.handlers.len()
    }
}

impl PreferenceSource for ManualPreference {
    fn prefers_dark(&self) -> bool {
        self.prefers_dark.get()
    }

    fn on_change(&self, handler: Box<dyn Fn(bool)>) {
        self.handlers.push(handler);
    }
}

impl fmt::Debug for ManualPreference {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ManualPreference")
            .field("prefers_dark", &self.prefers_dark.get())
            .field("handlers", &self.handlers.len())
            .finish()
    }
}

// =============================================================================
// SYSTEM
// =============================================================================

/// Detector returning `true` when the OS prefers dark.
pub type PreferenceDetector = fn() -> bool;

/// Desktop color-scheme preference.
///
/// There is no portable change event, so changes are discovered by
/// [`SystemPreference::poll`].
pub struct SystemPreference {
    detector: PreferenceDetector,
    last: Cell<bool>,
    handlers: Handlers,
}

impl SystemPreference {
    /// Source backed by the OS theme as reported by `dark-light`.
    pub fn new() -> Self {
        Self::with_detector(os_prefers_dark)
    }

    /// Source backed by a custom detector; useful for tests or to force a mode.
    pub fn with_detector(detector: PreferenceDetector) -> Self {
        Self { detector, last: Cell::new(detector()), handlers: Handlers::default() }
    }

    /// Re-detect the preference. When it differs from the last observed
    /// value, handlers are called and the new value returned.
    pub fn poll(&self) -> Option<bool> {
        let current = (self.detector)();
        if current == self.last.replace(current) {
            return None;
        }
        tracing::debug!(prefers_dark = current, "system color scheme changed");
        self.handlers.dispatch(current);
        Some(current)
    }
}

impl Default for SystemPreference {
    fn default() -> Self {
        Self::new()
    }
}

impl PreferenceSource for SystemPreference {
    fn prefers_dark(&self) -> bool {
        self.last.get()
    }

    fn on_change(&self, handler: Box<dyn Fn(bool)>) {
        self.handlers.push(handler);
    }
}

impl fmt::Debug for SystemPreference {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SystemPreference")
            .field("prefers_dark", &self.last.get())
            .field("handlers", &self.handlers.len())
            .finish_non_exhaustive()
    }
}

fn os_prefers_dark() -> bool {
    matches!(detect_os_theme(), OsThemeMode::Dark)
}

#[cfg(test)]
#[path = "preference_test.rs"]
mod tests;
