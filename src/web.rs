//! Browser bindings: media-query preference, `localStorage`, and the
//! `<html>` element.
//!
//! SYSTEM CONTEXT
//! ==============
//! Compiled only with the `hydrate` feature. [`browser_store`] is the
//! browser entry point; it decides once whether a window with storage and
//! a document exists and falls back to a [`NoopSink`] otherwise, so
//! server-side or worker contexts never touch the DOM.

use wasm_bindgen::JsCast;
use wasm_bindgen::prelude::Closure;

use crate::config::ThemeConfig;
use crate::error::ThemeError;
use crate::preference::{ManualPreference, PreferenceSource};
use crate::sink::{AttributeSink, DocumentSink, KeyValueStore, NoopSink, PersistenceSink};
use crate::store::ThemeStore;

const DARK_SCHEME_QUERY: &str = "(prefers-color-scheme: dark)";

/// `(prefers-color-scheme: dark)` media query.
pub struct MediaQueryPreference {
    query: web_sys::MediaQueryList,
}

impl MediaQueryPreference {
    /// `None` when there is no window or the query cannot be evaluated.
    pub fn new() -> Option<Self> {
        let query = web_sys::window()?.match_media(DARK_SCHEME_QUERY).ok().flatten()?;
        Some(Self { query })
    }
}

impl PreferenceSource for MediaQueryPreference {
    fn prefers_dark(&self) -> bool {
        self.query.matches()
    }

    fn on_change(&self, handler: Box<dyn Fn(bool)>) {
        let closure = Closure::<dyn Fn(web_sys::MediaQueryListEvent)>::new(move |event: web_sys::MediaQueryListEvent| {
            handler(event.matches());
        });
        if let Err(e) = self.query.add_event_listener_with_callback("change", closure.as_ref().unchecked_ref()) {
            tracing::warn!(error = ?e, "failed to register color scheme listener");
            return;
        }
        // Listener lives until page unload.
        closure.forget();
    }
}

/// `window.localStorage`.
pub struct LocalStorage {
    storage: web_sys::Storage,
}

impl LocalStorage {
    pub fn new() -> Option<Self> {
        let storage = web_sys::window()?.local_storage().ok().flatten()?;
        Some(Self { storage })
    }
}

impl KeyValueStore for LocalStorage {
    fn set_item(&self, key: &str, value: &str) -> Result<(), ThemeError> {
        self.storage
            .set_item(key, value)
            .map_err(|e| ThemeError::Storage(format!("{e:?}")))
    }

    fn get_item(&self, key: &str) -> Result<Option<String>, ThemeError> {
        self.storage.get_item(key).map_err(|e| ThemeError::Storage(format!("{e:?}")))
    }
}

/// `document.documentElement`.
pub struct DocumentRoot {
    element: web_sys::Element,
}

impl DocumentRoot {
    pub fn new() -> Option<Self> {
        let element = web_sys::window()?.document()?.document_element()?;
        Some(Self { element })
    }
}

impl AttributeSink for DocumentRoot {
    fn set_attribute(&self, name: &str, value: &str) -> Result<(), ThemeError> {
        self.element
            .set_attribute(name, value)
            .map_err(|e| ThemeError::Attribute(format!("{e:?}")))
    }
}

/// Storage + document sink when the browser provides both, otherwise a no-op.
pub fn browser_sink(config: &ThemeConfig) -> Box<dyn PersistenceSink> {
    match (LocalStorage::new(), DocumentRoot::new()) {
        (Some(storage), Some(root)) => Box::new(DocumentSink::new(storage, root, config)),
        _ => {
            tracing::debug!("no browser storage or document; theme persistence disabled");
            Box::new(NoopSink)
        }
    }
}

/// Store wired to the browser. Without a window the store starts light and
/// never changes on its own.
pub fn browser_store(config: &ThemeConfig) -> ThemeStore {
    let sink = browser_sink(config);
    match MediaQueryPreference::new() {
        Some(source) => ThemeStore::new(&source, sink),
        None => ThemeStore::new(&ManualPreference::new(false), sink),
    }
}
