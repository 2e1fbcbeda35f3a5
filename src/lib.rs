//! # theme-store
//!
//! Reactive light/dark theme preference, seeded from the operating
//! system's color scheme, kept in sync with OS changes, and persisted to a
//! key-value store with a mirrored `data-theme` attribute on the document
//! root.
//!
//! SYSTEM CONTEXT
//! ==============
//! A single [`ThemeStore`] is constructed at startup and handed to every
//! consumer. It composes three host capabilities behind traits so the same
//! store runs in the browser (feature `hydrate`) and natively:
//!
//! - [`PreferenceSource`]: the OS color-scheme preference and its changes
//! - [`KeyValueStore`]: durable storage for the chosen theme
//! - [`AttributeSink`]: the document-root attribute mirror
//!
//! ```rust
//! use theme_store::{
//!     DocumentSink, ManualPreference, MemoryAttributes, MemoryStorage, Theme, ThemeConfig, ThemeStore,
//! };
//!
//! let os = ManualPreference::new(true);
//! let storage = MemoryStorage::new();
//! let root = MemoryAttributes::new();
//! let sink = DocumentSink::new(storage.clone(), root.clone(), &ThemeConfig::default());
//!
//! let store = ThemeStore::new(&os, Box::new(sink));
//! assert_eq!(store.get(), Theme::Dark);
//! assert_eq!(storage.item("theme").as_deref(), Some("dark"));
//!
//! os.emit(false);
//! assert_eq!(store.get(), Theme::Light);
//! assert_eq!(root.attribute("data-theme").as_deref(), Some("light"));
//! ```

pub mod config;
pub mod error;
pub mod observer;
pub mod preference;
pub mod sink;
pub mod store;
pub mod theme;
#[cfg(feature = "hydrate")]
pub mod web;

pub use config::ThemeConfig;
pub use error::ThemeError;
pub use observer::{ObserverList, Subscription};
pub use preference::{ManualPreference, PreferenceSource, SystemPreference};
pub use sink::{
    AttributeSink, DocumentSink, FileStorage, KeyValueStore, MemoryAttributes, MemoryStorage, NoopSink, PersistenceSink,
};
pub use store::ThemeStore;
pub use theme::Theme;
