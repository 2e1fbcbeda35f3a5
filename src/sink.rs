//! Persistence capabilities: key-value storage and the document-root
//! attribute mirror.
//!
//! DESIGN
//! ======
//! The store writes through one [`PersistenceSink`]. Whether a host
//! environment exists is decided once, when the sink is chosen: a
//! [`DocumentSink`] when storage and a document root are available, a
//! [`NoopSink`] otherwise.
//!
//! TRADE-OFFS
//! ==========
//! [`FileStorage`] rewrites the whole JSON file on every write. The file
//! holds a handful of keys, so simplicity wins over incremental updates.

use std::cell::RefCell;
use std::collections::BTreeMap;
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use std::rc::Rc;

use crate::config::ThemeConfig;
use crate::error::ThemeError;
use crate::theme::Theme;

/// Durable key-value storage (browser `localStorage` or a native stand-in).
pub trait KeyValueStore {
    fn set_item(&self, key: &str, value: &str) -> Result<(), ThemeError>;

    fn get_item(&self, key: &str) -> Result<Option<String>, ThemeError>;
}

/// Attribute writer for the document root element.
pub trait AttributeSink {
    fn set_attribute(&self, name: &str, value: &str) -> Result<(), ThemeError>;
}

/// The single capability a store persists every theme through.
pub trait PersistenceSink {
    fn persist(&self, theme: Theme) -> Result<(), ThemeError>;
}

// =============================================================================
// SINKS
// =============================================================================

/// Sink for hosts without storage or a document; every write is skipped.
#[derive(Clone, Copy, Debug, Default)]
pub struct NoopSink;

impl PersistenceSink for NoopSink {
    fn persist(&self, _theme: Theme) -> Result<(), ThemeError> {
        Ok(())
    }
}

/// Writes the theme to storage under the configured key, then mirrors it
/// onto the configured document-root attribute.
#[derive(Debug)]
pub struct DocumentSink<S, A> {
    storage: S,
    root: A,
    storage_key: String,
    attribute: String,
}

impl<S: KeyValueStore, A: AttributeSink> DocumentSink<S, A> {
    pub fn new(storage: S, root: A, config: &ThemeConfig) -> Self {
        Self { storage, root, storage_key: config.storage_key.clone(), attribute: config.attribute.clone() }
    }

    pub fn storage(&self) -> &S {
        &self.storage
    }

    pub fn root(&self) -> &A {
        &self.root
    }
}

impl<S: KeyValueStore, A: AttributeSink> PersistenceSink for DocumentSink<S, A> {
    /// Both writes are attempted; the first failure is returned.
    fn persist(&self, theme: Theme) -> Result<(), ThemeError> {
        let stored = self.storage.set_item(&self.storage_key, theme.as_str());
        let mirrored = self.root.set_attribute(&self.attribute, theme.as_str());
        tracing::debug!(%theme, key = %self.storage_key, attribute = %self.attribute, "theme persisted");
        stored.and(mirrored)
    }
}

// =============================================================================
// IN-MEMORY
// =============================================================================

/// In-memory storage. Clones share the same map.
#[derive(Clone, Debug, Default)]
pub struct MemoryStorage {
    items: Rc<RefCell<BTreeMap<String, String>>>,
}

impl MemoryStorage {
    pub fn new() -> Self {
        Self::default()
    }

    /// Stored value for `key`, if any.
    pub fn item(&self, key: &str) -> Option<String> {
        self.items.borrow().get(key).cloned()
    }
}

impl KeyValueStore for MemoryStorage {
    fn set_item(&self, key: &str, value: &str) -> Result<(), ThemeError> {
        self.items.borrow_mut().insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn get_item(&self, key: &str) -> Result<Option<String>, ThemeError> {
        Ok(self.item(key))
    }
}

/// In-memory document root. Clones share the same attributes.
#[derive(Clone, Debug, Default)]
pub struct MemoryAttributes {
    attributes: Rc<RefCell<BTreeMap<String, String>>>,
}

impl MemoryAttributes {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn attribute(&self, name: &str) -> Option<String> {
        self.attributes.borrow().get(name).cloned()
    }
}

impl AttributeSink for MemoryAttributes {
    fn set_attribute(&self, name: &str, value: &str) -> Result<(), ThemeError> {
        self.attributes.borrow_mut().insert(name.to_string(), value.to_string());
        Ok(())
    }
}

// =============================================================================
// FILE
// =============================================================================

/// Native durable storage: a JSON object of string keys to string values.
#[derive(Clone, Debug)]
pub struct FileStorage {
    path: PathBuf,
}

impl FileStorage {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn load(&self) -> Result<BTreeMap<String, String>, ThemeError> {
        match fs::read_to_string(&self.path) {
            Ok(raw) if raw.trim().is_empty() => Ok(BTreeMap::new()),
            Ok(raw) => Ok(serde_json::from_str(&raw)?),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(BTreeMap::new()),
            Err(e) => Err(e.into()),
        }
    }
}

impl KeyValueStore for FileStorage {
    fn set_item(&self, key: &str, value: &str) -> Result<(), ThemeError> {
        let mut items = self.load()?;
        items.insert(key.to_string(), value.to_string());
        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent)?;
        }
        fs::write(&self.path, serde_json::to_string_pretty(&items)?)?;
        Ok(())
    }

    fn get_item(&self, key: &str) -> Result<Option<String>, ThemeError> {
        Ok(self.load()?.remove(key))
    }
}

#[cfg(test)]
#[path = "sink_test.rs"]
mod tests;
