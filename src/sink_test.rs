use super::*;

struct FailingStorage;

impl KeyValueStore for FailingStorage {
    fn set_item(&self, _key: &str, _value: &str) -> Result<(), ThemeError> {
        Err(ThemeError::Storage("quota exceeded".into()))
    }

    fn get_item(&self, _key: &str) -> Result<Option<String>, ThemeError> {
        Ok(None)
    }
}

// =============================================================
// DocumentSink
// =============================================================

#[test]
fn document_sink_writes_storage_and_attribute() {
    let sink = DocumentSink::new(MemoryStorage::new(), MemoryAttributes::new(), &ThemeConfig::default());

    sink.persist(Theme::Dark).unwrap();

    assert_eq!(sink.storage().item("theme").as_deref(), Some("dark"));
    assert_eq!(sink.root().attribute("data-theme").as_deref(), Some("dark"));
}

#[test]
fn document_sink_uses_configured_names() {
    let config = ThemeConfig { storage_key: "ui.theme".into(), attribute: "data-mode".into(), ..ThemeConfig::default() };
    let sink = DocumentSink::new(MemoryStorage::new(), MemoryAttributes::new(), &config);

    sink.persist(Theme::Light).unwrap();

    assert_eq!(sink.storage().item("ui.theme").as_deref(), Some("light"));
    assert_eq!(sink.storage().item("theme"), None);
    assert_eq!(sink.root().attribute("data-mode").as_deref(), Some("light"));
}

#[test]
fn document_sink_mirrors_attribute_when_storage_fails() {
    let sink = DocumentSink::new(FailingStorage, MemoryAttributes::new(), &ThemeConfig::default());

    let err = sink.persist(Theme::Dark).unwrap_err();

    assert!(matches!(err, ThemeError::Storage(_)));
    assert_eq!(sink.root().attribute("data-theme").as_deref(), Some("dark"));
}

#[test]
fn noop_sink_always_succeeds() {
    assert!(NoopSink.persist(Theme::Light).is_ok());
    assert!(NoopSink.persist(Theme::Dark).is_ok());
}

// =============================================================
// Memory backends
// =============================================================

#[test]
fn memory_storage_clones_share_items() {
    let storage = MemoryStorage::new();
    let view = storage.clone();
    storage.set_item("theme", "dark").unwrap();
    assert_eq!(view.get_item("theme").unwrap().as_deref(), Some("dark"));
    assert_eq!(view.get_item("missing").unwrap(), None);
}

#[test]
fn memory_attributes_overwrite_previous_value() {
    let root = MemoryAttributes::new();
    root.set_attribute("data-theme", "dark").unwrap();
    root.set_attribute("data-theme", "light").unwrap();
    assert_eq!(root.attribute("data-theme").as_deref(), Some("light"));
}

// =============================================================
// FileStorage
// =============================================================

#[test]
fn file_storage_missing_file_reads_as_empty() {
    let dir = tempfile::tempdir().unwrap();
    let storage = FileStorage::new(dir.path().join("absent.json"));
    assert_eq!(storage.get_item("theme").unwrap(), None);
}

#[test]
fn file_storage_round_trips_and_creates_parent_dirs() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("nested").join("prefs.json");
    let storage = FileStorage::new(&path);

    storage.set_item("theme", "dark").unwrap();

    assert!(path.exists());
    assert_eq!(storage.get_item("theme").unwrap().as_deref(), Some("dark"));
    assert_eq!(FileStorage::new(&path).get_item("theme").unwrap().as_deref(), Some("dark"));
}

#[test]
fn file_storage_preserves_unrelated_keys() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("prefs.json");
    std::fs::write(&path, r#"{"locale":"en"}"#).unwrap();
    let storage = FileStorage::new(&path);

    storage.set_item("theme", "light").unwrap();

    assert_eq!(storage.get_item("locale").unwrap().as_deref(), Some("en"));
    assert_eq!(storage.get_item("theme").unwrap().as_deref(), Some("light"));
}

#[test]
fn file_storage_rejects_malformed_json() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("prefs.json");
    std::fs::write(&path, "not json").unwrap();
    let storage = FileStorage::new(&path);

    assert!(matches!(storage.set_item("theme", "dark"), Err(ThemeError::Json(_))));
}

#[test]
fn file_backed_document_sink_persists_theme() {
    let dir = tempfile::tempdir().unwrap();
    let storage = FileStorage::new(dir.path().join("prefs.json"));
    let sink = DocumentSink::new(storage, MemoryAttributes::new(), &ThemeConfig::default());

    sink.persist(Theme::Dark).unwrap();

    assert_eq!(sink.storage().get_item("theme").unwrap().as_deref(), Some("dark"));
}
