//! Snapshot persistence over a synchronous key-value storage medium
//!
//! Storage failures (quota exceeded, serialization errors) are logged and
//! swallowed: the in-memory store stays authoritative for the session and
//! the previous snapshot, if any, is left in place.

use std::collections::HashMap;

use crate::snapshot::Snapshot;
use crate::store::TemplateStore;

/// Storage key for the current snapshot shape
pub const STORAGE_KEY: &str = "stencil_templates_state_v2";
/// Key used before templates carried titles; read for migration only
pub const LEGACY_STORAGE_KEY: &str = "stencil_templates_state_v1";

/// Synchronous key-value storage medium
///
/// Implemented by the host over whatever backing it has (browser
/// localStorage, a settings database, a file per key). `set` may fail;
/// `get` of an absent key is simply `None`.
pub trait Storage {
    fn get(&self, key: &str) -> Option<String>;
    fn set(&mut self, key: &str, value: &str) -> anyhow::Result<()>;
}

/// Trivial in-memory storage, useful for tests and ephemeral sessions
#[derive(Debug, Clone, Default)]
pub struct MemoryStorage {
    entries: HashMap<String, String>,
}

impl MemoryStorage {
    pub fn new() -> Self {
        Self::default()
    }
}

impl Storage for MemoryStorage {
    fn get(&self, key: &str) -> Option<String> {
        self.entries.get(key).cloned()
    }

    fn set(&mut self, key: &str, value: &str) -> anyhow::Result<()> {
        self.entries.insert(key.to_string(), value.to_string());
        Ok(())
    }
}

/// Snapshot the store to storage; failures are logged and ignored
pub fn save(storage: &mut dyn Storage, store: &TemplateStore) {
    let snapshot = Snapshot::of_store(store);
    match snapshot.to_json() {
        Ok(json) => {
            if let Err(e) = storage.set(STORAGE_KEY, &json) {
                tracing::warn!("failed to persist template snapshot: {e:#}");
            }
        }
        Err(e) => {
            tracing::warn!("failed to serialize template snapshot: {e:#}");
        }
    }
}

/// Load the latest usable snapshot, falling back to the legacy key
///
/// Returns `None` when neither key holds a parsable snapshot; the caller
/// keeps its in-memory defaults. `selected_fallback` is the selection kept
/// when the snapshot carries no usable `selectedIndex`.
pub fn load(storage: &dyn Storage, selected_fallback: usize) -> Option<Snapshot> {
    let raw = storage
        .get(STORAGE_KEY)
        .or_else(|| storage.get(LEGACY_STORAGE_KEY))?;
    let snapshot = Snapshot::parse(&raw, selected_fallback);
    if snapshot.is_none() {
        tracing::warn!("discarding malformed template snapshot");
    }
    snapshot
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::Template;

    struct FailingStorage;

    impl Storage for FailingStorage {
        fn get(&self, _key: &str) -> Option<String> {
            None
        }

        fn set(&mut self, _key: &str, _value: &str) -> anyhow::Result<()> {
            anyhow::bail!("quota exceeded")
        }
    }

    #[test]
    fn test_save_then_load_roundtrip() {
        let mut storage = MemoryStorage::new();
        let store = TemplateStore::from_parts(
            vec![Template::with_content("a", "<p>1</p>"), Template::new("b")],
            1,
        );

        save(&mut storage, &store);
        let snapshot = load(&storage, 0).unwrap();

        assert_eq!(
            TemplateStore::from_parts(snapshot.templates, snapshot.selected_index),
            store
        );
    }

    #[test]
    fn test_load_falls_back_to_legacy_key() {
        let mut storage = MemoryStorage::new();
        storage
            .set(LEGACY_STORAGE_KEY, r#"{"templates": ["old body"]}"#)
            .unwrap();

        let snapshot = load(&storage, 0).unwrap();
        assert_eq!(snapshot.templates[0].content, "old body");
        assert_eq!(snapshot.templates[0].title, "template 1");
    }

    #[test]
    fn test_current_key_wins_over_legacy() {
        let mut storage = MemoryStorage::new();
        storage
            .set(LEGACY_STORAGE_KEY, r#"{"templates": ["legacy"]}"#)
            .unwrap();
        storage
            .set(
                STORAGE_KEY,
                r#"{"templates": [{"title": "current", "content": ""}], "selectedIndex": 0}"#,
            )
            .unwrap();

        let snapshot = load(&storage, 0).unwrap();
        assert_eq!(snapshot.templates[0].title, "current");
    }

    #[test]
    fn test_load_from_empty_storage() {
        assert!(load(&MemoryStorage::new(), 0).is_none());
    }

    #[test]
    fn test_malformed_snapshot_is_discarded() {
        let mut storage = MemoryStorage::new();
        storage.set(STORAGE_KEY, "{{ not json").unwrap();
        assert!(load(&storage, 0).is_none());
    }

    #[test]
    fn test_save_failure_is_silent() {
        let mut storage = FailingStorage;
        let store = TemplateStore::starter();
        // Must not panic or propagate
        save(&mut storage, &store);
    }
}
