use std::collections::BTreeMap;

use crate::error::StoreResult;
use crate::traits::{KvIter, KvStore};

/// In-memory, `BTreeMap`-backed store.
///
/// Intended for tests, the CLI and embedding. Keys iterate in byte order.
#[derive(Clone, Default)]
pub struct MemoryStore {
    entries: BTreeMap<Vec<u8>, Vec<u8>>,
}

impl MemoryStore {
    /// Create a new empty in-memory store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of entries currently stored.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns `true` if the store is empty.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Total bytes across all stored keys and values.
    pub fn total_bytes(&self) -> usize {
        self.entries.iter().map(|(k, v)| k.len() + v.len()).sum()
    }
}

impl KvStore for MemoryStore {
    fn get(&self, key: &[u8]) -> StoreResult<Option<Vec<u8>>> {
        Ok(self.entries.get(key).cloned())
    }

    fn set(&mut self, key: &[u8], value: Vec<u8>) -> StoreResult<()> {
        self.entries.insert(key.to_vec(), value);
        Ok(())
    }

    fn delete(&mut self, key: &[u8]) -> StoreResult<()> {
        self.entries.remove(key);
        Ok(())
    }

    fn iterate(&self, prefix: &[u8]) -> StoreResult<KvIter<'_>> {
        let prefix = prefix.to_vec();
        let iter = self
            .entries
            .range(prefix.clone()..)
            .take_while(move |(key, _)| key.starts_with(&prefix))
            .map(|(key, value)| (key.clone(), value.clone()));
        Ok(Box::new(iter))
    }

    fn has(&self, key: &[u8]) -> StoreResult<bool> {
        Ok(self.entries.contains_key(key))
    }
}

impl std::fmt::Debug for MemoryStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MemoryStore")
            .field("entry_count", &self.entries.len())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn keys(store: &MemoryStore, prefix: &[u8]) -> Vec<Vec<u8>> {
        store.iterate(prefix).unwrap().map(|(k, _)| k).collect()
    }

    #[test]
    fn set_get_delete() {
        let mut store = MemoryStore::new();
        store.set(b"a", b"1".to_vec()).unwrap();
        assert_eq!(store.get(b"a").unwrap(), Some(b"1".to_vec()));
        assert!(store.has(b"a").unwrap());

        store.delete(b"a").unwrap();
        assert_eq!(store.get(b"a").unwrap(), None);
        assert!(store.is_empty());
    }

    #[test]
    fn delete_missing_is_noop() {
        let mut store = MemoryStore::new();
        store.delete(b"never-written").unwrap();
        assert!(store.is_empty());
    }

    #[test]
    fn set_replaces_value() {
        let mut store = MemoryStore::new();
        store.set(b"k", b"old".to_vec()).unwrap();
        store.set(b"k", b"new".to_vec()).unwrap();
        assert_eq!(store.len(), 1);
        assert_eq!(store.get(b"k").unwrap(), Some(b"new".to_vec()));
        assert_eq!(store.total_bytes(), 4);
    }

    #[test]
    fn iterate_respects_prefix_and_order() {
        let mut store = MemoryStore::new();
        for key in ["b/2", "a/1", "b/1", "c/1", "b"] {
            store.set(key.as_bytes(), Vec::new()).unwrap();
        }
        assert_eq!(keys(&store, b"b/"), vec![b"b/1".to_vec(), b"b/2".to_vec()]);
        assert_eq!(keys(&store, b"").len(), 5);
        assert!(keys(&store, b"z").is_empty());
    }
}
