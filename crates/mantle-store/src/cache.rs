use std::cmp::Ordering;
use std::collections::BTreeMap;
use std::iter::Peekable;

use tracing::debug;

use crate::error::StoreResult;
use crate::traits::{KvIter, KvStore};

/// Write-buffering scope over a parent store.
///
/// Reads see the scope's own writes layered over the parent. Nothing reaches
/// the parent until [`CacheStore::commit`]; dropping the scope without
/// committing discards every buffered write.
pub struct CacheStore<'a, S: KvStore + ?Sized> {
    parent: &'a mut S,
    writes: BTreeMap<Vec<u8>, Option<Vec<u8>>>,
}

impl<'a, S: KvStore + ?Sized> CacheStore<'a, S> {
    pub fn new(parent: &'a mut S) -> Self {
        Self {
            parent,
            writes: BTreeMap::new(),
        }
    }

    /// Number of buffered writes (sets and deletes).
    pub fn pending(&self) -> usize {
        self.writes.len()
    }

    /// Flush every buffered write to the parent, in key order.
    pub fn commit(self) -> StoreResult<usize> {
        let count = self.writes.len();
        for (key, value) in self.writes {
            match value {
                Some(value) => self.parent.set(&key, value)?,
                None => self.parent.delete(&key)?,
            }
        }
        debug!(writes = count, "cache scope committed");
        Ok(count)
    }

    /// Drop every buffered write.
    pub fn discard(self) {
        debug!(writes = self.writes.len(), "cache scope discarded");
    }
}

impl<S: KvStore + ?Sized> KvStore for CacheStore<'_, S> {
    fn get(&self, key: &[u8]) -> StoreResult<Option<Vec<u8>>> {
        match self.writes.get(key) {
            Some(buffered) => Ok(buffered.clone()),
            None => self.parent.get(key),
        }
    }

    fn set(&mut self, key: &[u8], value: Vec<u8>) -> StoreResult<()> {
        self.writes.insert(key.to_vec(), Some(value));
        Ok(())
    }

    fn delete(&mut self, key: &[u8]) -> StoreResult<()> {
        self.writes.insert(key.to_vec(), None);
        Ok(())
    }

    fn iterate(&self, prefix: &[u8]) -> StoreResult<KvIter<'_>> {
        let overlay: Vec<(Vec<u8>, Option<Vec<u8>>)> = self
            .writes
            .range(prefix.to_vec()..)
            .take_while(|(key, _)| key.starts_with(prefix))
            .map(|(key, value)| (key.clone(), value.clone()))
            .collect();
        Ok(Box::new(MergedIter {
            parent: self.parent.iterate(prefix)?.peekable(),
            overlay: overlay.into_iter().peekable(),
        }))
    }
}

/// Merges the parent's entries with the scope's buffered writes. On equal
/// keys the buffered write wins; buffered deletes hide the parent entry.
struct MergedIter<'a> {
    parent: Peekable<KvIter<'a>>,
    overlay: Peekable<std::vec::IntoIter<(Vec<u8>, Option<Vec<u8>>)>>,
}

impl Iterator for MergedIter<'_> {
    type Item = (Vec<u8>, Vec<u8>);

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            let order = match (self.parent.peek(), self.overlay.peek()) {
                (None, None) => return None,
                (Some(_), None) => Ordering::Less,
                (None, Some(_)) => Ordering::Greater,
                (Some((parent_key, _)), Some((overlay_key, _))) => parent_key.cmp(overlay_key),
            };
            match order {
                Ordering::Less => return self.parent.next(),
                Ordering::Equal => {
                    self.parent.next();
                }
                Ordering::Greater => {}
            }
            if let Some((key, Some(value))) = self.overlay.next() {
                return Some((key, value));
            }
        }
    }
}
