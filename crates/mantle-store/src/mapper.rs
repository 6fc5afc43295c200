use std::marker::PhantomData;

use tracing::debug;

use crate::error::{StoreError, StoreResult};
use crate::mappable::{Key, Mappable};
use crate::traits::KvStore;

/// Typed view of one module's key space.
///
/// Values are encoded with bincode under `<prefix><key bytes>`. Mappers are
/// handed out by [`StoreRegistry`](crate::StoreRegistry), which guarantees
/// that no two modules share a prefix.
#[derive(Debug)]
pub struct Mapper<M> {
    name: String,
    prefix: Vec<u8>,
    _marker: PhantomData<fn() -> M>,
}

impl<M> Clone for Mapper<M> {
    fn clone(&self) -> Self {
        Self {
            name: self.name.clone(),
            prefix: self.prefix.clone(),
            _marker: PhantomData,
        }
    }
}

impl<M: Mappable> Mapper<M> {
    pub(crate) fn new(name: String, prefix: Vec<u8>) -> Self {
        Self {
            name,
            prefix,
            _marker: PhantomData,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn prefix(&self) -> &[u8] {
        &self.prefix
    }

    /// Bind this mapper to one store scope.
    pub fn collection<'a, S: KvStore + ?Sized>(&'a self, store: &'a mut S) -> Collection<'a, M, S> {
        Collection {
            mapper: self,
            store,
        }
    }

    fn store_key(&self, key: &M::Key) -> Vec<u8> {
        let mut bytes = self.prefix.clone();
        bytes.extend_from_slice(&key.store_key_bytes());
        bytes
    }

    /// Value stored under `key`, or the prototype if nothing is stored.
    pub fn fetch<S: KvStore + ?Sized>(&self, store: &S, key: &M::Key) -> StoreResult<M> {
        match store.get(&self.store_key(key))? {
            Some(bytes) => Ok(bincode::deserialize(&bytes)?),
            None => Ok(M::default()),
        }
    }

    pub fn contains<S: KvStore + ?Sized>(&self, store: &S, key: &M::Key) -> StoreResult<bool> {
        store.has(&self.store_key(key))
    }

    /// Every value whose key starts with `partial`, lazily, in key order.
    pub fn iterate<'s, S: KvStore + ?Sized>(
        &self,
        store: &'s S,
        partial: &M::Key,
    ) -> StoreResult<impl Iterator<Item = StoreResult<M>> + 's> {
        let entries = store.iterate(&self.store_key(partial))?;
        Ok(entries.map(|(_, bytes)| bincode::deserialize(&bytes).map_err(StoreError::from)))
    }

    fn not_found(&self, key: &M::Key) -> StoreError {
        StoreError::NotFound {
            module: self.name.clone(),
            key: key.to_string(),
        }
    }

    fn already_exists(&self, key: &M::Key) -> StoreError {
        StoreError::AlreadyExists {
            module: self.name.clone(),
            key: key.to_string(),
        }
    }
}

/// A [`Mapper`] bound to one store scope.
///
/// Lookups are total: `fetch` returns the prototype when nothing is stored.
/// All writes go through `add`, `mutate` and `remove`.
pub struct Collection<'a, M, S: KvStore + ?Sized> {
    mapper: &'a Mapper<M>,
    store: &'a mut S,
}

impl<M: Mappable, S: KvStore + ?Sized> Collection<'_, M, S> {
    pub fn fetch(&self, key: &M::Key) -> StoreResult<M> {
        self.mapper.fetch(&*self.store, key)
    }

    pub fn contains(&self, key: &M::Key) -> StoreResult<bool> {
        self.mapper.contains(&*self.store, key)
    }

    /// Insert a new entry. Fails if the key is already taken.
    pub fn add(&mut self, value: &M) -> StoreResult<()> {
        let key = value.key();
        if self.contains(&key)? {
            return Err(self.mapper.already_exists(&key));
        }
        self.write(&key, value)
    }

    /// Replace an existing entry. Fails if the key is absent.
    pub fn mutate(&mut self, value: &M) -> StoreResult<()> {
        let key = value.key();
        if !self.contains(&key)? {
            return Err(self.mapper.not_found(&key));
        }
        self.write(&key, value)
    }

    /// Remove an existing entry. Fails if the key is absent.
    pub fn remove(&mut self, value: &M) -> StoreResult<()> {
        let key = value.key();
        if !self.contains(&key)? {
            return Err(self.mapper.not_found(&key));
        }
        debug!(module = %self.mapper.name, %key, "remove");
        self.store.delete(&self.mapper.store_key(&key))
    }

    pub fn iterate(&self, partial: &M::Key) -> StoreResult<impl Iterator<Item = StoreResult<M>> + '_> {
        self.mapper.iterate(&*self.store, partial)
    }

    fn write(&mut self, key: &M::Key, value: &M) -> StoreResult<()> {
        debug!(module = %self.mapper.name, %key, "write");
        let bytes = bincode::serialize(value)?;
        self.store.set(&self.mapper.store_key(key), bytes)
    }
}
