use crate::error::StoreResult;

/// Lazy, key-ordered sequence of `(key, value)` pairs.
pub type KvIter<'a> = Box<dyn Iterator<Item = (Vec<u8>, Vec<u8>)> + 'a>;

/// Scoped transactional key-value backend.
///
/// Implementations must satisfy these invariants:
/// - `iterate` yields entries in ascending key-byte order.
/// - A `set` or `delete` is visible to every later `get` and `iterate` on
///   the same store.
/// - The store never interprets keys or values.
///
/// Writes take `&mut self`; one scope has at most one active writer.
pub trait KvStore {
    /// Read the value stored under `key`. Returns `Ok(None)` if absent.
    fn get(&self, key: &[u8]) -> StoreResult<Option<Vec<u8>>>;

    /// Store `value` under `key`, replacing any previous value.
    fn set(&mut self, key: &[u8], value: Vec<u8>) -> StoreResult<()>;

    /// Remove the entry under `key`. Removing an absent key is a no-op.
    fn delete(&mut self, key: &[u8]) -> StoreResult<()>;

    /// All entries whose key starts with `prefix`, in key order.
    fn iterate(&self, prefix: &[u8]) -> StoreResult<KvIter<'_>>;

    /// Check whether an entry exists under `key`.
    fn has(&self, key: &[u8]) -> StoreResult<bool> {
        Ok(self.get(key)?.is_some())
    }
}
