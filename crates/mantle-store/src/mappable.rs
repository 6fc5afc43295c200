use std::fmt;

use serde::de::DeserializeOwned;
use serde::Serialize;

/// Store-addressable projection of an entity's identity.
///
/// A key is always derived from the entity it addresses. A partial key
/// leaves trailing components empty; its bytes are then a prefix of every
/// full key in the same logical group.
pub trait Key: Clone + fmt::Debug + fmt::Display {
    /// Bytes of this key within its module's key space.
    fn store_key_bytes(&self) -> Vec<u8>;

    /// Returns `true` if this key only addresses a group of entries.
    fn is_partial(&self) -> bool;
}

/// An entity that can be persisted in a [`Collection`](crate::Collection).
///
/// `Default` is the prototype: the value a lookup returns when nothing is
/// stored under a key.
pub trait Mappable: Serialize + DeserializeOwned + Clone + PartialEq + Default + 'static {
    type Key: Key;

    fn key(&self) -> Self::Key;

    /// Returns `true` if this value equals the prototype.
    fn is_prototype(&self) -> bool {
        *self == Self::default()
    }
}
