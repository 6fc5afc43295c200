//! Scoped key-value storage and typed persistence for Mantle.
//!
//! The host supplies a [`KvStore`]: a byte-keyed, ordered, transactional
//! backend. On top of it this crate layers typed persistence of any
//! [`Mappable`] entity under keys derived from the entity itself.
//!
//! # Backends
//!
//! - [`MemoryStore`] -- `BTreeMap`-based committed store
//! - [`CacheStore`] -- write-buffering scope over any other store; commit
//!   flushes, drop discards
//!
//! # Typed Layer
//!
//! - [`StoreRegistry`] -- hands out one [`Mapper`] per module name
//! - [`Mapper`] -- encodes entities with bincode under the module prefix
//! - [`Collection`] -- a mapper bound to one scope: `fetch`, `add`,
//!   `mutate`, `remove`, `iterate`
//!
//! # Design Rules
//!
//! 1. Keys are derived from entities, never assigned.
//! 2. `fetch` is total: an absent key yields the prototype value.
//! 3. `add` never overwrites; `mutate` and `remove` never create.
//! 4. Iteration is lazy and follows key-byte order.
//! 5. No internal locking: one scope has one writer at a time.

pub mod cache;
pub mod error;
pub mod mappable;
pub mod mapper;
pub mod memory;
pub mod registry;
pub mod traits;

// Re-export primary types at crate root for ergonomic imports.
pub use cache::CacheStore;
pub use error::{StoreError, StoreResult};
pub use mappable::{Key, Mappable};
pub use mapper::{Collection, Mapper};
pub use memory::MemoryStore;
pub use registry::StoreRegistry;
pub use traits::{KvIter, KvStore};
