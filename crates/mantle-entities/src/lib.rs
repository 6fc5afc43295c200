//! Stored entities for Mantle.
//!
//! Each module owns one collection in the shared store and the operations
//! that keep it consistent:
//!
//! - [`splits`] -- fractional ownership balances and the split ledger
//! - [`assets`] -- classified documents, keyed by classification and
//!   immutables hash
//! - [`classifications`] -- property schemas and conformance checks
//! - [`identities`] -- identities and their controlling addresses
//! - [`metas`] -- data values revealed under their content hash
//!
//! Lookups are total: a missing entity is returned as its prototype, and
//! every call site that needs presence checks `is_prototype()`.

#[macro_use]
mod macros;

pub mod assets;
pub mod classifications;
pub mod error;
pub mod identities;
pub mod metas;
pub mod splits;

pub use assets::{Asset, AssetId, Assets};
pub use classifications::{Classification, ClassificationId, Classifications};
pub use error::{EntityError, EntityResult};
pub use identities::{Identities, Identity, IdentityId};
pub use metas::{Meta, MetaId, Metas};
pub use splits::{LedgerPolicy, Split, SplitId, Splits};
