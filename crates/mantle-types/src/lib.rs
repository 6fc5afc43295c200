//! Foundation types for Mantle.
//!
//! Every other Mantle crate depends on `mantle-types`. It defines the value
//! system that documents are built from and the identifiers that address
//! them in storage.
//!
//! # Key Types
//!
//! - [`Data`]: closed union of typed values with total ordering per variant
//! - [`Id`]: atomic, content-hash, and composite identifiers
//! - [`Property`] / [`PropertyList`]: `(Id, Data)` pairs, deduplicated by id
//! - [`Document`]: identity derived from immutables, plus mutable properties
//! - [`Dec`]: fixed-point decimal used for every balance
//! - [`ContentHasher`]: domain-separated BLAKE3 content hashing
//! - [`ErrorKind`]: the error taxonomy reported to the host

pub mod address;
pub mod constants;
pub mod data;
pub mod dec;
pub mod document;
pub mod error;
pub mod hasher;
pub mod height;
pub mod id;
pub mod property;
pub mod property_list;

pub use address::Address;
pub use data::{Data, DataType};
pub use dec::Dec;
pub use document::Document;
pub use error::{ErrorKind, TypeError, TypeResult};
pub use hasher::ContentHasher;
pub use height::Height;
pub use id::Id;
pub use property::Property;
pub use property_list::PropertyList;
