//! Transaction keeper for Mantle.
//!
//! Turns wire requests into typed messages and executes them atomically
//! against a key-value store:
//!
//! ```text
//! JSON -> TransactionRequest -> Message -> TransactionKeeper::transact
//!                                            |- CacheStore scope
//!                                            |- auxiliary pipeline
//!                                            `- entity mutation, then commit
//! ```
//!
//! # Key Types
//!
//! - [`TransactionKeeper`] -- owns the store, the entity modules and the
//!   pipeline; executes transactions and answers queries
//! - [`Message`] / [`Action`] -- a typed, optionally signed transaction
//! - [`TransactionRequest`] -- the JSON request decoder and validator
//! - [`TransactionResponse`] -- success, or one [`mantle_types::ErrorKind`]
//! - [`MantleConfig`] -- TOML configuration

pub mod config;
pub mod error;
pub mod keeper;
pub mod message;
pub mod request;

// Re-export primary types at crate root for ergonomic imports.
pub use config::MantleConfig;
pub use error::{KeeperError, KeeperResult};
pub use keeper::{TransactionKeeper, TransactionResponse};
pub use message::{Action, Message};
pub use request::{read_asset_id, read_classification_id, BaseReq, RequestBody, TransactionRequest};
