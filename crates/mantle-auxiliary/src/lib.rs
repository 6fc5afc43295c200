//! The auxiliary pipeline for Mantle transactions.
//!
//! Every transaction hands the keeper a list of [`AuxiliaryRequest`]s. The
//! [`Pipeline`] routes each request to the auxiliary of the same kind and
//! runs the auxiliaries in their configured order:
//!
//! ```text
//! Authenticate -> Verify -> Conform -> Mint -> Burn -> Scrub
//! ```
//!
//! # Design Rules
//!
//! - The first failing auxiliary stops the run; later auxiliaries never see
//!   the transaction.
//! - A later auxiliary observes every store write made by an earlier one.
//! - The pipeline does not roll back. The keeper runs it inside a store
//!   scope and drops the scope on error.
//! - Built-in auxiliaries are dispatched statically through
//!   [`BuiltinAuxiliary`]; custom auxiliaries plug in through the
//!   [`Auxiliary`] trait.

pub mod auxiliaries;
pub mod auxiliary;
pub mod config;
pub mod error;
pub mod pipeline;

// Re-export primary types at crate root for ergonomic imports.
pub use auxiliary::{Auxiliary, AuxiliaryKind, AuxiliaryRequest, Outcome};
pub use config::{Modules, PipelineConfig};
pub use error::AuxiliaryError;
pub use pipeline::{BuiltinAuxiliary, Pipeline, PipelineReport, StepResult};
