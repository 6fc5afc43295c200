//! Signing keys and identity authority for Mantle.
//!
//! Provides Ed25519 signing/verification, address derivation from public
//! keys, and the [`IdentityAuthority`] collaborator that the authenticate
//! auxiliary consults.
//!
//! All crypto operations wrap established libraries; no custom cryptography.

pub mod authority;
pub mod signer;

pub use authority::{IdentityAuthority, KeyRegistry};
pub use signer::{Signature, SignatureError, SigningKey, VerifyingKey};
