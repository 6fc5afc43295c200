use std::fmt;

use mantle_crypto::Signature;
use mantle_entities::{ClassificationId, IdentityId, Split};
use mantle_store::KvStore;
use mantle_types::{Address, Dec, Id, PropertyList};
use serde::{Deserialize, Serialize};

use crate::error::AuxiliaryError;

// ---------------------------------------------------------------------------
// AuxiliaryKind
// ---------------------------------------------------------------------------

/// Identifies an auxiliary and the requests it handles.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AuxiliaryKind {
    Authenticate,
    Verify,
    Conform,
    Mint,
    Burn,
    Scrub,
}

impl AuxiliaryKind {
    pub const ALL: [AuxiliaryKind; 6] = [
        Self::Authenticate,
        Self::Verify,
        Self::Conform,
        Self::Mint,
        Self::Burn,
        Self::Scrub,
    ];

    pub fn name(self) -> &'static str {
        match self {
            Self::Authenticate => "authenticate",
            Self::Verify => "verify",
            Self::Conform => "conform",
            Self::Mint => "mint",
            Self::Burn => "burn",
            Self::Scrub => "scrub",
        }
    }
}

impl fmt::Display for AuxiliaryKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

// ---------------------------------------------------------------------------
// AuxiliaryRequest
// ---------------------------------------------------------------------------

/// Work submitted to one auxiliary.
#[derive(Clone, Debug)]
pub enum AuxiliaryRequest {
    /// Check the signer's signature over the transaction's sign bytes.
    Authenticate {
        signer: Address,
        sign_bytes: Vec<u8>,
        signature: Option<Signature>,
    },
    /// Check that `address` controls `identity_id`.
    Verify {
        address: Address,
        identity_id: IdentityId,
    },
    /// Check properties against a stored classification.
    Conform {
        classification_id: ClassificationId,
        immutables: PropertyList,
        mutables: PropertyList,
    },
    /// Credit `value` of `ownable_id` to `owner_id`.
    Mint {
        owner_id: Id,
        ownable_id: Id,
        value: Dec,
    },
    /// Debit `value` of `ownable_id` from `owner_id`.
    Burn {
        owner_id: Id,
        ownable_id: Id,
        value: Dec,
    },
    /// Reveal the non-zero values of `properties` as metas.
    Scrub { properties: PropertyList },
}

impl AuxiliaryRequest {
    pub fn kind(&self) -> AuxiliaryKind {
        match self {
            Self::Authenticate { .. } => AuxiliaryKind::Authenticate,
            Self::Verify { .. } => AuxiliaryKind::Verify,
            Self::Conform { .. } => AuxiliaryKind::Conform,
            Self::Mint { .. } => AuxiliaryKind::Mint,
            Self::Burn { .. } => AuxiliaryKind::Burn,
            Self::Scrub { .. } => AuxiliaryKind::Scrub,
        }
    }
}

// ---------------------------------------------------------------------------
// Outcome
// ---------------------------------------------------------------------------

/// What a successful auxiliary call produced.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Outcome {
    /// A check passed without producing a value.
    Passed,
    /// The split written by a mint or burn.
    Split(Split),
    /// Content hashes of scrubbed values.
    Hashes(Vec<Id>),
}

// ---------------------------------------------------------------------------
// Auxiliary trait
// ---------------------------------------------------------------------------

/// One validation or mutation stage of the pipeline.
///
/// An auxiliary handles the requests of its own kind. It may read and write
/// the store; writes become visible to every later auxiliary of the same
/// run.
pub trait Auxiliary {
    fn kind(&self) -> AuxiliaryKind;

    fn help(&self, store: &mut dyn KvStore, request: &AuxiliaryRequest) -> Result<Outcome, AuxiliaryError>;
}

impl<T: Auxiliary + ?Sized> Auxiliary for Box<T> {
    fn kind(&self) -> AuxiliaryKind {
        (**self).kind()
    }

    fn help(&self, store: &mut dyn KvStore, request: &AuxiliaryRequest) -> Result<Outcome, AuxiliaryError> {
        (**self).help(store, request)
    }
}

/// Error for a request routed to the wrong auxiliary.
pub(crate) fn mismatch(auxiliary: AuxiliaryKind, request: &AuxiliaryRequest) -> AuxiliaryError {
    AuxiliaryError::Mismatch {
        auxiliary,
        request: request.kind(),
    }
}
