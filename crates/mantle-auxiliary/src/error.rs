use mantle_entities::EntityError;
use mantle_types::ErrorKind;

use crate::auxiliary::AuxiliaryKind;

/// Errors that stop the auxiliary pipeline.
#[derive(Debug, thiserror::Error)]
pub enum AuxiliaryError {
    /// An entity check or mutation inside an auxiliary failed.
    #[error(transparent)]
    Entity(#[from] EntityError),

    /// The signature did not verify, or a required signature is missing.
    #[error("authentication failed for {signer}: {reason}")]
    Unauthenticated { signer: String, reason: String },

    /// A request was submitted for an auxiliary the pipeline does not run.
    #[error("no {0} auxiliary in the pipeline")]
    Unavailable(AuxiliaryKind),

    /// An auxiliary was handed a request meant for another auxiliary.
    #[error("{auxiliary} auxiliary cannot handle a {request} request")]
    Mismatch {
        auxiliary: AuxiliaryKind,
        request: AuxiliaryKind,
    },

    /// The pipeline configuration is invalid.
    #[error("configuration error: {0}")]
    Config(String),
}

impl AuxiliaryError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::Entity(e) => e.kind(),
            Self::Unauthenticated { .. } => ErrorKind::NotAuthorized,
            Self::Unavailable(_) | Self::Mismatch { .. } | Self::Config(_) => ErrorKind::Internal,
        }
    }
}
