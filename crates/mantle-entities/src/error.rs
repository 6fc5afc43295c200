use mantle_store::StoreError;
use mantle_types::{Dec, ErrorKind, TypeError};

/// Errors from entity operations.
#[derive(Debug, thiserror::Error)]
pub enum EntityError {
    #[error(transparent)]
    Type(#[from] TypeError),

    #[error(transparent)]
    Store(#[from] StoreError),

    /// A lookup found only the prototype where a stored entity was required.
    #[error("{entity} not found: {id}")]
    NotFound { entity: &'static str, id: String },

    /// A split holds less than the amount to be debited.
    #[error("insufficient balance in split {split}: available {available}, requested {requested}")]
    InsufficientBalance {
        split: String,
        available: Dec,
        requested: Dec,
    },

    /// Amounts moved through the ledger must not be negative.
    #[error("negative amount: {0}")]
    NegativeAmount(Dec),

    /// A balance would leave the representable range.
    #[error("balance overflow in split {0}")]
    Overflow(String),

    /// A permission or schema check rejected the operation.
    #[error("not authorized: {0}")]
    NotAuthorized(String),
}

impl EntityError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::Type(e) => e.kind(),
            Self::Store(e) => e.kind(),
            Self::NotFound { .. } => ErrorKind::EntityNotFound,
            Self::InsufficientBalance { .. } => ErrorKind::InsufficientBalance,
            Self::NegativeAmount(_) | Self::Overflow(_) => ErrorKind::IncorrectFormat,
            Self::NotAuthorized(_) => ErrorKind::NotAuthorized,
        }
    }

    pub(crate) fn not_found(entity: &'static str, id: impl ToString) -> Self {
        Self::NotFound {
            entity,
            id: id.to_string(),
        }
    }
}

/// Result alias for entity operations.
pub type EntityResult<T> = Result<T, EntityError>;
