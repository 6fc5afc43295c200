use std::fmt;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Error kinds surfaced to the host in transaction responses.
///
/// Every crate-level error maps onto exactly one kind through its `kind()`
/// method, so the host can branch on the kind without matching concrete
/// error types.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ErrorKind {
    /// A value was asked to act as a type it is not.
    MetaData,
    /// A lookup by key found no record where one was required.
    EntityNotFound,
    /// An insert found a record already stored under the same key.
    EntityAlreadyExists,
    /// A split holds less than the amount requested to be debited.
    InsufficientBalance,
    /// An auxiliary rejected the operation.
    NotAuthorized,
    /// Malformed input to a decode or parse step.
    IncorrectFormat,
    /// Backend or codec failure unrelated to the request itself.
    Internal,
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::MetaData => "MetaDataError",
            Self::EntityNotFound => "EntityNotFound",
            Self::EntityAlreadyExists => "EntityAlreadyExists",
            Self::InsufficientBalance => "InsufficientBalance",
            Self::NotAuthorized => "NotAuthorized",
            Self::IncorrectFormat => "IncorrectFormat",
            Self::Internal => "InternalError",
        };
        f.write_str(name)
    }
}

/// Errors produced by value-type operations.
#[derive(Clone, Debug, Error, PartialEq, Eq)]
pub enum TypeError {
    #[error("meta data error: expected {expected}, found {found}")]
    MetaData { expected: String, found: String },

    #[error("incorrect format: {0}")]
    IncorrectFormat(String),

    #[error("property count {count} exceeds maximum of {max}")]
    TooManyProperties { count: usize, max: usize },

    #[error("decimal overflow")]
    Overflow,
}

impl TypeError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::MetaData { .. } => ErrorKind::MetaData,
            Self::IncorrectFormat(_) | Self::TooManyProperties { .. } | Self::Overflow => {
                ErrorKind::IncorrectFormat
            }
        }
    }

    pub(crate) fn format(message: impl Into<String>) -> Self {
        Self::IncorrectFormat(message.into())
    }
}

/// Result alias for value-type operations.
pub type TypeResult<T> = Result<T, TypeError>;
