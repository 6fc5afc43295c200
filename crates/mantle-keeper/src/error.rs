use mantle_auxiliary::AuxiliaryError;
use mantle_entities::EntityError;
use mantle_store::StoreError;
use mantle_types::{ErrorKind, TypeError};

/// Errors that reject a transaction or a keeper operation.
#[derive(Debug, thiserror::Error)]
pub enum KeeperError {
    #[error(transparent)]
    Auxiliary(#[from] AuxiliaryError),

    #[error(transparent)]
    Entity(#[from] EntityError),

    #[error(transparent)]
    Store(#[from] StoreError),

    #[error(transparent)]
    Type(#[from] TypeError),

    /// A transaction request failed decoding or validation.
    #[error("invalid request: {0}")]
    Request(String),

    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("configuration error: {0}")]
    Config(String),
}

impl KeeperError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::Auxiliary(e) => e.kind(),
            Self::Entity(e) => e.kind(),
            Self::Store(e) => e.kind(),
            Self::Type(e) => e.kind(),
            Self::Request(_) | Self::Json(_) => ErrorKind::IncorrectFormat,
            Self::Config(_) => ErrorKind::Internal,
        }
    }
}

/// Result alias for keeper operations.
pub type KeeperResult<T> = Result<T, KeeperError>;
