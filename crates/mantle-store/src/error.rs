use mantle_types::ErrorKind;

/// Errors from store and collection operations.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    /// A required entry was not found.
    #[error("entity not found in {module}: {key}")]
    NotFound { module: String, key: String },

    /// An insert found an entry already stored under the same key.
    #[error("entity already exists in {module}: {key}")]
    AlreadyExists { module: String, key: String },

    /// A module name was registered twice.
    #[error("module already registered: {0}")]
    DuplicateModule(String),

    /// A module's key prefix overlaps the prefix of another module.
    #[error("module {name:?} key prefix collides with module {existing:?}")]
    PrefixCollision { name: String, existing: String },

    /// A module name is empty or contains characters outside `[a-z0-9_/-]`.
    #[error("invalid module name: {0:?}")]
    InvalidModuleName(String),

    /// Serialization or deserialization failure.
    #[error("codec error: {0}")]
    Codec(String),

    /// Failure reported by the backing store.
    #[error("backend error: {0}")]
    Backend(String),
}

impl StoreError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::NotFound { .. } => ErrorKind::EntityNotFound,
            Self::AlreadyExists { .. } => ErrorKind::EntityAlreadyExists,
            Self::DuplicateModule(_)
            | Self::PrefixCollision { .. }
            | Self::InvalidModuleName(_)
            | Self::Codec(_)
            | Self::Backend(_) => ErrorKind::Internal,
        }
    }
}

impl From<bincode::Error> for StoreError {
    fn from(err: bincode::Error) -> Self {
        Self::Codec(err.to_string())
    }
}

/// Result alias for store operations.
pub type StoreResult<T> = Result<T, StoreError>;
