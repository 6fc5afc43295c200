use crate::constants::TO_HASH_SEPARATOR;
use crate::id::Id;

/// Domain-separated BLAKE3 content hasher.
///
/// Each hasher carries a domain tag that is prepended to every hash
/// computation, so a data value and a property list with identical input
/// strings never share a hash.
pub struct ContentHasher {
    domain: &'static str,
}

impl ContentHasher {
    /// Hasher for single data values.
    pub const DATA: Self = Self {
        domain: "mantle-data-v1",
    };
    /// Hasher for properties.
    pub const PROPERTY: Self = Self {
        domain: "mantle-property-v1",
    };
    /// Hasher for property lists (document immutables).
    pub const PROPERTY_LIST: Self = Self {
        domain: "mantle-property-list-v1",
    };
    /// Hasher for classification schemas.
    pub const CLASSIFICATION: Self = Self {
        domain: "mantle-classification-v1",
    };

    /// Create a hasher with a custom domain tag.
    pub const fn new(domain: &'static str) -> Self {
        Self { domain }
    }

    /// Hash raw bytes with domain separation.
    pub fn hash(&self, data: &[u8]) -> [u8; 32] {
        let mut hasher = blake3::Hasher::new();
        hasher.update(self.domain.as_bytes());
        hasher.update(b":");
        hasher.update(data);
        *hasher.finalize().as_bytes()
    }

    /// Derive a hash id from a set of string parts.
    ///
    /// Empty parts are dropped and the rest are sorted before being joined
    /// with the hash salt, so the result does not depend on part order. When
    /// no part remains the result is the empty hash id.
    pub fn hash_id<S: AsRef<str>>(&self, parts: &[S]) -> Id {
        let mut parts: Vec<&str> = parts
            .iter()
            .map(AsRef::as_ref)
            .filter(|part| !part.is_empty())
            .collect();
        if parts.is_empty() {
            return Id::hash(String::new());
        }
        parts.sort_unstable();

        let separator = TO_HASH_SEPARATOR.to_string();
        let joined = parts.join(separator.as_str());
        Id::hash(hex::encode(self.hash(joined.as_bytes())))
    }

    /// The domain tag used by this hasher.
    pub fn domain(&self) -> &str {
        self.domain
    }
}
