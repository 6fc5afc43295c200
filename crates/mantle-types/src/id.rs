use std::cmp::Ordering;
use std::fmt;
use std::hash::{Hash, Hasher};

use serde::{Deserialize, Serialize};

use crate::constants::{
    FIRST_ORDER_COMPOSITE_ID_SEPARATOR, ID_SEPARATOR, RESERVED_COMPONENT_SEPARATORS,
    SECOND_ORDER_COMPOSITE_ID_SEPARATOR,
};
use crate::error::{TypeError, TypeResult};

/// Opaque, comparable identifier.
///
/// The variant records how an id was built; equality, ordering and hashing
/// all go through the canonical string, so an id parsed back from its string
/// form compares equal to the id that produced it.
#[derive(Clone, Serialize, Deserialize)]
pub enum Id {
    /// Wraps a caller-supplied string verbatim.
    Atomic(String),
    /// Hex digest derived from the content it identifies. Empty when the
    /// content is a zero value.
    Hash(String),
    /// Two ids joined with the first-order separator. Order is significant.
    Composite(Box<Id>, Box<Id>),
}

impl Id {
    pub fn atomic(value: impl Into<String>) -> Self {
        Self::Atomic(value.into())
    }

    pub fn hash(digest: impl Into<String>) -> Self {
        Self::Hash(digest.into())
    }

    pub fn composite(first: Id, second: Id) -> Self {
        Self::Composite(Box::new(first), Box::new(second))
    }

    /// The empty atomic id.
    pub fn empty() -> Self {
        Self::Atomic(String::new())
    }

    /// Build an atomic id from dotted parts, e.g. `["mantle", "local"]`.
    pub fn dotted(parts: &[&str]) -> Self {
        Self::Atomic(parts.join(&ID_SEPARATOR.to_string()[..]))
    }

    pub fn is_empty(&self) -> bool {
        match self {
            Self::Atomic(value) | Self::Hash(value) => value.is_empty(),
            Self::Composite(first, second) => first.is_empty() && second.is_empty(),
        }
    }

    /// The two components of a composite id.
    pub fn components(&self) -> Option<(&Id, &Id)> {
        match self {
            Self::Composite(first, second) => Some((first, second)),
            Self::Atomic(_) | Self::Hash(_) => None,
        }
    }

    /// Returns `true` if no single component contains a reserved separator.
    pub fn is_well_formed(&self) -> bool {
        match self {
            Self::Atomic(value) | Self::Hash(value) => {
                !value.contains(&RESERVED_COMPONENT_SEPARATORS[..])
            }
            Self::Composite(first, second) => first.is_well_formed() && second.is_well_formed(),
        }
    }

    /// Canonical bytes used when the id becomes part of a store key.
    pub fn to_bytes(&self) -> Vec<u8> {
        self.to_string().into_bytes()
    }

    /// Split a first-order composite string into exactly two atomic ids.
    ///
    /// Fails with `IncorrectFormat` unless the string holds exactly one
    /// first-order separator.
    pub fn split_composite(s: &str) -> TypeResult<(Id, Id)> {
        let parts: Vec<&str> = s.split(FIRST_ORDER_COMPOSITE_ID_SEPARATOR).collect();
        match parts.as_slice() {
            [first, second] => Ok((Id::atomic(*first), Id::atomic(*second))),
            _ => Err(TypeError::format(format!(
                "expected two components separated by {FIRST_ORDER_COMPOSITE_ID_SEPARATOR:?}, found {} in {s:?}",
                parts.len()
            ))),
        }
    }

    /// Legacy decode of persisted composite keys: any string without exactly
    /// two components degrades to a pair of empty ids instead of failing.
    pub fn split_composite_lenient(s: &str) -> (Id, Id) {
        Self::split_composite(s).unwrap_or_else(|_| (Id::empty(), Id::empty()))
    }

    /// Join ids with the second-order separator.
    pub fn join_list(ids: &[Id]) -> String {
        ids.iter()
            .map(Id::to_string)
            .collect::<Vec<_>>()
            .join(&SECOND_ORDER_COMPOSITE_ID_SEPARATOR.to_string()[..])
    }

    /// Inverse of [`Id::join_list`]. The empty string is the empty list.
    pub fn split_list(s: &str) -> Vec<Id> {
        if s.is_empty() {
            return Vec::new();
        }
        s.split(SECOND_ORDER_COMPOSITE_ID_SEPARATOR)
            .map(Id::atomic)
            .collect()
    }
}

impl Default for Id {
    fn default() -> Self {
        Self::empty()
    }
}

impl From<&str> for Id {
    fn from(value: &str) -> Self {
        Self::atomic(value)
    }
}

impl From<String> for Id {
    fn from(value: String) -> Self {
        Self::atomic(value)
    }
}

impl fmt::Display for Id {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Atomic(value) | Self::Hash(value) => f.write_str(value),
            Self::Composite(first, second) => {
                write!(f, "{first}{FIRST_ORDER_COMPOSITE_ID_SEPARATOR}{second}")
            }
        }
    }
}

impl fmt::Debug for Id {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Id({:?})", self.to_string())
    }
}

impl PartialEq for Id {
    fn eq(&self, other: &Self) -> bool {
        self.to_string() == other.to_string()
    }
}

impl Eq for Id {}

impl PartialOrd for Id {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Id {
    fn cmp(&self, other: &Self) -> Ordering {
        self.to_string().cmp(&other.to_string())
    }
}

impl Hash for Id {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.to_string().hash(state);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn composite_display_joins_components() {
        let id = Id::composite(Id::atomic("classification"), Id::hash("abc"));
        assert_eq!(id.to_string(), "classification|abc");
        let (first, second) = id.components().unwrap();
        assert_eq!(first, &Id::atomic("classification"));
        assert_eq!(second, &Id::atomic("abc"));
    }

    #[test]
    fn equality_ignores_construction() {
        assert_eq!(Id::hash("abc"), Id::atomic("abc"));
        assert_eq!(
            Id::composite(Id::atomic("a"), Id::atomic("b")),
            Id::atomic("a|b")
        );
    }

    #[test]
    fn strict_split_rejects_wrong_component_count() {
        assert!(Id::split_composite("").is_err());
        assert!(Id::split_composite("single").is_err());
        assert!(Id::split_composite("a|b|c").is_err());
        assert_eq!(
            Id::split_composite("string1|string2").unwrap(),
            (Id::atomic("string1"), Id::atomic("string2"))
        );
    }

    #[test]
    fn lenient_split_degrades_to_empty_pair() {
        assert_eq!(Id::split_composite_lenient(""), (Id::empty(), Id::empty()));
        assert_eq!(Id::split_composite_lenient("a|b|c"), (Id::empty(), Id::empty()));
    }

    #[test]
    fn empty_composite_is_empty() {
        assert!(Id::composite(Id::empty(), Id::hash("")).is_empty());
        assert!(!Id::composite(Id::empty(), Id::atomic("x")).is_empty());
    }

    #[test]
    fn well_formedness_checks_reserved_separators() {
        assert!(Id::atomic("stake").is_well_formed());
        assert!(Id::atomic("chain.local").is_well_formed());
        assert!(!Id::atomic("a|b").is_well_formed());
        assert!(!Id::atomic("a:b").is_well_formed());
        assert!(Id::composite(Id::atomic("a"), Id::atomic("b")).is_well_formed());
    }

    #[test]
    fn dotted_joins_parts() {
        assert_eq!(Id::dotted(&["mantle", "local"]).to_string(), "mantle.local");
    }

    #[test]
    fn list_roundtrip() {
        let ids = vec![Id::atomic("a"), Id::atomic("b"), Id::atomic("c")];
        let joined = Id::join_list(&ids);
        assert_eq!(joined, "a*b*c");
        assert_eq!(Id::split_list(&joined), ids);
        assert!(Id::split_list("").is_empty());
    }

    #[test]
    fn bincode_roundtrip_preserves_variant() {
        let id = Id::composite(Id::atomic("owner"), Id::hash("deadbeef"));
        let bytes = bincode::serialize(&id).unwrap();
        let decoded: Id = bincode::deserialize(&bytes).unwrap();
        assert_eq!(decoded, id);
        assert!(decoded.components().is_some());
    }

    fn component() -> impl Strategy<Value = String> {
        "[A-Za-z0-9._=-]{0,16}"
    }

    proptest! {
        #[test]
        fn atomic_string_roundtrip(s in component()) {
            let id = Id::atomic(s.clone());
            prop_assert_eq!(Id::from(id.to_string()), id);
        }

        #[test]
        fn composite_split_recovers_components(a in component(), b in component()) {
            let id = Id::composite(Id::atomic(a.clone()), Id::atomic(b.clone()));
            let (first, second) = Id::split_composite(&id.to_string()).unwrap();
            prop_assert_eq!(first, Id::atomic(a));
            prop_assert_eq!(second, Id::atomic(b));
        }
    }
}
