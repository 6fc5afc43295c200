/// Declares a two-component key type `first|second`.
///
/// The generated type converts to and from a composite [`Id`](mantle_types::Id),
/// implements [`Key`](mantle_store::Key), and is partial when either component
/// is empty. An empty first component addresses the whole module.
macro_rules! composite_id {
    ($(#[$meta:meta])* $name:ident { $first:ident, $second:ident }) => {
        $(#[$meta])*
        #[derive(
            Clone, Debug, Default, PartialEq, Eq, Hash, PartialOrd, Ord,
            ::serde::Serialize, ::serde::Deserialize,
        )]
        pub struct $name {
            $first: ::mantle_types::Id,
            $second: ::mantle_types::Id,
        }

        impl $name {
            pub fn new($first: ::mantle_types::Id, $second: ::mantle_types::Id) -> Self {
                Self { $first, $second }
            }

            pub fn $first(&self) -> &::mantle_types::Id {
                &self.$first
            }

            pub fn $second(&self) -> &::mantle_types::Id {
                &self.$second
            }

            pub fn as_id(&self) -> ::mantle_types::Id {
                ::mantle_types::Id::composite(self.$first.clone(), self.$second.clone())
            }

            /// Strict decode: anything but exactly two components is
            /// `IncorrectFormat`.
            pub fn from_id(id: &::mantle_types::Id) -> $crate::error::EntityResult<Self> {
                let (first, second) = match id.components() {
                    Some((first, second)) => (first.clone(), second.clone()),
                    None => ::mantle_types::Id::split_composite(&id.to_string())?,
                };
                Ok(Self::new(first, second))
            }

            /// Legacy decode for persisted keys: malformed input yields two
            /// empty components.
            pub fn read_lenient(s: &str) -> Self {
                let (first, second) = ::mantle_types::Id::split_composite_lenient(s);
                Self::new(first, second)
            }
        }

        impl ::std::fmt::Display for $name {
            fn fmt(&self, f: &mut ::std::fmt::Formatter<'_>) -> ::std::fmt::Result {
                write!(
                    f,
                    "{}{}{}",
                    self.$first,
                    ::mantle_types::constants::FIRST_ORDER_COMPOSITE_ID_SEPARATOR,
                    self.$second
                )
            }
        }

        impl ::mantle_store::Key for $name {
            fn store_key_bytes(&self) -> Vec<u8> {
                if self.$first.is_empty() {
                    Vec::new()
                } else {
                    self.to_string().into_bytes()
                }
            }

            fn is_partial(&self) -> bool {
                self.$first.is_empty() || self.$second.is_empty()
            }
        }
    };
}

/// Declares a single-component key type wrapping an [`Id`](mantle_types::Id).
macro_rules! atomic_id {
    ($(#[$meta:meta])* $name:ident) => {
        $(#[$meta])*
        #[derive(
            Clone, Debug, Default, PartialEq, Eq, Hash, PartialOrd, Ord,
            ::serde::Serialize, ::serde::Deserialize,
        )]
        pub struct $name(::mantle_types::Id);

        impl $name {
            pub fn new(id: impl Into<::mantle_types::Id>) -> Self {
                Self(id.into())
            }

            pub fn as_id(&self) -> &::mantle_types::Id {
                &self.0
            }

            pub fn is_empty(&self) -> bool {
                self.0.is_empty()
            }
        }

        impl ::std::fmt::Display for $name {
            fn fmt(&self, f: &mut ::std::fmt::Formatter<'_>) -> ::std::fmt::Result {
                write!(f, "{}", self.0)
            }
        }

        impl ::mantle_store::Key for $name {
            fn store_key_bytes(&self) -> Vec<u8> {
                self.0.to_bytes()
            }

            fn is_partial(&self) -> bool {
                self.0.is_empty()
            }
        }
    };
}
