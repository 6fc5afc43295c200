use std::cmp::Ordering;
use std::fmt;

use serde::{Deserialize, Serialize};

use crate::address::Address;
use crate::constants::DATA_TYPE_AND_VALUE_SEPARATOR;
use crate::dec::Dec;
use crate::error::{TypeError, TypeResult};
use crate::hasher::ContentHasher;
use crate::height::Height;
use crate::id::Id;

// ---------------------------------------------------------------------------
// DataType
// ---------------------------------------------------------------------------

/// Discriminant of a [`Data`] value, written as a one-letter code in the
/// typed string form.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum DataType {
    String,
    Dec,
    Height,
    Address,
    Boolean,
    Id,
}

impl DataType {
    pub const ALL: [DataType; 6] = [
        Self::String,
        Self::Dec,
        Self::Height,
        Self::Address,
        Self::Boolean,
        Self::Id,
    ];

    pub const fn code(self) -> char {
        match self {
            Self::String => 'S',
            Self::Dec => 'D',
            Self::Height => 'H',
            Self::Address => 'A',
            Self::Boolean => 'B',
            Self::Id => 'I',
        }
    }

    pub fn from_code(code: &str) -> TypeResult<Self> {
        Self::ALL
            .into_iter()
            .find(|t| code.len() == 1 && code.starts_with(t.code()))
            .ok_or_else(|| TypeError::format(format!("unknown data type code {code:?}")))
    }

    /// Type identifier used by classifications to declare a property's type.
    pub fn type_id(self) -> Id {
        Id::atomic(self.code().to_string())
    }

    pub fn zero_value(self) -> Data {
        match self {
            Self::String => Data::String(String::new()),
            Self::Dec => Data::Dec(Dec::ZERO),
            Self::Height => Data::Height(Height::default()),
            Self::Address => Data::Address(Address::default()),
            Self::Boolean => Data::Boolean(false),
            Self::Id => Data::Id(Id::empty()),
        }
    }

    /// Parse an untyped value string as this type. The empty string is the
    /// zero value.
    pub fn parse(self, value: &str) -> TypeResult<Data> {
        if value.is_empty() {
            return Ok(self.zero_value());
        }
        Ok(match self {
            Self::String => Data::String(value.to_string()),
            Self::Dec => Data::Dec(value.parse()?),
            Self::Height => Data::Height(value.parse()?),
            Self::Address => Data::Address(value.parse()?),
            Self::Boolean => Data::Boolean(value.parse().map_err(|_| {
                TypeError::format(format!("invalid boolean {value:?}"))
            })?),
            Self::Id => Data::Id(Id::atomic(value)),
        })
    }
}

impl fmt::Display for DataType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.code())
    }
}

// ---------------------------------------------------------------------------
// Data
// ---------------------------------------------------------------------------

/// A typed value.
///
/// Values of the same variant are totally ordered; comparing values of
/// different variants is a [`TypeError::MetaData`] error, never a coercion.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Data {
    String(String),
    Dec(Dec),
    Height(Height),
    Address(Address),
    Boolean(bool),
    Id(Id),
}

impl Data {
    pub fn data_type(&self) -> DataType {
        match self {
            Self::String(_) => DataType::String,
            Self::Dec(_) => DataType::Dec,
            Self::Height(_) => DataType::Height,
            Self::Address(_) => DataType::Address,
            Self::Boolean(_) => DataType::Boolean,
            Self::Id(_) => DataType::Id,
        }
    }

    pub fn type_id(&self) -> Id {
        self.data_type().type_id()
    }

    pub fn zero_value(&self) -> Data {
        self.data_type().zero_value()
    }

    pub fn is_zero(&self) -> bool {
        match self {
            Self::String(value) => value.is_empty(),
            Self::Dec(value) => value.is_zero(),
            Self::Height(value) => value.get() == 0,
            Self::Address(value) => value.is_empty(),
            Self::Boolean(value) => !value,
            Self::Id(value) => value.is_empty(),
        }
    }

    /// Compare two values of the same variant.
    pub fn compare(&self, other: &Data) -> TypeResult<Ordering> {
        match (self, other) {
            (Self::String(a), Self::String(b)) => Ok(a.cmp(b)),
            (Self::Dec(a), Self::Dec(b)) => Ok(a.cmp(b)),
            (Self::Height(a), Self::Height(b)) => Ok(a.cmp(b)),
            (Self::Address(a), Self::Address(b)) => Ok(a.cmp(b)),
            (Self::Boolean(a), Self::Boolean(b)) => Ok(a.cmp(b)),
            (Self::Id(a), Self::Id(b)) => Ok(a.cmp(b)),
            _ => Err(self.mismatch(other.data_type())),
        }
    }

    /// Content hash of the canonical string; the empty hash id for a zero
    /// value.
    pub fn hash_id(&self) -> Id {
        if self.is_zero() {
            return Id::hash(String::new());
        }
        ContentHasher::DATA.hash_id(&[self.to_string()])
    }

    /// Content hash of the typed string form. Equal literals of different
    /// types get different ids; the empty hash id for a zero value.
    pub fn data_id(&self) -> Id {
        if self.is_zero() {
            return Id::hash(String::new());
        }
        ContentHasher::DATA.hash_id(&[self.typed_string()])
    }

    /// `<code>|<value>` form used inside property strings.
    pub fn typed_string(&self) -> String {
        format!("{}{DATA_TYPE_AND_VALUE_SEPARATOR}{self}", self.data_type().code())
    }

    /// Inverse of [`Data::typed_string`].
    pub fn read(typed: &str) -> TypeResult<Data> {
        let (code, value) = typed
            .split_once(DATA_TYPE_AND_VALUE_SEPARATOR)
            .ok_or_else(|| TypeError::format(format!("missing data type in {typed:?}")))?;
        DataType::from_code(code)?.parse(value)
    }

    pub fn as_string(&self) -> TypeResult<&str> {
        match self {
            Self::String(value) => Ok(value),
            _ => Err(self.mismatch(DataType::String)),
        }
    }

    pub fn as_dec(&self) -> TypeResult<Dec> {
        match self {
            Self::Dec(value) => Ok(*value),
            _ => Err(self.mismatch(DataType::Dec)),
        }
    }

    pub fn as_height(&self) -> TypeResult<Height> {
        match self {
            Self::Height(value) => Ok(*value),
            _ => Err(self.mismatch(DataType::Height)),
        }
    }

    pub fn as_address(&self) -> TypeResult<&Address> {
        match self {
            Self::Address(value) => Ok(value),
            _ => Err(self.mismatch(DataType::Address)),
        }
    }

    pub fn as_boolean(&self) -> TypeResult<bool> {
        match self {
            Self::Boolean(value) => Ok(*value),
            _ => Err(self.mismatch(DataType::Boolean)),
        }
    }

    pub fn as_id(&self) -> TypeResult<&Id> {
        match self {
            Self::Id(value) => Ok(value),
            _ => Err(self.mismatch(DataType::Id)),
        }
    }

    fn mismatch(&self, expected: DataType) -> TypeError {
        TypeError::MetaData {
            expected: expected.to_string(),
            found: self.data_type().to_string(),
        }
    }
}

impl fmt::Display for Data {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::String(value) => f.write_str(value),
            Self::Dec(value) => write!(f, "{value}"),
            Self::Height(value) => write!(f, "{value}"),
            Self::Address(value) => write!(f, "{value}"),
            Self::Boolean(value) => write!(f, "{value}"),
            Self::Id(value) => write!(f, "{value}"),
        }
    }
}

impl From<Dec> for Data {
    fn from(value: Dec) -> Self {
        Self::Dec(value)
    }
}

impl From<Height> for Data {
    fn from(value: Height) -> Self {
        Self::Height(value)
    }
}

impl From<&str> for Data {
    fn from(value: &str) -> Self {
        Self::String(value.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorKind;

    #[test]
    fn typed_string_roundtrip() {
        let cases = [
            Data::String("Name".into()),
            Data::Dec("12.5".parse().unwrap()),
            Data::Height(Height::new(42)),
            Data::Address(Address::from_bytes(b"addr".to_vec())),
            Data::Boolean(true),
            Data::Id(Id::composite(Id::atomic("a"), Id::atomic("b"))),
        ];
        for data in cases {
            let typed = data.typed_string();
            assert_eq!(Data::read(&typed).unwrap(), data, "{typed}");
        }
    }

    #[test]
    fn empty_value_reads_as_zero() {
        for data_type in DataType::ALL {
            let typed = format!("{}|", data_type.code());
            let data = Data::read(&typed).unwrap();
            assert!(data.is_zero());
            assert_eq!(data, data_type.zero_value());
        }
    }

    #[test]
    fn malformed_typed_strings_are_rejected() {
        assert!(Data::read("S").is_err());
        assert!(Data::read("X|value").is_err());
        assert!(Data::read("SS|value").is_err());
        assert!(Data::read("D|abc").is_err());
        assert!(Data::read("B|yes").is_err());
    }

    #[test]
    fn compare_within_variant() {
        let a = Data::Dec(Dec::from_int(1));
        let b = Data::Dec(Dec::from_int(2));
        assert_eq!(a.compare(&b).unwrap(), Ordering::Less);
        assert_eq!(b.compare(&a).unwrap(), Ordering::Greater);
        assert_eq!(a.compare(&a).unwrap(), Ordering::Equal);
    }

    #[test]
    fn compare_across_variants_is_meta_data_error() {
        let err = Data::from("1").compare(&Data::Dec(Dec::ONE)).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::MetaData);
    }

    #[test]
    fn zero_value_hashes_to_empty_id() {
        assert!(Data::Height(Height::new(0)).hash_id().is_empty());
        assert!(Data::from("").hash_id().is_empty());
        assert!(!Data::Height(Height::new(1)).hash_id().is_empty());
    }

    #[test]
    fn hash_depends_on_canonical_string() {
        let a: Data = Data::Dec("1.50".parse().unwrap());
        let b: Data = Data::Dec("1.5".parse().unwrap());
        assert_eq!(a.hash_id(), b.hash_id());
        assert_ne!(a.hash_id(), Data::Dec(Dec::from_int(2)).hash_id());
    }

    #[test]
    fn data_id_includes_type() {
        let text = Data::from("1");
        let number = Data::Dec(Dec::ONE);
        assert_eq!(text.hash_id(), number.hash_id());
        assert_ne!(text.data_id(), number.data_id());
        assert!(Data::Dec(Dec::ZERO).data_id().is_empty());
    }

    #[test]
    fn accessors_check_variant() {
        let data = Data::Height(Height::new(7));
        assert_eq!(data.as_height().unwrap(), Height::new(7));
        assert_eq!(data.as_dec().unwrap_err().kind(), ErrorKind::MetaData);
        assert_eq!(data.type_id(), Id::atomic("H"));
    }
}
