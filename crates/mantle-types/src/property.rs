use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::constants::{DATA_TYPE_AND_VALUE_SEPARATOR, PROPERTY_ID_AND_DATA_SEPARATOR};
use crate::data::{Data, DataType};
use crate::error::{TypeError, TypeResult};
use crate::hasher::ContentHasher;
use crate::id::Id;

/// An `(Id, Data)` pair. String form: `<id>:<code>|<value>`.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Property {
    id: Id,
    data: Data,
}

impl Property {
    pub fn new(id: impl Into<Id>, data: Data) -> Self {
        Self {
            id: id.into(),
            data,
        }
    }

    pub fn id(&self) -> &Id {
        &self.id
    }

    pub fn data(&self) -> &Data {
        &self.data
    }

    pub fn data_type(&self) -> DataType {
        self.data.data_type()
    }

    /// Hash over the property id, its data type and its data's content hash.
    ///
    /// A zero-valued property still hashes to a non-empty id, since the id
    /// and type are part of the input.
    pub fn hash_id(&self) -> Id {
        let input = format!(
            "{}{PROPERTY_ID_AND_DATA_SEPARATOR}{}{DATA_TYPE_AND_VALUE_SEPARATOR}{}",
            self.id,
            self.data.data_type().code(),
            self.data.hash_id()
        );
        ContentHasher::PROPERTY.hash_id(&[input])
    }

    /// Replace the value, keeping the id. The new value must have the same type.
    pub fn mutate(&self, data: Data) -> TypeResult<Property> {
        if data.data_type() != self.data_type() {
            return Err(TypeError::MetaData {
                expected: self.data_type().to_string(),
                found: data.data_type().to_string(),
            });
        }
        Ok(Self::new(self.id.clone(), data))
    }
}

impl fmt::Display for Property {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}{PROPERTY_ID_AND_DATA_SEPARATOR}{}",
            self.id,
            self.data.typed_string()
        )
    }
}

impl FromStr for Property {
    type Err = TypeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (id, typed) = s
            .split_once(PROPERTY_ID_AND_DATA_SEPARATOR)
            .ok_or_else(|| TypeError::format(format!("missing property data in {s:?}")))?;
        if id.trim().is_empty() {
            return Err(TypeError::format(format!("empty property id in {s:?}")));
        }
        Ok(Self::new(Id::atomic(id.trim()), Data::read(typed.trim())?))
    }
}
