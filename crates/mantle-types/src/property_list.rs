use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::constants::{MAX_PROPERTY_COUNT, PROPERTIES_SEPARATOR};
use crate::data::Data;
use crate::error::{TypeError, TypeResult};
use crate::hasher::ContentHasher;
use crate::id::Id;
use crate::property::Property;

/// Ordered, duplicate-free list of properties.
///
/// Insertion order is kept for serialization but does not affect equality
/// or the content hash. Adding a property whose id is already present
/// replaces the existing entry in place. A list never holds more than
/// [`MAX_PROPERTY_COUNT`] entries; operations that would exceed the cap fail
/// with [`TypeError::TooManyProperties`].
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
#[serde(try_from = "Vec<Property>", into = "Vec<Property>")]
pub struct PropertyList {
    properties: Vec<Property>,
}

impl PropertyList {
    pub fn new(properties: impl IntoIterator<Item = Property>) -> TypeResult<Self> {
        Self::empty().add(properties)
    }

    pub fn empty() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.properties.len()
    }

    pub fn is_empty(&self) -> bool {
        self.properties.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Property> {
        self.properties.iter()
    }

    /// Position of the property with the given id.
    pub fn search(&self, id: &Id) -> Option<usize> {
        self.properties.iter().position(|p| p.id() == id)
    }

    pub fn get(&self, id: &Id) -> Option<&Property> {
        self.search(id).map(|index| &self.properties[index])
    }

    pub fn get_data(&self, id: &Id) -> Option<&Data> {
        self.get(id).map(Property::data)
    }

    pub fn ids(&self) -> Vec<Id> {
        self.properties.iter().map(|p| p.id().clone()).collect()
    }

    /// New list with `properties` added; a property whose id is already
    /// present replaces the existing entry.
    pub fn add(&self, properties: impl IntoIterator<Item = Property>) -> TypeResult<Self> {
        let mut list = self.properties.clone();
        for property in properties {
            match list.iter().position(|p| p.id() == property.id()) {
                Some(index) => list[index] = property,
                None => list.push(property),
            }
        }
        if list.len() > MAX_PROPERTY_COUNT {
            return Err(TypeError::TooManyProperties {
                count: list.len(),
                max: MAX_PROPERTY_COUNT,
            });
        }
        Ok(Self { properties: list })
    }

    /// New list combining both; entries from `other` win on conflict.
    pub fn merge(&self, other: &PropertyList) -> TypeResult<Self> {
        self.add(other.iter().cloned())
    }

    /// New list without the given ids. Unknown ids are ignored.
    pub fn remove(&self, ids: &[Id]) -> Self {
        Self {
            properties: self
                .properties
                .iter()
                .filter(|p| !ids.contains(p.id()))
                .cloned()
                .collect(),
        }
    }

    /// Properties of `self` that are absent from `other` or differ in value.
    pub fn diff(&self, other: &PropertyList) -> Self {
        Self {
            properties: self
                .properties
                .iter()
                .filter(|p| other.get(p.id()) != Some(*p))
                .cloned()
                .collect(),
        }
    }

    /// Content hash over every property's hash. Independent of list order.
    pub fn hash_id(&self) -> Id {
        let parts: Vec<String> = self
            .properties
            .iter()
            .map(|p| p.hash_id().to_string())
            .collect();
        ContentHasher::PROPERTY_LIST.hash_id(&parts)
    }
}

impl PartialEq for PropertyList {
    fn eq(&self, other: &Self) -> bool {
        self.len() == other.len()
            && self
                .properties
                .iter()
                .all(|p| other.get(p.id()) == Some(p))
    }
}

impl Eq for PropertyList {}

impl<'a> IntoIterator for &'a PropertyList {
    type Item = &'a Property;
    type IntoIter = std::slice::Iter<'a, Property>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl TryFrom<Vec<Property>> for PropertyList {
    type Error = TypeError;

    fn try_from(properties: Vec<Property>) -> Result<Self, Self::Error> {
        Self::new(properties)
    }
}

impl From<PropertyList> for Vec<Property> {
    fn from(list: PropertyList) -> Self {
        list.properties
    }
}

impl fmt::Display for PropertyList {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, property) in self.properties.iter().enumerate() {
            if i > 0 {
                write!(f, "{PROPERTIES_SEPARATOR}")?;
            }
            write!(f, "{property}")?;
        }
        Ok(())
    }
}

impl FromStr for PropertyList {
    type Err = TypeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.trim().is_empty() {
            return Ok(Self::empty());
        }
        let properties = s
            .split(PROPERTIES_SEPARATOR)
            .map(str::parse)
            .collect::<TypeResult<Vec<Property>>>()?;
        Self::new(properties)
    }
}
