use serde::{Deserialize, Serialize};

use crate::error::TypeResult;
use crate::id::Id;
use crate::property::Property;
use crate::property_list::PropertyList;

/// An entity with an identity, immutable properties and mutable properties.
///
/// The id is fixed at construction. Mutation yields a new document that
/// shares the id and immutables of the original.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Document {
    id: Id,
    immutables: PropertyList,
    mutables: PropertyList,
}

impl Document {
    /// Build a document whose id is `classification_id | hash(immutables)`.
    pub fn new(classification_id: Id, immutables: PropertyList, mutables: PropertyList) -> Self {
        let id = Id::composite(classification_id, immutables.hash_id());
        Self {
            id,
            immutables,
            mutables,
        }
    }

    /// Build a document with an explicitly derived id.
    pub fn with_id(id: Id, immutables: PropertyList, mutables: PropertyList) -> Self {
        Self {
            id,
            immutables,
            mutables,
        }
    }

    pub fn id(&self) -> &Id {
        &self.id
    }

    pub fn immutables(&self) -> &PropertyList {
        &self.immutables
    }

    pub fn mutables(&self) -> &PropertyList {
        &self.mutables
    }

    /// First component of the id.
    pub fn classification_id(&self) -> Id {
        match self.id.components() {
            Some((classification, _)) => classification.clone(),
            None => Id::split_composite_lenient(&self.id.to_string()).0,
        }
    }

    /// Look a property up in the immutables, then the mutables.
    pub fn property(&self, id: &Id) -> Option<&Property> {
        self.immutables.get(id).or_else(|| self.mutables.get(id))
    }

    /// New document with `mutables` merged over the current mutables.
    pub fn mutate(&self, mutables: &PropertyList) -> TypeResult<Document> {
        Ok(Self {
            id: self.id.clone(),
            immutables: self.immutables.clone(),
            mutables: self.mutables.merge(mutables)?,
        })
    }

    pub fn is_empty(&self) -> bool {
        self.id.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::Data;

    fn list(s: &str) -> PropertyList {
        s.parse().unwrap()
    }

    #[test]
    fn id_derives_from_immutables() {
        let a = Document::new(Id::atomic("class"), list("name:S|Gold,weight:D|2"), list(""));
        let b = Document::new(Id::atomic("class"), list("name:S|Gold,weight:D|2"), list("x:S|y"));
        assert_eq!(a.id(), b.id());
        assert_eq!(a.classification_id(), Id::atomic("class"));

        let c = Document::new(Id::atomic("class"), list("name:S|Silver,weight:D|2"), list(""));
        assert_ne!(a.id(), c.id());
    }

    #[test]
    fn mutate_only_touches_mutables() {
        let doc = Document::new(Id::atomic("class"), list("name:S|Gold"), list("owner:S|alice"));
        let mutated = doc.mutate(&list("owner:S|bob,note:S|hi")).unwrap();
        assert_eq!(mutated.id(), doc.id());
        assert_eq!(mutated.immutables(), doc.immutables());
        assert_eq!(
            mutated.property(&Id::atomic("owner")).map(Property::data),
            Some(&Data::from("bob"))
        );
        assert_eq!(mutated.mutables().len(), 2);
    }

    #[test]
    fn immutables_shadow_mutables() {
        let doc = Document::new(Id::atomic("class"), list("name:S|Gold"), list("name:S|Fake"));
        assert_eq!(
            doc.property(&Id::atomic("name")).map(Property::data),
            Some(&Data::from("Gold"))
        );
    }

    #[test]
    fn default_is_empty() {
        assert!(Document::default().is_empty());
        assert!(!Document::new(Id::atomic("c"), list(""), list("")).is_empty());
    }

    #[test]
    fn bincode_roundtrip() {
        let doc = Document::new(Id::atomic("class"), list("name:S|Gold"), list("lock:H|5"));
        let bytes = bincode::serialize(&doc).unwrap();
        let decoded: Document = bincode::deserialize(&bytes).unwrap();
        assert_eq!(decoded, doc);
        assert_eq!(decoded.classification_id(), Id::atomic("class"));
    }
}
