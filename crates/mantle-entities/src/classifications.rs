use mantle_store::{KvStore, Mappable, Mapper, StoreRegistry};
use mantle_types::constants::PROPERTY_ID_AND_DATA_SEPARATOR;
use mantle_types::{ContentHasher, Document, Id, PropertyList};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::{EntityError, EntityResult};

/// Module name of the classification collection.
pub const MODULE: &str = "classifications";

composite_id! {
    /// `chainID|hashID`, where the hash covers the declared property ids and
    /// data types.
    ClassificationId { chain_id, hash_id }
}

/// Schema shared by a group of documents.
///
/// The immutable and mutable lists declare which property ids a conforming
/// document carries and the data type of each; declared values are ignored.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Classification {
    document: Document,
}

impl Classification {
    pub fn new(chain_id: Id, immutables: PropertyList, mutables: PropertyList) -> Self {
        let hash_id = schema_hash(&immutables, &mutables);
        let id = ClassificationId::new(chain_id, hash_id);
        Self {
            document: Document::with_id(id.as_id(), immutables, mutables),
        }
    }

    pub fn id(&self) -> ClassificationId {
        match self.document.id().components() {
            Some((chain_id, hash_id)) => ClassificationId::new(chain_id.clone(), hash_id.clone()),
            None => ClassificationId::read_lenient(&self.document.id().to_string()),
        }
    }

    pub fn immutables(&self) -> &PropertyList {
        self.document.immutables()
    }

    pub fn mutables(&self) -> &PropertyList {
        self.document.mutables()
    }

    /// Check that a document's properties match this schema.
    ///
    /// Every declared property must be present with the declared data type,
    /// and no undeclared property may appear.
    pub fn conform(&self, immutables: &PropertyList, mutables: &PropertyList) -> EntityResult<()> {
        conform_list("immutable", self.immutables(), immutables)?;
        conform_list("mutable", self.mutables(), mutables)
    }
}

impl Mappable for Classification {
    type Key = ClassificationId;

    fn key(&self) -> ClassificationId {
        self.id()
    }
}

fn schema_hash(immutables: &PropertyList, mutables: &PropertyList) -> Id {
    let declare = |marker: &str, list: &PropertyList| {
        list.iter()
            .map(|p| {
                format!(
                    "{marker}{PROPERTY_ID_AND_DATA_SEPARATOR}{}{PROPERTY_ID_AND_DATA_SEPARATOR}{}",
                    p.id(),
                    p.data_type()
                )
            })
            .collect::<Vec<_>>()
    };
    let mut parts = declare("immutable", immutables);
    parts.extend(declare("mutable", mutables));
    ContentHasher::CLASSIFICATION.hash_id(&parts)
}

fn conform_list(section: &str, declared: &PropertyList, actual: &PropertyList) -> EntityResult<()> {
    for expected in declared {
        match actual.get(expected.id()) {
            Some(found) if found.data_type() == expected.data_type() => {}
            Some(found) => {
                return Err(EntityError::NotAuthorized(format!(
                    "{section} property {} has type {}, classification declares {}",
                    expected.id(),
                    found.data_type(),
                    expected.data_type()
                )))
            }
            None => {
                return Err(EntityError::NotAuthorized(format!(
                    "{section} property {} is missing",
                    expected.id()
                )))
            }
        }
    }
    if let Some(extra) = actual.iter().find(|p| declared.get(p.id()).is_none()) {
        return Err(EntityError::NotAuthorized(format!(
            "{section} property {} is not declared by the classification",
            extra.id()
        )));
    }
    Ok(())
}

/// The classification collection.
#[derive(Debug, Clone)]
pub struct Classifications {
    mapper: Mapper<Classification>,
}

impl Classifications {
    pub fn register(registry: &mut StoreRegistry) -> EntityResult<Self> {
        Ok(Self {
            mapper: registry.register(MODULE)?,
        })
    }

    pub fn classification<S: KvStore + ?Sized>(
        &self,
        store: &S,
        id: &ClassificationId,
    ) -> EntityResult<Classification> {
        Ok(self.mapper.fetch(store, id)?)
    }

    /// Store a new classification. Fails if an identical schema exists.
    pub fn define<S: KvStore + ?Sized>(&self, store: &mut S, classification: &Classification) -> EntityResult<()> {
        self.mapper.collection(store).add(classification)?;
        debug!(classification = %classification.id(), "defined");
        Ok(())
    }

    /// Check a document against the stored classification `id`.
    pub fn conform<S: KvStore + ?Sized>(
        &self,
        store: &S,
        id: &ClassificationId,
        immutables: &PropertyList,
        mutables: &PropertyList,
    ) -> EntityResult<()> {
        let classification = self.classification(store, id)?;
        if classification.is_prototype() {
            return Err(EntityError::not_found("classification", id));
        }
        classification.conform(immutables, mutables)
    }
}
