use mantle_store::{KvStore, Mappable, Mapper, StoreRegistry};
use mantle_types::{Data, Id, PropertyList};
use serde::{Deserialize, Serialize};

use crate::error::EntityResult;

/// Module name of the meta collection.
pub const MODULE: &str = "metas";

atomic_id! {
    /// Typed content hash of a revealed data value.
    MetaId
}

/// A data value stored under its content hash.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Meta {
    id: MetaId,
    data: Option<Data>,
}

impl Meta {
    pub fn new(data: Data) -> Self {
        Self {
            id: MetaId::new(data.data_id()),
            data: Some(data),
        }
    }

    pub fn id(&self) -> &MetaId {
        &self.id
    }

    /// The revealed value; `None` on the prototype.
    pub fn data(&self) -> Option<&Data> {
        self.data.as_ref()
    }
}

impl Mappable for Meta {
    type Key = MetaId;

    fn key(&self) -> MetaId {
        self.id.clone()
    }
}

/// The meta collection.
#[derive(Debug, Clone)]
pub struct Metas {
    mapper: Mapper<Meta>,
}

impl Metas {
    pub fn register(registry: &mut StoreRegistry) -> EntityResult<Self> {
        Ok(Self {
            mapper: registry.register(MODULE)?,
        })
    }

    /// The meta stored under `hash`; the prototype if nothing was revealed.
    pub fn reveal<S: KvStore + ?Sized>(&self, store: &S, hash: &Id) -> EntityResult<Meta> {
        Ok(self.mapper.fetch(store, &MetaId::new(hash.clone()))?)
    }

    /// Store every non-zero value of `properties` under its typed content
    /// hash.
    ///
    /// Already revealed values are left as they are. Returns the hash of each
    /// stored or already present value, in property order.
    pub fn scrub<S: KvStore + ?Sized>(&self, store: &mut S, properties: &PropertyList) -> EntityResult<Vec<Id>> {
        let mut metas = self.mapper.collection(store);
        let mut hashes = Vec::new();
        for property in properties {
            if property.data().is_zero() {
                continue;
            }
            let meta = Meta::new(property.data().clone());
            if !metas.contains(meta.id())? {
                metas.add(&meta)?;
            }
            hashes.push(meta.id().as_id().clone());
        }
        Ok(hashes)
    }
}
