use mantle_store::{KvStore, Mappable, Mapper, StoreRegistry};
use mantle_types::{Data, Dec, Document, Height, Id, Property, PropertyList};
use serde::{Deserialize, Serialize};

use crate::error::{EntityError, EntityResult};

/// Module name of the asset collection.
pub const MODULE: &str = "assets";

pub const BURN_PROPERTY: &str = "burn";
pub const LOCK_PROPERTY: &str = "lock";
pub const SUPPLY_PROPERTY: &str = "supply";

composite_id! {
    /// `classificationID|hashID`, where the hash covers the asset's
    /// immutables. Partial when the hash is empty: every asset of one
    /// classification.
    AssetId { classification_id, hash_id }
}

/// A document classified by a classification and owned through splits.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Asset {
    document: Document,
}

impl Asset {
    pub fn new(classification_id: Id, immutables: PropertyList, mutables: PropertyList) -> Self {
        Self {
            document: Document::new(classification_id, immutables, mutables),
        }
    }

    pub fn id(&self) -> AssetId {
        match self.document.id().components() {
            Some((classification_id, hash_id)) => AssetId::new(classification_id.clone(), hash_id.clone()),
            None => AssetId::read_lenient(&self.document.id().to_string()),
        }
    }

    pub fn document(&self) -> &Document {
        &self.document
    }

    pub fn classification_id(&self) -> Id {
        self.document.classification_id()
    }

    pub fn immutables(&self) -> &PropertyList {
        self.document.immutables()
    }

    pub fn mutables(&self) -> &PropertyList {
        self.document.mutables()
    }

    /// Height after which the asset may be burned. Defaults to 0.
    pub fn burn(&self) -> EntityResult<Height> {
        Ok(self.property_or(BURN_PROPERTY, Data::Height(Height::new(0))).data().as_height()?)
    }

    /// Height until which the asset is locked. Defaults to 0.
    pub fn lock(&self) -> EntityResult<Height> {
        Ok(self.property_or(LOCK_PROPERTY, Data::Height(Height::new(0))).data().as_height()?)
    }

    /// Number of units the asset is split into. Defaults to 1.
    pub fn supply(&self) -> EntityResult<Dec> {
        Ok(self.property_or(SUPPLY_PROPERTY, Data::Dec(Dec::ONE)).data().as_dec()?)
    }

    /// Asset with `mutables` merged over its mutable properties.
    pub fn mutate(&self, mutables: &PropertyList) -> EntityResult<Asset> {
        Ok(Self {
            document: self.document.mutate(mutables)?,
        })
    }

    fn property_or(&self, id: &str, default: Data) -> Property {
        let id = Id::atomic(id);
        match self.document.property(&id) {
            Some(property) => property.clone(),
            None => Property::new(id, default),
        }
    }
}

impl Mappable for Asset {
    type Key = AssetId;

    fn key(&self) -> AssetId {
        self.id()
    }
}

/// The asset collection.
#[derive(Debug, Clone)]
pub struct Assets {
    mapper: Mapper<Asset>,
}

impl Assets {
    pub fn register(registry: &mut StoreRegistry) -> EntityResult<Self> {
        Ok(Self {
            mapper: registry.register(MODULE)?,
        })
    }

    /// The asset stored under `id`; the prototype if absent.
    pub fn asset<S: KvStore + ?Sized>(&self, store: &S, id: &AssetId) -> EntityResult<Asset> {
        Ok(self.mapper.fetch(store, id)?)
    }

    /// Like [`Assets::asset`] but fails with `EntityNotFound` when absent.
    pub fn existing<S: KvStore + ?Sized>(&self, store: &S, id: &AssetId) -> EntityResult<Asset> {
        let asset = self.asset(store, id)?;
        if asset.is_prototype() {
            return Err(EntityError::not_found("asset", id));
        }
        Ok(asset)
    }

    /// Every asset of one classification, in hash order.
    pub fn assets_of<S: KvStore + ?Sized>(&self, store: &S, classification_id: &Id) -> EntityResult<Vec<Asset>> {
        let partial = AssetId::new(classification_id.clone(), Id::empty());
        Ok(self
            .mapper
            .iterate(store, &partial)?
            .collect::<Result<Vec<_>, _>>()?)
    }

    pub fn add<S: KvStore + ?Sized>(&self, store: &mut S, asset: &Asset) -> EntityResult<()> {
        Ok(self.mapper.collection(store).add(asset)?)
    }

    pub fn mutate<S: KvStore + ?Sized>(&self, store: &mut S, asset: &Asset) -> EntityResult<()> {
        Ok(self.mapper.collection(store).mutate(asset)?)
    }

    pub fn remove<S: KvStore + ?Sized>(&self, store: &mut S, asset: &Asset) -> EntityResult<()> {
        Ok(self.mapper.collection(store).remove(asset)?)
    }
}
