use std::collections::BTreeSet;

use mantle_store::{KvStore, Mappable, Mapper, StoreRegistry};
use mantle_types::Address;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::{EntityError, EntityResult};

/// Module name of the identity collection.
pub const MODULE: &str = "identities";

atomic_id! {
    /// Caller-chosen identity handle.
    IdentityId
}

/// An identity and the addresses allowed to act for it.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Identity {
    id: IdentityId,
    controllers: BTreeSet<Address>,
}

impl Identity {
    pub fn new(id: IdentityId, controller: Address) -> Self {
        Self {
            id,
            controllers: BTreeSet::from([controller]),
        }
    }

    pub fn id(&self) -> &IdentityId {
        &self.id
    }

    pub fn controllers(&self) -> &BTreeSet<Address> {
        &self.controllers
    }

    pub fn is_controller(&self, address: &Address) -> bool {
        self.controllers.contains(address)
    }

    /// Identity with `address` added to its controllers.
    pub fn provision(&self, address: Address) -> Self {
        let mut controllers = self.controllers.clone();
        controllers.insert(address);
        Self {
            id: self.id.clone(),
            controllers,
        }
    }

    /// Identity with `address` removed from its controllers.
    pub fn unprovision(&self, address: &Address) -> Self {
        let mut controllers = self.controllers.clone();
        controllers.remove(address);
        Self {
            id: self.id.clone(),
            controllers,
        }
    }
}

impl Mappable for Identity {
    type Key = IdentityId;

    fn key(&self) -> IdentityId {
        self.id.clone()
    }
}

/// The identity collection.
#[derive(Debug, Clone)]
pub struct Identities {
    mapper: Mapper<Identity>,
}

impl Identities {
    pub fn register(registry: &mut StoreRegistry) -> EntityResult<Self> {
        Ok(Self {
            mapper: registry.register(MODULE)?,
        })
    }

    pub fn identity<S: KvStore + ?Sized>(&self, store: &S, id: &IdentityId) -> EntityResult<Identity> {
        Ok(self.mapper.fetch(store, id)?)
    }

    /// Create identity `id` controlled by `controller`.
    pub fn nub<S: KvStore + ?Sized>(&self, store: &mut S, id: IdentityId, controller: Address) -> EntityResult<Identity> {
        let identity = Identity::new(id, controller);
        self.mapper.collection(store).add(&identity)?;
        debug!(identity = %identity.id(), "nubbed");
        Ok(identity)
    }

    /// Add `address` as a controller. Only an existing controller may do so.
    pub fn provision<S: KvStore + ?Sized>(
        &self,
        store: &mut S,
        from: &Address,
        id: &IdentityId,
        address: Address,
    ) -> EntityResult<Identity> {
        let identity = self.verify(&*store, from, id)?.provision(address);
        self.mapper.collection(store).mutate(&identity)?;
        Ok(identity)
    }

    /// Remove `address` from the controllers. Only an existing controller may
    /// do so, and the last controller cannot be removed.
    pub fn unprovision<S: KvStore + ?Sized>(
        &self,
        store: &mut S,
        from: &Address,
        id: &IdentityId,
        address: &Address,
    ) -> EntityResult<Identity> {
        let identity = self.verify(&*store, from, id)?.unprovision(address);
        if identity.controllers().is_empty() {
            return Err(EntityError::NotAuthorized(format!(
                "cannot remove the last controller of identity {id}"
            )));
        }
        self.mapper.collection(store).mutate(&identity)?;
        Ok(identity)
    }

    /// Check that `address` controls identity `id`.
    ///
    /// Fails with `EntityNotFound` if the identity does not exist and with
    /// `NotAuthorized` if `address` is not one of its controllers.
    pub fn verify<S: KvStore + ?Sized>(&self, store: &S, address: &Address, id: &IdentityId) -> EntityResult<Identity> {
        let identity = self.identity(store, id)?;
        if identity.is_prototype() {
            return Err(EntityError::not_found("identity", id));
        }
        if !identity.is_controller(address) {
            return Err(EntityError::NotAuthorized(format!(
                "{address} does not control identity {id}"
            )));
        }
        Ok(identity)
    }
}

#[cfg(test)]
mod tests {
    use mantle_store::MemoryStore;
    use mantle_types::ErrorKind;

    use super::*;

    fn setup() -> (Identities, MemoryStore) {
        (Identities::register(&mut StoreRegistry::new()).unwrap(), MemoryStore::new())
    }

    fn addr(s: &str) -> Address {
        Address::from_bytes(s.as_bytes().to_vec())
    }

    #[test]
    fn nub_then_verify() {
        let (identities, mut store) = setup();
        let id = IdentityId::new("fromID");
        identities.nub(&mut store, id.clone(), addr("alice")).unwrap();

        identities.verify(&store, &addr("alice"), &id).unwrap();
        assert_eq!(
            identities.verify(&store, &addr("mallory"), &id).unwrap_err().kind(),
            ErrorKind::NotAuthorized
        );
        assert_eq!(
            identities
                .verify(&store, &addr("alice"), &IdentityId::new("ghost"))
                .unwrap_err()
                .kind(),
            ErrorKind::EntityNotFound
        );
    }

    #[test]
    fn nub_is_unique() {
        let (identities, mut store) = setup();
        identities.nub(&mut store, IdentityId::new("x"), addr("alice")).unwrap();
        let err = identities.nub(&mut store, IdentityId::new("x"), addr("bob")).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::EntityAlreadyExists);
    }

    #[test]
    fn provision_and_unprovision() {
        let (identities, mut store) = setup();
        let id = IdentityId::new("x");
        identities.nub(&mut store, id.clone(), addr("alice")).unwrap();

        let err = identities
            .provision(&mut store, &addr("bob"), &id, addr("bob"))
            .unwrap_err();
        assert_eq!(err.kind(), ErrorKind::NotAuthorized);

        identities.provision(&mut store, &addr("alice"), &id, addr("bob")).unwrap();
        identities.verify(&store, &addr("bob"), &id).unwrap();

        identities.unprovision(&mut store, &addr("bob"), &id, &addr("alice")).unwrap();
        assert!(identities.verify(&store, &addr("alice"), &id).is_err());

        let err = identities
            .unprovision(&mut store, &addr("bob"), &id, &addr("bob"))
            .unwrap_err();
        assert_eq!(err.kind(), ErrorKind::NotAuthorized);
    }
}
