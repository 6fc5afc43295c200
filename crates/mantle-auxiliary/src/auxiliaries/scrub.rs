use mantle_entities::Metas;
use mantle_store::KvStore;

use crate::auxiliary::{mismatch, Auxiliary, AuxiliaryKind, AuxiliaryRequest, Outcome};
use crate::error::AuxiliaryError;

/// Reveals property values as metas and reports their hashes.
#[derive(Debug, Clone)]
pub struct Scrub {
    metas: Metas,
}

impl Scrub {
    pub fn new(metas: Metas) -> Self {
        Self { metas }
    }
}

impl Auxiliary for Scrub {
    fn kind(&self) -> AuxiliaryKind {
        AuxiliaryKind::Scrub
    }

    fn help(&self, store: &mut dyn KvStore, request: &AuxiliaryRequest) -> Result<Outcome, AuxiliaryError> {
        let AuxiliaryRequest::Scrub { properties } = request else {
            return Err(mismatch(self.kind(), request));
        };
        Ok(Outcome::Hashes(self.metas.scrub(store, properties)?))
    }
}
