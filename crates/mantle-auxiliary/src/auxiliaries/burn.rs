use mantle_entities::Splits;
use mantle_store::KvStore;

use crate::auxiliary::{mismatch, Auxiliary, AuxiliaryKind, AuxiliaryRequest, Outcome};
use crate::error::AuxiliaryError;

/// Debits supply from an owner's split.
#[derive(Debug, Clone)]
pub struct BurnSupply {
    splits: Splits,
}

impl BurnSupply {
    pub fn new(splits: Splits) -> Self {
        Self { splits }
    }
}

impl Auxiliary for BurnSupply {
    fn kind(&self) -> AuxiliaryKind {
        AuxiliaryKind::Burn
    }

    fn help(&self, store: &mut dyn KvStore, request: &AuxiliaryRequest) -> Result<Outcome, AuxiliaryError> {
        let AuxiliaryRequest::Burn {
            owner_id,
            ownable_id,
            value,
        } = request
        else {
            return Err(mismatch(self.kind(), request));
        };
        let split = self.splits.burn(store, owner_id, ownable_id, *value)?;
        Ok(Outcome::Split(split))
    }
}
