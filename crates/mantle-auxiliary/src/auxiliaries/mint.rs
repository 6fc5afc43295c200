use mantle_entities::Splits;
use mantle_store::KvStore;

use crate::auxiliary::{mismatch, Auxiliary, AuxiliaryKind, AuxiliaryRequest, Outcome};
use crate::error::AuxiliaryError;

/// Credits supply to an owner's split.
#[derive(Debug, Clone)]
pub struct MintSupply {
    splits: Splits,
}

impl MintSupply {
    pub fn new(splits: Splits) -> Self {
        Self { splits }
    }
}

impl Auxiliary for MintSupply {
    fn kind(&self) -> AuxiliaryKind {
        AuxiliaryKind::Mint
    }

    fn help(&self, store: &mut dyn KvStore, request: &AuxiliaryRequest) -> Result<Outcome, AuxiliaryError> {
        let AuxiliaryRequest::Mint {
            owner_id,
            ownable_id,
            value,
        } = request
        else {
            return Err(mismatch(self.kind(), request));
        };
        let split = self.splits.mint(store, owner_id, ownable_id, *value)?;
        Ok(Outcome::Split(split))
    }
}

#[cfg(test)]
mod tests {
    use mantle_entities::LedgerPolicy;
    use mantle_store::{MemoryStore, StoreRegistry};
    use mantle_types::{Dec, Id};

    use super::*;

    #[test]
    fn mint_accumulates() {
        let splits = Splits::register(&mut StoreRegistry::new(), LedgerPolicy::default()).unwrap();
        let auxiliary = MintSupply::new(splits.clone());
        let mut store = MemoryStore::new();
        let request = AuxiliaryRequest::Mint {
            owner_id: Id::atomic("fromID"),
            ownable_id: Id::atomic("stake"),
            value: Dec::from_int(500),
        };

        auxiliary.help(&mut store, &request).unwrap();
        let outcome = auxiliary.help(&mut store, &request).unwrap();
        let Outcome::Split(split) = outcome else {
            panic!("expected a split outcome");
        };
        assert_eq!(split.value(), Dec::from_int(1000));
        assert_eq!(
            splits.supply(&store, &Id::atomic("stake")).unwrap(),
            Dec::from_int(1000)
        );
    }
}
