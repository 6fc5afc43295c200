use mantle_entities::Classifications;
use mantle_store::KvStore;

use crate::auxiliary::{mismatch, Auxiliary, AuxiliaryKind, AuxiliaryRequest, Outcome};
use crate::error::AuxiliaryError;

/// Checks document properties against a stored classification.
#[derive(Debug, Clone)]
pub struct Conform {
    classifications: Classifications,
}

impl Conform {
    pub fn new(classifications: Classifications) -> Self {
        Self { classifications }
    }
}

impl Auxiliary for Conform {
    fn kind(&self) -> AuxiliaryKind {
        AuxiliaryKind::Conform
    }

    fn help(&self, store: &mut dyn KvStore, request: &AuxiliaryRequest) -> Result<Outcome, AuxiliaryError> {
        let AuxiliaryRequest::Conform {
            classification_id,
            immutables,
            mutables,
        } = request
        else {
            return Err(mismatch(self.kind(), request));
        };
        self.classifications
            .conform(&*store, classification_id, immutables, mutables)?;
        Ok(Outcome::Passed)
    }
}

#[cfg(test)]
mod tests {
    use mantle_entities::Classification;
    use mantle_store::{MemoryStore, StoreRegistry};
    use mantle_types::{ErrorKind, Id, PropertyList};

    use super::*;

    fn list(s: &str) -> PropertyList {
        s.parse().unwrap()
    }

    #[test]
    fn conforms_against_stored_schema() {
        let classifications = Classifications::register(&mut StoreRegistry::new()).unwrap();
        let mut store = MemoryStore::new();
        let classification = Classification::new(Id::atomic("mantle"), list("name:S|"), list("owner:S|"));
        classifications.define(&mut store, &classification).unwrap();

        let auxiliary = Conform::new(classifications);
        let request = |immutables: &str| AuxiliaryRequest::Conform {
            classification_id: classification.id(),
            immutables: list(immutables),
            mutables: list("owner:S|alice"),
        };

        auxiliary.help(&mut store, &request("name:S|Gold")).unwrap();
        assert_eq!(
            auxiliary.help(&mut store, &request("name:H|5")).unwrap_err().kind(),
            ErrorKind::NotAuthorized
        );
    }
}
