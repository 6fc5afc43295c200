use mantle_entities::Identities;
use mantle_store::KvStore;

use crate::auxiliary::{mismatch, Auxiliary, AuxiliaryKind, AuxiliaryRequest, Outcome};
use crate::error::AuxiliaryError;

/// Checks that an address controls an identity.
#[derive(Debug, Clone)]
pub struct Verify {
    identities: Identities,
}

impl Verify {
    pub fn new(identities: Identities) -> Self {
        Self { identities }
    }
}

impl Auxiliary for Verify {
    fn kind(&self) -> AuxiliaryKind {
        AuxiliaryKind::Verify
    }

    fn help(&self, store: &mut dyn KvStore, request: &AuxiliaryRequest) -> Result<Outcome, AuxiliaryError> {
        let AuxiliaryRequest::Verify { address, identity_id } = request else {
            return Err(mismatch(self.kind(), request));
        };
        self.identities.verify(&*store, address, identity_id)?;
        Ok(Outcome::Passed)
    }
}
