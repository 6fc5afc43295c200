use std::fmt;
use std::sync::Arc;

use mantle_crypto::IdentityAuthority;
use mantle_store::KvStore;

use crate::auxiliary::{mismatch, Auxiliary, AuxiliaryKind, AuxiliaryRequest, Outcome};
use crate::error::AuxiliaryError;

/// Signature check against the identity authority.
///
/// A request without a signature passes only when signatures are optional.
#[derive(Clone)]
pub struct Authenticate {
    authority: Arc<dyn IdentityAuthority>,
    require_signatures: bool,
}

impl Authenticate {
    pub fn new(authority: Arc<dyn IdentityAuthority>, require_signatures: bool) -> Self {
        Self {
            authority,
            require_signatures,
        }
    }

    pub fn requires_signatures(&self) -> bool {
        self.require_signatures
    }
}

impl fmt::Debug for Authenticate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Authenticate")
            .field("require_signatures", &self.require_signatures)
            .finish_non_exhaustive()
    }
}

impl Auxiliary for Authenticate {
    fn kind(&self) -> AuxiliaryKind {
        AuxiliaryKind::Authenticate
    }

    fn help(&self, _store: &mut dyn KvStore, request: &AuxiliaryRequest) -> Result<Outcome, AuxiliaryError> {
        let AuxiliaryRequest::Authenticate {
            signer,
            sign_bytes,
            signature,
        } = request
        else {
            return Err(mismatch(self.kind(), request));
        };

        match signature {
            Some(signature) if self.authority.verify(signer, sign_bytes, signature) => Ok(Outcome::Passed),
            Some(_) => Err(AuxiliaryError::Unauthenticated {
                signer: signer.to_string(),
                reason: "signature does not verify".into(),
            }),
            None if self.require_signatures => Err(AuxiliaryError::Unauthenticated {
                signer: signer.to_string(),
                reason: "signature required".into(),
            }),
            None => Ok(Outcome::Passed),
        }
    }
}

#[cfg(test)]
mod tests {
    use mantle_crypto::{KeyRegistry, SigningKey};
    use mantle_store::MemoryStore;
    use mantle_types::ErrorKind;

    use super::*;

    fn setup(require_signatures: bool) -> (Authenticate, SigningKey) {
        let key = SigningKey::generate();
        let mut registry = KeyRegistry::new();
        registry.register(key.verifying_key());
        (Authenticate::new(Arc::new(registry), require_signatures), key)
    }

    fn request(key: &SigningKey, message: &[u8], signature: Option<&[u8]>) -> AuxiliaryRequest {
        AuxiliaryRequest::Authenticate {
            signer: key.address(),
            sign_bytes: message.to_vec(),
            signature: signature.map(|bytes| key.sign(bytes)),
        }
    }

    #[test]
    fn valid_signature_passes() {
        let (auxiliary, key) = setup(true);
        let outcome = auxiliary
            .help(&mut MemoryStore::new(), &request(&key, b"tx", Some(b"tx")))
            .unwrap();
        assert_eq!(outcome, Outcome::Passed);
    }

    #[test]
    fn signature_over_other_bytes_fails() {
        let (auxiliary, key) = setup(false);
        let err = auxiliary
            .help(&mut MemoryStore::new(), &request(&key, b"tx", Some(b"other")))
            .unwrap_err();
        assert_eq!(err.kind(), ErrorKind::NotAuthorized);
    }

    #[test]
    fn missing_signature_depends_on_policy() {
        let (strict, key) = setup(true);
        let err = strict
            .help(&mut MemoryStore::new(), &request(&key, b"tx", None))
            .unwrap_err();
        assert_eq!(err.kind(), ErrorKind::NotAuthorized);

        let (lax, key) = setup(false);
        assert!(!lax.requires_signatures());
        lax.help(&mut MemoryStore::new(), &request(&key, b"tx", None)).unwrap();
    }
}
