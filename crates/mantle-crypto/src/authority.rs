use std::collections::HashMap;

use mantle_types::Address;

use crate::signer::{Signature, VerifyingKey};

/// Source of truth for which key speaks for an address.
///
/// Consulted by the authenticate auxiliary; the ledger never calls it
/// directly.
pub trait IdentityAuthority: Send + Sync {
    /// Returns `true` if `signature` over `message` was made by the key
    /// registered for `signer`.
    fn verify(&self, signer: &Address, message: &[u8], signature: &Signature) -> bool;
}

/// In-memory authority mapping addresses to their verifying keys.
#[derive(Debug, Default, Clone)]
pub struct KeyRegistry {
    keys: HashMap<Address, VerifyingKey>,
}

impl KeyRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a key and return the address derived from it.
    pub fn register(&mut self, key: VerifyingKey) -> Address {
        let address = key.to_address();
        self.keys.insert(address.clone(), key);
        address
    }

    pub fn key_of(&self, address: &Address) -> Option<&VerifyingKey> {
        self.keys.get(address)
    }

    pub fn len(&self) -> usize {
        self.keys.len()
    }

    pub fn is_empty(&self) -> bool {
        self.keys.is_empty()
    }
}

impl IdentityAuthority for KeyRegistry {
    fn verify(&self, signer: &Address, message: &[u8], signature: &Signature) -> bool {
        self.keys
            .get(signer)
            .is_some_and(|key| key.verify(message, signature).is_ok())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::signer::SigningKey;

    #[test]
    fn registered_key_verifies() {
        let sk = SigningKey::generate();
        let mut registry = KeyRegistry::new();
        let address = registry.register(sk.verifying_key());
        assert_eq!(address, sk.address());

        let sig = sk.sign(b"payload");
        assert!(registry.verify(&address, b"payload", &sig));
        assert!(!registry.verify(&address, b"other", &sig));
    }

    #[test]
    fn unknown_address_fails() {
        let sk = SigningKey::generate();
        let registry = KeyRegistry::new();
        assert!(registry.is_empty());
        assert!(!registry.verify(&sk.address(), b"payload", &sk.sign(b"payload")));
    }

    #[test]
    fn key_for_other_address_fails() {
        let alice = SigningKey::generate();
        let mallory = SigningKey::generate();
        let mut registry = KeyRegistry::new();
        let alice_address = registry.register(alice.verifying_key());
        registry.register(mallory.verifying_key());
        assert_eq!(registry.len(), 2);

        let forged = mallory.sign(b"payload");
        assert!(!registry.verify(&alice_address, b"payload", &forged));
    }
}
