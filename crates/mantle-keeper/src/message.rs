use mantle_crypto::{Signature, SigningKey};
use mantle_entities::{AssetId, ClassificationId, IdentityId};
use mantle_types::{Address, Dec, Id, PropertyList};
use serde::Serialize;

use crate::error::KeeperResult;

/// The state change a transaction asks for.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum Action {
    /// Create identity `nub_id` controlled by the signer.
    NubIdentity { nub_id: IdentityId },
    /// Store a classification with the given property schema.
    DefineClassification {
        immutables: PropertyList,
        mutables: PropertyList,
    },
    /// Credit `value` of `ownable_id` to identity `to_id`.
    Mint {
        to_id: IdentityId,
        ownable_id: Id,
        value: Dec,
    },
    /// Move `value` of `ownable_id` from identity `from_id` to `to_id`.
    Send {
        from_id: IdentityId,
        to_id: IdentityId,
        ownable_id: Id,
        value: Dec,
    },
    /// Debit `value` of `ownable_id` from identity `from_id`.
    Burn {
        from_id: IdentityId,
        ownable_id: Id,
        value: Dec,
    },
    /// Create an asset of a classification, owned by `to_id`.
    MintAsset {
        from_id: IdentityId,
        to_id: IdentityId,
        classification_id: ClassificationId,
        immutables: PropertyList,
        mutables: PropertyList,
    },
    /// Merge `mutables` into an asset held by `from_id`.
    MutateAsset {
        from_id: IdentityId,
        asset_id: AssetId,
        mutables: PropertyList,
    },
}

impl Action {
    pub fn name(&self) -> &'static str {
        match self {
            Self::NubIdentity { .. } => "nubIdentity",
            Self::DefineClassification { .. } => "defineClassification",
            Self::Mint { .. } => "mint",
            Self::Send { .. } => "send",
            Self::Burn { .. } => "burn",
            Self::MintAsset { .. } => "mintAsset",
            Self::MutateAsset { .. } => "mutateAsset",
        }
    }
}

/// A typed transaction: the signer, the action, and an optional signature
/// over [`Message::sign_bytes`].
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Message {
    pub from: Address,
    pub action: Action,
    pub signature: Option<Signature>,
}

#[derive(Serialize)]
struct SignDoc<'a> {
    from: &'a Address,
    action: &'a Action,
}

impl Message {
    pub fn new(from: Address, action: Action) -> Self {
        Self {
            from,
            action,
            signature: None,
        }
    }

    /// Canonical bytes covered by the signature.
    pub fn sign_bytes(&self) -> KeeperResult<Vec<u8>> {
        Ok(serde_json::to_vec(&SignDoc {
            from: &self.from,
            action: &self.action,
        })?)
    }

    /// Sign with `key`, replacing any existing signature.
    pub fn sign(mut self, key: &SigningKey) -> KeeperResult<Self> {
        self.signature = Some(key.sign(&self.sign_bytes()?));
        Ok(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn send(value: i64) -> Action {
        Action::Send {
            from_id: IdentityId::new("fromID"),
            to_id: IdentityId::new("defaultAddr"),
            ownable_id: Id::atomic("stake"),
            value: Dec::from(value),
        }
    }

    #[test]
    fn sign_bytes_cover_signer_and_action() {
        let key = SigningKey::generate();
        let message = Message::new(key.address(), send(10));
        let other_action = Message::new(key.address(), send(11));
        let other_signer = Message::new(SigningKey::generate().address(), send(10));

        let bytes = message.sign_bytes().unwrap();
        assert_eq!(bytes, message.clone().sign_bytes().unwrap());
        assert_ne!(bytes, other_action.sign_bytes().unwrap());
        assert_ne!(bytes, other_signer.sign_bytes().unwrap());
    }

    #[test]
    fn signature_verifies_over_sign_bytes() {
        let key = SigningKey::generate();
        let message = Message::new(key.address(), send(10)).sign(&key).unwrap();
        let signature = message.signature.clone().unwrap();
        key.verifying_key()
            .verify(&message.sign_bytes().unwrap(), &signature)
            .unwrap();
        assert_eq!(message.action.name(), "send");
    }
}
