use std::sync::Arc;

use mantle_auxiliary::{AuxiliaryRequest, Modules, Pipeline};
use mantle_crypto::IdentityAuthority;
use mantle_entities::{
    Asset, AssetId, Assets, Classification, ClassificationId, Classifications, EntityError, Identities, Identity,
    IdentityId, Meta, Metas, Split, Splits,
};
use mantle_store::{CacheStore, KvStore, MemoryStore, Mappable, StoreRegistry};
use mantle_types::{Dec, ErrorKind, Id};
use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

use crate::config::MantleConfig;
use crate::error::{KeeperError, KeeperResult};
use crate::message::{Action, Message};
use crate::request::TransactionRequest;

// ---------------------------------------------------------------------------
// TransactionResponse
// ---------------------------------------------------------------------------

/// What the host sees after a transaction: success, or one error kind.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TransactionResponse {
    pub success: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error_kind: Option<ErrorKind>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    /// Id of the identity, classification or asset the transaction created.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created: Option<String>,
    /// Hashes of the property values revealed by the transaction.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub hashes: Vec<String>,
}

impl TransactionResponse {
    fn committed(receipt: Receipt) -> Self {
        Self {
            success: true,
            error_kind: None,
            error: None,
            created: receipt.created,
            hashes: receipt.hashes.iter().map(Id::to_string).collect(),
        }
    }

    fn rejected(error: &KeeperError) -> Self {
        Self {
            success: false,
            error_kind: Some(error.kind()),
            error: Some(error.to_string()),
            created: None,
            hashes: Vec::new(),
        }
    }
}

#[derive(Debug, Default)]
struct Receipt {
    created: Option<String>,
    hashes: Vec<Id>,
}

impl Receipt {
    fn created(id: impl ToString) -> Self {
        Self {
            created: Some(id.to_string()),
            hashes: Vec::new(),
        }
    }
}

// ---------------------------------------------------------------------------
// Ledger
// ---------------------------------------------------------------------------

/// Entity modules and the auxiliary pipeline, wired once at construction.
#[derive(Debug, Clone)]
struct Ledger {
    chain_id: Id,
    identities: Identities,
    classifications: Classifications,
    splits: Splits,
    assets: Assets,
    metas: Metas,
    pipeline: Pipeline,
}

impl Ledger {
    fn execute(&self, store: &mut dyn KvStore, message: &Message) -> KeeperResult<Receipt> {
        let from = &message.from;
        let authenticate = AuxiliaryRequest::Authenticate {
            signer: from.clone(),
            sign_bytes: message.sign_bytes()?,
            signature: message.signature.clone(),
        };
        let verify = |identity_id: &IdentityId| AuxiliaryRequest::Verify {
            address: from.clone(),
            identity_id: identity_id.clone(),
        };

        match &message.action {
            Action::NubIdentity { nub_id } => {
                self.pipeline.run(store, &[authenticate])?;
                self.identities.nub(store, nub_id.clone(), from.clone())?;
                Ok(Receipt::created(nub_id))
            }

            Action::DefineClassification { immutables, mutables } => {
                self.pipeline.run(store, &[authenticate])?;
                let classification = Classification::new(self.chain_id.clone(), immutables.clone(), mutables.clone());
                self.classifications.define(store, &classification)?;
                Ok(Receipt::created(classification.id()))
            }

            Action::Mint {
                to_id,
                ownable_id,
                value,
            } => {
                self.pipeline.run(
                    store,
                    &[
                        authenticate,
                        verify(to_id),
                        AuxiliaryRequest::Mint {
                            owner_id: to_id.as_id().clone(),
                            ownable_id: ownable_id.clone(),
                            value: *value,
                        },
                    ],
                )?;
                Ok(Receipt::default())
            }

            Action::Send {
                from_id,
                to_id,
                ownable_id,
                value,
            } => {
                let source = self.splits.split(&*store, from_id.as_id(), ownable_id)?;
                if source.is_prototype() {
                    return Err(EntityError::NotFound {
                        entity: "split",
                        id: source_key(from_id, ownable_id),
                    }
                    .into());
                }
                self.pipeline.run(store, &[authenticate, verify(from_id)])?;
                self.splits
                    .transfer(store, from_id.as_id(), to_id.as_id(), ownable_id, *value)?;
                Ok(Receipt::default())
            }

            Action::Burn {
                from_id,
                ownable_id,
                value,
            } => {
                self.pipeline.run(
                    store,
                    &[
                        authenticate,
                        verify(from_id),
                        AuxiliaryRequest::Burn {
                            owner_id: from_id.as_id().clone(),
                            ownable_id: ownable_id.clone(),
                            value: *value,
                        },
                    ],
                )?;
                Ok(Receipt::default())
            }

            Action::MintAsset {
                from_id,
                to_id,
                classification_id,
                immutables,
                mutables,
            } => {
                let asset = Asset::new(classification_id.as_id(), immutables.clone(), mutables.clone());
                let asset_id = asset.id();
                self.pipeline.run(
                    store,
                    &[
                        authenticate,
                        verify(from_id),
                        AuxiliaryRequest::Conform {
                            classification_id: classification_id.clone(),
                            immutables: immutables.clone(),
                            mutables: mutables.clone(),
                        },
                    ],
                )?;

                let report = self.pipeline.run(
                    store,
                    &[
                        AuxiliaryRequest::Mint {
                            owner_id: to_id.as_id().clone(),
                            ownable_id: asset_id.as_id(),
                            value: asset.supply()?,
                        },
                        AuxiliaryRequest::Scrub {
                            properties: immutables.clone(),
                        },
                        AuxiliaryRequest::Scrub {
                            properties: mutables.clone(),
                        },
                    ],
                )?;
                self.assets.add(store, &asset)?;
                Ok(Receipt {
                    created: Some(asset_id.to_string()),
                    hashes: report.hashes(),
                })
            }

            Action::MutateAsset {
                from_id,
                asset_id,
                mutables,
            } => {
                let asset = self.assets.existing(&*store, asset_id)?;
                let mutated = asset.mutate(mutables)?;
                let classification_id = ClassificationId::from_id(&asset.classification_id())?;
                self.pipeline.run(store, &[authenticate, verify(from_id)])?;

                let holding = self.splits.split(&*store, from_id.as_id(), &asset_id.as_id())?;
                if holding.value().is_zero() {
                    return Err(EntityError::NotAuthorized(format!("{from_id} does not own asset {asset_id}")).into());
                }
                let report = self.pipeline.run(
                    store,
                    &[
                        AuxiliaryRequest::Conform {
                            classification_id,
                            immutables: mutated.immutables().clone(),
                            mutables: mutated.mutables().clone(),
                        },
                        AuxiliaryRequest::Scrub {
                            properties: mutables.clone(),
                        },
                    ],
                )?;
                self.assets.mutate(store, &mutated)?;
                Ok(Receipt {
                    created: None,
                    hashes: report.hashes(),
                })
            }
        }
    }
}

fn source_key(owner_id: &IdentityId, ownable_id: &Id) -> String {
    Id::composite(owner_id.as_id().clone(), ownable_id.clone()).to_string()
}

// ---------------------------------------------------------------------------
// TransactionKeeper
// ---------------------------------------------------------------------------

/// Executes transactions against a committed store.
///
/// Every transaction runs in its own [`CacheStore`] scope over the store.
/// The scope is committed only when the whole transaction succeeds, so a
/// rejected transaction leaves no trace. Writes take `&mut self`; callers
/// that share a keeper across threads serialize access themselves.
pub struct TransactionKeeper<S: KvStore = MemoryStore> {
    store: S,
    config: MantleConfig,
    registry: StoreRegistry,
    ledger: Ledger,
}

impl TransactionKeeper<MemoryStore> {
    /// A keeper over a fresh in-memory store.
    pub fn in_memory(config: MantleConfig, authority: Arc<dyn IdentityAuthority>) -> KeeperResult<Self> {
        Self::new(MemoryStore::new(), config, authority)
    }
}

impl<S: KvStore> TransactionKeeper<S> {
    /// Register every entity module and assemble the configured pipeline.
    pub fn new(store: S, config: MantleConfig, authority: Arc<dyn IdentityAuthority>) -> KeeperResult<Self> {
        let chain_id = Id::atomic(config.chain_id.as_str());
        if chain_id.is_empty() || !chain_id.is_well_formed() {
            return Err(KeeperError::Config(format!("invalid chain_id {:?}", config.chain_id)));
        }

        let mut registry = StoreRegistry::new();
        let identities = Identities::register(&mut registry)?;
        let classifications = Classifications::register(&mut registry)?;
        let splits = Splits::register(&mut registry, config.ledger)?;
        let assets = Assets::register(&mut registry)?;
        let metas = Metas::register(&mut registry)?;

        let modules = Modules {
            identities: identities.clone(),
            classifications: classifications.clone(),
            splits: splits.clone(),
            metas: metas.clone(),
            authority,
            require_signatures: config.require_signatures,
        };
        let pipeline = Pipeline::from_config(&config.pipeline, &modules)?;
        debug!(
            chain_id = %chain_id,
            modules = registry.len(),
            auxiliaries = ?pipeline.kinds(),
            "keeper initialized"
        );

        Ok(Self {
            store,
            config,
            registry,
            ledger: Ledger {
                chain_id,
                identities,
                classifications,
                splits,
                assets,
                metas,
                pipeline,
            },
        })
    }

    pub fn config(&self) -> &MantleConfig {
        &self.config
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn into_store(self) -> S {
        self.store
    }

    /// Names of the registered entity modules.
    pub fn module_names(&self) -> Vec<&str> {
        self.registry.names().collect()
    }

    /// Execute one transaction. Never panics on bad input; every failure
    /// is reported in the response.
    pub fn transact(&mut self, message: &Message) -> TransactionResponse {
        let action = message.action.name();
        let mut scope = CacheStore::new(&mut self.store);

        let result = match self.ledger.execute(&mut scope, message) {
            Ok(receipt) => scope
                .commit()
                .map(|writes| (receipt, writes))
                .map_err(KeeperError::from),
            Err(e) => {
                scope.discard();
                Err(e)
            }
        };

        match result {
            Ok((receipt, writes)) => {
                info!(action, writes, "transaction committed");
                TransactionResponse::committed(receipt)
            }
            Err(e) => {
                warn!(action, kind = %e.kind(), error = %e, "transaction rejected");
                TransactionResponse::rejected(&e)
            }
        }
    }

    /// Decode and execute a wire request.
    pub fn transact_request(&mut self, request: &TransactionRequest) -> TransactionResponse {
        match request.make_message() {
            Ok(message) => self.transact(&message),
            Err(e) => {
                warn!(kind = %e.kind(), error = %e, "request rejected");
                TransactionResponse::rejected(&e)
            }
        }
    }

    // ---- Queries ----
    //
    // Total lookups: absent entities come back as their prototype.

    pub fn split(&self, owner_id: &Id, ownable_id: &Id) -> KeeperResult<Split> {
        Ok(self.ledger.splits.split(&self.store, owner_id, ownable_id)?)
    }

    pub fn splits_of(&self, owner_id: &Id) -> KeeperResult<Vec<Split>> {
        Ok(self.ledger.splits.splits_of(&self.store, owner_id)?)
    }

    pub fn supply(&self, ownable_id: &Id) -> KeeperResult<Dec> {
        Ok(self.ledger.splits.supply(&self.store, ownable_id)?)
    }

    pub fn asset(&self, id: &AssetId) -> KeeperResult<Asset> {
        Ok(self.ledger.assets.asset(&self.store, id)?)
    }

    pub fn identity(&self, id: &IdentityId) -> KeeperResult<Identity> {
        Ok(self.ledger.identities.identity(&self.store, id)?)
    }

    pub fn classification(&self, id: &ClassificationId) -> KeeperResult<Classification> {
        Ok(self.ledger.classifications.classification(&self.store, id)?)
    }

    pub fn reveal(&self, hash: &Id) -> KeeperResult<Meta> {
        Ok(self.ledger.metas.reveal(&self.store, hash)?)
    }
}

#[cfg(test)]
mod tests {
    use mantle_auxiliary::{AuxiliaryKind, PipelineConfig};
    use mantle_crypto::{KeyRegistry, SigningKey};
    use mantle_types::{Data, PropertyList};

    use super::*;
    use crate::request::{read_asset_id, read_classification_id};

    struct Fixture {
        keeper: TransactionKeeper,
        alice: SigningKey,
        bob: SigningKey,
    }

    impl Fixture {
        fn new() -> Self {
            Self::with_config(MantleConfig::default())
        }

        fn with_config(config: MantleConfig) -> Self {
            let alice = SigningKey::generate();
            let bob = SigningKey::generate();
            let mut registry = KeyRegistry::new();
            registry.register(alice.verifying_key());
            registry.register(bob.verifying_key());
            let keeper = TransactionKeeper::in_memory(config, Arc::new(registry)).unwrap();
            Self { keeper, alice, bob }
        }

        fn run(&mut self, key: &SigningKey, action: Action) -> TransactionResponse {
            let message = Message::new(key.address(), action).sign(key).unwrap();
            self.keeper.transact(&message)
        }

        fn balance(&self, owner: &str, ownable: &str) -> Dec {
            self.keeper
                .split(&Id::atomic(owner), &Id::atomic(ownable))
                .unwrap()
                .value()
        }
    }

    fn nub(id: &str) -> Action {
        Action::NubIdentity {
            nub_id: IdentityId::new(id),
        }
    }

    fn mint(to: &str, ownable: &str, value: i64) -> Action {
        Action::Mint {
            to_id: IdentityId::new(to),
            ownable_id: Id::atomic(ownable),
            value: Dec::from(value),
        }
    }

    fn send(from: &str, to: &str, ownable: &str, value: i64) -> Action {
        Action::Send {
            from_id: IdentityId::new(from),
            to_id: IdentityId::new(to),
            ownable_id: Id::atomic(ownable),
            value: Dec::from(value),
        }
    }

    fn list(s: &str) -> PropertyList {
        s.parse().unwrap()
    }

    #[test]
    fn mint_then_transfer_scenario() {
        let mut f = Fixture::new();
        let alice = f.alice.clone();
        assert!(f.run(&alice, nub("fromID")).success);
        assert!(f.run(&alice, mint("fromID", "stake", 1000)).success);

        let response = f.run(&alice, send("fromID", "defaultAddr", "stake", 10));
        assert!(response.success, "{response:?}");
        assert_eq!(f.balance("fromID", "stake"), Dec::from_int(990));
        assert_eq!(f.balance("defaultAddr", "stake"), Dec::from_int(10));

        let response = f.run(&alice, send("fromID", "defaultAddr", "stake", 9999));
        assert!(!response.success);
        assert_eq!(response.error_kind, Some(ErrorKind::InsufficientBalance));
        assert_eq!(f.balance("fromID", "stake"), Dec::from_int(990));
        assert_eq!(f.balance("defaultAddr", "stake"), Dec::from_int(10));
        assert_eq!(f.keeper.supply(&Id::atomic("stake")).unwrap(), Dec::from_int(1000));
    }

    #[test]
    fn transfer_from_missing_split_is_not_found() {
        let mut f = Fixture::new();
        let alice = f.alice.clone();
        f.run(&alice, nub("fromID"));
        let response = f.run(&alice, send("fromID", "defaultAddr", "stake", 1));
        assert_eq!(response.error_kind, Some(ErrorKind::EntityNotFound));
    }

    #[test]
    fn only_controllers_move_funds() {
        let mut f = Fixture::new();
        let (alice, bob) = (f.alice.clone(), f.bob.clone());
        f.run(&alice, nub("fromID"));
        f.run(&alice, mint("fromID", "stake", 100));

        let response = f.run(&bob, send("fromID", "bobID", "stake", 50));
        assert_eq!(response.error_kind, Some(ErrorKind::NotAuthorized));
        assert_eq!(f.balance("fromID", "stake"), Dec::from_int(100));
        assert!(f.keeper.split(&Id::atomic("bobID"), &Id::atomic("stake")).unwrap().is_prototype());

        let response = f.run(&bob, mint("fromID", "stake", 1));
        assert_eq!(response.error_kind, Some(ErrorKind::NotAuthorized));
    }

    #[test]
    fn burn_reduces_supply() {
        let mut f = Fixture::new();
        let alice = f.alice.clone();
        f.run(&alice, nub("fromID"));
        f.run(&alice, mint("fromID", "stake", 100));

        let burn = |value| Action::Burn {
            from_id: IdentityId::new("fromID"),
            ownable_id: Id::atomic("stake"),
            value: Dec::from_int(value),
        };
        assert!(f.run(&alice, burn(40)).success);
        assert_eq!(f.keeper.supply(&Id::atomic("stake")).unwrap(), Dec::from_int(60));
        assert_eq!(
            f.run(&alice, burn(61)).error_kind,
            Some(ErrorKind::InsufficientBalance)
        );
    }

    fn define_metals(f: &mut Fixture) -> ClassificationId {
        let alice = f.alice.clone();
        let response = f.run(
            &alice,
            Action::DefineClassification {
                immutables: list("name:S|,purity:D|"),
                mutables: list("owner:S|"),
            },
        );
        assert!(response.success, "{response:?}");
        read_classification_id(&response.created.unwrap()).unwrap()
    }

    fn mint_gold(classification_id: &ClassificationId) -> Action {
        Action::MintAsset {
            from_id: IdentityId::new("fromID"),
            to_id: IdentityId::new("fromID"),
            classification_id: classification_id.clone(),
            immutables: list("name:S|Gold,purity:D|0.99"),
            mutables: list("owner:S|alice"),
        }
    }

    #[test]
    fn mint_asset_creates_asset_split_and_metas() {
        let mut f = Fixture::new();
        let alice = f.alice.clone();
        f.run(&alice, nub("fromID"));
        let classification_id = define_metals(&mut f);
        assert!(!f.keeper.classification(&classification_id).unwrap().is_prototype());

        let response = f.run(&alice, mint_gold(&classification_id));
        assert!(response.success, "{response:?}");
        assert_eq!(response.hashes.len(), 3);

        let asset_id = read_asset_id(&response.created.unwrap()).unwrap();
        let asset = f.keeper.asset(&asset_id).unwrap();
        assert_eq!(asset.id(), asset_id);
        assert_eq!(asset.supply().unwrap(), Dec::ONE);
        assert_eq!(
            f.keeper.split(&Id::atomic("fromID"), &asset_id.as_id()).unwrap().value(),
            Dec::ONE
        );

        let revealed = f.keeper.reveal(&Id::hash(response.hashes[0].as_str())).unwrap();
        assert!(revealed.data().is_some());
    }

    #[test]
    fn failed_mint_asset_leaves_no_partial_state() {
        let mut f = Fixture::new();
        let alice = f.alice.clone();
        f.run(&alice, nub("fromID"));
        let classification_id = define_metals(&mut f);

        let first = f.run(&alice, mint_gold(&classification_id));
        let asset_id = read_asset_id(&first.created.unwrap()).unwrap();
        let before = f.keeper.store().clone();

        let second = f.run(&alice, mint_gold(&classification_id));
        assert_eq!(second.error_kind, Some(ErrorKind::EntityAlreadyExists));
        assert_eq!(
            f.keeper.split(&Id::atomic("fromID"), &asset_id.as_id()).unwrap().value(),
            Dec::ONE
        );
        assert_eq!(f.keeper.store().len(), before.len());
    }

    #[test]
    fn nonconforming_asset_is_rejected() {
        let mut f = Fixture::new();
        let alice = f.alice.clone();
        f.run(&alice, nub("fromID"));
        let classification_id = define_metals(&mut f);

        let response = f.run(
            &alice,
            Action::MintAsset {
                from_id: IdentityId::new("fromID"),
                to_id: IdentityId::new("fromID"),
                classification_id,
                immutables: list("name:S|Gold"),
                mutables: list("owner:S|alice"),
            },
        );
        assert_eq!(response.error_kind, Some(ErrorKind::NotAuthorized));
    }

    #[test]
    fn malformed_supply_is_checked_after_authorization() {
        let mut f = Fixture::new();
        let (alice, bob) = (f.alice.clone(), f.bob.clone());
        f.run(&alice, nub("fromID"));
        let response = f.run(
            &alice,
            Action::DefineClassification {
                immutables: list("name:S|"),
                mutables: list("supply:S|"),
            },
        );
        let classification_id = read_classification_id(&response.created.unwrap()).unwrap();
        let mint_text_supply = Action::MintAsset {
            from_id: IdentityId::new("fromID"),
            to_id: IdentityId::new("fromID"),
            classification_id,
            immutables: list("name:S|Silver"),
            mutables: list("supply:S|many"),
        };

        let response = f.run(&bob, mint_text_supply.clone());
        assert_eq!(response.error_kind, Some(ErrorKind::NotAuthorized));

        let before = f.keeper.store().len();
        let response = f.run(&alice, mint_text_supply);
        assert_eq!(response.error_kind, Some(ErrorKind::MetaData));
        assert_eq!(f.keeper.store().len(), before);
    }

    #[test]
    fn owner_mutates_asset() {
        let mut f = Fixture::new();
        let (alice, bob) = (f.alice.clone(), f.bob.clone());
        f.run(&alice, nub("fromID"));
        f.run(&bob, nub("bobID"));
        let classification_id = define_metals(&mut f);
        let created = f.run(&alice, mint_gold(&classification_id)).created.unwrap();
        let asset_id = read_asset_id(&created).unwrap();

        let mutate = |from: &str, mutables: &str| Action::MutateAsset {
            from_id: IdentityId::new(from),
            asset_id: asset_id.clone(),
            mutables: list(mutables),
        };

        let response = f.run(&bob, mutate("bobID", "owner:S|bob"));
        assert_eq!(response.error_kind, Some(ErrorKind::NotAuthorized));

        let response = f.run(&alice, mutate("fromID", "owner:D|5"));
        assert_eq!(response.error_kind, Some(ErrorKind::NotAuthorized));

        let response = f.run(&alice, mutate("fromID", "owner:S|carol"));
        assert!(response.success, "{response:?}");
        let asset = f.keeper.asset(&asset_id).unwrap();
        assert_eq!(
            asset.mutables().get_data(&Id::atomic("owner")),
            Some(&Data::from("carol"))
        );
    }

    #[test]
    fn signatures_are_checked() {
        let mut config = MantleConfig::default();
        config.require_signatures = true;
        let mut f = Fixture::with_config(config);
        let (alice, bob) = (f.alice.clone(), f.bob.clone());

        let unsigned = Message::new(alice.address(), nub("fromID"));
        let response = f.keeper.transact(&unsigned);
        assert_eq!(response.error_kind, Some(ErrorKind::NotAuthorized));

        let forged = Message::new(alice.address(), nub("fromID")).sign(&bob).unwrap();
        assert_eq!(f.keeper.transact(&forged).error_kind, Some(ErrorKind::NotAuthorized));

        assert!(f.run(&alice, nub("fromID")).success);
        assert!(!f.keeper.identity(&IdentityId::new("fromID")).unwrap().is_prototype());
    }

    #[test]
    fn missing_auxiliary_rejects_without_writes() {
        let mut config = MantleConfig::default();
        config.pipeline = PipelineConfig {
            order: vec![AuxiliaryKind::Authenticate, AuxiliaryKind::Verify],
        };
        let mut f = Fixture::with_config(config);
        let alice = f.alice.clone();
        f.run(&alice, nub("fromID"));
        let before = f.keeper.store().len();

        let response = f.run(&alice, mint("fromID", "stake", 5));
        assert_eq!(response.error_kind, Some(ErrorKind::Internal));
        assert_eq!(f.keeper.store().len(), before);
    }

    #[test]
    fn malformed_request_is_incorrect_format() {
        let mut f = Fixture::new();
        let request = TransactionRequest::from_json(&format!(
            r#"{{"type":"mint","baseReq":{{"from":"{}"}},"toID":"fromID","ownableID":"stake","value":"lots"}}"#,
            f.alice.address().to_hex()
        ))
        .unwrap();
        let response = f.keeper.transact_request(&request);
        assert_eq!(response.error_kind, Some(ErrorKind::IncorrectFormat));
        assert!(f.keeper.store().is_empty());
    }

    #[test]
    fn registry_lists_every_module() {
        let f = Fixture::new();
        let mut names = f.keeper.module_names();
        names.sort_unstable();
        assert_eq!(names, ["assets", "classifications", "identities", "metas", "splits"]);
    }
}
