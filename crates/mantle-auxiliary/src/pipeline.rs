use std::collections::BTreeSet;
use std::time::{Duration, Instant};

use mantle_entities::Split;
use mantle_store::KvStore;
use mantle_types::Id;
use tracing::{debug, warn};

use crate::auxiliaries::{Authenticate, BurnSupply, Conform, MintSupply, Scrub, Verify};
use crate::auxiliary::{Auxiliary, AuxiliaryKind, AuxiliaryRequest, Outcome};
use crate::config::{Modules, PipelineConfig};
use crate::error::AuxiliaryError;

// ---------------------------------------------------------------------------
// BuiltinAuxiliary
// ---------------------------------------------------------------------------

/// The built-in auxiliaries as one statically dispatched type.
#[derive(Debug, Clone)]
pub enum BuiltinAuxiliary {
    Authenticate(Authenticate),
    Verify(Verify),
    Conform(Conform),
    Mint(MintSupply),
    Burn(BurnSupply),
    Scrub(Scrub),
}

impl BuiltinAuxiliary {
    /// Build the auxiliary of `kind` over the given modules.
    pub fn build(kind: AuxiliaryKind, modules: &Modules) -> Self {
        match kind {
            AuxiliaryKind::Authenticate => {
                Self::Authenticate(Authenticate::new(modules.authority.clone(), modules.require_signatures))
            }
            AuxiliaryKind::Verify => Self::Verify(Verify::new(modules.identities.clone())),
            AuxiliaryKind::Conform => Self::Conform(Conform::new(modules.classifications.clone())),
            AuxiliaryKind::Mint => Self::Mint(MintSupply::new(modules.splits.clone())),
            AuxiliaryKind::Burn => Self::Burn(BurnSupply::new(modules.splits.clone())),
            AuxiliaryKind::Scrub => Self::Scrub(Scrub::new(modules.metas.clone())),
        }
    }
}

impl Auxiliary for BuiltinAuxiliary {
    fn kind(&self) -> AuxiliaryKind {
        match self {
            Self::Authenticate(a) => a.kind(),
            Self::Verify(a) => a.kind(),
            Self::Conform(a) => a.kind(),
            Self::Mint(a) => a.kind(),
            Self::Burn(a) => a.kind(),
            Self::Scrub(a) => a.kind(),
        }
    }

    fn help(&self, store: &mut dyn KvStore, request: &AuxiliaryRequest) -> Result<Outcome, AuxiliaryError> {
        match self {
            Self::Authenticate(a) => a.help(store, request),
            Self::Verify(a) => a.help(store, request),
            Self::Conform(a) => a.help(store, request),
            Self::Mint(a) => a.help(store, request),
            Self::Burn(a) => a.help(store, request),
            Self::Scrub(a) => a.help(store, request),
        }
    }
}

// ---------------------------------------------------------------------------
// PipelineReport
// ---------------------------------------------------------------------------

/// Result of one auxiliary call.
#[derive(Clone, Debug)]
pub struct StepResult {
    pub kind: AuxiliaryKind,
    pub outcome: Outcome,
    pub elapsed: Duration,
}

/// Per-step results of a successful pipeline run, in execution order.
#[derive(Clone, Debug, Default)]
pub struct PipelineReport {
    pub steps: Vec<StepResult>,
    pub elapsed: Duration,
}

impl PipelineReport {
    /// Every hash produced by scrub steps, in execution order.
    pub fn hashes(&self) -> Vec<Id> {
        self.steps
            .iter()
            .filter_map(|step| match &step.outcome {
                Outcome::Hashes(hashes) => Some(hashes.iter().cloned()),
                _ => None,
            })
            .flatten()
            .collect()
    }

    /// Every split written by mint or burn steps.
    pub fn splits(&self) -> impl Iterator<Item = &Split> {
        self.steps.iter().filter_map(|step| match &step.outcome {
            Outcome::Split(split) => Some(split),
            _ => None,
        })
    }
}

// ---------------------------------------------------------------------------
// Pipeline
// ---------------------------------------------------------------------------

/// An ordered list of auxiliaries, assembled once and run per transaction.
///
/// The pipeline is **fail-fast**: the first auxiliary error stops the run
/// and becomes its result. Requests are executed in auxiliary order, not in
/// submission order; requests of the same kind keep their submission order.
#[derive(Debug, Clone)]
pub struct Pipeline<A = BuiltinAuxiliary> {
    auxiliaries: Vec<A>,
}

impl Pipeline<BuiltinAuxiliary> {
    /// Assemble the built-in auxiliaries in the configured order.
    pub fn from_config(config: &PipelineConfig, modules: &Modules) -> Result<Self, AuxiliaryError> {
        Self::new(
            config
                .order
                .iter()
                .map(|kind| BuiltinAuxiliary::build(*kind, modules))
                .collect(),
        )
    }
}

impl<A: Auxiliary> Pipeline<A> {
    /// Create a pipeline. Each auxiliary kind may appear at most once.
    pub fn new(auxiliaries: Vec<A>) -> Result<Self, AuxiliaryError> {
        let mut seen = BTreeSet::new();
        for auxiliary in &auxiliaries {
            if !seen.insert(auxiliary.kind()) {
                return Err(AuxiliaryError::Config(format!(
                    "auxiliary {} listed more than once",
                    auxiliary.kind()
                )));
            }
        }
        Ok(Self { auxiliaries })
    }

    /// Kinds of the installed auxiliaries, in execution order.
    pub fn kinds(&self) -> Vec<AuxiliaryKind> {
        self.auxiliaries.iter().map(Auxiliary::kind).collect()
    }

    pub fn contains(&self, kind: AuxiliaryKind) -> bool {
        self.auxiliaries.iter().any(|a| a.kind() == kind)
    }

    pub fn len(&self) -> usize {
        self.auxiliaries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.auxiliaries.is_empty()
    }

    /// Run `requests` through the pipeline against `store`.
    ///
    /// Fails with `Unavailable` before touching the store if a request has
    /// no auxiliary. Writes made by earlier steps stay in `store` when a
    /// later step fails; callers run the pipeline inside a scope they
    /// discard on error.
    pub fn run(&self, store: &mut dyn KvStore, requests: &[AuxiliaryRequest]) -> Result<PipelineReport, AuxiliaryError> {
        let pipeline_start = Instant::now();

        if let Some(missing) = requests.iter().map(AuxiliaryRequest::kind).find(|k| !self.contains(*k)) {
            return Err(AuxiliaryError::Unavailable(missing));
        }

        let mut steps = Vec::with_capacity(requests.len());
        for auxiliary in &self.auxiliaries {
            let kind = auxiliary.kind();
            for request in requests.iter().filter(|r| r.kind() == kind) {
                let step_start = Instant::now();
                let outcome = auxiliary.help(store, request).inspect_err(|e| {
                    warn!(stage = %kind, error = %e, "auxiliary rejected request");
                })?;
                let elapsed = step_start.elapsed();
                debug!(stage = %kind, ?elapsed, "auxiliary passed");
                steps.push(StepResult { kind, outcome, elapsed });
            }
        }

        Ok(PipelineReport {
            steps,
            elapsed: pipeline_start.elapsed(),
        })
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use mantle_crypto::KeyRegistry;
    use mantle_entities::{Classifications, Identities, LedgerPolicy, Metas, Splits};
    use mantle_store::{MemoryStore, StoreRegistry};
    use mantle_types::{Address, Dec, ErrorKind, PropertyList};

    use super::*;

    struct Reject;

    impl Auxiliary for Reject {
        fn kind(&self) -> AuxiliaryKind {
            AuxiliaryKind::Authenticate
        }

        fn help(&self, _store: &mut dyn KvStore, _request: &AuxiliaryRequest) -> Result<Outcome, AuxiliaryError> {
            Err(AuxiliaryError::Unauthenticated {
                signer: "test".into(),
                reason: "always rejects".into(),
            })
        }
    }

    #[derive(Debug)]
    struct Write;

    impl Auxiliary for Write {
        fn kind(&self) -> AuxiliaryKind {
            AuxiliaryKind::Mint
        }

        fn help(&self, store: &mut dyn KvStore, _request: &AuxiliaryRequest) -> Result<Outcome, AuxiliaryError> {
            store
                .set(b"written", b"yes".to_vec())
                .map_err(|e| AuxiliaryError::Config(e.to_string()))?;
            Ok(Outcome::Passed)
        }
    }

    fn authenticate() -> AuxiliaryRequest {
        AuxiliaryRequest::Authenticate {
            signer: Address::from_bytes(vec![1]),
            sign_bytes: Vec::new(),
            signature: None,
        }
    }

    fn mint(value: i64) -> AuxiliaryRequest {
        AuxiliaryRequest::Mint {
            owner_id: Id::atomic("fromID"),
            ownable_id: Id::atomic("stake"),
            value: Dec::from(value),
        }
    }

    fn modules() -> Modules {
        let mut registry = StoreRegistry::new();
        Modules {
            identities: Identities::register(&mut registry).unwrap(),
            classifications: Classifications::register(&mut registry).unwrap(),
            splits: Splits::register(&mut registry, LedgerPolicy::default()).unwrap(),
            metas: Metas::register(&mut registry).unwrap(),
            authority: Arc::new(KeyRegistry::new()),
            require_signatures: false,
        }
    }

    #[test]
    fn first_failure_stops_later_auxiliaries() {
        let auxiliaries: Vec<Box<dyn Auxiliary>> = vec![Box::new(Reject), Box::new(Write)];
        let pipeline = Pipeline::new(auxiliaries).unwrap();
        let mut store = MemoryStore::new();

        let err = pipeline.run(&mut store, &[mint(1), authenticate()]).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::NotAuthorized);
        assert!(!store.has(b"written").unwrap());
    }

    #[test]
    fn passing_pipeline_runs_every_request() {
        let pipeline = Pipeline::new(vec![Write]).unwrap();
        let mut store = MemoryStore::new();

        let report = pipeline.run(&mut store, &[mint(1), mint(2)]).unwrap();
        assert_eq!(report.steps.len(), 2);
        assert!(store.has(b"written").unwrap());
    }

    #[test]
    fn request_without_auxiliary_is_unavailable() {
        let pipeline = Pipeline::new(vec![Write]).unwrap();
        let mut store = MemoryStore::new();

        let err = pipeline.run(&mut store, &[mint(1), authenticate()]).unwrap_err();
        assert!(matches!(err, AuxiliaryError::Unavailable(AuxiliaryKind::Authenticate)));
        assert!(store.is_empty());
    }

    #[test]
    fn duplicate_kinds_are_rejected() {
        let err = Pipeline::new(vec![Write, Write]).unwrap_err();
        assert!(matches!(err, AuxiliaryError::Config(_)));
    }

    #[test]
    fn builtin_pipeline_follows_config_order() {
        let config = PipelineConfig {
            order: vec![AuxiliaryKind::Scrub, AuxiliaryKind::Mint],
        };
        let pipeline = Pipeline::from_config(&config, &modules()).unwrap();
        assert_eq!(pipeline.kinds(), config.order);
        assert!(!pipeline.contains(AuxiliaryKind::Verify));
    }

    #[test]
    fn builtin_pipeline_mints_and_scrubs() {
        let pipeline = Pipeline::from_config(&PipelineConfig::default(), &modules()).unwrap();
        let mut store = MemoryStore::new();
        let properties: PropertyList = "name:S|Gold,weight:D|2".parse().unwrap();

        let report = pipeline
            .run(
                &mut store,
                &[
                    AuxiliaryRequest::Scrub { properties },
                    mint(1000),
                    authenticate(),
                ],
            )
            .unwrap();

        let kinds: Vec<_> = report.steps.iter().map(|s| s.kind).collect();
        assert_eq!(
            kinds,
            vec![AuxiliaryKind::Authenticate, AuxiliaryKind::Mint, AuxiliaryKind::Scrub]
        );
        assert_eq!(report.hashes().len(), 2);
        let minted: Vec<_> = report.splits().collect();
        assert_eq!(minted.len(), 1);
        assert_eq!(minted[0].value(), Dec::from_int(1000));
    }
}
