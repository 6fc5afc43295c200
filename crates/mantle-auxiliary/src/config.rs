use std::fmt;
use std::sync::Arc;

use mantle_crypto::IdentityAuthority;
use mantle_entities::{Classifications, Identities, Metas, Splits};
use serde::{Deserialize, Serialize};

use crate::auxiliary::AuxiliaryKind;

/// Order in which the pipeline runs its auxiliaries.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PipelineConfig {
    /// Auxiliaries to install, in execution order. Each kind at most once.
    pub order: Vec<AuxiliaryKind>,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            order: AuxiliaryKind::ALL.to_vec(),
        }
    }
}

/// The entity modules and collaborators the built-in auxiliaries act on.
#[derive(Clone)]
pub struct Modules {
    pub identities: Identities,
    pub classifications: Classifications,
    pub splits: Splits,
    pub metas: Metas,
    pub authority: Arc<dyn IdentityAuthority>,
    pub require_signatures: bool,
}

impl fmt::Debug for Modules {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Modules")
            .field("identities", &self.identities)
            .field("classifications", &self.classifications)
            .field("splits", &self.splits)
            .field("metas", &self.metas)
            .field("require_signatures", &self.require_signatures)
            .finish_non_exhaustive()
    }
}
