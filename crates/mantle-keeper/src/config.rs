use std::path::Path;

use mantle_auxiliary::PipelineConfig;
use mantle_entities::LedgerPolicy;
use mantle_types::constants::MAX_PROPERTY_COUNT;
use serde::{Deserialize, Serialize};

use crate::error::{KeeperError, KeeperResult};

/// Keeper configuration, usually read from a TOML file.
///
/// ```toml
/// chain_id = "mantle"
/// require_signatures = false
///
/// [pipeline]
/// order = ["authenticate", "verify", "conform", "mint", "burn", "scrub"]
///
/// [ledger]
/// prune_empty_splits = true
/// ```
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct MantleConfig {
    /// Chain component of every classification id.
    pub chain_id: String,
    /// Reject transactions that carry no signature.
    pub require_signatures: bool,
    pub pipeline: PipelineConfig,
    pub ledger: LedgerPolicy,
}

impl Default for MantleConfig {
    fn default() -> Self {
        Self {
            chain_id: "mantle".into(),
            require_signatures: false,
            pipeline: PipelineConfig::default(),
            ledger: LedgerPolicy::default(),
        }
    }
}

impl MantleConfig {
    pub fn from_toml_str(s: &str) -> KeeperResult<Self> {
        let config: Self = toml::from_str(s).map_err(|e| KeeperError::Config(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    pub fn load(path: impl AsRef<Path>) -> KeeperResult<Self> {
        let path = path.as_ref();
        let contents = std::fs::read_to_string(path)
            .map_err(|e| KeeperError::Config(format!("cannot read {}: {e}", path.display())))?;
        Self::from_toml_str(&contents)
    }

    pub fn to_toml(&self) -> KeeperResult<String> {
        toml::to_string_pretty(self).map_err(|e| KeeperError::Config(e.to_string()))
    }

    /// Property cap on each immutable and mutable list. Not configurable.
    pub fn max_property_count(&self) -> usize {
        MAX_PROPERTY_COUNT
    }

    fn validate(&self) -> KeeperResult<()> {
        if self.chain_id.is_empty() {
            return Err(KeeperError::Config("chain_id must not be empty".into()));
        }
        if !mantle_types::Id::atomic(self.chain_id.as_str()).is_well_formed() {
            return Err(KeeperError::Config(format!(
                "chain_id {:?} contains a reserved separator",
                self.chain_id
            )));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use std::io::Write;

    use mantle_auxiliary::AuxiliaryKind;

    use super::*;

    #[test]
    fn empty_toml_is_default() {
        assert_eq!(MantleConfig::from_toml_str("").unwrap(), MantleConfig::default());
    }

    #[test]
    fn partial_toml_keeps_other_defaults() {
        let config = MantleConfig::from_toml_str(
            r#"
            require_signatures = true

            [pipeline]
            order = ["authenticate", "verify", "mint"]
            "#,
        )
        .unwrap();
        assert!(config.require_signatures);
        assert_eq!(config.chain_id, "mantle");
        assert_eq!(config.pipeline.order.len(), 3);
        assert_eq!(config.pipeline.order[2], AuxiliaryKind::Mint);
        assert!(config.ledger.prune_empty_splits);
        assert_eq!(config.max_property_count(), 22);
    }

    #[test]
    fn toml_round_trip() {
        let mut config = MantleConfig::default();
        config.ledger.prune_empty_splits = false;
        let text = config.to_toml().unwrap();
        assert_eq!(MantleConfig::from_toml_str(&text).unwrap(), config);
    }

    #[test]
    fn malformed_config_is_rejected() {
        for text in ["chain_id = 5", "chain_id = \"\"", "chain_id = \"a|b\"", "[pipeline]\norder = [\"teleport\"]"] {
            let err = MantleConfig::from_toml_str(text).unwrap_err();
            assert!(matches!(err, KeeperError::Config(_)), "{text}");
        }
    }

    #[test]
    fn load_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "chain_id = \"testnet\"").unwrap();
        let config = MantleConfig::load(file.path()).unwrap();
        assert_eq!(config.chain_id, "testnet");

        let err = MantleConfig::load(file.path().with_extension("missing")).unwrap_err();
        assert!(matches!(err, KeeperError::Config(_)));
    }
}
