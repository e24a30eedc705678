//! Serializable run configuration.

use std::path::Path;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use rebal_core::engine::PolicyParams;

/// Unique identifier for a run (content-addressable hash).
pub type RunId = String;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config file: {0}")]
    Io(#[from] std::io::Error),

    #[error("failed to parse config: {0}")]
    Parse(#[from] toml::de::Error),
}

/// Complete configuration for a single rebalancing run.
///
/// Captures everything needed to reproduce the run: the policy parameters
/// and a label for the asset pair. Two runs with identical configs share the
/// same [`RunId`].
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct RunConfig {
    /// Human-readable label for the asset pair (e.g. "DM/EM").
    pub name: String,

    /// Policy parameters (grid increment, capital, cost rates, band mode).
    #[serde(default)]
    pub policy: PolicyParams,
}

impl RunConfig {
    pub fn new(name: impl Into<String>) -> Self {
        Self { name: name.into(), policy: PolicyParams::default() }
    }

    /// Load from a TOML file.
    pub fn from_toml_file(path: &Path) -> Result<Self, ConfigError> {
        let text = std::fs::read_to_string(path)?;
        Ok(toml::from_str(&text)?)
    }

    /// Deterministic hash id for this configuration (BLAKE3 over the JSON
    /// encoding), used to key artifacts and cache lookups.
    pub fn run_id(&self) -> RunId {
        let json = serde_json::to_string(self).expect("RunConfig serialization failed");
        blake3::hash(json.as_bytes()).to_hex().to_string()
    }
}
