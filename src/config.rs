//! Policy configuration.
//!
//! Every numeric threshold used by the rule chains lives in `Thresholds`,
//! so a JSON config file can retune the policy without a rebuild. Missing
//! fields fall back to the defaults, which reproduce the stock behavior.

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::policy::Strategy;

/// Errors that can occur while loading or applying configuration.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("failed to read config file '{path}': {source}")]
    Read {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse config JSON: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("unknown strategy: '{0}'")]
    UnknownStrategy(String),

    #[error("unknown option: '{0}'")]
    UnknownOption(String),

    #[error("option '{0}' requires a value")]
    MissingValue(String),
}

/// Health and distance thresholds. Health values are on the 0..=100 scale,
/// distances are path lengths in steps.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Thresholds {
    /// Health counted as full.
    pub full_health: u8,
    /// Highest own health at which an adjacent hurt teammate is rescued first.
    pub rescue_self_max: u8,
    /// A teammate below this health is rescued.
    pub rescue_teammate_below: u8,
    /// At or below this health the hero retreats.
    pub critical_health: u8,
    /// An enemy at or within this distance is a threat while retreating.
    pub threat_range: usize,
    /// A teammate farther away than this triggers a regroup.
    pub regroup_beyond: usize,
    /// An adjacent teammate at or below this health gets healed.
    pub heal_teammate_max: u8,
    /// Mining requires own health above this.
    pub mining_health_above: u8,
    /// Mines at or within this distance are worth walking to.
    pub mining_range: usize,
    /// The selfish miner heads for a well below this health.
    pub selfish_retreat_below: u8,
}

impl Default for Thresholds {
    fn default() -> Self {
        Thresholds {
            full_health: 100,
            rescue_self_max: 80,
            rescue_teammate_below: 60,
            critical_health: 60,
            threat_range: 4,
            regroup_beyond: 3,
            heal_teammate_max: 60,
            mining_health_above: 60,
            mining_range: 3,
            selfish_retreat_below: 40,
        }
    }
}

/// The strategy to play and its thresholds.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PolicyConfig {
    pub strategy: Strategy,
    pub thresholds: Thresholds,
}

impl PolicyConfig {
    /// Loads a config from a JSON file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let data = fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.display().to_string(),
            source,
        })?;
        Self::from_json(&data)
    }

    /// Parses a config from a JSON string.
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        Ok(serde_json::from_str(json)?)
    }
}
