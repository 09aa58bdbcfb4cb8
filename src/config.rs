// Copyright 2025 Cowboy AI, LLC.

//! Engine configuration
//!
//! Bounds for materialization, path discovery and rewriting in one
//! serializable struct. Every field has a default, so a partial JSON document
//! is a valid configuration.

use serde::{Deserialize, Serialize};

use crate::category::{CompositionMode, MaterializeOptions};
use crate::diagram::rewriting::DEFAULT_REWRITE_BUDGET;
use crate::errors::{CategoryResult, StructureError};

/// Tunable bounds for the engine
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    /// How presentations are materialized
    pub materialize: MaterializeOptions,

    /// Longest path enumerated by path discovery
    pub discovery_max_length: usize,

    /// Paths expanded by the rewriting checker before giving up
    pub rewrite_budget: usize,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            materialize: MaterializeOptions::default(),
            discovery_max_length: 4,
            rewrite_budget: DEFAULT_REWRITE_BUDGET,
        }
    }
}

impl EngineConfig {
    /// Parse and validate a JSON configuration
    pub fn from_json_str(json: &str) -> CategoryResult<Self> {
        let config: EngineConfig = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Reject bounds that would make every operation trivially empty
    pub fn validate(&self) -> CategoryResult<()> {
        if self.materialize.mode == CompositionMode::Free && self.materialize.max_path_length == 0 {
            return Err(StructureError::InvalidConfiguration(
                "materialize.max_path_length must be at least 1 in free mode".to_string(),
            ));
        }
        if self.materialize.max_morphisms == 0 {
            return Err(StructureError::InvalidConfiguration(
                "materialize.max_morphisms must be at least 1".to_string(),
            ));
        }
        if self.discovery_max_length == 0 {
            return Err(StructureError::InvalidConfiguration(
                "discovery_max_length must be at least 1".to_string(),
            ));
        }
        if self.rewrite_budget == 0 {
            return Err(StructureError::InvalidConfiguration(
                "rewrite_budget must be at least 1".to_string(),
            ));
        }
        Ok(())
    }
}
