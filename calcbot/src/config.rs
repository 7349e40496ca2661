//! Engine configuration
//!
//! Every field has a default, so an empty JSON object (or no file at all)
//! yields a working engine.

use crate::ResourceLimits;
use serde::{Deserialize, Serialize};

/// Settings for the optional spike telemetry collaborator
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TelemetryConfig {
    pub enabled: bool,
    /// Seed for synapse weights; `None` draws from entropy
    pub seed: Option<u64>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    pub limits: ResourceLimits,
    pub telemetry: TelemetryConfig,
}

impl EngineConfig {
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse a configuration from JSON text
    pub fn from_json(text: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(text)
    }

    pub fn with_limits(mut self, limits: ResourceLimits) -> Self {
        self.limits = limits;
        self
    }

    pub fn with_telemetry(mut self, seed: Option<u64>) -> Self {
        self.telemetry = TelemetryConfig {
            enabled: true,
            seed,
        };
        self
    }
}
