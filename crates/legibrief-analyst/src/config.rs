//! Configuration for the analysis workflows

use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Tuning knobs shared by the document analysis and bill search workflows
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AnalystConfig {
    /// Document prefix sent to the classification stage (characters)
    pub classification_prefix_chars: usize,

    /// Document prefix attached to the enrichment stage (characters)
    pub enrichment_prefix_chars: usize,

    /// Maximum time for a single generation call (seconds)
    pub generation_timeout_secs: u64,
}

impl AnalystConfig {
    /// Get the per-call generation timeout as a Duration
    pub fn generation_timeout(&self) -> Duration {
        Duration::from_secs(self.generation_timeout_secs)
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<(), String> {
        if self.classification_prefix_chars == 0 {
            return Err("classification_prefix_chars must be greater than 0".to_string());
        }
        if self.enrichment_prefix_chars == 0 {
            return Err("enrichment_prefix_chars must be greater than 0".to_string());
        }
        if self.generation_timeout_secs == 0 {
            return Err("generation_timeout_secs must be greater than 0".to_string());
        }
        Ok(())
    }

    /// Load configuration from TOML string
    pub fn from_toml(toml_str: &str) -> Result<Self, String> {
        toml::from_str(toml_str).map_err(|e| format!("Failed to parse TOML: {}", e))
    }

    /// Serialize configuration to TOML string
    pub fn to_toml(&self) -> Result<String, String> {
        toml::to_string_pretty(self).map_err(|e| format!("Failed to serialize to TOML: {}", e))
    }
}

impl Default for AnalystConfig {
    fn default() -> Self {
        Self {
            classification_prefix_chars: 9_000,
            enrichment_prefix_chars: 8_000,
            generation_timeout_secs: 60,
        }
    }
}
