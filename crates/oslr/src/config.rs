//! Refinement search configuration.

use crate::error::{OslrError, Result};
use serde::{Deserialize, Serialize};

/// Configuration for a multi-round refinement search
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RefinementConfig {
    /// Maximum number of literals in a generated clause body
    pub max_body_length: usize,
    /// Stop once this many states have been generated (0 means no limit)
    pub max_states: usize,
    /// Collect a `RefinementProfile` during the search
    pub enable_profiling: bool,
}

impl Default for RefinementConfig {
    fn default() -> Self {
        RefinementConfig {
            max_body_length: 3,
            max_states: 0,
            enable_profiling: false,
        }
    }
}

impl RefinementConfig {
    /// Parse a configuration from JSON; missing fields take their defaults.
    pub fn from_json(json: &str) -> Result<Self> {
        let config: RefinementConfig = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        if self.max_body_length == 0 {
            return Err(OslrError::InvalidConfig(
                "max_body_length must be at least 1".to_string(),
            ));
        }
        Ok(())
    }

    /// Whether `generated` states exhaust the `max_states` budget
    pub fn state_limit_reached(&self, generated: usize) -> bool {
        self.max_states != 0 && generated >= self.max_states
    }
}
