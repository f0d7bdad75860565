//! Session configuration.
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::constants::DEFAULT_ESTIMATED_BUDGET_CENTS;
use crate::season::Season;

/// Errors raised when session configuration invariants are violated.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("estimated budget must be greater than zero")]
    ZeroEstimatedBudget,
}

/// Ambient settings a session starts with.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct SessionConfig {
    #[serde(default)]
    pub default_season: Season,
    /// Shown next to the planned spend. Never enforced.
    #[serde(default = "SessionConfig::default_estimated_budget_cents")]
    pub estimated_budget_cents: u64,
}

impl SessionConfig {
    const fn default_estimated_budget_cents() -> u64 {
        DEFAULT_ESTIMATED_BUDGET_CENTS
    }

    /// Parse configuration from JSON, filling missing fields with defaults.
    ///
    /// # Errors
    ///
    /// Returns an error for malformed JSON or unknown fields.
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }

    /// # Errors
    ///
    /// Returns [`ConfigError`] when a field is out of range.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.estimated_budget_cents == 0 {
            return Err(ConfigError::ZeroEstimatedBudget);
        }
        Ok(())
    }
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            default_season: Season::default(),
            estimated_budget_cents: Self::default_estimated_budget_cents(),
        }
    }
}
