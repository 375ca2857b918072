//! Dispatcher configuration.

use crate::dispatcher::DEFAULT_JOURNAL_CAPACITY;
use crate::validation::{AppMode, AppValidator};
use serde::{Deserialize, Serialize};
use std::num::NonZeroUsize;
use thiserror::Error;

/// Errors that can occur when loading a configuration
#[derive(Debug, Error)]
pub enum ConfigError {
    /// The input was not valid configuration JSON
    #[error("Failed to parse configuration: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("journal_capacity must be at least 1")]
    ZeroJournalCapacity,
}

/// Settings for a [`CommandDispatcher`](crate::dispatcher::CommandDispatcher).
///
/// Every field has a default, so `{}` is a valid configuration.
///
/// # Example
///
/// ```rust
/// use commander::config::CommanderConfig;
/// use commander::validation::AppMode;
///
/// let json = r#"{ "mode": "read_only", "history_limit": 50 }"#;
/// let config = CommanderConfig::from_json(json).unwrap();
/// assert_eq!(config.mode, AppMode::ReadOnly);
/// assert_eq!(config.history_limit.map(|n| n.get()), Some(50));
/// ```
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct CommanderConfig {
    /// Mode handed to the validator
    pub mode: AppMode,

    /// Maximum undo entries kept; `None` keeps everything
    pub history_limit: Option<NonZeroUsize>,

    /// Maximum journal entries kept
    pub journal_capacity: usize,
}

impl Default for CommanderConfig {
    fn default() -> Self {
        Self {
            mode: AppMode::Full,
            history_limit: None,
            journal_capacity: DEFAULT_JOURNAL_CAPACITY,
        }
    }
}

impl CommanderConfig {
    /// Parse and validate a JSON configuration.
    pub fn from_json(input: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(input)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.journal_capacity == 0 {
            return Err(ConfigError::ZeroJournalCapacity);
        }
        Ok(())
    }

    /// Build the validator described by this configuration.
    pub fn validator(&self) -> AppValidator {
        AppValidator::new(self.mode)
    }
}
