//! Application modes consulted by validators.

use crate::core::Command;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Mode the application is running in.
///
/// New modes can be added without touching the dispatcher: only
/// [`AppMode::permits`] decides what a mode allows.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
#[non_exhaustive]
pub enum AppMode {
    /// Every command may run.
    #[default]
    Full,
    /// Only non-mutating commands may run.
    ReadOnly,
}

impl AppMode {
    pub fn name(&self) -> &'static str {
        match self {
            Self::Full => "full",
            Self::ReadOnly => "read_only",
        }
    }

    /// Check if the mode lets `command` run (pure).
    pub fn permits(&self, command: &dyn Command) -> bool {
        match self {
            Self::Full => true,
            Self::ReadOnly => !command.is_mutating(),
        }
    }
}

impl fmt::Display for AppMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}
