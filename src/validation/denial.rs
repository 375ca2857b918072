//! Reasons a validator can deny a command.

use crate::validation::mode::AppMode;
use thiserror::Error;

/// Why a command was not allowed to run.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum Denial {
    #[error("Mutating command '{command}' is not allowed in {mode} mode")]
    MutationForbidden { command: String, mode: AppMode },

    #[error("Custom check failed: {message}")]
    CustomCheckFailed { message: String },
}
