//! Command lifecycle states.
//!
//! Every command instance moves through `Ready → Executing → Finished`, or is
//! short-circuited to `Forbidden` when a validator denies it.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Lifecycle state of a single command instance.
///
/// # Example
///
/// ```rust
/// use commander::core::CommandState;
///
/// assert!(CommandState::Ready.is_invocable());
/// assert!(!CommandState::Executing.is_invocable());
/// assert!(CommandState::Forbidden.is_final());
/// ```
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug, Default, Serialize, Deserialize)]
pub enum CommandState {
    /// Constructed and never invoked.
    #[default]
    Ready,
    /// Running. Asynchronous commands stay here until they complete.
    Executing,
    /// The most recent run completed.
    Finished,
    /// A validator denied the command. Terminal.
    Forbidden,
}

impl CommandState {
    /// Get the state's name for display/logging.
    pub fn name(&self) -> &'static str {
        match self {
            Self::Ready => "Ready",
            Self::Executing => "Executing",
            Self::Finished => "Finished",
            Self::Forbidden => "Forbidden",
        }
    }

    /// Check if the state ends a run.
    pub fn is_final(&self) -> bool {
        matches!(self, Self::Finished | Self::Forbidden)
    }

    /// Check if a new run may start from this state.
    ///
    /// A finished command may be replayed (redo does exactly that). An
    /// in-flight command may not, and a forbidden one never may.
    pub fn is_invocable(&self) -> bool {
        matches!(self, Self::Ready | Self::Finished)
    }
}

impl fmt::Display for CommandState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}
