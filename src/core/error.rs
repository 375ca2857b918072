//! Errors raised by commands and the dispatcher.

use crate::core::state::CommandState;
use thiserror::Error;

/// Errors that can occur while invoking, undoing or redoing commands.
///
/// Validation denial is deliberately absent: a denied command is marked
/// [`CommandState::Forbidden`] and reported through
/// [`InvokeOutcome`](crate::dispatcher::InvokeOutcome), not as an error.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum CommandError {
    /// Undo was requested but the history ran out.
    #[error("Nothing to undo: undid {completed} of {requested} requested command(s)")]
    EmptyHistory { requested: usize, completed: usize },

    /// Redo was requested but no undone command remains.
    #[error("Nothing to redo: redid {completed} of {requested} requested command(s)")]
    EmptyRedoHistory { requested: usize, completed: usize },

    /// The command cannot be invoked from its current lifecycle state.
    #[error("Command '{command}' cannot be invoked while {state}")]
    InvalidState {
        command: String,
        state: CommandState,
    },

    /// The command instance is already on the undo stack.
    ///
    /// Invoking one instance twice in a row fails on the second call, since
    /// an instance may sit on at most one history stack. To apply the same
    /// change again, invoke a new instance or a
    /// [`GroupCommand`](crate::commands::GroupCommand) holding it twice.
    #[error("Command '{command}' is already in the undo history")]
    AlreadyInHistory { command: String },
}

/// Convenience alias used across the crate.
pub type CommandResult<T> = Result<T, CommandError>;
