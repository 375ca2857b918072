//! Command dispatcher with validated invocation and undo/redo history.
//!
//! The dispatcher owns two stacks, most recent last:
//! - `commands`: invoked commands that can be undone
//! - `undone_commands`: undone commands that can be redone
//!
//! Invoking a new command clears the redo stack. Undo and redo are not
//! re-validated: a command that was allowed when invoked stays replayable
//! even if the validator would now deny it.

mod journal;

pub use journal::{Journal, JournalAction, JournalEntry, DEFAULT_JOURNAL_CAPACITY};

use crate::config::CommanderConfig;
use crate::core::{Command, CommandError, CommandRef, CommandResult};
use crate::validation::{Denial, Validator};
use chrono::Utc;
use std::fmt;
use std::num::NonZeroUsize;
use std::sync::Arc;
use stillwater::validation::Validation;

/// Result of handing a command to [`CommandDispatcher::invoke`].
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum InvokeOutcome {
    /// The command ran and was recorded in the undo history
    Invoked,

    /// The validator denied the command; it was not run and, unless it was
    /// waiting on the redo stack, it is now `Forbidden`
    Forbidden { denials: Vec<Denial> },
}

impl InvokeOutcome {
    pub fn is_invoked(&self) -> bool {
        matches!(self, Self::Invoked)
    }

    pub fn is_forbidden(&self) -> bool {
        matches!(self, Self::Forbidden { .. })
    }
}

/// Runs commands through a validator and keeps their undo/redo history.
///
/// Not internally synchronized: drive it from one context, or wrap it in a
/// mutex when several threads share it. Each instance is an independent
/// history, e.g. one per open document.
///
/// # Example
///
/// ```rust
/// use commander::commands::BlockCommand;
/// use commander::dispatcher::CommandDispatcher;
/// use commander::validation::{AppMode, AppValidator};
/// use std::sync::atomic::{AtomicI64, Ordering};
/// use std::sync::Arc;
///
/// let value = Arc::new(AtomicI64::new(0));
/// let add = |amount: i64| {
///     let (forward, backward) = (Arc::clone(&value), Arc::clone(&value));
///     BlockCommand::new(
///         move || { forward.fetch_add(amount, Ordering::SeqCst); },
///         move || { backward.fetch_sub(amount, Ordering::SeqCst); },
///     )
///     .into_ref()
/// };
///
/// let mut dispatcher = CommandDispatcher::new(AppValidator::new(AppMode::Full));
/// assert!(dispatcher.invoke(add(10)).unwrap().is_invoked());
/// assert!(dispatcher.invoke(add(5)).unwrap().is_invoked());
/// assert_eq!(value.load(Ordering::SeqCst), 15);
///
/// dispatcher.undo().unwrap();
/// assert_eq!(value.load(Ordering::SeqCst), 10);
///
/// dispatcher.redo().unwrap();
/// assert_eq!(value.load(Ordering::SeqCst), 15);
/// ```
pub struct CommandDispatcher {
    validator: Arc<dyn Validator>,
    commands: Vec<CommandRef>,
    undone_commands: Vec<CommandRef>,
    history_limit: Option<NonZeroUsize>,
    journal: Journal,
}

impl CommandDispatcher {
    /// Create a dispatcher with unlimited history.
    pub fn new(validator: impl Validator + 'static) -> Self {
        Self::with_validator(Arc::new(validator), &CommanderConfig::default())
    }

    /// Create a dispatcher whose validator and limits come from `config`.
    pub fn from_config(config: &CommanderConfig) -> Self {
        Self::with_validator(Arc::new(config.validator()), config)
    }

    /// Create a dispatcher sharing `validator`, with limits from `config`.
    pub fn with_validator(validator: Arc<dyn Validator>, config: &CommanderConfig) -> Self {
        Self {
            validator,
            commands: Vec::new(),
            undone_commands: Vec::new(),
            history_limit: config.history_limit,
            journal: Journal::with_capacity(config.journal_capacity),
        }
    }

    /// Validate and run `command`.
    ///
    /// When the validator denies it, the command is marked `Forbidden`, the
    /// stacks are left untouched and the denials are returned in
    /// [`InvokeOutcome::Forbidden`]. A denied command that sits on the redo
    /// stack keeps its state so it can still be redone. Otherwise the command runs, is pushed on
    /// the undo stack and the redo stack is cleared. Asynchronous commands
    /// are recorded as soon as they start.
    ///
    /// # Errors
    ///
    /// - [`CommandError::InvalidState`] when the command is executing or forbidden
    /// - [`CommandError::AlreadyInHistory`] when the command is already on the undo stack
    pub fn invoke(&mut self, command: CommandRef) -> CommandResult<InvokeOutcome> {
        let description = command.description();
        let state = command.state();
        if !state.is_invocable() {
            return Err(CommandError::InvalidState {
                command: description,
                state,
            });
        }
        if self.commands.iter().any(|c| c.id() == command.id()) {
            return Err(CommandError::AlreadyInHistory {
                command: description,
            });
        }

        if let Validation::Failure(denials) = self.validator.check(command.as_ref()) {
            // An undone command stays replayable; only fresh commands are forbidden.
            let in_redo_history = self.undone_commands.iter().any(|c| c.id() == command.id());
            if !in_redo_history {
                command.lifecycle().forbid(&description)?;
            }
            let denials: Vec<Denial> = denials.iter().cloned().collect();
            tracing::debug!(
                command = %command.id(),
                description = %description,
                denials = denials.len(),
                in_redo_history,
                "command forbidden by validator"
            );
            self.record(command.as_ref(), JournalAction::Forbidden);
            return Ok(InvokeOutcome::Forbidden { denials });
        }

        command.invoke()?;
        tracing::debug!(
            command = %command.id(),
            description = %description,
            asynchronous = command.is_asynchronous(),
            "command invoked"
        );
        self.record(command.as_ref(), JournalAction::Invoked);

        self.commands.push(command);
        self.undone_commands.clear();
        self.enforce_history_limit();

        Ok(InvokeOutcome::Invoked)
    }

    /// Undo the most recent command.
    ///
    /// # Errors
    ///
    /// [`CommandError::EmptyHistory`] when there is nothing to undo.
    pub fn undo(&mut self) -> CommandResult<()> {
        self.undo_many(1)
    }

    /// Undo up to `count` commands, most recent first.
    ///
    /// Each step is committed on its own: when the history runs out partway
    /// the completed steps stay undone and the error reports how many ran.
    ///
    /// # Errors
    ///
    /// [`CommandError::EmptyHistory`] when fewer than `count` commands remain.
    pub fn undo_many(&mut self, count: usize) -> CommandResult<()> {
        for completed in 0..count {
            let Some(command) = self.commands.pop() else {
                return Err(CommandError::EmptyHistory {
                    requested: count,
                    completed,
                });
            };

            if let Err(err) = command.inversed().invoke() {
                self.commands.push(command);
                return Err(err);
            }
            tracing::debug!(
                command = %command.id(),
                description = %command.description(),
                "command undone"
            );
            self.record(command.as_ref(), JournalAction::Undone);
            self.undone_commands.push(command);
        }
        Ok(())
    }

    /// Redo the most recently undone command.
    ///
    /// # Errors
    ///
    /// [`CommandError::EmptyRedoHistory`] when there is nothing to redo.
    pub fn redo(&mut self) -> CommandResult<()> {
        self.redo_many(1)
    }

    /// Redo up to `count` undone commands, most recent first.
    ///
    /// # Errors
    ///
    /// [`CommandError::EmptyRedoHistory`] when fewer than `count` undone
    /// commands remain; completed steps stay redone.
    pub fn redo_many(&mut self, count: usize) -> CommandResult<()> {
        for completed in 0..count {
            let Some(command) = self.undone_commands.pop() else {
                return Err(CommandError::EmptyRedoHistory {
                    requested: count,
                    completed,
                });
            };

            if let Err(err) = command.invoke() {
                self.undone_commands.push(command);
                return Err(err);
            }
            tracing::debug!(
                command = %command.id(),
                description = %command.description(),
                "command redone"
            );
            self.record(command.as_ref(), JournalAction::Redone);
            self.commands.push(command);
        }
        Ok(())
    }

    /// Undo stack, most recent last.
    pub fn commands(&self) -> &[CommandRef] {
        &self.commands
    }

    /// Redo stack, most recent last.
    pub fn undone_commands(&self) -> &[CommandRef] {
        &self.undone_commands
    }

    pub fn can_undo(&self) -> bool {
        !self.commands.is_empty()
    }

    pub fn can_redo(&self) -> bool {
        !self.undone_commands.is_empty()
    }

    pub fn undo_count(&self) -> usize {
        self.commands.len()
    }

    pub fn redo_count(&self) -> usize {
        self.undone_commands.len()
    }

    /// Description of the command the next undo would revert
    pub fn undo_description(&self) -> Option<String> {
        self.commands.last().map(|c| c.description())
    }

    /// Description of the command the next redo would replay
    pub fn redo_description(&self) -> Option<String> {
        self.undone_commands.last().map(|c| c.description())
    }

    pub fn validator(&self) -> &dyn Validator {
        self.validator.as_ref()
    }

    pub fn history_limit(&self) -> Option<NonZeroUsize> {
        self.history_limit
    }

    pub fn journal(&self) -> &Journal {
        &self.journal
    }

    /// Drop both stacks without running anything. The journal is kept.
    pub fn clear(&mut self) {
        self.commands.clear();
        self.undone_commands.clear();
    }

    fn enforce_history_limit(&mut self) {
        let Some(limit) = self.history_limit else {
            return;
        };
        let excess = self.commands.len().saturating_sub(limit.get());
        if excess > 0 {
            self.commands.drain(..excess);
            tracing::debug!(dropped = excess, limit = limit.get(), "trimmed undo history");
        }
    }

    fn record(&mut self, command: &dyn Command, action: JournalAction) {
        self.journal.record(JournalEntry {
            command: command.id(),
            description: command.description(),
            action,
            timestamp: Utc::now(),
        });
    }
}

impl fmt::Debug for CommandDispatcher {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CommandDispatcher")
            .field("commands", &self.commands.len())
            .field("undone_commands", &self.undone_commands.len())
            .field("history_limit", &self.history_limit)
            .field("journal", &self.journal.len())
            .finish()
    }
}
