//! The `Command` trait: a reversible unit of work.

use crate::core::error::CommandResult;
use crate::core::lifecycle::{CommandId, Completion, Lifecycle};
use crate::core::state::CommandState;
use std::sync::Arc;

/// Shared handle to a command.
///
/// Commands are shared between the caller, the dispatcher's stacks and any
/// group containing them, so state changes are visible to every holder.
pub type CommandRef = Arc<dyn Command>;

/// A reversible unit of work.
///
/// Implementors provide the forward body in [`perform`](Self::perform) and a
/// way to build the inverse in [`inversed`](Self::inversed). Lifecycle
/// bookkeeping is handled by the provided [`invoke`](Self::invoke).
///
/// # Example
///
/// ```rust
/// use commander::core::{Command, CommandRef, CommandState, Completion, Lifecycle};
/// use std::sync::{Arc, Mutex};
///
/// struct Add {
///     target: Arc<Mutex<i64>>,
///     amount: i64,
///     lifecycle: Lifecycle,
/// }
///
/// impl Command for Add {
///     fn perform(&self, _completion: Completion) {
///         *self.target.lock().unwrap() += self.amount;
///     }
///
///     fn inversed(&self) -> CommandRef {
///         Arc::new(Add {
///             target: Arc::clone(&self.target),
///             amount: -self.amount,
///             lifecycle: Lifecycle::new(),
///         })
///     }
///
///     fn lifecycle(&self) -> &Lifecycle {
///         &self.lifecycle
///     }
/// }
///
/// let value = Arc::new(Mutex::new(0));
/// let add = Add { target: Arc::clone(&value), amount: 10, lifecycle: Lifecycle::new() };
///
/// add.invoke().unwrap();
/// assert_eq!(*value.lock().unwrap(), 10);
/// assert_eq!(add.state(), CommandState::Finished);
///
/// add.inversed().invoke().unwrap();
/// assert_eq!(*value.lock().unwrap(), 0);
/// ```
pub trait Command: Send + Sync {
    /// Apply the command's effect.
    ///
    /// Asynchronous commands must arrange for `completion.complete()` to be
    /// called exactly once when their work ends. Synchronous commands may
    /// ignore the handle.
    fn perform(&self, completion: Completion);

    /// Build a new command that undoes this one. Must not mutate `self`.
    fn inversed(&self) -> CommandRef;

    fn lifecycle(&self) -> &Lifecycle;

    /// Whether the command completes on its own schedule.
    fn is_asynchronous(&self) -> bool {
        false
    }

    /// Whether the command mutates application state. Read-only validators
    /// deny mutating commands.
    fn is_mutating(&self) -> bool {
        true
    }

    /// Human-readable label used in logs and the journal.
    fn description(&self) -> String {
        String::from("command")
    }

    /// Run the command.
    ///
    /// Moves to `Executing`, performs the body and, for synchronous commands,
    /// moves to `Finished` before returning.
    ///
    /// # Errors
    ///
    /// [`CommandError::InvalidState`](crate::core::CommandError::InvalidState)
    /// when the command is still executing or has been forbidden.
    fn invoke(&self) -> CommandResult<()> {
        let completion = self.lifecycle().begin(&self.description())?;
        self.perform(completion.clone());
        if !self.is_asynchronous() {
            completion.complete();
        }
        Ok(())
    }

    fn state(&self) -> CommandState {
        self.lifecycle().state()
    }

    /// Signal that asynchronous work has completed.
    fn finish(&self) -> bool {
        self.lifecycle().finish()
    }

    fn id(&self) -> CommandId {
        self.lifecycle().id()
    }
}
