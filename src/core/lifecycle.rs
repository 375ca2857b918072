//! Thread-safe lifecycle cell shared by a command and its completion handles.

use crate::core::error::{CommandError, CommandResult};
use crate::core::state::CommandState;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use uuid::Uuid;

/// Unique identity of a command instance.
///
/// An inverse is a distinct command and gets its own id.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug, Serialize, Deserialize)]
pub struct CommandId(Uuid);

impl CommandId {
    /// Generate a fresh random id.
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }

    pub fn as_uuid(&self) -> &Uuid {
        &self.0
    }
}

impl Default for CommandId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for CommandId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.0, f)
    }
}

type FinishHook = Box<dyn FnOnce() + Send>;

struct Inner {
    state: CommandState,
    run: u64,
    on_finish: Vec<FinishHook>,
}

fn lock(inner: &Mutex<Inner>) -> MutexGuard<'_, Inner> {
    inner.lock().unwrap_or_else(PoisonError::into_inner)
}

/// Finish `run` if it is still the active run. Hooks fire after the lock is
/// released so they may invoke further commands.
fn finish_run(id: CommandId, inner: &Mutex<Inner>, run: u64) -> bool {
    let hooks = {
        let mut guard = lock(inner);
        if guard.state != CommandState::Executing || guard.run != run {
            tracing::warn!(
                command = %id,
                state = %guard.state,
                run,
                "ignoring completion of a run that is not executing"
            );
            return false;
        }
        guard.state = CommandState::Finished;
        std::mem::take(&mut guard.on_finish)
    };

    tracing::trace!(command = %id, run, "command finished");
    for hook in hooks {
        hook();
    }
    true
}

/// State cell owned by every command.
///
/// Holds the current [`CommandState`], the command's [`CommandId`] and a run
/// counter. Transitions are serialized behind a mutex so asynchronous workers
/// can complete a command from another thread.
///
/// # Example
///
/// ```rust
/// use commander::core::{CommandState, Lifecycle};
///
/// let lifecycle = Lifecycle::new();
/// let completion = lifecycle.begin("example").unwrap();
/// assert_eq!(lifecycle.state(), CommandState::Executing);
///
/// assert!(completion.complete());
/// assert_eq!(lifecycle.state(), CommandState::Finished);
///
/// // A second signal for the same run is ignored.
/// assert!(!completion.complete());
/// ```
pub struct Lifecycle {
    id: CommandId,
    inner: Arc<Mutex<Inner>>,
}

impl Lifecycle {
    pub fn new() -> Self {
        Self {
            id: CommandId::new(),
            inner: Arc::new(Mutex::new(Inner {
                state: CommandState::Ready,
                run: 0,
                on_finish: Vec::new(),
            })),
        }
    }

    pub fn id(&self) -> CommandId {
        self.id
    }

    pub fn state(&self) -> CommandState {
        lock(&self.inner).state
    }

    /// Number of runs started so far.
    pub fn runs(&self) -> u64 {
        lock(&self.inner).run
    }

    /// Start a new run, returning the handle that completes it.
    ///
    /// `command` is only used to describe the command in errors.
    ///
    /// # Errors
    ///
    /// [`CommandError::InvalidState`] when the command is still executing or
    /// has been forbidden.
    pub fn begin(&self, command: &str) -> CommandResult<Completion> {
        let mut guard = lock(&self.inner);
        if !guard.state.is_invocable() {
            return Err(CommandError::InvalidState {
                command: command.to_string(),
                state: guard.state,
            });
        }
        guard.state = CommandState::Executing;
        guard.run += 1;

        Ok(Completion {
            id: self.id,
            run: guard.run,
            inner: Arc::clone(&self.inner),
        })
    }

    /// Mark the command as denied.
    ///
    /// # Errors
    ///
    /// [`CommandError::InvalidState`] unless the command is ready or finished.
    pub fn forbid(&self, command: &str) -> CommandResult<()> {
        let mut guard = lock(&self.inner);
        if !guard.state.is_invocable() {
            return Err(CommandError::InvalidState {
                command: command.to_string(),
                state: guard.state,
            });
        }
        guard.state = CommandState::Forbidden;
        Ok(())
    }

    /// Finish the active run, if any. Returns whether a transition happened.
    pub fn finish(&self) -> bool {
        let run = lock(&self.inner).run;
        finish_run(self.id, &self.inner, run)
    }

    /// Register a one-shot hook fired on the next transition to `Finished`.
    pub fn on_finish<F>(&self, hook: F)
    where
        F: FnOnce() + Send + 'static,
    {
        lock(&self.inner).on_finish.push(Box::new(hook));
    }
}

impl Default for Lifecycle {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for Lifecycle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let guard = lock(&self.inner);
        f.debug_struct("Lifecycle")
            .field("id", &self.id)
            .field("state", &guard.state)
            .field("run", &guard.run)
            .finish()
    }
}

/// Completion signal for one run of a command.
///
/// Synchronous commands are completed by [`Command::invoke`](crate::core::Command::invoke).
/// Asynchronous commands hand a clone to their worker, which calls
/// [`complete`](Self::complete) once the background work is done.
#[derive(Clone)]
pub struct Completion {
    id: CommandId,
    run: u64,
    inner: Arc<Mutex<Inner>>,
}

impl Completion {
    /// Finish the run. Only the first call for a run has any effect.
    pub fn complete(&self) -> bool {
        finish_run(self.id, &self.inner, self.run)
    }

    pub fn is_complete(&self) -> bool {
        let guard = lock(&self.inner);
        guard.run != self.run || guard.state != CommandState::Executing
    }

    pub fn command(&self) -> CommandId {
        self.id
    }
}

impl fmt::Debug for Completion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Completion")
            .field("command", &self.id)
            .field("run", &self.run)
            .finish()
    }
}
