//! Composite command running an ordered sequence of children as one unit.

use crate::core::{Command, CommandError, CommandRef, CommandResult, Completion, Lifecycle};
use std::fmt;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

/// An ordered group of commands invoked and undone as a single unit.
///
/// Children run in insertion order. When a child is asynchronous the next
/// child starts only after it finishes, and the group finishes after its last
/// child. The group's inverse runs the inverse of every child in reverse
/// order, so sequential effects unwind last-applied first.
///
/// Children are not validated individually: a dispatcher validates the group
/// as a whole.
///
/// # Example
///
/// ```rust
/// use commander::commands::{BlockCommand, GroupCommand};
/// use commander::core::Command;
/// use std::sync::atomic::{AtomicI64, Ordering};
/// use std::sync::Arc;
///
/// let value = Arc::new(AtomicI64::new(0));
/// let (forward, backward) = (Arc::clone(&value), Arc::clone(&value));
/// let add = BlockCommand::new(
///     move || { forward.fetch_add(5, Ordering::SeqCst); },
///     move || { backward.fetch_sub(5, Ordering::SeqCst); },
/// )
/// .into_ref();
///
/// let identity = GroupCommand::new([add.clone(), add.inversed()]);
/// identity.invoke().unwrap();
/// assert_eq!(value.load(Ordering::SeqCst), 0);
/// ```
pub struct GroupCommand {
    children: Arc<[CommandRef]>,
    is_asynchronous: bool,
    is_mutating: bool,
    description: Option<String>,
    inverted: bool,
    lifecycle: Lifecycle,
}

impl GroupCommand {
    /// Create a group. An empty group is a no-op that still finishes.
    pub fn new(children: impl IntoIterator<Item = CommandRef>) -> Self {
        Self::from_children(children.into_iter().collect(), None, false)
    }

    fn from_children(
        children: Arc<[CommandRef]>,
        description: Option<String>,
        inverted: bool,
    ) -> Self {
        let is_asynchronous = children.iter().any(|c| c.is_asynchronous());
        let is_mutating = children.iter().any(|c| c.is_mutating());
        Self {
            children,
            is_asynchronous,
            is_mutating,
            description,
            inverted,
            lifecycle: Lifecycle::new(),
        }
    }

    pub fn described(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    pub fn children(&self) -> &[CommandRef] {
        &self.children
    }

    pub fn len(&self) -> usize {
        self.children.len()
    }

    pub fn is_empty(&self) -> bool {
        self.children.is_empty()
    }

    pub fn into_ref(self) -> CommandRef {
        Arc::new(self)
    }
}

/// Run children from `start`, suspending on the first asynchronous child and
/// resuming from its finish hook.
fn run_children(children: Arc<[CommandRef]>, start: usize, group: Completion) {
    for index in start..children.len() {
        let child = &children[index];

        if child.is_asynchronous() {
            // The hook must only resume the group for the run started here.
            let expected_run = child.lifecycle().runs() + 1;
            let armed = Arc::new(AtomicBool::new(true));
            let rest = Arc::clone(&children);
            let resume = group.clone();
            let hook_armed = Arc::clone(&armed);
            child.lifecycle().on_finish(move || {
                let finished_run = rest[index].lifecycle().runs();
                if hook_armed.load(Ordering::SeqCst) && finished_run == expected_run {
                    run_children(rest, index + 1, resume);
                }
            });

            if let Err(err) = child.invoke() {
                armed.store(false, Ordering::SeqCst);
                tracing::error!(
                    group = %group.command(),
                    child = index,
                    error = %err,
                    "group child failed to start; group will not finish"
                );
            }
            return;
        }

        if let Err(err) = child.invoke() {
            tracing::error!(
                group = %group.command(),
                child = index,
                error = %err,
                "group child failed to start; group will not finish"
            );
            return;
        }
    }

    group.complete();
}

impl Command for GroupCommand {
    fn perform(&self, completion: Completion) {
        run_children(Arc::clone(&self.children), 0, completion);
    }

    fn inversed(&self) -> CommandRef {
        let children: Arc<[CommandRef]> =
            self.children.iter().rev().map(|c| c.inversed()).collect();
        Arc::new(Self::from_children(
            children,
            self.description.clone(),
            !self.inverted,
        ))
    }

    fn lifecycle(&self) -> &Lifecycle {
        &self.lifecycle
    }

    fn is_asynchronous(&self) -> bool {
        self.is_asynchronous
    }

    fn is_mutating(&self) -> bool {
        self.is_mutating
    }

    fn description(&self) -> String {
        let base = self
            .description
            .clone()
            .unwrap_or_else(|| format!("group of {} command(s)", self.children.len()));
        if self.inverted {
            format!("undo {base}")
        } else {
            base
        }
    }

    /// Check the group and every child can start before running anything,
    /// so a rejected group leaves no partial effects behind.
    fn invoke(&self) -> CommandResult<()> {
        let state = self.state();
        if !state.is_invocable() {
            return Err(CommandError::InvalidState {
                command: self.description(),
                state,
            });
        }
        if let Some(child) = self.children.iter().find(|c| !c.state().is_invocable()) {
            return Err(CommandError::InvalidState {
                command: child.description(),
                state: child.state(),
            });
        }

        let completion = self.lifecycle.begin(&self.description())?;
        self.perform(completion);
        Ok(())
    }
}

impl fmt::Debug for GroupCommand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("GroupCommand")
            .field("description", &self.description())
            .field("children", &self.children.len())
            .field("is_asynchronous", &self.is_asynchronous)
            .field("is_mutating", &self.is_mutating)
            .field("lifecycle", &self.lifecycle)
            .finish()
    }
}
