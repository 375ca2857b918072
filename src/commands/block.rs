//! Closure-backed command.

use crate::core::{Command, CommandRef, Completion, Lifecycle};
use std::fmt;
use std::sync::Arc;

/// Body of a [`BlockCommand`]. Receives the completion handle of the run.
pub type Block = Arc<dyn Fn(Completion) + Send + Sync>;

/// A command built from a forward closure and an inverse closure.
///
/// Covers the common case where a dedicated command type would only forward
/// to two functions.
///
/// # Example
///
/// ```rust
/// use commander::commands::BlockCommand;
/// use commander::core::Command;
/// use std::sync::{Arc, Mutex};
///
/// let title = Arc::new(Mutex::new(String::new()));
/// let (forward, backward) = (Arc::clone(&title), Arc::clone(&title));
///
/// let rename = BlockCommand::new(
///     move || *forward.lock().unwrap() = "A Shape".to_string(),
///     move || backward.lock().unwrap().clear(),
/// )
/// .described("rename shape");
///
/// rename.invoke().unwrap();
/// assert_eq!(*title.lock().unwrap(), "A Shape");
///
/// rename.inversed().invoke().unwrap();
/// assert!(title.lock().unwrap().is_empty());
/// ```
pub struct BlockCommand {
    block: Block,
    inverse_block: Block,
    is_asynchronous: bool,
    is_mutating: bool,
    description: String,
    inverted: bool,
    lifecycle: Lifecycle,
}

impl BlockCommand {
    /// Create a synchronous, mutating command.
    pub fn new<F, G>(block: F, inverse_block: G) -> Self
    where
        F: Fn() + Send + Sync + 'static,
        G: Fn() + Send + Sync + 'static,
    {
        Self::from_blocks(
            Arc::new(move |_: Completion| block()),
            Arc::new(move |_: Completion| inverse_block()),
            false,
        )
    }

    /// Create an asynchronous, mutating command.
    ///
    /// Each closure receives the run's [`Completion`] and must call
    /// [`Completion::complete`] once its background work is done. Until then
    /// the command stays `Executing`.
    pub fn asynchronous<F, G>(block: F, inverse_block: G) -> Self
    where
        F: Fn(Completion) + Send + Sync + 'static,
        G: Fn(Completion) + Send + Sync + 'static,
    {
        Self::from_blocks(Arc::new(block), Arc::new(inverse_block), true)
    }

    fn from_blocks(block: Block, inverse_block: Block, is_asynchronous: bool) -> Self {
        Self {
            block,
            inverse_block,
            is_asynchronous,
            is_mutating: true,
            description: String::from("block"),
            inverted: false,
            lifecycle: Lifecycle::new(),
        }
    }

    /// Override whether the command counts as mutating.
    pub fn mutating(mut self, is_mutating: bool) -> Self {
        self.is_mutating = is_mutating;
        self
    }

    pub fn described(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    pub fn into_ref(self) -> CommandRef {
        Arc::new(self)
    }
}

impl Command for BlockCommand {
    fn perform(&self, completion: Completion) {
        (self.block)(completion);
    }

    fn inversed(&self) -> CommandRef {
        Arc::new(Self {
            block: Arc::clone(&self.inverse_block),
            inverse_block: Arc::clone(&self.block),
            is_asynchronous: self.is_asynchronous,
            is_mutating: self.is_mutating,
            description: self.description.clone(),
            inverted: !self.inverted,
            lifecycle: Lifecycle::new(),
        })
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
        if self.inverted {
            format!("undo {}", self.description)
        } else {
            self.description.clone()
        }
    }
}

impl fmt::Debug for BlockCommand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("BlockCommand")
            .field("description", &self.description())
            .field("is_asynchronous", &self.is_asynchronous)
            .field("is_mutating", &self.is_mutating)
            .field("lifecycle", &self.lifecycle)
            .finish()
    }
}
