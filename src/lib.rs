//! Commander: reversible, composable commands with undo/redo history.
//!
//! Mutations are expressed as command objects that know how to build their
//! own inverse. A [`CommandDispatcher`] runs them through a [`Validator`],
//! records what ran and replays history backwards (undo) or forwards (redo).
//!
//! # Core Concepts
//!
//! - **Command**: a reversible unit of work with an explicit lifecycle
//! - **BlockCommand / GroupCommand**: closure-backed and composite commands
//! - **Validator**: policy gate driven by the application mode
//! - **CommandDispatcher**: validated invocation plus undo/redo stacks
//!
//! # Example
//!
//! ```rust
//! use commander::commands::BlockCommand;
//! use commander::core::{Command, CommandState};
//! use commander::{AppMode, AppValidator, CommandDispatcher};
//! use std::sync::{Arc, Mutex};
//!
//! let title = Arc::new(Mutex::new(String::from("Untitled")));
//! let rename = |to: &str| {
//!     let (forward, backward) = (Arc::clone(&title), Arc::clone(&title));
//!     let (to, from) = (to.to_string(), title.lock().unwrap().clone());
//!     BlockCommand::new(
//!         move || *forward.lock().unwrap() = to.clone(),
//!         move || *backward.lock().unwrap() = from.clone(),
//!     )
//!     .into_ref()
//! };
//!
//! let mut editor = CommandDispatcher::new(AppValidator::new(AppMode::Full));
//! editor.invoke(rename("Draft")).unwrap();
//! assert_eq!(*title.lock().unwrap(), "Draft");
//!
//! editor.undo().unwrap();
//! assert_eq!(*title.lock().unwrap(), "Untitled");
//!
//! let mut viewer = CommandDispatcher::new(AppValidator::new(AppMode::ReadOnly));
//! let denied = rename("Final");
//! assert!(viewer.invoke(Arc::clone(&denied)).unwrap().is_forbidden());
//! assert_eq!(denied.state(), CommandState::Forbidden);
//! assert_eq!(*title.lock().unwrap(), "Untitled");
//! ```

pub mod commands;
pub mod config;
pub mod core;
pub mod dispatcher;
pub mod validation;

// Re-export commonly used types
pub use commands::{BlockCommand, GroupCommand};
pub use config::{CommanderConfig, ConfigError};
pub use crate::core::{Command, CommandError, CommandRef, CommandState, Completion};
pub use dispatcher::{CommandDispatcher, InvokeOutcome};
pub use validation::{AppMode, AppValidator, Validator};
