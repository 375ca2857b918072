//! Core command types.
//!
//! This module contains the building blocks every command shares:
//! - The `Command` trait and the shared `CommandRef` handle
//! - Lifecycle states and the thread-safe `Lifecycle` cell
//! - The crate error type

mod command;
mod error;
mod lifecycle;
mod state;

pub use command::{Command, CommandRef};
pub use error::{CommandError, CommandResult};
pub use lifecycle::{CommandId, Completion, Lifecycle};
pub use state::CommandState;
