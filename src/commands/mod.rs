//! Built-in command variants.
//!
//! Domain-specific commands implement [`Command`](crate::core::Command)
//! directly; these two cover the generic cases:
//! - `BlockCommand`: a forward and an inverse closure
//! - `GroupCommand`: an ordered sequence of commands treated as one

mod block;
mod group;

pub use block::{Block, BlockCommand};
pub use group::GroupCommand;
