//! Validation gate deciding whether a command may run.
//!
//! Validators use Stillwater's `Validation` type so every denial is
//! reported at once instead of stopping at the first.
//!
//! # Example
//!
//! ```rust
//! use commander::validation::{AppMode, ValidatorBuilder, Validator};
//! use commander::commands::BlockCommand;
//!
//! let validator = ValidatorBuilder::new()
//!     .mode(AppMode::Full)
//!     .require_pred(|cmd| !cmd.is_asynchronous(), "No background work".to_string())
//!     .build();
//!
//! assert!(validator.can_invoke(&BlockCommand::new(|| {}, || {})));
//! ```

pub mod builder;
pub mod denial;
pub mod mode;
pub mod validator;

pub use builder::ValidatorBuilder;
pub use denial::Denial;
pub use mode::AppMode;
pub use validator::{AppValidator, ValidationCheck, Validator};
