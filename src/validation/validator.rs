//! Validators deciding whether a command may run.

use crate::core::Command;
use crate::validation::denial::Denial;
use crate::validation::mode::AppMode;
use stillwater::validation::Validation;
use stillwater::NonEmptyVec;

/// Type alias for custom validation check functions
pub type ValidationCheck =
    Box<dyn Fn(&dyn Command) -> Validation<(), NonEmptyVec<Denial>> + Send + Sync>;

/// Policy gate consulted by the dispatcher before a command runs.
///
/// Implementations must be pure over their configuration: the same command
/// always gets the same answer, and concurrent calls are safe.
pub trait Validator: Send + Sync {
    /// Check `command`, accumulating every denial.
    fn check(&self, command: &dyn Command) -> Validation<(), NonEmptyVec<Denial>>;

    fn can_invoke(&self, command: &dyn Command) -> bool {
        self.check(command).is_success()
    }
}

/// Validator driven by an [`AppMode`] plus optional custom checks.
///
/// # Example
///
/// ```rust
/// use commander::commands::BlockCommand;
/// use commander::validation::{AppMode, AppValidator, Validator};
///
/// let validator = AppValidator::new(AppMode::ReadOnly);
///
/// let edit = BlockCommand::new(|| {}, || {});
/// let inspect = BlockCommand::new(|| {}, || {}).mutating(false);
///
/// assert!(!validator.can_invoke(&edit));
/// assert!(validator.can_invoke(&inspect));
/// ```
pub struct AppValidator {
    pub(crate) mode: AppMode,
    pub(crate) required_checks: Vec<ValidationCheck>,
}

impl AppValidator {
    pub fn new(mode: AppMode) -> Self {
        Self {
            mode,
            required_checks: Vec::new(),
        }
    }

    pub fn mode(&self) -> AppMode {
        self.mode
    }
}

impl Default for AppValidator {
    fn default() -> Self {
        Self::new(AppMode::default())
    }
}

impl Validator for AppValidator {
    fn check(&self, command: &dyn Command) -> Validation<(), NonEmptyVec<Denial>> {
        let mut checks: Vec<Validation<(), NonEmptyVec<Denial>>> = Vec::new();

        let mode_check = if self.mode.permits(command) {
            Validation::success(())
        } else {
            Validation::fail(Denial::MutationForbidden {
                command: command.description(),
                mode: self.mode,
            })
        };
        checks.push(mode_check);

        for check_fn in &self.required_checks {
            checks.push(check_fn(command));
        }

        Validation::all_vec(checks).map(|_| ())
    }
}

impl std::fmt::Debug for AppValidator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppValidator")
            .field("mode", &self.mode)
            .field("required_checks", &self.required_checks.len())
            .finish()
    }
}
