//! Builder API for validators with custom checks.

use crate::core::Command;
use crate::validation::denial::Denial;
use crate::validation::mode::AppMode;
use crate::validation::validator::{AppValidator, ValidationCheck};
use stillwater::validation::Validation;
use stillwater::NonEmptyVec;

/// Builder for creating an [`AppValidator`]
pub struct ValidatorBuilder {
    mode: AppMode,
    required_checks: Vec<ValidationCheck>,
}

impl ValidatorBuilder {
    pub fn new() -> Self {
        Self {
            mode: AppMode::default(),
            required_checks: Vec::new(),
        }
    }

    /// Set the application mode
    pub fn mode(mut self, mode: AppMode) -> Self {
        self.mode = mode;
        self
    }

    /// Add a custom validation check
    pub fn require<F>(mut self, check: F) -> Self
    where
        F: Fn(&dyn Command) -> Validation<(), NonEmptyVec<Denial>> + Send + Sync + 'static,
    {
        self.required_checks.push(Box::new(check));
        self
    }

    /// Add a simple predicate check with error message
    pub fn require_pred<F>(mut self, predicate: F, error_msg: String) -> Self
    where
        F: Fn(&dyn Command) -> bool + Send + Sync + 'static,
    {
        let check = move |command: &dyn Command| {
            if predicate(command) {
                Validation::success(())
            } else {
                Validation::fail(Denial::CustomCheckFailed {
                    message: error_msg.clone(),
                })
            }
        };
        self.required_checks.push(Box::new(check));
        self
    }

    pub fn build(self) -> AppValidator {
        AppValidator {
            mode: self.mode,
            required_checks: self.required_checks,
        }
    }
}

impl Default for ValidatorBuilder {
    fn default() -> Self {
        Self::new()
    }
}
