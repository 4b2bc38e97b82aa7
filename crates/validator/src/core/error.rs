//! Error type for callers that prefer `Result` propagation over inspecting
//! [`ConstraintViolations`] directly.

use crate::core::ConstraintViolations;

/// Returned when a validation that was expected to pass did not.
///
/// The `Display` form lists one `* message` line per violation.
#[derive(Debug, Clone, thiserror::Error)]
#[error("Constraint violations found!\n{violations}")]
pub struct ConstraintViolationsError {
    violations: ConstraintViolations,
}

impl ConstraintViolationsError {
    /// Wraps a non-empty set of violations.
    pub fn new(violations: ConstraintViolations) -> Self {
        Self { violations }
    }

    /// Returns the violations.
    pub fn violations(&self) -> &ConstraintViolations {
        &self.violations
    }

    /// Consumes the error, returning the violations.
    pub fn into_violations(self) -> ConstraintViolations {
        self.violations
    }
}

impl From<ConstraintViolations> for ConstraintViolationsError {
    fn from(violations: ConstraintViolations) -> Self {
        Self::new(violations)
    }
}
