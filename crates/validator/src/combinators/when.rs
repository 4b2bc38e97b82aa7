//! Conditional rules: run a validator only when a condition holds

use std::ops::ControlFlow;

use crate::Validator;
use crate::combinators::{FieldCheck, Scope};
use crate::foundation::ConstraintContext;

/// Runs `validator` against the same target, without a name prefix, when
/// `condition(target, context)` holds.
pub(crate) struct When<T: ?Sized, C> {
    condition: C,
    validator: Validator<T>,
}

impl<T: ?Sized, C> When<T, C> {
    pub(crate) fn new(condition: C, validator: Validator<T>) -> Self {
        Self {
            condition,
            validator,
        }
    }
}

impl<T, C> FieldCheck<T> for When<T, C>
where
    T: ?Sized,
    C: Fn(&T, &ConstraintContext) -> bool + Send + Sync,
{
    fn check(&self, target: &T, prefix: &str, scope: &mut Scope<'_>) -> ControlFlow<()> {
        if (self.condition)(target, scope.context) {
            self.validator.run(target, prefix, scope)
        } else {
            ControlFlow::Continue(())
        }
    }
}
