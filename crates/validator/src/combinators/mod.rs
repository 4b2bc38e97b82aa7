//! Field rules: the units a [`Validator`](crate::Validator) walks
//!
//! Each declaration on the builder becomes one [`FieldRule`]:
//!
//! - **Plain** ([`field`]): extract a value, evaluate its constraint rules
//! - **Nested** ([`nested`]): extract a child, run its validator under a
//!   prefixed name
//! - **Collection** ([`each`]): run an element validator per element under
//!   `name[i]`
//! - **Conditional** ([`when`]): run a validator only when a condition on
//!   `(target, context)` holds
//!
//! Rules are type-erased behind [`FieldCheck`] so a validator can hold rules
//! over fields of different types in declaration order.

use std::fmt;
use std::ops::ControlFlow;
use std::sync::Arc;

use crate::core::{ConstraintViolation, ConstraintViolations};
use crate::foundation::{ConstraintContext, Locale, MessageFormatter};

pub(crate) mod each;
pub(crate) mod field;
pub(crate) mod nested;
pub(crate) mod when;

// ============================================================================
// FIELD RULE
// ============================================================================

/// The shape of a field rule.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FieldKind {
    /// Constraint rules over a single extracted value.
    Plain,
    /// A child validator over an extracted object.
    Nested,
    /// An element validator over every element of a collection.
    Collection,
    /// A validator that only runs when a condition holds.
    Conditional,
}

/// One declared rule of a validator.
pub struct FieldRule<T: ?Sized> {
    name: String,
    kind: FieldKind,
    check: Arc<dyn FieldCheck<T>>,
}

impl<T: ?Sized> FieldRule<T> {
    pub(crate) fn new(
        name: impl Into<String>,
        kind: FieldKind,
        check: impl FieldCheck<T> + 'static,
    ) -> Self {
        Self {
            name: name.into(),
            kind,
            check: Arc::new(check),
        }
    }

    /// Returns the field name. Empty for conditional rules.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Returns the rule kind.
    pub fn kind(&self) -> FieldKind {
        self.kind
    }

    pub(crate) fn check(&self, target: &T, prefix: &str, scope: &mut Scope<'_>) -> ControlFlow<()> {
        self.check.check(target, prefix, scope)
    }
}

impl<T: ?Sized> Clone for FieldRule<T> {
    fn clone(&self) -> Self {
        Self {
            name: self.name.clone(),
            kind: self.kind,
            check: Arc::clone(&self.check),
        }
    }
}

impl<T: ?Sized> fmt::Debug for FieldRule<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FieldRule")
            .field("name", &self.name)
            .field("kind", &self.kind)
            .finish_non_exhaustive()
    }
}

/// Evaluates one field rule against a target.
///
/// Returns `Break` when a violation was reported under fail-fast and the
/// whole traversal must stop.
pub(crate) trait FieldCheck<T: ?Sized>: Send + Sync {
    fn check(&self, target: &T, prefix: &str, scope: &mut Scope<'_>) -> ControlFlow<()>;
}

// ============================================================================
// SCOPE
// ============================================================================

/// Per-call state threaded through a traversal.
///
/// Locale, context, separator and formatter are those of the root call;
/// `fail_fast` is the effective flag of the validator currently running.
pub(crate) struct Scope<'a> {
    pub(crate) locale: &'a Locale,
    pub(crate) context: &'a ConstraintContext,
    pub(crate) formatter: &'a Arc<dyn MessageFormatter>,
    pub(crate) fail_fast: bool,
    separator: &'a str,
    violations: ConstraintViolations,
}

impl<'a> Scope<'a> {
    pub(crate) fn new(
        locale: &'a Locale,
        context: &'a ConstraintContext,
        formatter: &'a Arc<dyn MessageFormatter>,
        separator: &'a str,
    ) -> Self {
        Self {
            locale,
            context,
            formatter,
            fail_fast: false,
            separator,
            violations: ConstraintViolations::new(),
        }
    }

    /// Joins `prefix` and `name` with the separator. Either side may be
    /// empty.
    pub(crate) fn path(&self, prefix: &str, name: &str) -> String {
        if prefix.is_empty() {
            name.to_owned()
        } else if name.is_empty() {
            prefix.to_owned()
        } else {
            format!("{prefix}{}{name}", self.separator)
        }
    }

    pub(crate) fn report(&mut self, violation: ConstraintViolation) -> ControlFlow<()> {
        if self.fail_fast {
            tracing::trace!(field = violation.name(), "fail-fast: halting validation");
            self.violations.push(violation);
            ControlFlow::Break(())
        } else {
            self.violations.push(violation);
            ControlFlow::Continue(())
        }
    }

    pub(crate) fn into_violations(self) -> ConstraintViolations {
        self.violations
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::foundation::SimpleMessageFormatter;

    #[test]
    fn test_path_joining() {
        let formatter: Arc<dyn MessageFormatter> = Arc::new(SimpleMessageFormatter);
        let context = ConstraintContext::default();
        let locale = Locale::ROOT;
        let scope = Scope::new(&locale, &context, &formatter, ".");
        assert_eq!(scope.path("", "name"), "name");
        assert_eq!(scope.path("country", ""), "country");
        assert_eq!(scope.path("country", "name"), "country.name");
        assert_eq!(scope.path("items[0]", "x"), "items[0].x");
    }
}
