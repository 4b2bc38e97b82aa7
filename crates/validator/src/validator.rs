//! The validator engine
//!
//! A [`Validator`] is an immutable, shareable list of [`FieldRule`]s plus
//! its options. `validate` walks the rules in declaration order and returns
//! every violation found, or only the first one under fail-fast.
//!
//! # Fail-fast propagation
//!
//! The effective fail-fast flag inside a child validator (nested, element or
//! conditional) is `parent || child`. Once a violation is reported under an
//! effective flag the traversal unwinds up to the outermost validator whose
//! own effective flag was set: a parent running in fail-fast stops
//! everything, while a child that alone is fail-fast only stops itself.

use std::borrow::Cow;
use std::fmt;
use std::ops::ControlFlow;
use std::sync::Arc;

use crate::applicative::Applicative;
use crate::builder::ValidatorBuilder;
use crate::combinators::nested::Nested;
use crate::combinators::{FieldKind, FieldRule, Scope};
use crate::core::ConstraintViolations;
use crate::foundation::{ConstraintContext, Locale, MessageFormatter, ToArg};
use crate::validators::Constraint;

struct Inner<T: ?Sized> {
    rules: Vec<FieldRule<T>>,
    fail_fast: bool,
    separator: Cow<'static, str>,
    formatter: Arc<dyn MessageFormatter>,
}

// ============================================================================
// VALIDATOR
// ============================================================================

/// A reusable, thread-safe validator for values of type `T`.
///
/// Cloning is a reference-count bump.
///
/// # Examples
///
/// ```rust,ignore
/// use warden_validator::prelude::*;
///
/// struct Country { name: String }
///
/// let validator = ValidatorBuilder::<Country>::new()
///     .constraint(|c| &c.name, "name", |c| c.not_blank().max_length(64))
///     .build();
///
/// let violations = validator.validate(&Country { name: " ".into() });
/// assert_eq!(violations[0].message(), "\"name\" must not be blank");
/// ```
pub struct Validator<T: ?Sized> {
    inner: Arc<Inner<T>>,
}

impl<T: ?Sized + 'static> Validator<T> {
    /// Starts a new builder.
    pub fn builder() -> ValidatorBuilder<T> {
        ValidatorBuilder::new()
    }

    /// Builds a validator for a single value named `name`.
    ///
    /// ```rust,ignore
    /// let phone = Validator::<str>::of("phoneNumber", |c| c.not_blank().min_length(8));
    /// ```
    pub fn of<F>(name: impl Into<String>, rules: F) -> Self
    where
        T: ToArg,
        F: FnOnce(Constraint<T>) -> Constraint<T>,
    {
        ValidatorBuilder::new()
            .constraint(|value: &T| value, name, rules)
            .build()
    }

    /// Wraps this validator so it validates `A` values through `adapter`.
    ///
    /// Violations keep this validator's field names, unprefixed. Useful for
    /// reusing a validator written for an embedded base struct.
    pub fn compose<A, F>(self, adapter: F) -> Validator<A>
    where
        A: ?Sized + 'static,
        F: Fn(&A) -> &T + Send + Sync + 'static,
    {
        let fail_fast = self.inner.fail_fast;
        let separator = self.inner.separator.clone();
        let formatter = Arc::clone(&self.inner.formatter);
        let extract = crate::combinators::field::extractor(move |a: &A| Some(adapter(a)));
        let nested = Nested::<A, T, _>::new("", extract, self);
        let rule = FieldRule::new("", FieldKind::Nested, nested);
        Validator::from_parts(vec![rule], fail_fast, separator, formatter)
    }
}

impl<T: ?Sized> Validator<T> {
    pub(crate) fn from_parts(
        rules: Vec<FieldRule<T>>,
        fail_fast: bool,
        separator: Cow<'static, str>,
        formatter: Arc<dyn MessageFormatter>,
    ) -> Self {
        Self {
            inner: Arc::new(Inner {
                rules,
                fail_fast,
                separator,
                formatter,
            }),
        }
    }

    /// Validates `target` with the root locale and the default group.
    pub fn validate(&self, target: &T) -> ConstraintViolations {
        self.validate_with(target, &Locale::default(), &ConstraintContext::default())
    }

    /// Validates `target`, rendering messages for `locale`.
    pub fn validate_with_locale(&self, target: &T, locale: &Locale) -> ConstraintViolations {
        self.validate_with(target, locale, &ConstraintContext::default())
    }

    /// Validates `target` in `context`.
    pub fn validate_with_context(
        &self,
        target: &T,
        context: &ConstraintContext,
    ) -> ConstraintViolations {
        self.validate_with(target, &Locale::default(), context)
    }

    /// Validates `target` in `context`, rendering messages for `locale`.
    pub fn validate_with(
        &self,
        target: &T,
        locale: &Locale,
        context: &ConstraintContext,
    ) -> ConstraintViolations {
        let mut scope = Scope::new(
            locale,
            context,
            &self.inner.formatter,
            &self.inner.separator,
        );
        // A fail-fast stop has already ended the walk; the top level never breaks.
        let _stopped = self.run(target, "", &mut scope);
        scope.into_violations()
    }

    /// Validates `target`, returning it back when valid.
    pub fn validate_to_result<'t>(&self, target: &'t T) -> Result<&'t T, ConstraintViolations> {
        let violations = self.validate(target);
        if violations.is_valid() {
            Ok(target)
        } else {
            Err(violations)
        }
    }

    /// Returns a copy of this validator with fail-fast set to `fail_fast`.
    #[must_use]
    pub fn fail_fast(&self, fail_fast: bool) -> Self {
        Self::from_parts(
            self.inner.rules.clone(),
            fail_fast,
            self.inner.separator.clone(),
            Arc::clone(&self.inner.formatter),
        )
    }

    /// Returns `true` if this validator stops at the first violation.
    pub fn is_fail_fast(&self) -> bool {
        self.inner.fail_fast
    }

    /// Returns the separator joining nested field names.
    pub fn separator(&self) -> &str {
        &self.inner.separator
    }

    /// Returns the message formatter.
    pub fn formatter(&self) -> &Arc<dyn MessageFormatter> {
        &self.inner.formatter
    }

    /// Returns the field rules in declaration order.
    pub fn field_rules(&self) -> &[FieldRule<T>] {
        &self.inner.rules
    }

    /// Returns the number of field rules.
    pub fn len(&self) -> usize {
        self.inner.rules.len()
    }

    /// Returns `true` if no rules were declared.
    pub fn is_empty(&self) -> bool {
        self.inner.rules.is_empty()
    }

    /// Runs the rules against `target`, naming fields under `prefix`.
    ///
    /// Returns `Break` only when the caller's effective fail-fast flag was
    /// already set, so a child that is fail-fast on its own does not stop
    /// its parent.
    pub(crate) fn run(&self, target: &T, prefix: &str, scope: &mut Scope<'_>) -> ControlFlow<()> {
        let outer = scope.fail_fast;
        scope.fail_fast = outer || self.inner.fail_fast;

        let mut halted = false;
        for rule in &self.inner.rules {
            if rule.check(target, prefix, scope).is_break() {
                halted = true;
                break;
            }
        }

        scope.fail_fast = outer;
        if halted && outer {
            ControlFlow::Break(())
        } else {
            ControlFlow::Continue(())
        }
    }
}

impl<T> Validator<T> {
    /// Adapts this validator to the applicative [`ValueValidator`] API.
    ///
    /// [`ValueValidator`]: crate::applicative::ValueValidator
    pub fn applicative(self) -> Applicative<T> {
        Applicative::new(self)
    }
}

impl<T: ?Sized> Clone for Validator<T> {
    fn clone(&self) -> Self {
        Self {
            inner: Arc::clone(&self.inner),
        }
    }
}

impl<T: ?Sized> fmt::Debug for Validator<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Validator")
            .field("rules", &self.inner.rules)
            .field("fail_fast", &self.inner.fail_fast)
            .field("separator", &self.inner.separator)
            .field("formatter", &self.inner.formatter)
            .finish()
    }
}
