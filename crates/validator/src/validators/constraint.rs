//! The fluent rule builder handed to every field declaration
//!
//! `ValidatorBuilder::constraint(extract, "name", |c| c.not_null().not_blank())`
//! passes a fresh [`Constraint`] to the closure and keeps whatever rules the
//! closure appended. Category-specific methods (`not_blank`, `min_length`,
//! `greater_than`, ...) live in sibling modules as inherent impls bounded by
//! [`CharSequence`](super::CharSequence), [`HasLength`](super::HasLength) and
//! [`Numeric`](super::Numeric).

use std::borrow::{Borrow, Cow};
use std::fmt;
use std::sync::Arc;

use crate::core::rule::Projection;
use crate::core::{ConstraintRule, NullPolicy};
use crate::foundation::{Arg, ToArg, ViolationMessage};

pub(crate) const NOT_NULL: ViolationMessage =
    ViolationMessage::of("object.not_null", "\"{0}\" must not be null");
pub(crate) const IS_NULL: ViolationMessage =
    ViolationMessage::of("object.is_null", "\"{0}\" must be null");
const EQUAL_TO: ViolationMessage =
    ViolationMessage::of("object.equal_to", "\"{0}\" must be equal to {1}");
const NOT_EQUAL_TO: ViolationMessage =
    ViolationMessage::of("object.not_equal_to", "\"{0}\" must not be equal to {1}");
const ONE_OF: ViolationMessage = ViolationMessage::of(
    "object.one_of",
    "\"{0}\" must be one of the following values: {1}",
);

// ============================================================================
// CONSTRAINT BUILDER
// ============================================================================

/// An ordered list of rules for one field, built fluently.
///
/// # Examples
///
/// ```rust,ignore
/// use warden_validator::prelude::*;
///
/// let rules = Constraint::<str>::new()
///     .not_blank()
///     .max_length(50)
///     .message("name is too long");
/// assert_eq!(rules.rules().len(), 2);
/// ```
#[must_use = "builder methods must be chained or built"]
pub struct Constraint<V: ?Sized> {
    rules: Vec<ConstraintRule<V>>,
    violated: Projection<V>,
}

impl<V: ?Sized + ToArg + 'static> Constraint<V> {
    /// Creates an empty builder that reports violated values with [`ToArg`].
    pub fn new() -> Self {
        Self::with_violated(|value: &V| value.to_arg())
    }
}

impl<V: ?Sized + ToArg + 'static> Default for Constraint<V> {
    fn default() -> Self {
        Self::new()
    }
}

impl<V: ?Sized + fmt::Debug + 'static> Constraint<V> {
    /// Creates an empty builder that reports violated values with their
    /// `Debug` rendering. Used for fields of arbitrary types.
    pub fn debug() -> Self {
        Self::with_violated(|value: &V| Arg::string(format!("{value:?}")))
    }
}

impl<V: ?Sized + 'static> Constraint<V> {
    /// Creates an empty builder with a custom violated-value projection.
    pub fn with_violated<F>(violated: F) -> Self
    where
        F: Fn(&V) -> Arg + Send + Sync + 'static,
    {
        Self {
            rules: Vec::new(),
            violated: Arc::new(violated),
        }
    }

    /// Returns the rules declared so far.
    pub fn rules(&self) -> &[ConstraintRule<V>] {
        &self.rules
    }

    /// Consumes the builder, returning its rules.
    pub fn into_rules(self) -> Vec<ConstraintRule<V>> {
        self.rules
    }

    /// Appends a prebuilt rule.
    pub fn rule(mut self, rule: ConstraintRule<V>) -> Self {
        self.rules.push(rule);
        self
    }

    /// Appends a custom predicate. Absent values pass.
    pub fn predicate<P>(self, predicate: P, message: ViolationMessage) -> Self
    where
        P: Fn(&V) -> bool + Send + Sync + 'static,
    {
        self.push(predicate, message, [], NullPolicy::NullIsValid)
    }

    /// Appends a custom predicate. Absent values fail.
    pub fn predicate_nullable<P>(self, predicate: P, message: ViolationMessage) -> Self
    where
        P: Fn(&V) -> bool + Send + Sync + 'static,
    {
        self.push(predicate, message, [], NullPolicy::NullIsInvalid)
    }

    /// The value must be present.
    pub fn not_null(self) -> Self {
        self.push(|_: &V| true, NOT_NULL, [], NullPolicy::NullIsInvalid)
    }

    /// The value must be absent.
    pub fn is_null(self) -> Self {
        self.push(|_: &V| false, IS_NULL, [], NullPolicy::NullIsValid)
    }

    /// Replaces the message of the most recently added rule with fixed text.
    ///
    /// The text may use the same `{n}` placeholders as the built-in
    /// templates and bypasses any message catalog.
    pub fn message(self, text: impl Into<Cow<'static, str>>) -> Self {
        self.message_with(ViolationMessage::custom(text))
    }

    /// Replaces the message (key and template) of the most recently added
    /// rule.
    pub fn message_with(mut self, message: ViolationMessage) -> Self {
        if let Some(last) = self.rules.pop() {
            self.rules.push(last.with_message(message));
        }
        self
    }

    pub(crate) fn push<P>(
        self,
        predicate: P,
        message: ViolationMessage,
        args: impl IntoIterator<Item = Arg>,
        policy: NullPolicy,
    ) -> Self
    where
        P: Fn(&V) -> bool + Send + Sync + 'static,
    {
        let violated = Arc::clone(&self.violated);
        self.push_projected(predicate, message, args, policy, violated)
    }

    pub(crate) fn push_projected<P>(
        mut self,
        predicate: P,
        message: ViolationMessage,
        args: impl IntoIterator<Item = Arg>,
        policy: NullPolicy,
        violated: Projection<V>,
    ) -> Self
    where
        P: Fn(&V) -> bool + Send + Sync + 'static,
    {
        let rule = ConstraintRule::from_parts(Arc::new(predicate), message, violated)
            .with_args(args)
            .with_null_policy(policy);
        self.rules.push(rule);
        self
    }
}

impl<V> Constraint<V>
where
    V: ?Sized + PartialEq + ToArg + ToOwned + 'static,
    V::Owned: Send + Sync + 'static,
{
    /// The value must equal `expected`.
    pub fn equal_to(self, expected: &V) -> Self {
        let arg = expected.to_arg();
        let expected = expected.to_owned();
        self.push(
            move |value: &V| value == <V::Owned as Borrow<V>>::borrow(&expected),
            EQUAL_TO,
            [arg],
            NullPolicy::NullIsValid,
        )
    }

    /// The value must differ from `unexpected`.
    pub fn not_equal_to(self, unexpected: &V) -> Self {
        let arg = unexpected.to_arg();
        let unexpected = unexpected.to_owned();
        self.push(
            move |value: &V| value != <V::Owned as Borrow<V>>::borrow(&unexpected),
            NOT_EQUAL_TO,
            [arg],
            NullPolicy::NullIsValid,
        )
    }

    /// The value must be one of `allowed`.
    pub fn one_of<'a>(self, allowed: impl IntoIterator<Item = &'a V>) -> Self
    where
        V: 'a,
    {
        let allowed: Vec<V::Owned> = allowed.into_iter().map(ToOwned::to_owned).collect();
        let arg = Arg::List(
            allowed
                .iter()
                .map(|value| <V::Owned as Borrow<V>>::borrow(value).to_arg())
                .collect(),
        );
        self.push(
            move |value: &V| {
                allowed
                    .iter()
                    .any(|candidate| value == <V::Owned as Borrow<V>>::borrow(candidate))
            },
            ONE_OF,
            [arg],
            NullPolicy::NullIsValid,
        )
    }
}

impl<V: ?Sized> Clone for Constraint<V> {
    fn clone(&self) -> Self {
        Self {
            rules: self.rules.clone(),
            violated: Arc::clone(&self.violated),
        }
    }
}

impl<V: ?Sized> fmt::Debug for Constraint<V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Constraint")
            .field("rules", &self.rules)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_not_null_and_is_null() {
        let c = Constraint::<str>::new().not_null();
        assert_eq!(c.rules()[0].evaluate(None), Some(Arg::Null));
        assert_eq!(c.rules()[0].evaluate(Some("x")), None);

        let c = Constraint::<str>::new().is_null();
        assert_eq!(c.rules()[0].evaluate(None), None);
        assert_eq!(c.rules()[0].evaluate(Some("x")), Some(Arg::from("x")));
    }

    #[test]
    fn test_message_replaces_last_rule_only() {
        let c = Constraint::<str>::new().not_null().is_null().message("custom {0}");
        assert_eq!(c.rules()[0].message().key(), "object.not_null");
        assert_eq!(c.rules()[1].message().key(), "custom {0}");
        assert_eq!(c.rules()[1].message().template(), "custom {0}");
    }

    #[test]
    fn test_message_on_empty_builder_is_noop() {
        let c = Constraint::<str>::new().message("ignored");
        assert!(c.rules().is_empty());
    }

    #[test]
    fn test_equality_rules() {
        let c = Constraint::<str>::new().equal_to("a").not_equal_to("b");
        assert_eq!(c.rules()[0].evaluate(Some("a")), None);
        assert!(c.rules()[0].evaluate(Some("b")).is_some());
        assert!(c.rules()[1].evaluate(Some("b")).is_some());
        assert_eq!(c.rules()[0].args(), &[Arg::from("a")]);
    }

    #[test]
    fn test_one_of() {
        let c = Constraint::<i32>::new().one_of(&[1, 2, 3]);
        assert_eq!(c.rules()[0].evaluate(Some(&2)), None);
        assert_eq!(c.rules()[0].evaluate(Some(&5)), Some(Arg::from(5)));
        assert_eq!(
            c.rules()[0].args(),
            &[Arg::List(vec![Arg::from(1), Arg::from(2), Arg::from(3)])]
        );
    }

    #[test]
    fn test_debug_projection() {
        #[derive(Debug)]
        struct Point(i32, i32);

        let c = Constraint::<Point>::debug().predicate(
            |p: &Point| p.0 < p.1,
            ViolationMessage::of("point.ordered", "\"{0}\" must be ordered"),
        );
        assert_eq!(
            c.rules()[0].evaluate(Some(&Point(2, 1))),
            Some(Arg::from("Point(2, 1)"))
        );
    }
}
