//! Value validators: validate an input and produce an output value
//!
//! A [`ValueValidator`] turns a `T` into a [`Validated`] output. Unlike
//! [`Validator`], it owns its input, so validators can be chained to parse
//! and construct domain values, and lifted over collections and options.
//!
//! ```rust,ignore
//! let name = Validator::<String>::of("name", |c| c.not_blank()).applicative();
//! let email = Validator::<String>::of("email", |c| c.email()).applicative();
//!
//! let user = name.combine(email).apply(|name, email| User { name, email });
//! let result = user.validate((raw_name, raw_email));
//! ```

use std::fmt;
use std::hash::Hash;
use std::marker::PhantomData;

use indexmap::IndexSet;

use crate::Validator;
use crate::applicative::Validated;
use crate::applicative::validated::{
    apply2, apply3, apply4, apply5, apply6, apply7, apply8, apply9, apply10, apply11, apply12,
    apply13, apply14, apply15, apply16,
};
use crate::core::ConstraintViolationsError;
use crate::foundation::{ConstraintContext, Locale};

// ============================================================================
// VALUE VALIDATOR
// ============================================================================

/// Validates an owned `T` and produces [`Self::Output`].
pub trait ValueValidator<T>: Send + Sync {
    /// The value produced on success.
    type Output;

    /// Validates `value` in `context`, rendering messages for `locale`.
    fn validate_with(
        &self,
        value: T,
        locale: &Locale,
        context: &ConstraintContext,
    ) -> Validated<Self::Output>;

    /// Validates `value` with the root locale and the default group.
    fn validate(&self, value: T) -> Validated<Self::Output> {
        self.validate_with(value, &Locale::default(), &ConstraintContext::default())
    }

    /// Validates `value`, converting failure into the standard error.
    fn validated(&self, value: T) -> Result<Self::Output, ConstraintViolationsError> {
        self.validate(value).into_result()
    }
}

impl<T, V: ValueValidator<T> + ?Sized> ValueValidator<T> for &V {
    type Output = V::Output;

    fn validate_with(
        &self,
        value: T,
        locale: &Locale,
        context: &ConstraintContext,
    ) -> Validated<Self::Output> {
        (**self).validate_with(value, locale, context)
    }
}

impl<T, V: ValueValidator<T> + ?Sized> ValueValidator<T> for Box<V> {
    type Output = V::Output;

    fn validate_with(
        &self,
        value: T,
        locale: &Locale,
        context: &ConstraintContext,
    ) -> Validated<Self::Output> {
        (**self).validate_with(value, locale, context)
    }
}

// ============================================================================
// ADAPTERS
// ============================================================================

/// A [`Validator`] seen as a value validator that returns its input.
///
/// Built by [`Validator::applicative`].
#[derive(Debug, Clone)]
pub struct Applicative<T> {
    validator: Validator<T>,
}

impl<T> Applicative<T> {
    pub fn new(validator: Validator<T>) -> Self {
        Self { validator }
    }

    /// Returns the wrapped validator.
    pub fn validator(&self) -> &Validator<T> {
        &self.validator
    }
}

impl<T> ValueValidator<T> for Applicative<T> {
    type Output = T;

    fn validate_with(
        &self,
        value: T,
        locale: &Locale,
        context: &ConstraintContext,
    ) -> Validated<T> {
        let violations = self.validator.validate_with(&value, locale, context);
        Validated::from_violations(value, violations)
    }
}

/// A value validator backed by a closure.
pub struct FromFn<F> {
    f: F,
}

/// Builds a value validator from `f`.
///
/// ```rust,ignore
/// let parse = from_fn(|raw: String, _: &Locale, _: &ConstraintContext| {
///     Validated::success(raw.trim().to_owned())
/// });
/// ```
pub fn from_fn<T, R, F>(f: F) -> FromFn<F>
where
    F: Fn(T, &Locale, &ConstraintContext) -> Validated<R> + Send + Sync,
{
    FromFn { f }
}

impl<T, R, F> ValueValidator<T> for FromFn<F>
where
    F: Fn(T, &Locale, &ConstraintContext) -> Validated<R> + Send + Sync,
{
    type Output = R;

    fn validate_with(
        &self,
        value: T,
        locale: &Locale,
        context: &ConstraintContext,
    ) -> Validated<R> {
        (self.f)(value, locale, context)
    }
}

impl<F> fmt::Debug for FromFn<F> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FromFn").field("f", &"<function>").finish()
    }
}

// ============================================================================
// COMBINATORS
// ============================================================================

/// Transforms the output of a value validator. See [`ValueValidatorExt::map`].
pub struct Map<V, F> {
    inner: V,
    f: F,
}

impl<T, V, F, R> ValueValidator<T> for Map<V, F>
where
    V: ValueValidator<T>,
    F: Fn(V::Output) -> R + Send + Sync,
{
    type Output = R;

    fn validate_with(
        &self,
        value: T,
        locale: &Locale,
        context: &ConstraintContext,
    ) -> Validated<R> {
        self.inner.validate_with(value, locale, context).map(&self.f)
    }
}

/// Runs a second validator on the first one's output.
/// See [`ValueValidatorExt::and_then`].
#[derive(Debug, Clone)]
pub struct AndThen<V, W> {
    first: V,
    second: W,
}

impl<T, V, W> ValueValidator<T> for AndThen<V, W>
where
    V: ValueValidator<T>,
    W: ValueValidator<V::Output>,
{
    type Output = W::Output;

    fn validate_with(
        &self,
        value: T,
        locale: &Locale,
        context: &ConstraintContext,
    ) -> Validated<W::Output> {
        self.first
            .validate_with(value, locale, context)
            .and_then(|output| self.second.validate_with(output, locale, context))
    }
}

/// Adapts the input of a value validator. See [`ValueValidatorExt::compose`].
pub struct Compose<V, F, A> {
    inner: V,
    f: F,
    _phantom: PhantomData<fn(A)>,
}

impl<A, T, V, F> ValueValidator<A> for Compose<V, F, A>
where
    V: ValueValidator<T>,
    F: Fn(A) -> T + Send + Sync,
{
    type Output = V::Output;

    fn validate_with(
        &self,
        value: A,
        locale: &Locale,
        context: &ConstraintContext,
    ) -> Validated<V::Output> {
        self.inner.validate_with((self.f)(value), locale, context)
    }
}

/// Renames violations to `name[index]`. See [`ValueValidatorExt::indexed`].
#[derive(Debug, Clone)]
pub struct Indexed<V> {
    inner: V,
    index: usize,
}

impl<T, V: ValueValidator<T>> ValueValidator<T> for Indexed<V> {
    type Output = V::Output;

    fn validate_with(
        &self,
        value: T,
        locale: &Locale,
        context: &ConstraintContext,
    ) -> Validated<V::Output> {
        self.inner
            .validate_with(value, locale, context)
            .indexed(self.index)
    }
}

/// Validates every element of an iterable input and collects the outputs
/// into `C`. Element violations are named `name[i]` and all of them are kept.
pub struct Lift<V, C> {
    inner: V,
    _phantom: PhantomData<fn() -> C>,
}

impl<I, V, C> ValueValidator<I> for Lift<V, C>
where
    I: IntoIterator,
    V: ValueValidator<I::Item>,
    C: FromIterator<V::Output>,
{
    type Output = C;

    fn validate_with(
        &self,
        value: I,
        locale: &Locale,
        context: &ConstraintContext,
    ) -> Validated<C> {
        value
            .into_iter()
            .enumerate()
            .map(|(index, element)| {
                self.inner
                    .validate_with(element, locale, context)
                    .indexed(index)
            })
            .collect()
    }
}

/// Validates an optional input; `None` passes as `None`.
/// See [`ValueValidatorExt::lift_optional`].
#[derive(Debug, Clone)]
pub struct LiftOptional<V> {
    inner: V,
}

impl<T, V: ValueValidator<T>> ValueValidator<Option<T>> for LiftOptional<V> {
    type Output = Option<V::Output>;

    fn validate_with(
        &self,
        value: Option<T>,
        locale: &Locale,
        context: &ConstraintContext,
    ) -> Validated<Option<V::Output>> {
        match value {
            Some(value) => self.inner.validate_with(value, locale, context).map(Some),
            None => Validated::Success(None),
        }
    }
}

// ============================================================================
// EXTENSION TRAIT
// ============================================================================

/// Combinators available on every value validator.
pub trait ValueValidatorExt<T>: ValueValidator<T> + Sized {
    /// Transforms the output on success.
    fn map<F, R>(self, f: F) -> Map<Self, F>
    where
        F: Fn(Self::Output) -> R + Send + Sync,
    {
        Map { inner: self, f }
    }

    /// Validates the output with `next`. `next` runs only on success.
    fn and_then<W>(self, next: W) -> AndThen<Self, W>
    where
        W: ValueValidator<Self::Output>,
    {
        AndThen {
            first: self,
            second: next,
        }
    }

    /// Accepts `A` inputs, converting them with `f` first.
    fn compose<A, F>(self, f: F) -> Compose<Self, F, A>
    where
        F: Fn(A) -> T + Send + Sync,
    {
        Compose {
            inner: self,
            f,
            _phantom: PhantomData,
        }
    }

    /// Renames every violation to `name[index]`.
    fn indexed(self, index: usize) -> Indexed<Self> {
        Indexed { inner: self, index }
    }

    /// Lifts over any iterable input, collecting outputs into a `Vec`.
    fn lift_list(self) -> Lift<Self, Vec<Self::Output>> {
        self.lift_collection()
    }

    /// Lifts over any iterable input, collecting outputs into an insertion
    /// ordered set.
    fn lift_set(self) -> Lift<Self, IndexSet<Self::Output>>
    where
        Self::Output: Hash + Eq,
    {
        self.lift_collection()
    }

    /// Lifts over any iterable input, collecting outputs into `C`.
    fn lift_collection<C: FromIterator<Self::Output>>(self) -> Lift<Self, C> {
        Lift {
            inner: self,
            _phantom: PhantomData,
        }
    }

    /// Lifts over `Option<T>`.
    fn lift_optional(self) -> LiftOptional<Self> {
        LiftOptional { inner: self }
    }

    /// Starts an N-ary combination over a tuple of inputs.
    fn combine<W>(self, other: W) -> ValueCombining2<Self, W> {
        ValueCombining2 {
            validators: (self, other),
        }
    }
}

impl<T, V: ValueValidator<T>> ValueValidatorExt<T> for V {}

impl<V: fmt::Debug, F> fmt::Debug for Map<V, F> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Map")
            .field("inner", &self.inner)
            .field("f", &"<function>")
            .finish()
    }
}

impl<V: fmt::Debug, F, A> fmt::Debug for Compose<V, F, A> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Compose")
            .field("inner", &self.inner)
            .field("f", &"<function>")
            .finish()
    }
}

impl<V: fmt::Debug, C> fmt::Debug for Lift<V, C> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Lift").field("inner", &self.inner).finish()
    }
}

// ============================================================================
// COMBINING
// ============================================================================

value_combining!(ValueCombining2, Applied2, apply2, "2": T1 W1 v1 w1, T2 W2 v2 w2);
value_combining!(ValueCombining3, Applied3, apply3, "3": T1 W1 v1 w1, T2 W2 v2 w2, T3 W3 v3 w3);
value_combining!(
    ValueCombining4, Applied4, apply4, "4":
    T1 W1 v1 w1, T2 W2 v2 w2, T3 W3 v3 w3, T4 W4 v4 w4
);
value_combining!(
    ValueCombining5, Applied5, apply5, "5":
    T1 W1 v1 w1, T2 W2 v2 w2, T3 W3 v3 w3, T4 W4 v4 w4, T5 W5 v5 w5
);
value_combining!(
    ValueCombining6, Applied6, apply6, "6":
    T1 W1 v1 w1, T2 W2 v2 w2, T3 W3 v3 w3, T4 W4 v4 w4, T5 W5 v5 w5, T6 W6 v6 w6
);
value_combining!(
    ValueCombining7, Applied7, apply7, "7":
    T1 W1 v1 w1, T2 W2 v2 w2, T3 W3 v3 w3, T4 W4 v4 w4, T5 W5 v5 w5, T6 W6 v6 w6, T7 W7 v7 w7
);
value_combining!(
    ValueCombining8, Applied8, apply8, "8":
    T1 W1 v1 w1, T2 W2 v2 w2, T3 W3 v3 w3, T4 W4 v4 w4, T5 W5 v5 w5, T6 W6 v6 w6, T7 W7 v7 w7,
    T8 W8 v8 w8
);
value_combining!(
    ValueCombining9, Applied9, apply9, "9":
    T1 W1 v1 w1, T2 W2 v2 w2, T3 W3 v3 w3, T4 W4 v4 w4, T5 W5 v5 w5, T6 W6 v6 w6, T7 W7 v7 w7,
    T8 W8 v8 w8, T9 W9 v9 w9
);
value_combining!(
    ValueCombining10, Applied10, apply10, "10":
    T1 W1 v1 w1, T2 W2 v2 w2, T3 W3 v3 w3, T4 W4 v4 w4, T5 W5 v5 w5, T6 W6 v6 w6, T7 W7 v7 w7,
    T8 W8 v8 w8, T9 W9 v9 w9, T10 W10 v10 w10
);
value_combining!(
    ValueCombining11, Applied11, apply11, "11":
    T1 W1 v1 w1, T2 W2 v2 w2, T3 W3 v3 w3, T4 W4 v4 w4, T5 W5 v5 w5, T6 W6 v6 w6, T7 W7 v7 w7,
    T8 W8 v8 w8, T9 W9 v9 w9, T10 W10 v10 w10, T11 W11 v11 w11
);
value_combining!(
    ValueCombining12, Applied12, apply12, "12":
    T1 W1 v1 w1, T2 W2 v2 w2, T3 W3 v3 w3, T4 W4 v4 w4, T5 W5 v5 w5, T6 W6 v6 w6, T7 W7 v7 w7,
    T8 W8 v8 w8, T9 W9 v9 w9, T10 W10 v10 w10, T11 W11 v11 w11, T12 W12 v12 w12
);
value_combining!(
    ValueCombining13, Applied13, apply13, "13":
    T1 W1 v1 w1, T2 W2 v2 w2, T3 W3 v3 w3, T4 W4 v4 w4, T5 W5 v5 w5, T6 W6 v6 w6, T7 W7 v7 w7,
    T8 W8 v8 w8, T9 W9 v9 w9, T10 W10 v10 w10, T11 W11 v11 w11, T12 W12 v12 w12, T13 W13 v13 w13
);
value_combining!(
    ValueCombining14, Applied14, apply14, "14":
    T1 W1 v1 w1, T2 W2 v2 w2, T3 W3 v3 w3, T4 W4 v4 w4, T5 W5 v5 w5, T6 W6 v6 w6, T7 W7 v7 w7,
    T8 W8 v8 w8, T9 W9 v9 w9, T10 W10 v10 w10, T11 W11 v11 w11, T12 W12 v12 w12, T13 W13 v13 w13,
    T14 W14 v14 w14
);
value_combining!(
    ValueCombining15, Applied15, apply15, "15":
    T1 W1 v1 w1, T2 W2 v2 w2, T3 W3 v3 w3, T4 W4 v4 w4, T5 W5 v5 w5, T6 W6 v6 w6, T7 W7 v7 w7,
    T8 W8 v8 w8, T9 W9 v9 w9, T10 W10 v10 w10, T11 W11 v11 w11, T12 W12 v12 w12, T13 W13 v13 w13,
    T14 W14 v14 w14, T15 W15 v15 w15
);
value_combining!(
    ValueCombining16, Applied16, apply16, "16":
    T1 W1 v1 w1, T2 W2 v2 w2, T3 W3 v3 w3, T4 W4 v4 w4, T5 W5 v5 w5, T6 W6 v6 w6, T7 W7 v7 w7,
    T8 W8 v8 w8, T9 W9 v9 w9, T10 W10 v10 w10, T11 W11 v11 w11, T12 W12 v12 w12, T13 W13 v13 w13,
    T14 W14 v14 w14, T15 W15 v15 w15, T16 W16 v16 w16
);

value_combining_next!(ValueCombining2 => ValueCombining3: W1 w1, W2 w2);
value_combining_next!(ValueCombining3 => ValueCombining4: W1 w1, W2 w2, W3 w3);
value_combining_next!(ValueCombining4 => ValueCombining5: W1 w1, W2 w2, W3 w3, W4 w4);
value_combining_next!(ValueCombining5 => ValueCombining6: W1 w1, W2 w2, W3 w3, W4 w4, W5 w5);
value_combining_next!(ValueCombining6 => ValueCombining7: W1 w1, W2 w2, W3 w3, W4 w4, W5 w5, W6 w6);
value_combining_next!(
    ValueCombining7 => ValueCombining8:
    W1 w1, W2 w2, W3 w3, W4 w4, W5 w5, W6 w6, W7 w7
);
value_combining_next!(
    ValueCombining8 => ValueCombining9:
    W1 w1, W2 w2, W3 w3, W4 w4, W5 w5, W6 w6, W7 w7, W8 w8
);
value_combining_next!(
    ValueCombining9 => ValueCombining10:
    W1 w1, W2 w2, W3 w3, W4 w4, W5 w5, W6 w6, W7 w7, W8 w8, W9 w9
);
value_combining_next!(
    ValueCombining10 => ValueCombining11:
    W1 w1, W2 w2, W3 w3, W4 w4, W5 w5, W6 w6, W7 w7, W8 w8, W9 w9, W10 w10
);
value_combining_next!(
    ValueCombining11 => ValueCombining12:
    W1 w1, W2 w2, W3 w3, W4 w4, W5 w5, W6 w6, W7 w7, W8 w8, W9 w9, W10 w10, W11 w11
);
value_combining_next!(
    ValueCombining12 => ValueCombining13:
    W1 w1, W2 w2, W3 w3, W4 w4, W5 w5, W6 w6, W7 w7, W8 w8, W9 w9, W10 w10, W11 w11, W12 w12
);
value_combining_next!(
    ValueCombining13 => ValueCombining14:
    W1 w1, W2 w2, W3 w3, W4 w4, W5 w5, W6 w6, W7 w7, W8 w8, W9 w9, W10 w10, W11 w11, W12 w12,
    W13 w13
);
value_combining_next!(
    ValueCombining14 => ValueCombining15:
    W1 w1, W2 w2, W3 w3, W4 w4, W5 w5, W6 w6, W7 w7, W8 w8, W9 w9, W10 w10, W11 w11, W12 w12,
    W13 w13, W14 w14
);
value_combining_next!(
    ValueCombining15 => ValueCombining16:
    W1 w1, W2 w2, W3 w3, W4 w4, W5 w5, W6 w6, W7 w7, W8 w8, W9 w9, W10 w10, W11 w11, W12 w12,
    W13 w13, W14 w14, W15 w15
);

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ValidatorBuilder;
    use crate::core::ConstraintViolations;
    use pretty_assertions::assert_eq;

    #[derive(Debug, PartialEq)]
    struct Email(String);

    fn email() -> Applicative<String> {
        Validator::<String>::of("email", |c| c.not_blank().email()).applicative()
    }

    fn age() -> Applicative<i32> {
        ValidatorBuilder::<i32>::new()
            .constraint(|n: &i32| n, "age", |c| c.between(0, 150))
            .build()
            .applicative()
    }

    #[test]
    fn test_applicative_returns_input() {
        let result = email().validate("a@example.com".to_owned());
        assert_eq!(result, Validated::Success("a@example.com".to_owned()));
    }

    #[test]
    fn test_map_builds_domain_value() {
        let result = email().map(Email).validate("a@example.com".to_owned());
        assert_eq!(result.into_value(), Some(Email("a@example.com".into())));
    }

    #[test]
    fn test_and_then_runs_second_only_on_success() {
        let trimmed = from_fn(|raw: String, _: &Locale, _: &ConstraintContext| {
            Validated::success(raw.trim().to_owned())
        });
        let chained = trimmed.and_then(email());
        assert!(chained.validate("  a@example.com ".to_owned()).is_valid());
        assert!(!chained.validate("   ".to_owned()).is_valid());
    }

    #[test]
    fn test_compose_adapts_input() {
        let from_str = email().compose(|raw: &str| raw.to_owned());
        assert!(from_str.validate("a@example.com").is_valid());
    }

    #[test]
    fn test_lift_list_indexes_every_failure() {
        let emails = email().lift_list();
        let result = emails.validate(vec![
            "a@example.com".to_owned(),
            "nope".to_owned(),
            String::new(),
        ]);
        let names = result.violations().map(|v| v.names());
        assert_eq!(names, Some(vec!["email[1]", "email[2]"]));
    }

    #[test]
    fn test_lift_set_keeps_order() {
        let set = email()
            .lift_set()
            .validate(vec!["b@example.com".to_owned(), "a@example.com".to_owned()])
            .into_value()
            .unwrap();
        assert_eq!(set.get_index(0).map(String::as_str), Some("b@example.com"));
    }

    #[test]
    fn test_lift_optional() {
        let optional = age().lift_optional();
        assert_eq!(optional.validate(None), Validated::Success(None));
        assert!(!optional.validate(Some(200)).is_valid());
    }

    #[test]
    fn test_value_combine_runs_all() {
        let combined = email().combine(age()).apply(|email, age| (email, age));
        let result = combined.validate((String::from("nope"), -1));
        let names = result.violations().map(|v| v.names());
        assert_eq!(names, Some(vec!["email", "age"]));

        let ok = combined.validate((String::from("a@example.com"), 30));
        assert_eq!(ok, Validated::Success((String::from("a@example.com"), 30)));
    }

    #[test]
    fn test_value_combine_sixteen_validators() {
        let ages = age()
            .combine(age())
            .combine(age())
            .combine(age())
            .combine(age())
            .combine(age())
            .combine(age())
            .combine(age())
            .combine(age())
            .combine(age())
            .combine(age())
            .combine(age())
            .combine(age())
            .combine(age())
            .combine(age())
            .combine(age())
            .apply(|a, b, c, d, e, f, g, h, i, j, k, l, m, n, o, p| {
                [a, b, c, d, e, f, g, h, i, j, k, l, m, n, o, p]
            });

        let ok = ages.validate((1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1));
        assert_eq!(ok, Validated::Success([1; 16]));

        let bad = ages.validate((-1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 200));
        assert_eq!(bad.violations().map(ConstraintViolations::len), Some(2));
    }

    #[test]
    fn test_validated_converts_to_result() {
        let err = age().validated(-5).unwrap_err();
        assert_eq!(err.violations()[0].name(), "age");
    }
}
