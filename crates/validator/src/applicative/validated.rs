//! `Validated<T>`: a success value or an accumulated list of violations
//!
//! Unlike `Result`, combining several `Validated` values keeps every failure
//! instead of stopping at the first one. Failures of a combination appear in
//! argument order.

use std::fmt;

use crate::core::{ConstraintViolations, ConstraintViolationsError};

/// The outcome of a validation that produces a value.
///
/// A `Failure` built through [`Validated::failure`] or the combinators always
/// carries at least one violation.
#[derive(Debug, Clone, PartialEq)]
#[must_use = "a Validated may hold violations that should be handled"]
pub enum Validated<T> {
    /// The validated value.
    Success(T),
    /// The violations that prevented a value. Never empty.
    Failure(ConstraintViolations),
}

impl<T> Validated<T> {
    /// Wraps a valid value.
    pub const fn success(value: T) -> Self {
        Self::Success(value)
    }

    /// Wraps violations. `violations` must not be empty; use
    /// [`from_violations`](Self::from_violations) when they may be.
    pub fn failure(violations: impl Into<ConstraintViolations>) -> Self {
        let violations = violations.into();
        debug_assert!(
            !violations.is_empty(),
            "a failure needs at least one violation"
        );
        Self::Failure(violations)
    }

    /// Returns `Success(value)` if `violations` is empty, `Failure` otherwise.
    pub fn from_violations(value: T, violations: ConstraintViolations) -> Self {
        if violations.is_valid() {
            Self::Success(value)
        } else {
            Self::Failure(violations)
        }
    }

    pub const fn is_valid(&self) -> bool {
        matches!(self, Self::Success(_))
    }

    /// Returns the value, or `None` on failure.
    pub const fn value(&self) -> Option<&T> {
        match self {
            Self::Success(value) => Some(value),
            Self::Failure(_) => None,
        }
    }

    /// Returns the violations, or `None` on success.
    pub const fn violations(&self) -> Option<&ConstraintViolations> {
        match self {
            Self::Success(_) => None,
            Self::Failure(violations) => Some(violations),
        }
    }

    /// Consumes `self`, returning the value if valid.
    pub fn into_value(self) -> Option<T> {
        match self {
            Self::Success(value) => Some(value),
            Self::Failure(_) => None,
        }
    }

    // ------------------------------------------------------------------------
    // Transformations
    // ------------------------------------------------------------------------

    /// Transforms the success value.
    pub fn map<U, F>(self, f: F) -> Validated<U>
    where
        F: FnOnce(T) -> U,
    {
        match self {
            Self::Success(value) => Validated::Success(f(value)),
            Self::Failure(violations) => Validated::Failure(violations),
        }
    }

    /// Transforms the violations of a failure.
    pub fn map_errors<F>(self, f: F) -> Self
    where
        F: FnOnce(ConstraintViolations) -> ConstraintViolations,
    {
        match self {
            Self::Success(value) => Self::Success(value),
            Self::Failure(violations) => Self::Failure(f(violations)),
        }
    }

    /// Chains a dependent validation. `f` runs only on success.
    pub fn and_then<U, F>(self, f: F) -> Validated<U>
    where
        F: FnOnce(T) -> Validated<U>,
    {
        match self {
            Self::Success(value) => f(value),
            Self::Failure(violations) => Validated::Failure(violations),
        }
    }

    /// Collapses both cases into one value.
    pub fn fold<R>(
        self,
        on_failure: impl FnOnce(ConstraintViolations) -> R,
        on_success: impl FnOnce(T) -> R,
    ) -> R {
        match self {
            Self::Success(value) => on_success(value),
            Self::Failure(violations) => on_failure(violations),
        }
    }

    /// Calls `f` with the value on success.
    pub fn peek(self, f: impl FnOnce(&T)) -> Self {
        if let Self::Success(value) = &self {
            f(value);
        }
        self
    }

    /// Calls `f` with the violations on failure.
    pub fn peek_errors(self, f: impl FnOnce(&ConstraintViolations)) -> Self {
        if let Self::Failure(violations) = &self {
            f(violations);
        }
        self
    }

    /// Renames every violation `name` to `name[index]`.
    pub fn indexed(self, index: usize) -> Self {
        self.map_errors(|violations| {
            violations
                .into_iter()
                .map(|violation| violation.indexed(index))
                .collect()
        })
    }

    /// Converts into a `Result`, wrapping violations in the standard error.
    pub fn into_result(self) -> Result<T, ConstraintViolationsError> {
        match self {
            Self::Success(value) => Ok(value),
            Self::Failure(violations) => Err(ConstraintViolationsError::new(violations)),
        }
    }

    /// Converts into a `Result` with a caller-built error.
    pub fn or_else_throw<E, F>(self, f: F) -> Result<T, E>
    where
        F: FnOnce(ConstraintViolations) -> E,
    {
        match self {
            Self::Success(value) => Ok(value),
            Self::Failure(violations) => Err(f(violations)),
        }
    }

    /// Starts an N-ary combination with `other`.
    ///
    /// ```rust,ignore
    /// let user = name.combine(email).combine(age).apply(User::new);
    /// ```
    pub fn combine<U>(self, other: Validated<U>) -> Combining2<T, U> {
        Combining2 {
            parts: (self, other),
        }
    }
}

impl<T> Validated<Option<T>> {
    /// Moves the `Option` outward: `Success(None)` becomes `None`.
    pub fn transpose(self) -> Option<Validated<T>> {
        match self {
            Self::Success(Some(value)) => Some(Validated::Success(value)),
            Self::Success(None) => None,
            Self::Failure(violations) => Some(Validated::Failure(violations)),
        }
    }
}

impl<T: fmt::Display> fmt::Display for Validated<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Success(value) => write!(f, "Success({value})"),
            Self::Failure(violations) => write!(f, "Failure({} violations)", violations.len()),
        }
    }
}

impl<T> From<Validated<T>> for Result<T, ConstraintViolations> {
    fn from(validated: Validated<T>) -> Self {
        match validated {
            Validated::Success(value) => Ok(value),
            Validated::Failure(violations) => Err(violations),
        }
    }
}

// ============================================================================
// SEQUENCE / TRAVERSE
// ============================================================================

/// Collects successes into `C`. On any failure the result is `Failure` with
/// every failure concatenated in iteration order.
impl<T, C: FromIterator<T>> FromIterator<Validated<T>> for Validated<C> {
    fn from_iter<I: IntoIterator<Item = Validated<T>>>(iter: I) -> Self {
        let mut values = Vec::new();
        let mut violations = ConstraintViolations::new();
        for validated in iter {
            match validated {
                Validated::Success(value) if violations.is_empty() => values.push(value),
                Validated::Success(_) => {}
                Validated::Failure(errors) => violations.extend(errors),
            }
        }
        if violations.is_empty() {
            Validated::Success(values.into_iter().collect())
        } else {
            Validated::Failure(violations)
        }
    }
}

impl<T> Validated<Vec<T>> {
    /// See [`sequence`].
    pub fn sequence<I>(values: I) -> Self
    where
        I: IntoIterator<Item = Validated<T>>,
    {
        sequence(values)
    }

    /// See [`traverse`].
    pub fn traverse<A, I, F>(values: I, f: F) -> Self
    where
        I: IntoIterator<Item = A>,
        F: FnMut(A) -> Validated<T>,
    {
        traverse(values, f)
    }

    /// See [`traverse_indexed`].
    pub fn traverse_indexed<A, I, F>(values: I, f: F) -> Self
    where
        I: IntoIterator<Item = A>,
        F: FnMut(A, usize) -> Validated<T>,
    {
        traverse_indexed(values, f)
    }
}

impl<T> Validated<Option<T>> {
    /// See [`traverse_optional`].
    pub fn traverse_optional<A, F>(value: Option<A>, f: F) -> Self
    where
        F: FnOnce(A) -> Validated<T>,
    {
        traverse_optional(value, f)
    }
}

/// Turns a sequence of `Validated` into a `Validated` list.
pub fn sequence<T, I>(values: I) -> Validated<Vec<T>>
where
    I: IntoIterator<Item = Validated<T>>,
{
    values.into_iter().collect()
}

/// Validates each element with `f` and collects the results.
pub fn traverse<A, T, I, F>(values: I, f: F) -> Validated<Vec<T>>
where
    I: IntoIterator<Item = A>,
    F: FnMut(A) -> Validated<T>,
{
    values.into_iter().map(f).collect()
}

/// Like [`traverse`], passing each element's position to `f`.
///
/// Pair with [`Validated::indexed`] to name element violations `name[i]`.
pub fn traverse_indexed<A, T, I, F>(values: I, mut f: F) -> Validated<Vec<T>>
where
    I: IntoIterator<Item = A>,
    F: FnMut(A, usize) -> Validated<T>,
{
    values
        .into_iter()
        .enumerate()
        .map(|(index, value)| f(value, index))
        .collect()
}

/// Validates an optional value. `None` is a successful `None`.
pub fn traverse_optional<A, T, F>(value: Option<A>, f: F) -> Validated<Option<T>>
where
    F: FnOnce(A) -> Validated<T>,
{
    match value {
        Some(value) => f(value).map(Some),
        None => Validated::Success(None),
    }
}

// ============================================================================
// COMBINING
// ============================================================================

combining!(Combining2, apply2, "2": T1 v1, T2 v2);
combining!(Combining3, apply3, "3": T1 v1, T2 v2, T3 v3);
combining!(Combining4, apply4, "4": T1 v1, T2 v2, T3 v3, T4 v4);
combining!(Combining5, apply5, "5": T1 v1, T2 v2, T3 v3, T4 v4, T5 v5);
combining!(Combining6, apply6, "6": T1 v1, T2 v2, T3 v3, T4 v4, T5 v5, T6 v6);
combining!(Combining7, apply7, "7": T1 v1, T2 v2, T3 v3, T4 v4, T5 v5, T6 v6, T7 v7);
combining!(Combining8, apply8, "8": T1 v1, T2 v2, T3 v3, T4 v4, T5 v5, T6 v6, T7 v7, T8 v8);
combining!(Combining9, apply9, "9": T1 v1, T2 v2, T3 v3, T4 v4, T5 v5, T6 v6, T7 v7, T8 v8, T9 v9);
combining!(
    Combining10, apply10, "10":
    T1 v1, T2 v2, T3 v3, T4 v4, T5 v5, T6 v6, T7 v7, T8 v8, T9 v9, T10 v10
);
combining!(
    Combining11, apply11, "11":
    T1 v1, T2 v2, T3 v3, T4 v4, T5 v5, T6 v6, T7 v7, T8 v8, T9 v9, T10 v10, T11 v11
);
combining!(
    Combining12, apply12, "12":
    T1 v1, T2 v2, T3 v3, T4 v4, T5 v5, T6 v6, T7 v7, T8 v8, T9 v9, T10 v10, T11 v11, T12 v12
);
combining!(
    Combining13, apply13, "13":
    T1 v1, T2 v2, T3 v3, T4 v4, T5 v5, T6 v6, T7 v7, T8 v8, T9 v9, T10 v10, T11 v11, T12 v12,
    T13 v13
);
combining!(
    Combining14, apply14, "14":
    T1 v1, T2 v2, T3 v3, T4 v4, T5 v5, T6 v6, T7 v7, T8 v8, T9 v9, T10 v10, T11 v11, T12 v12,
    T13 v13, T14 v14
);
combining!(
    Combining15, apply15, "15":
    T1 v1, T2 v2, T3 v3, T4 v4, T5 v5, T6 v6, T7 v7, T8 v8, T9 v9, T10 v10, T11 v11, T12 v12,
    T13 v13, T14 v14, T15 v15
);
combining!(
    Combining16, apply16, "16":
    T1 v1, T2 v2, T3 v3, T4 v4, T5 v5, T6 v6, T7 v7, T8 v8, T9 v9, T10 v10, T11 v11, T12 v12,
    T13 v13, T14 v14, T15 v15, T16 v16
);

combining_next!(Combining2 => Combining3: T1 v1, T2 v2);
combining_next!(Combining3 => Combining4: T1 v1, T2 v2, T3 v3);
combining_next!(Combining4 => Combining5: T1 v1, T2 v2, T3 v3, T4 v4);
combining_next!(Combining5 => Combining6: T1 v1, T2 v2, T3 v3, T4 v4, T5 v5);
combining_next!(Combining6 => Combining7: T1 v1, T2 v2, T3 v3, T4 v4, T5 v5, T6 v6);
combining_next!(Combining7 => Combining8: T1 v1, T2 v2, T3 v3, T4 v4, T5 v5, T6 v6, T7 v7);
combining_next!(Combining8 => Combining9: T1 v1, T2 v2, T3 v3, T4 v4, T5 v5, T6 v6, T7 v7, T8 v8);
combining_next!(
    Combining9 => Combining10:
    T1 v1, T2 v2, T3 v3, T4 v4, T5 v5, T6 v6, T7 v7, T8 v8, T9 v9
);
combining_next!(
    Combining10 => Combining11:
    T1 v1, T2 v2, T3 v3, T4 v4, T5 v5, T6 v6, T7 v7, T8 v8, T9 v9, T10 v10
);
combining_next!(
    Combining11 => Combining12:
    T1 v1, T2 v2, T3 v3, T4 v4, T5 v5, T6 v6, T7 v7, T8 v8, T9 v9, T10 v10, T11 v11
);
combining_next!(
    Combining12 => Combining13:
    T1 v1, T2 v2, T3 v3, T4 v4, T5 v5, T6 v6, T7 v7, T8 v8, T9 v9, T10 v10, T11 v11, T12 v12
);
combining_next!(
    Combining13 => Combining14:
    T1 v1, T2 v2, T3 v3, T4 v4, T5 v5, T6 v6, T7 v7, T8 v8, T9 v9, T10 v10, T11 v11, T12 v12,
    T13 v13
);
combining_next!(
    Combining14 => Combining15:
    T1 v1, T2 v2, T3 v3, T4 v4, T5 v5, T6 v6, T7 v7, T8 v8, T9 v9, T10 v10, T11 v11, T12 v12,
    T13 v13, T14 v14
);
combining_next!(
    Combining15 => Combining16:
    T1 v1, T2 v2, T3 v3, T4 v4, T5 v5, T6 v6, T7 v7, T8 v8, T9 v9, T10 v10, T11 v11, T12 v12,
    T13 v13, T14 v14, T15 v15
);
