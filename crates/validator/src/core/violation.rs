//! Constraint violations
//!
//! A [`ConstraintViolation`] records everything needed to render its message
//! later: the field path, the message key and default template, the
//! positional arguments, the locale and the formatter. Rendering is a pure
//! function of those fields.

use std::borrow::Cow;
use std::fmt;
use std::ops::Index;
use std::sync::Arc;

use serde::Serialize;

use crate::core::ConstraintViolationsError;
use crate::foundation::{Arg, Args, Locale, MessageFormatter, ViolationMessage};

static NULL: Arg = Arg::Null;

// ============================================================================
// CONSTRAINT VIOLATION
// ============================================================================

/// A single failed constraint.
///
/// `args()[0]` is always the field name and the last argument is always the
/// violated value.
#[derive(Clone)]
pub struct ConstraintViolation {
    name: String,
    message_key: Cow<'static, str>,
    template: Cow<'static, str>,
    args: Args,
    locale: Locale,
    formatter: Arc<dyn MessageFormatter>,
}

impl ConstraintViolation {
    /// Creates a violation. `args` must already include the field name in
    /// the first slot and the violated value in the last.
    pub fn new(
        name: impl Into<String>,
        message: &ViolationMessage,
        args: Args,
        locale: Locale,
        formatter: Arc<dyn MessageFormatter>,
    ) -> Self {
        Self {
            name: name.into(),
            message_key: message.key_cow(),
            template: message.template_cow(),
            args,
            locale,
            formatter,
        }
    }

    /// Returns the full field path, e.g. `country.name` or `items[2].x`.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Returns the message key.
    pub fn message_key(&self) -> &str {
        &self.message_key
    }

    /// Returns the default template.
    pub fn default_template(&self) -> &str {
        &self.template
    }

    /// Returns the positional message arguments.
    pub fn args(&self) -> &[Arg] {
        &self.args
    }

    /// Returns the locale the violation was produced under.
    pub fn locale(&self) -> &Locale {
        &self.locale
    }

    /// Returns the value that failed the constraint.
    pub fn violated_value(&self) -> &Arg {
        self.args.last().unwrap_or(&NULL)
    }

    /// Renders the message.
    pub fn message(&self) -> String {
        self.formatter
            .format(&self.message_key, &self.template, &self.args, &self.locale)
    }

    /// Replaces the field name, keeping `args()[0]` in sync.
    #[must_use]
    pub fn rename(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        if let Some(first) = self.args.first_mut() {
            *first = Arg::string(self.name.clone());
        }
        self
    }

    /// Appends `[index]` to the field name.
    #[must_use]
    pub fn indexed(self, index: usize) -> Self {
        let name = format!("{}[{index}]", self.name);
        self.rename(name)
    }

    /// Returns a serializable summary of the violation.
    pub fn detail(&self) -> ViolationDetail {
        ViolationDetail {
            key: self.message_key.to_string(),
            args: self.args.to_vec(),
            default_message: self.message(),
        }
    }
}

impl fmt::Debug for ConstraintViolation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ConstraintViolation")
            .field("name", &self.name)
            .field("message_key", &self.message_key)
            .field("args", &self.args)
            .field("locale", &self.locale)
            .finish()
    }
}

/// Two violations are equal when they report the same field, key, template,
/// arguments and locale. The formatter is not compared.
impl PartialEq for ConstraintViolation {
    fn eq(&self, other: &Self) -> bool {
        self.name == other.name
            && self.message_key == other.message_key
            && self.template == other.template
            && self.args == other.args
            && self.locale == other.locale
    }
}

impl fmt::Display for ConstraintViolation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.message())
    }
}

/// A serializable view of a violation, suitable for API responses.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ViolationDetail {
    /// Message key.
    pub key: String,
    /// Positional arguments, name first and violated value last.
    pub args: Vec<Arg>,
    /// The rendered message.
    pub default_message: String,
}

// ============================================================================
// CONSTRAINT VIOLATIONS
// ============================================================================

/// The ordered result of a validation call.
///
/// Empty means valid. Order follows rule declaration order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ConstraintViolations {
    violations: Vec<ConstraintViolation>,
}

impl ConstraintViolations {
    /// Creates an empty collection.
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns `true` when there are no violations.
    pub fn is_valid(&self) -> bool {
        self.violations.is_empty()
    }

    /// Same as [`is_valid`](Self::is_valid).
    pub fn is_empty(&self) -> bool {
        self.violations.is_empty()
    }

    /// Returns the number of violations.
    pub fn len(&self) -> usize {
        self.violations.len()
    }

    /// Appends a violation.
    pub fn push(&mut self, violation: ConstraintViolation) {
        self.violations.push(violation);
    }

    /// Iterates over the violations in order.
    pub fn iter(&self) -> std::slice::Iter<'_, ConstraintViolation> {
        self.violations.iter()
    }

    /// Returns the first violation.
    pub fn first(&self) -> Option<&ConstraintViolation> {
        self.violations.first()
    }

    /// Returns the violations as a slice.
    pub fn as_slice(&self) -> &[ConstraintViolation] {
        &self.violations
    }

    /// Returns the field names in order.
    pub fn names(&self) -> Vec<&str> {
        self.violations.iter().map(ConstraintViolation::name).collect()
    }

    /// Renders every message in order.
    pub fn messages(&self) -> Vec<String> {
        self.violations.iter().map(ConstraintViolation::message).collect()
    }

    /// Returns serializable details in order.
    pub fn details(&self) -> Vec<ViolationDetail> {
        self.violations.iter().map(ConstraintViolation::detail).collect()
    }

    /// Calls `callback(name, message_key, args, message)` for each violation.
    ///
    /// Handy for binding violations onto a form-errors object.
    pub fn apply<F>(&self, mut callback: F)
    where
        F: FnMut(&str, &str, &[Arg], &str),
    {
        for violation in &self.violations {
            callback(
                violation.name(),
                violation.message_key(),
                violation.args(),
                &violation.message(),
            );
        }
    }

    /// Returns `Err(to_error(self))` when invalid.
    pub fn throw_if_invalid<E, F>(&self, to_error: F) -> Result<(), E>
    where
        F: FnOnce(&Self) -> E,
    {
        if self.is_valid() {
            Ok(())
        } else {
            Err(to_error(self))
        }
    }

    /// Converts into a `Result`, wrapping violations in
    /// [`ConstraintViolationsError`].
    pub fn into_result(self) -> Result<(), ConstraintViolationsError> {
        if self.is_valid() {
            Ok(())
        } else {
            Err(ConstraintViolationsError::new(self))
        }
    }

    /// Consumes the collection, returning the inner vector.
    pub fn into_vec(self) -> Vec<ConstraintViolation> {
        self.violations
    }
}

impl fmt::Display for ConstraintViolations {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, violation) in self.violations.iter().enumerate() {
            if i > 0 {
                f.write_str("\n")?;
            }
            write!(f, "* {violation}")?;
        }
        Ok(())
    }
}

impl Index<usize> for ConstraintViolations {
    type Output = ConstraintViolation;

    fn index(&self, index: usize) -> &Self::Output {
        &self.violations[index]
    }
}

impl Extend<ConstraintViolation> for ConstraintViolations {
    fn extend<I: IntoIterator<Item = ConstraintViolation>>(&mut self, iter: I) {
        self.violations.extend(iter);
    }
}

impl FromIterator<ConstraintViolation> for ConstraintViolations {
    fn from_iter<I: IntoIterator<Item = ConstraintViolation>>(iter: I) -> Self {
        Self {
            violations: iter.into_iter().collect(),
        }
    }
}

impl From<Vec<ConstraintViolation>> for ConstraintViolations {
    fn from(violations: Vec<ConstraintViolation>) -> Self {
        Self { violations }
    }
}

impl IntoIterator for ConstraintViolations {
    type Item = ConstraintViolation;
    type IntoIter = std::vec::IntoIter<ConstraintViolation>;

    fn into_iter(self) -> Self::IntoIter {
        self.violations.into_iter()
    }
}

impl<'a> IntoIterator for &'a ConstraintViolations {
    type Item = &'a ConstraintViolation;
    type IntoIter = std::slice::Iter<'a, ConstraintViolation>;

    fn into_iter(self) -> Self::IntoIter {
        self.violations.iter()
    }
}
