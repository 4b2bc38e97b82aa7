//! Text rules

use std::borrow::Cow;

use regex::Regex;

use crate::core::NullPolicy;
use crate::foundation::{Arg, ViolationMessage};
use crate::validators::{Constraint, HasLength};

pub mod pattern;

pub use pattern::{is_email, matches_fully};

const NOT_BLANK: ViolationMessage =
    ViolationMessage::of("string.not_blank", "\"{0}\" must not be blank");
const CONTAINS: ViolationMessage =
    ViolationMessage::of("string.contains", "\"{0}\" must contain {1}");
const STARTS_WITH: ViolationMessage =
    ViolationMessage::of("string.starts_with", "\"{0}\" must start with \"{1}\"");
const ENDS_WITH: ViolationMessage =
    ViolationMessage::of("string.ends_with", "\"{0}\" must end with \"{1}\"");
const PATTERN: ViolationMessage = ViolationMessage::of("string.pattern", "\"{0}\" must match {1}");
const EMAIL: ViolationMessage =
    ViolationMessage::of("string.email", "\"{0}\" must be a valid email address");

// ============================================================================
// CHAR SEQUENCE
// ============================================================================

/// Values that can be viewed as text.
pub trait CharSequence: HasLength {
    /// Returns the text.
    fn as_text(&self) -> &str;
}

impl CharSequence for str {
    fn as_text(&self) -> &str {
        self
    }
}

impl CharSequence for String {
    fn as_text(&self) -> &str {
        self
    }
}

impl CharSequence for Cow<'_, str> {
    fn as_text(&self) -> &str {
        self
    }
}

// ============================================================================
// TEXT RULES
// ============================================================================

impl<V: ?Sized + CharSequence + 'static> Constraint<V> {
    /// The value must be present and contain a non-whitespace character.
    pub fn not_blank(self) -> Self {
        self.push(
            |value: &V| !value.as_text().trim().is_empty(),
            NOT_BLANK,
            [],
            NullPolicy::NullIsInvalid,
        )
    }

    /// The value must contain `needle`.
    pub fn contains(self, needle: impl Into<Cow<'static, str>>) -> Self {
        let needle = needle.into();
        let arg = Arg::Str(needle.clone());
        self.push(
            move |value: &V| value.as_text().contains(&*needle),
            CONTAINS,
            [arg],
            NullPolicy::NullIsValid,
        )
    }

    /// The value must start with `prefix`.
    pub fn starts_with(self, prefix: impl Into<Cow<'static, str>>) -> Self {
        let prefix = prefix.into();
        let arg = Arg::Str(prefix.clone());
        self.push(
            move |value: &V| value.as_text().starts_with(&*prefix),
            STARTS_WITH,
            [arg],
            NullPolicy::NullIsValid,
        )
    }

    /// The value must end with `suffix`.
    pub fn ends_with(self, suffix: impl Into<Cow<'static, str>>) -> Self {
        let suffix = suffix.into();
        let arg = Arg::Str(suffix.clone());
        self.push(
            move |value: &V| value.as_text().ends_with(&*suffix),
            ENDS_WITH,
            [arg],
            NullPolicy::NullIsValid,
        )
    }

    /// The whole value must match `regex`.
    pub fn pattern(self, regex: Regex) -> Self {
        let arg = Arg::string(regex.as_str().to_owned());
        self.push(
            move |value: &V| matches_fully(&regex, value.as_text()),
            PATTERN,
            [arg],
            NullPolicy::NullIsValid,
        )
    }

    /// The value must be an email address. Empty strings pass.
    pub fn email(self) -> Self {
        self.push(
            |value: &V| is_email(value.as_text()),
            EMAIL,
            [],
            NullPolicy::NullIsValid,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_not_blank() {
        let c = Constraint::<str>::new().not_blank();
        let rule = &c.rules()[0];
        assert_eq!(rule.evaluate(None), Some(Arg::Null));
        assert_eq!(rule.evaluate(Some("  ")), Some(Arg::from("  ")));
        assert_eq!(rule.evaluate(Some(" a ")), None);
    }

    #[test]
    fn test_affixes() {
        let c = Constraint::<String>::new()
            .starts_with("+")
            .ends_with("0")
            .contains("-");
        let value = "+81-90".to_owned();
        assert!(c.rules().iter().all(|r| r.evaluate(Some(&value)).is_none()));
        let value = "81".to_owned();
        assert!(c.rules().iter().all(|r| r.evaluate(Some(&value)).is_some()));
    }

    #[test]
    fn test_pattern_and_args() {
        let c = Constraint::<str>::new().pattern(Regex::new("[0-9]+").unwrap());
        let rule = &c.rules()[0];
        assert!(rule.evaluate(Some("123")).is_none());
        assert!(rule.evaluate(Some("12a")).is_some());
        assert_eq!(rule.args(), &[Arg::from("[0-9]+")]);
    }

    #[test]
    fn test_email_absent_passes() {
        let c = Constraint::<str>::new().email();
        assert!(c.rules()[0].evaluate(None).is_none());
        assert!(c.rules()[0].evaluate(Some("not an email")).is_some());
    }
}
