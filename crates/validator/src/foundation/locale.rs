//! Locale identifiers used when rendering violation messages

use std::borrow::Cow;
use std::fmt;

/// A BCP 47 style language tag such as `en`, `ja` or `en-US`.
///
/// The empty tag is the root locale, which every formatter treats as
/// "use the default template".
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default)]
pub struct Locale(Cow<'static, str>);

impl Locale {
    /// The root locale.
    pub const ROOT: Self = Self(Cow::Borrowed(""));
    /// English.
    pub const ENGLISH: Self = Self(Cow::Borrowed("en"));
    /// Japanese.
    pub const JAPANESE: Self = Self(Cow::Borrowed("ja"));

    /// Creates a locale from a tag. Underscores are normalised to hyphens,
    /// so `en_US` and `en-US` are the same locale.
    pub fn new(tag: impl Into<Cow<'static, str>>) -> Self {
        let tag = tag.into();
        if tag.contains('_') {
            Self(Cow::Owned(tag.replace('_', "-")))
        } else {
            Self(tag)
        }
    }

    /// Returns the full tag.
    pub fn tag(&self) -> &str {
        &self.0
    }

    /// Returns the language subtag (`en` for `en-US`).
    pub fn language(&self) -> &str {
        self.0.split('-').next().unwrap_or_default()
    }

    /// Returns `true` for the root locale.
    pub fn is_root(&self) -> bool {
        self.0.is_empty()
    }
}

impl fmt::Display for Locale {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&'static str> for Locale {
    fn from(tag: &'static str) -> Self {
        Self::new(tag)
    }
}
