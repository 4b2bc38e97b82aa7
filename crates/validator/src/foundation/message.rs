//! Message templates and formatters
//!
//! A rule carries a [`ViolationMessage`]: a catalog key plus a default
//! template such as `"{0}" must not be blank`. When a violation is rendered,
//! its [`MessageFormatter`] turns `(key, template, args, locale)` into the
//! final text.
//!
//! Two formatters ship with the crate:
//!
//! - [`SimpleMessageFormatter`] substitutes `{n}` placeholders in the
//!   default template.
//! - [`CatalogMessageFormatter`] first looks the key up in an in-memory,
//!   per-locale catalog and falls back to the default template.

use std::borrow::Cow;
use std::collections::HashMap;
use std::fmt::{self, Write as _};

use crate::foundation::{Arg, Locale};

// ============================================================================
// VIOLATION MESSAGE
// ============================================================================

/// A message key paired with its default template.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ViolationMessage {
    key: Cow<'static, str>,
    template: Cow<'static, str>,
}

impl ViolationMessage {
    /// Creates a message from a catalog key and a default template.
    pub fn new(key: impl Into<Cow<'static, str>>, template: impl Into<Cow<'static, str>>) -> Self {
        Self {
            key: key.into(),
            template: template.into(),
        }
    }

    /// Creates a message from static strings, usable in `const` context.
    pub const fn of(key: &'static str, template: &'static str) -> Self {
        Self {
            key: Cow::Borrowed(key),
            template: Cow::Borrowed(template),
        }
    }

    /// Creates a custom message whose key is the template itself.
    ///
    /// Catalogs never contain an entry for such a key, so the text is
    /// always rendered as written.
    pub fn custom(template: impl Into<Cow<'static, str>>) -> Self {
        let template = template.into();
        Self {
            key: template.clone(),
            template,
        }
    }

    /// Returns the catalog key.
    pub fn key(&self) -> &str {
        &self.key
    }

    /// Returns the default template.
    pub fn template(&self) -> &str {
        &self.template
    }

    pub(crate) fn key_cow(&self) -> Cow<'static, str> {
        self.key.clone()
    }

    pub(crate) fn template_cow(&self) -> Cow<'static, str> {
        self.template.clone()
    }
}

// ============================================================================
// MESSAGE FORMATTER
// ============================================================================

/// Renders violation messages.
///
/// Implementations must be pure: the same inputs always produce the same
/// text, so rendering a violation twice yields identical messages.
pub trait MessageFormatter: Send + Sync + fmt::Debug {
    /// Renders the message identified by `key`, with `template` as the
    /// default text.
    fn format(&self, key: &str, template: &str, args: &[Arg], locale: &Locale) -> String;
}

/// Substitutes positional `{n}` placeholders in the default template.
///
/// Placeholders whose index is out of range, or whose content is not a
/// number, are left untouched. `''` renders a single quote and text quoted
/// with `'{...}'` is emitted literally.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SimpleMessageFormatter;

impl SimpleMessageFormatter {
    /// Creates a new formatter.
    pub const fn new() -> Self {
        Self
    }

    /// Substitutes `args` into `template`.
    pub fn render(template: &str, args: &[Arg]) -> String {
        let mut out = String::with_capacity(template.len() + 16);
        let mut rest = template;

        while let Some(pos) = rest.find(['{', '\'']) {
            out.push_str(&rest[..pos]);
            let tail = &rest[pos..];

            if let Some(after) = tail.strip_prefix("''") {
                out.push('\'');
                rest = after;
            } else if let Some(after) = tail.strip_prefix('\'') {
                if after.starts_with(['{', '}']) {
                    match after.find('\'') {
                        Some(end) => {
                            out.push_str(&after[..end]);
                            rest = &after[end + 1..];
                        }
                        None => {
                            out.push_str(after);
                            rest = "";
                        }
                    }
                } else {
                    out.push('\'');
                    rest = after;
                }
            } else {
                match tail.find('}') {
                    Some(end) => {
                        let placeholder = &tail[1..end];
                        match placeholder.trim().parse::<usize>().ok().and_then(|i| args.get(i)) {
                            Some(arg) => {
                                let _ = write!(out, "{arg}");
                            }
                            None => out.push_str(&tail[..=end]),
                        }
                        rest = &tail[end + 1..];
                    }
                    None => {
                        out.push_str(tail);
                        rest = "";
                    }
                }
            }
        }

        out.push_str(rest);
        out
    }
}

impl MessageFormatter for SimpleMessageFormatter {
    fn format(&self, _key: &str, template: &str, args: &[Arg], _locale: &Locale) -> String {
        Self::render(template, args)
    }
}

/// Looks message keys up in an in-memory catalog.
///
/// Resolution order for a given locale: the full tag (`en-US`), then the
/// language (`en`), then the root catalog, then the rule's default template.
///
/// # Examples
///
/// ```rust,ignore
/// use warden_validator::prelude::*;
///
/// let formatter = CatalogMessageFormatter::new()
///     .with_message(Locale::JAPANESE, "string.not_blank", "「{0}」が空白です");
/// ```
#[derive(Debug, Clone, Default)]
pub struct CatalogMessageFormatter {
    catalogs: HashMap<Locale, HashMap<Cow<'static, str>, Cow<'static, str>>>,
}

impl CatalogMessageFormatter {
    /// Creates an empty catalog.
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a template for `key` in `locale`.
    #[must_use = "builder methods must be chained or built"]
    pub fn with_message(
        mut self,
        locale: Locale,
        key: impl Into<Cow<'static, str>>,
        template: impl Into<Cow<'static, str>>,
    ) -> Self {
        self.insert(locale, key, template);
        self
    }

    /// Adds or replaces a template for `key` in `locale`.
    pub fn insert(
        &mut self,
        locale: Locale,
        key: impl Into<Cow<'static, str>>,
        template: impl Into<Cow<'static, str>>,
    ) {
        self.catalogs
            .entry(locale)
            .or_default()
            .insert(key.into(), template.into());
    }

    /// Returns the catalog template for `key`, if any locale in the
    /// fallback chain defines one.
    pub fn resolve(&self, key: &str, locale: &Locale) -> Option<&str> {
        let lookup = |locale: &Locale| {
            self.catalogs
                .get(locale)
                .and_then(|catalog| catalog.get(key))
                .map(|template| &**template)
        };

        lookup(locale)
            .or_else(|| {
                let language = locale.language();
                if language == locale.tag() {
                    None
                } else {
                    lookup(&Locale::new(language.to_owned()))
                }
            })
            .or_else(|| lookup(&Locale::ROOT))
    }
}

impl MessageFormatter for CatalogMessageFormatter {
    fn format(&self, key: &str, template: &str, args: &[Arg], locale: &Locale) -> String {
        let template = self.resolve(key, locale).unwrap_or(template);
        SimpleMessageFormatter::render(template, args)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn args() -> Vec<Arg> {
        vec![Arg::from("name"), Arg::from(3u32), Arg::from(1u32)]
    }

    #[test]
    fn test_positional_substitution() {
        let out = SimpleMessageFormatter::render(
            "The size of \"{0}\" must be greater than or equal to {1}. The given size is {2}",
            &args(),
        );
        assert_eq!(
            out,
            "The size of \"name\" must be greater than or equal to 3. The given size is 1"
        );
    }

    #[test]
    fn test_unknown_placeholder_left_verbatim() {
        assert_eq!(
            SimpleMessageFormatter::render("{0} {9} {x}", &args()),
            "name {9} {x}"
        );
    }

    #[test]
    fn test_unclosed_brace() {
        assert_eq!(SimpleMessageFormatter::render("{0} {1", &args()), "name {1");
    }

    #[test]
    fn test_quotes() {
        assert_eq!(SimpleMessageFormatter::render("can''t", &[]), "can't");
        assert_eq!(
            SimpleMessageFormatter::render("it's {0}", &args()),
            "it's name"
        );
        assert_eq!(
            SimpleMessageFormatter::render("'{0}' is {0}", &args()),
            "{0} is name"
        );
    }

    #[test]
    fn test_catalog_fallback_chain() {
        let formatter = CatalogMessageFormatter::new()
            .with_message(Locale::JAPANESE, "k", "ja {0}")
            .with_message(Locale::new("en-GB"), "k", "gb {0}")
            .with_message(Locale::ROOT, "k", "root {0}");

        let args = args();
        assert_eq!(
            formatter.format("k", "default {0}", &args, &Locale::new("ja-JP")),
            "ja name"
        );
        assert_eq!(
            formatter.format("k", "default {0}", &args, &Locale::new("en-GB")),
            "gb name"
        );
        assert_eq!(
            formatter.format("k", "default {0}", &args, &Locale::ENGLISH),
            "root name"
        );
        assert_eq!(
            formatter.format("other", "default {0}", &args, &Locale::ENGLISH),
            "default name"
        );
    }

    #[test]
    fn test_custom_message_key_is_template() {
        let message = ViolationMessage::custom("street is required");
        assert_eq!(message.key(), "street is required");
        assert_eq!(message.template(), "street is required");
    }
}
