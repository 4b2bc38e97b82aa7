//! Regular-expression backed text checks

use std::sync::LazyLock;

use regex::Regex;

static EMAIL_REGEX: LazyLock<Option<Regex>> = LazyLock::new(|| {
    Regex::new(
        r"^[a-zA-Z0-9.!#$%&'*+/=?^_`{|}~-]+@[a-zA-Z0-9](?:[a-zA-Z0-9-]{0,61}[a-zA-Z0-9])?(?:\.[a-zA-Z0-9](?:[a-zA-Z0-9-]{0,61}[a-zA-Z0-9])?)*$",
    )
    .ok()
});

/// Returns `true` if `input` looks like an email address.
///
/// The empty string is accepted; combine with `not_blank` to require one.
pub fn is_email(input: &str) -> bool {
    input.is_empty() || EMAIL_REGEX.as_ref().is_some_and(|re| re.is_match(input))
}

/// Returns `true` if the whole of `input` matches `regex`.
pub fn matches_fully(regex: &Regex, input: &str) -> bool {
    regex
        .find(input)
        .is_some_and(|m| m.start() == 0 && m.end() == input.len())
}
