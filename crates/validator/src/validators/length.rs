//! Length and size rules
//!
//! Strings are measured in Unicode scalar values, collections by element
//! count. Size rules report the measured length as the violated value, so
//! `{2}` in `The size of "{0}" must be ... The given size is {2}` is the
//! actual size.

use std::borrow::Cow;
use std::collections::{BTreeMap, BTreeSet, HashMap, HashSet, VecDeque};
use std::sync::Arc;

use indexmap::{IndexMap, IndexSet};

use crate::core::NullPolicy;
use crate::foundation::{Arg, ViolationMessage};
use crate::validators::Constraint;

const NOT_EMPTY: ViolationMessage =
    ViolationMessage::of("container.not_empty", "\"{0}\" must not be empty");
const MIN_LENGTH: ViolationMessage = ViolationMessage::of(
    "container.greater_than_or_equal",
    "The size of \"{0}\" must be greater than or equal to {1}. The given size is {2}",
);
const MAX_LENGTH: ViolationMessage = ViolationMessage::of(
    "container.less_than_or_equal",
    "The size of \"{0}\" must be less than or equal to {1}. The given size is {2}",
);
const FIXED_LENGTH: ViolationMessage = ViolationMessage::of(
    "container.fixed_size",
    "The size of \"{0}\" must be {1}. The given size is {2}",
);
const LENGTH_BETWEEN: ViolationMessage = ViolationMessage::of(
    "container.between",
    "The size of \"{0}\" must be between {1} and {2}. The given size is {3}",
);

// ============================================================================
// HAS LENGTH
// ============================================================================

/// Values with a measurable length.
pub trait HasLength {
    /// Returns the length: characters for text, elements for collections.
    fn length(&self) -> usize;
}

impl HasLength for str {
    fn length(&self) -> usize {
        self.chars().count()
    }
}

impl HasLength for String {
    fn length(&self) -> usize {
        self.as_str().length()
    }
}

impl HasLength for Cow<'_, str> {
    fn length(&self) -> usize {
        (**self).length()
    }
}

impl<T> HasLength for [T] {
    fn length(&self) -> usize {
        self.len()
    }
}

impl<T, const N: usize> HasLength for [T; N] {
    fn length(&self) -> usize {
        N
    }
}

macro_rules! impl_has_length {
    ($($ty:ident<$($p:ident),+>),+ $(,)?) => {
        $(
            impl<$($p),+> HasLength for $ty<$($p),+> {
                fn length(&self) -> usize {
                    self.len()
                }
            }
        )+
    };
}

impl_has_length!(
    Vec<T>,
    VecDeque<T>,
    BTreeSet<T>,
    BTreeMap<K, V>,
    HashSet<T, S>,
    HashMap<K, V, S>,
    IndexSet<T, S>,
    IndexMap<K, V, S>,
);

// ============================================================================
// LENGTH RULES
// ============================================================================

impl<V: ?Sized + HasLength + 'static> Constraint<V> {
    /// The value must be present and non-empty.
    pub fn not_empty(self) -> Self {
        self.push(
            |value: &V| value.length() > 0,
            NOT_EMPTY,
            [],
            NullPolicy::NullIsInvalid,
        )
    }

    /// The length must be at least `min`.
    pub fn min_length(self, min: usize) -> Self {
        self.push_length(move |len| len >= min, MIN_LENGTH, [Arg::from(min)])
    }

    /// The length must be at most `max`.
    pub fn max_length(self, max: usize) -> Self {
        self.push_length(move |len| len <= max, MAX_LENGTH, [Arg::from(max)])
    }

    /// The length must be exactly `len`.
    pub fn fixed_length(self, len: usize) -> Self {
        self.push_length(move |actual| actual == len, FIXED_LENGTH, [Arg::from(len)])
    }

    /// The length must lie in `min..=max`.
    pub fn length_between(self, min: usize, max: usize) -> Self {
        self.push_length(
            move |len| (min..=max).contains(&len),
            LENGTH_BETWEEN,
            [Arg::from(min), Arg::from(max)],
        )
    }

    fn push_length<P, const N: usize>(
        self,
        predicate: P,
        message: ViolationMessage,
        args: [Arg; N],
    ) -> Self
    where
        P: Fn(usize) -> bool + Send + Sync + 'static,
    {
        self.push_projected(
            move |value: &V| predicate(value.length()),
            message,
            args,
            NullPolicy::NullIsValid,
            Arc::new(|value: &V| Arg::from(value.length())),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case("", false)]
    #[case("ab", false)]
    #[case("abc", true)]
    #[case("日本語", true)]
    fn test_min_length_counts_chars(#[case] input: &str, #[case] valid: bool) {
        let c = Constraint::<str>::new().min_length(3);
        assert_eq!(c.rules()[0].evaluate(Some(input)).is_none(), valid);
    }

    #[test]
    fn test_size_rule_reports_length() {
        let c = Constraint::<Vec<i32>>::new().max_length(2);
        let violated = c.rules()[0].evaluate(Some(&vec![1, 2, 3]));
        assert_eq!(violated, Some(Arg::from(3usize)));
    }

    #[test]
    fn test_not_empty_rejects_absent() {
        let c = Constraint::<String>::new().not_empty();
        assert_eq!(c.rules()[0].evaluate(None), Some(Arg::Null));
        assert!(c.rules()[0].evaluate(Some(&String::new())).is_some());
        assert!(c.rules()[0].evaluate(Some(&"x".to_owned())).is_none());
    }

    #[test]
    fn test_length_between_and_fixed() {
        let c = Constraint::<str>::new().length_between(2, 4).fixed_length(3);
        assert!(c.rules()[0].evaluate(Some("abcde")).is_some());
        assert!(c.rules()[0].evaluate(Some("abcd")).is_none());
        assert!(c.rules()[1].evaluate(Some("abcd")).is_some());
        assert_eq!(c.rules()[0].args(), &[Arg::from(2usize), Arg::from(4usize)]);
    }

    #[test]
    fn test_map_length() {
        let map: HashMap<&str, i32> = [("a", 1)].into_iter().collect();
        assert_eq!(map.length(), 1);
        let set: IndexSet<i32> = [1, 2, 2].into_iter().collect();
        assert_eq!(set.length(), 2);
    }
}
