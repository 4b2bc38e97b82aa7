//! Fluent construction of [`Validator`]s
//!
//! ```rust,ignore
//! use warden_validator::prelude::*;
//!
//! let address = ValidatorBuilder::<Address>::new()
//!     .nest(|a| Some(&a.country), "country", country_validator)
//!     .constraint_opt(|a| a.street.as_deref(), "street", |c| c.not_blank())
//!     .for_each(|a| Some(&a.phone_numbers), "phoneNumbers", phone_validator)
//!     .constraint_on_group(ConstraintGroup::of("UPDATE"), id_validator)
//!     .build();
//! ```
//!
//! Every declaration becomes one field rule, evaluated in declaration order.

use std::borrow::Cow;
use std::fmt::{self, Debug, Display};
use std::sync::Arc;

use serde::{Deserialize, Serialize};

use crate::Validator;
use crate::combinators::each::{Each, EachEntry};
use crate::combinators::field::{Field, extractor};
use crate::combinators::nested::Nested;
use crate::combinators::when::When;
use crate::combinators::{FieldKind, FieldRule};
use crate::core::{ConstraintRule, NullPolicy};
use crate::foundation::{
    Arg, ConstraintContext, ConstraintGroup, MessageFormatter, SimpleMessageFormatter, ToArg,
};
use crate::validators::{Constraint, NOT_NULL};

// ============================================================================
// OPTIONS
// ============================================================================

/// What happens when a plain rule is declared under a name that already has
/// plain rules.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ConflictStrategy {
    /// Keep the earlier rules and add the new ones right after the last
    /// rule with the same name.
    #[default]
    Append,
    /// Drop the earlier plain rules with the same name.
    Override,
}

/// Validator options that can be loaded from configuration.
///
/// # Examples
///
/// ```rust,ignore
/// let options: ValidatorOptions =
///     serde_json::from_str(r#"{ "separator": "_", "fail_fast": true }"#)?;
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ValidatorOptions {
    /// Joins nested field names. Defaults to `.`.
    pub separator: Cow<'static, str>,
    /// Stop at the first violation.
    pub fail_fast: bool,
    /// How duplicate plain field names are handled.
    pub conflict_strategy: ConflictStrategy,
}

impl Default for ValidatorOptions {
    fn default() -> Self {
        Self {
            separator: Cow::Borrowed("."),
            fail_fast: false,
            conflict_strategy: ConflictStrategy::Append,
        }
    }
}

// ============================================================================
// VALIDATOR BUILDER
// ============================================================================

/// Declares the rules of a [`Validator`].
#[must_use = "builder methods must be chained or built"]
pub struct ValidatorBuilder<T: ?Sized> {
    rules: Vec<FieldRule<T>>,
    options: ValidatorOptions,
    formatter: Option<Arc<dyn MessageFormatter>>,
}

impl<T: ?Sized + 'static> Default for ValidatorBuilder<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: ?Sized + 'static> ValidatorBuilder<T> {
    /// Creates an empty builder with default options.
    pub fn new() -> Self {
        Self {
            rules: Vec::new(),
            options: ValidatorOptions::default(),
            formatter: None,
        }
    }

    /// Starts from the rules and options of an existing validator.
    pub fn from_validator(validator: &Validator<T>) -> Self {
        Self {
            rules: validator.field_rules().to_vec(),
            options: ValidatorOptions {
                separator: Cow::Owned(validator.separator().to_owned()),
                fail_fast: validator.is_fail_fast(),
                conflict_strategy: ConflictStrategy::Append,
            },
            formatter: Some(Arc::clone(validator.formatter())),
        }
    }

    // ------------------------------------------------------------------------
    // Plain fields
    // ------------------------------------------------------------------------

    /// Declares rules on an always-present field.
    pub fn constraint<V, E, F>(self, extract: E, name: impl Into<String>, rules: F) -> Self
    where
        V: ?Sized + ToArg + 'static,
        E: Fn(&T) -> &V + Send + Sync + 'static,
        F: FnOnce(Constraint<V>) -> Constraint<V>,
    {
        let extract = extractor(move |target: &T| Some(extract(target)));
        self.plain(name.into(), extract, rules(Constraint::new()))
    }

    /// Declares rules on a field that may be absent.
    pub fn constraint_opt<V, E, F>(self, extract: E, name: impl Into<String>, rules: F) -> Self
    where
        V: ?Sized + ToArg + 'static,
        E: Fn(&T) -> Option<&V> + Send + Sync + 'static,
        F: FnOnce(Constraint<V>) -> Constraint<V>,
    {
        self.plain(name.into(), extract, rules(Constraint::new()))
    }

    /// Declares rules on a field of any `Debug` type. The violated value is
    /// reported as its `Debug` rendering.
    pub fn constraint_on_object<V, E, F>(
        self,
        extract: E,
        name: impl Into<String>,
        rules: F,
    ) -> Self
    where
        V: ?Sized + Debug + 'static,
        E: Fn(&T) -> Option<&V> + Send + Sync + 'static,
        F: FnOnce(Constraint<V>) -> Constraint<V>,
    {
        self.plain(name.into(), extract, rules(Constraint::debug()))
    }

    /// Declares rules on the whole target, reported under `name`.
    pub fn constraint_on_target<F>(self, name: impl Into<String>, rules: F) -> Self
    where
        T: Debug,
        F: FnOnce(Constraint<T>) -> Constraint<T>,
    {
        let extract = extractor(|target: &T| Some(target));
        self.plain(name.into(), extract, rules(Constraint::debug()))
    }

    // ------------------------------------------------------------------------
    // Nested objects
    // ------------------------------------------------------------------------

    /// Validates a nested object under `name`. An absent object is reported
    /// once by an implicit `not_null` rule.
    pub fn nest<N, E>(self, extract: E, name: impl Into<String>, validator: Validator<N>) -> Self
    where
        N: ?Sized + 'static,
        E: Fn(&T) -> Option<&N> + Send + Sync + 'static,
    {
        let name = name.into();
        let extract = Arc::new(extract);
        let shared = Arc::clone(&extract);
        self.require(name.clone(), extractor(move |target: &T| shared(target)))
            .nest_if_present(move |target: &T| extract(target), name, validator)
    }

    /// Like [`nest`](Self::nest), building the nested validator inline.
    pub fn nest_with<N, E, F>(self, extract: E, name: impl Into<String>, build: F) -> Self
    where
        N: ?Sized + 'static,
        E: Fn(&T) -> Option<&N> + Send + Sync + 'static,
        F: FnOnce(ValidatorBuilder<N>) -> ValidatorBuilder<N>,
    {
        self.nest(extract, name, build(ValidatorBuilder::new()).build())
    }

    /// Validates a nested object under `name` only if it is present.
    pub fn nest_if_present<N, E>(
        self,
        extract: E,
        name: impl Into<String>,
        validator: Validator<N>,
    ) -> Self
    where
        N: ?Sized + 'static,
        E: Fn(&T) -> Option<&N> + Send + Sync + 'static,
    {
        let name = name.into();
        let check = Nested::<T, N, E>::new(name.clone(), extract, validator);
        self.push(FieldRule::new(name, FieldKind::Nested, check))
    }

    // ------------------------------------------------------------------------
    // Collections
    // ------------------------------------------------------------------------

    /// Validates every element of a collection, naming them `name[i]`. An
    /// absent collection is reported by an implicit `not_null` rule.
    pub fn for_each<C, E, X>(
        self,
        extract: X,
        name: impl Into<String>,
        validator: Validator<E>,
    ) -> Self
    where
        C: ?Sized + 'static,
        E: 'static,
        for<'a> &'a C: IntoIterator<Item = &'a E>,
        X: Fn(&T) -> Option<&C> + Send + Sync + 'static,
    {
        let name = name.into();
        let extract = Arc::new(extract);
        let shared = Arc::clone(&extract);
        self.require(name.clone(), extractor(move |target: &T| shared(target)))
            .for_each_if_present(move |target: &T| extract(target), name, validator)
    }

    /// Validates every element of a collection if it is present.
    pub fn for_each_if_present<C, E, X>(
        self,
        extract: X,
        name: impl Into<String>,
        validator: Validator<E>,
    ) -> Self
    where
        C: ?Sized + 'static,
        E: 'static,
        for<'a> &'a C: IntoIterator<Item = &'a E>,
        X: Fn(&T) -> Option<&C> + Send + Sync + 'static,
    {
        let name = name.into();
        let check = Each::<T, C, E, X>::new(name.clone(), extract, validator);
        self.push(FieldRule::new(name, FieldKind::Collection, check))
    }

    /// Validates every value of a map, naming them `name[i]` by iteration
    /// position. An absent map is reported by an implicit `not_null` rule.
    pub fn for_each_value<M, K, E, X>(
        self,
        extract: X,
        name: impl Into<String>,
        validator: Validator<E>,
    ) -> Self
    where
        M: ?Sized + 'static,
        K: Display + 'static,
        E: 'static,
        for<'a> &'a M: IntoIterator<Item = (&'a K, &'a E)>,
        X: Fn(&T) -> Option<&M> + Send + Sync + 'static,
    {
        let name = name.into();
        let extract = Arc::new(extract);
        let shared = Arc::clone(&extract);
        self.require(name.clone(), extractor(move |target: &T| shared(target)))
            .for_each_value_if_present(move |target: &T| extract(target), name, validator)
    }

    /// Validates every value of a map, if present, naming them by position.
    pub fn for_each_value_if_present<M, K, E, X>(
        self,
        extract: X,
        name: impl Into<String>,
        validator: Validator<E>,
    ) -> Self
    where
        M: ?Sized + 'static,
        K: Display + 'static,
        E: 'static,
        for<'a> &'a M: IntoIterator<Item = (&'a K, &'a E)>,
        X: Fn(&T) -> Option<&M> + Send + Sync + 'static,
    {
        let name = name.into();
        let check = EachEntry::<T, M, K, E, X>::positional(name.clone(), extract, validator);
        self.push(FieldRule::new(name, FieldKind::Collection, check))
    }

    /// Validates every value of a map, naming them `name[key]`. An absent
    /// map is reported by an implicit `not_null` rule.
    pub fn for_each_entry<M, K, E, X>(
        self,
        extract: X,
        name: impl Into<String>,
        validator: Validator<E>,
    ) -> Self
    where
        M: ?Sized + 'static,
        K: Display + 'static,
        E: 'static,
        for<'a> &'a M: IntoIterator<Item = (&'a K, &'a E)>,
        X: Fn(&T) -> Option<&M> + Send + Sync + 'static,
    {
        let name = name.into();
        let extract = Arc::new(extract);
        let shared = Arc::clone(&extract);
        self.require(name.clone(), extractor(move |target: &T| shared(target)))
            .for_each_entry_if_present(move |target: &T| extract(target), name, validator)
    }

    /// Validates every value of a map, if present, naming them by key.
    pub fn for_each_entry_if_present<M, K, E, X>(
        self,
        extract: X,
        name: impl Into<String>,
        validator: Validator<E>,
    ) -> Self
    where
        M: ?Sized + 'static,
        K: Display + 'static,
        E: 'static,
        for<'a> &'a M: IntoIterator<Item = (&'a K, &'a E)>,
        X: Fn(&T) -> Option<&M> + Send + Sync + 'static,
    {
        let name = name.into();
        let check = EachEntry::<T, M, K, E, X>::keyed(name.clone(), extract, validator);
        self.push(FieldRule::new(name, FieldKind::Collection, check))
    }

    // ------------------------------------------------------------------------
    // Conditional rules
    // ------------------------------------------------------------------------

    /// Runs `validator` only when `condition(target, context)` holds.
    pub fn constraint_on_condition<C>(self, condition: C, validator: Validator<T>) -> Self
    where
        C: Fn(&T, &ConstraintContext) -> bool + Send + Sync + 'static,
    {
        self.push(FieldRule::new(
            "",
            FieldKind::Conditional,
            When::new(condition, validator),
        ))
    }

    /// Like [`constraint_on_condition`](Self::constraint_on_condition),
    /// building the validator inline.
    pub fn constraint_on_condition_with<C, F>(self, condition: C, build: F) -> Self
    where
        C: Fn(&T, &ConstraintContext) -> bool + Send + Sync + 'static,
        F: FnOnce(ValidatorBuilder<T>) -> ValidatorBuilder<T>,
    {
        self.constraint_on_condition(condition, build(ValidatorBuilder::new()).build())
    }

    /// Runs `validator` only when the call's context belongs to `group`.
    pub fn constraint_on_group(self, group: ConstraintGroup, validator: Validator<T>) -> Self {
        self.constraint_on_condition(
            move |_: &T, context: &ConstraintContext| group.is_active(context),
            validator,
        )
    }

    /// Like [`constraint_on_group`](Self::constraint_on_group), building the
    /// validator inline.
    pub fn constraint_on_group_with<F>(self, group: ConstraintGroup, build: F) -> Self
    where
        F: FnOnce(ValidatorBuilder<T>) -> ValidatorBuilder<T>,
    {
        self.constraint_on_group(group, build(ValidatorBuilder::new()).build())
    }

    /// Runs `validator` only when `downcast` recognises the target as
    /// variant `N`. Field names are not prefixed.
    ///
    /// ```rust,ignore
    /// enum Payment { Card(Card), Transfer(Transfer) }
    ///
    /// let payment = ValidatorBuilder::<Payment>::new()
    ///     .constraint_on_variant(
    ///         |p| match p { Payment::Card(card) => Some(card), _ => None },
    ///         card_validator,
    ///     )
    ///     .build();
    /// ```
    pub fn constraint_on_variant<N, D>(self, downcast: D, validator: Validator<N>) -> Self
    where
        N: ?Sized + 'static,
        D: Fn(&T) -> Option<&N> + Send + Sync + 'static,
    {
        self.push(FieldRule::new(
            "",
            FieldKind::Conditional,
            Nested::<T, N, D>::new("", downcast, validator),
        ))
    }

    /// Like [`constraint_on_variant`](Self::constraint_on_variant), building
    /// the validator inline.
    pub fn constraint_on_variant_with<N, D, F>(self, downcast: D, build: F) -> Self
    where
        N: ?Sized + 'static,
        D: Fn(&T) -> Option<&N> + Send + Sync + 'static,
        F: FnOnce(ValidatorBuilder<N>) -> ValidatorBuilder<N>,
    {
        self.constraint_on_variant(downcast, build(ValidatorBuilder::new()).build())
    }

    // ------------------------------------------------------------------------
    // Options
    // ------------------------------------------------------------------------

    /// Stops at the first violation when `true`.
    pub fn fail_fast(mut self, fail_fast: bool) -> Self {
        self.options.fail_fast = fail_fast;
        self
    }

    /// Sets how duplicate plain field names are handled. Affects rules
    /// declared after this call.
    pub fn conflict_strategy(mut self, strategy: ConflictStrategy) -> Self {
        self.options.conflict_strategy = strategy;
        self
    }

    /// Sets the separator joining nested field names.
    pub fn separator(mut self, separator: impl Into<Cow<'static, str>>) -> Self {
        self.options.separator = separator.into();
        self
    }

    /// Sets the message formatter.
    pub fn message_formatter(mut self, formatter: Arc<dyn MessageFormatter>) -> Self {
        self.formatter = Some(formatter);
        self
    }

    /// Replaces all options at once.
    pub fn options(mut self, options: ValidatorOptions) -> Self {
        self.options = options;
        self
    }

    /// Finishes the validator.
    pub fn build(self) -> Validator<T> {
        let formatter = self
            .formatter
            .unwrap_or_else(|| Arc::new(SimpleMessageFormatter));
        tracing::debug!(
            rules = self.rules.len(),
            fail_fast = self.options.fail_fast,
            separator = %self.options.separator,
            "built validator"
        );
        Validator::from_parts(
            self.rules,
            self.options.fail_fast,
            self.options.separator,
            formatter,
        )
    }

    // ------------------------------------------------------------------------
    // Internals
    // ------------------------------------------------------------------------

    fn plain<V, E>(self, name: String, extract: E, constraint: Constraint<V>) -> Self
    where
        V: ?Sized + 'static,
        E: Fn(&T) -> Option<&V> + Send + Sync + 'static,
    {
        let check = Field::<T, V, E>::new(name.clone(), extract, constraint.into_rules());
        self.push(FieldRule::new(name, FieldKind::Plain, check))
    }

    /// Adds the implicit `not_null` rule of `nest` and `for_each`.
    fn require<V, E>(self, name: String, extract: E) -> Self
    where
        V: ?Sized + 'static,
        E: Fn(&T) -> Option<&V> + Send + Sync + 'static,
    {
        let not_null = ConstraintRule::new(|_: &V| true, NOT_NULL, |_: &V| Arg::Null)
            .with_null_policy(NullPolicy::NullIsInvalid);
        let check = Field::<T, V, E>::new(name.clone(), extract, vec![not_null]);
        self.push(FieldRule::new(name, FieldKind::Plain, check))
    }

    fn push(mut self, rule: FieldRule<T>) -> Self {
        if rule.kind() != FieldKind::Plain {
            self.rules.push(rule);
            return self;
        }
        let same_name = |r: &FieldRule<T>| r.kind() == FieldKind::Plain && r.name() == rule.name();
        match self.options.conflict_strategy {
            ConflictStrategy::Append => {
                match self.rules.iter().rposition(same_name) {
                    Some(last) => self.rules.insert(last + 1, rule),
                    None => self.rules.push(rule),
                }
            }
            ConflictStrategy::Override => {
                let before = self.rules.len();
                self.rules.retain(|r| !same_name(r));
                let removed = before - self.rules.len();
                if removed > 0 {
                    tracing::debug!(field = rule.name(), removed, "overriding field rules");
                }
                self.rules.push(rule);
            }
        }
        self
    }
}

impl<T: ?Sized> fmt::Debug for ValidatorBuilder<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ValidatorBuilder")
            .field("rules", &self.rules)
            .field("options", &self.options)
            .finish_non_exhaustive()
    }
}
