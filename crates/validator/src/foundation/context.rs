//! Per-call validation context, constraint groups and conditions
//!
//! A [`ConstraintContext`] travels with every `validate` call. Conditional
//! rules inspect it to decide whether they apply: a [`ConstraintGroup`] is
//! just a context with a name and no attributes, and group rules fire when
//! the names match.

use std::borrow::Cow;
use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

use crate::foundation::Arg;

// ============================================================================
// CONSTRAINT CONTEXT
// ============================================================================

type AttributeLookup = dyn Fn(&str) -> Option<Arg> + Send + Sync;

#[derive(Clone)]
enum Attributes {
    Empty,
    Map(Arc<HashMap<String, Arg>>),
    Lookup(Arc<AttributeLookup>),
}

/// The context a validation runs in: a name plus an attribute lookup.
///
/// # Examples
///
/// ```rust,ignore
/// use warden_validator::prelude::*;
///
/// let context = ConstraintContext::from_map("checkout", [("country", "JP")]);
/// assert_eq!(context.attribute("country"), Some(Arg::from("JP")));
/// ```
#[derive(Clone)]
pub struct ConstraintContext {
    name: Cow<'static, str>,
    attributes: Attributes,
}

impl ConstraintContext {
    /// Creates a context without attributes.
    pub fn new(name: impl Into<Cow<'static, str>>) -> Self {
        Self {
            name: name.into(),
            attributes: Attributes::Empty,
        }
    }

    /// Creates a context backed by a map of attributes.
    pub fn from_map<K, V>(
        name: impl Into<Cow<'static, str>>,
        attributes: impl IntoIterator<Item = (K, V)>,
    ) -> Self
    where
        K: Into<String>,
        V: Into<Arg>,
    {
        let map = attributes
            .into_iter()
            .map(|(k, v)| (k.into(), v.into()))
            .collect();
        Self {
            name: name.into(),
            attributes: Attributes::Map(Arc::new(map)),
        }
    }

    /// Creates a context whose attributes are computed by `lookup`.
    pub fn from_fn<F>(name: impl Into<Cow<'static, str>>, lookup: F) -> Self
    where
        F: Fn(&str) -> Option<Arg> + Send + Sync + 'static,
    {
        Self {
            name: name.into(),
            attributes: Attributes::Lookup(Arc::new(lookup)),
        }
    }

    /// Returns the context name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Returns the attribute stored under `key`.
    ///
    /// An attribute whose value is [`Arg::Null`] is reported as absent.
    pub fn attribute(&self, key: &str) -> Option<Arg> {
        let value = match &self.attributes {
            Attributes::Empty => None,
            Attributes::Map(map) => map.get(key).cloned(),
            Attributes::Lookup(lookup) => lookup(key),
        };
        value.filter(|arg| !arg.is_null())
    }

    /// Returns `true` if a non-null attribute is stored under `key`.
    pub fn has_attribute(&self, key: &str) -> bool {
        self.attribute(key).is_some()
    }
}

impl Default for ConstraintContext {
    fn default() -> Self {
        ConstraintGroup::DEFAULT.into()
    }
}

impl fmt::Debug for ConstraintContext {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let attributes = match &self.attributes {
            Attributes::Empty => "empty",
            Attributes::Map(_) => "map",
            Attributes::Lookup(_) => "<function>",
        };
        f.debug_struct("ConstraintContext")
            .field("name", &self.name)
            .field("attributes", &attributes)
            .finish()
    }
}

// ============================================================================
// CONSTRAINT GROUP
// ============================================================================

/// A named group of constraints.
///
/// Two groups are the same group iff their names are equal.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ConstraintGroup(Cow<'static, str>);

impl ConstraintGroup {
    /// The group used when no context is supplied.
    pub const DEFAULT: Self = Self(Cow::Borrowed("DEFAULT"));

    /// Creates a group from a static name, usable in `const` context.
    pub const fn of(name: &'static str) -> Self {
        Self(Cow::Borrowed(name))
    }

    /// Creates a group.
    pub fn new(name: impl Into<Cow<'static, str>>) -> Self {
        Self(name.into())
    }

    /// Returns the group name.
    pub fn name(&self) -> &str {
        &self.0
    }

    /// Returns `true` if `context` was created for this group.
    pub fn is_active(&self, context: &ConstraintContext) -> bool {
        context.name() == self.name()
    }
}

impl From<ConstraintGroup> for ConstraintContext {
    fn from(group: ConstraintGroup) -> Self {
        Self::new(group.0)
    }
}

impl From<&ConstraintGroup> for ConstraintContext {
    fn from(group: &ConstraintGroup) -> Self {
        Self::new(group.0.clone())
    }
}

// ============================================================================
// CONSTRAINT CONDITION
// ============================================================================

/// A predicate over the validation target and its context.
///
/// Any `Fn(&T, &ConstraintContext) -> bool` that is `Send + Sync` qualifies.
pub trait ConstraintCondition<T: ?Sized>:
    Fn(&T, &ConstraintContext) -> bool + Send + Sync + 'static
{
}

impl<T: ?Sized, F> ConstraintCondition<T> for F where
    F: Fn(&T, &ConstraintContext) -> bool + Send + Sync + 'static
{
}

/// Holds when the context carries a non-null attribute `key`.
pub fn has_attribute<T: ?Sized + 'static>(
    key: impl Into<Cow<'static, str>>,
) -> impl ConstraintCondition<T> {
    let key = key.into();
    move |_: &T, context: &ConstraintContext| context.has_attribute(&key)
}

/// Holds when the context attribute `key` equals `value`.
pub fn has_attribute_with_value<T: ?Sized + 'static>(
    key: impl Into<Cow<'static, str>>,
    value: impl Into<Arg>,
) -> impl ConstraintCondition<T> {
    let key = key.into();
    let value = value.into();
    move |_: &T, context: &ConstraintContext| context.attribute(&key).as_ref() == Some(&value)
}
