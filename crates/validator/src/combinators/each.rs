//! Collection rules: run an element validator per element
//!
//! Elements are named `name[i]` by iteration position, or `name[key]` for
//! keyed map iteration.

use std::fmt::Display;
use std::marker::PhantomData;
use std::ops::ControlFlow;

use crate::Validator;
use crate::combinators::{FieldCheck, Scope};

// ============================================================================
// EACH ELEMENT
// ============================================================================

/// Validates every element of a collection `C` of `E`s.
pub(crate) struct Each<T: ?Sized, C: ?Sized, E, X> {
    name: String,
    extract: X,
    validator: Validator<E>,
    _phantom: PhantomData<fn(&T) -> &C>,
}

impl<T: ?Sized, C: ?Sized, E, X> Each<T, C, E, X> {
    pub(crate) fn new(name: impl Into<String>, extract: X, validator: Validator<E>) -> Self {
        Self {
            name: name.into(),
            extract,
            validator,
            _phantom: PhantomData,
        }
    }
}

impl<T, C, E, X> FieldCheck<T> for Each<T, C, E, X>
where
    T: ?Sized,
    C: ?Sized,
    for<'a> &'a C: IntoIterator<Item = &'a E>,
    X: Fn(&T) -> Option<&C> + Send + Sync,
{
    fn check(&self, target: &T, prefix: &str, scope: &mut Scope<'_>) -> ControlFlow<()> {
        let Some(collection) = (self.extract)(target) else {
            return ControlFlow::Continue(());
        };

        let base = scope.path(prefix, &self.name);
        for (index, element) in collection.into_iter().enumerate() {
            self.validator.run(element, &format!("{base}[{index}]"), scope)?;
        }

        ControlFlow::Continue(())
    }
}

// ============================================================================
// EACH ENTRY
// ============================================================================

/// Validates every value of a map `M` of `K -> E`.
pub(crate) struct EachEntry<T: ?Sized, M: ?Sized, K, E, X> {
    name: String,
    extract: X,
    validator: Validator<E>,
    keyed: bool,
    _phantom: PhantomData<fn(&T) -> (&M, &K)>,
}

impl<T: ?Sized, M: ?Sized, K, E, X> EachEntry<T, M, K, E, X> {
    /// Names elements by iteration position.
    pub(crate) fn positional(name: impl Into<String>, extract: X, validator: Validator<E>) -> Self {
        Self {
            name: name.into(),
            extract,
            validator,
            keyed: false,
            _phantom: PhantomData,
        }
    }

    /// Names elements by key.
    pub(crate) fn keyed(name: impl Into<String>, extract: X, validator: Validator<E>) -> Self {
        Self {
            keyed: true,
            ..Self::positional(name, extract, validator)
        }
    }
}

impl<T, M, K, E, X> FieldCheck<T> for EachEntry<T, M, K, E, X>
where
    T: ?Sized,
    M: ?Sized,
    K: Display,
    for<'a> &'a M: IntoIterator<Item = (&'a K, &'a E)>,
    X: Fn(&T) -> Option<&M> + Send + Sync,
{
    fn check(&self, target: &T, prefix: &str, scope: &mut Scope<'_>) -> ControlFlow<()> {
        let Some(map) = (self.extract)(target) else {
            return ControlFlow::Continue(());
        };

        let base = scope.path(prefix, &self.name);
        for (index, (key, value)) in map.into_iter().enumerate() {
            let path = if self.keyed {
                format!("{base}[{key}]")
            } else {
                format!("{base}[{index}]")
            };
            self.validator.run(value, &path, scope)?;
        }

        ControlFlow::Continue(())
    }
}
