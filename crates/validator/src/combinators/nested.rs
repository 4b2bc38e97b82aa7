//! Nested rules: delegate to a child validator under a prefixed name

use std::marker::PhantomData;
use std::ops::ControlFlow;

use crate::Validator;
use crate::combinators::{FieldCheck, Scope};

/// Runs `validator` against the object `extract` yields, if any.
///
/// An empty `name` passes the prefix through unchanged, which is how
/// variant rules and composed validators reuse this combinator.
pub(crate) struct Nested<T: ?Sized, N: ?Sized, E> {
    name: String,
    extract: E,
    validator: Validator<N>,
    _phantom: PhantomData<fn(&T)>,
}

impl<T: ?Sized, N: ?Sized, E> Nested<T, N, E> {
    pub(crate) fn new(name: impl Into<String>, extract: E, validator: Validator<N>) -> Self {
        Self {
            name: name.into(),
            extract,
            validator,
            _phantom: PhantomData,
        }
    }
}

impl<T, N, E> FieldCheck<T> for Nested<T, N, E>
where
    T: ?Sized,
    N: ?Sized,
    E: Fn(&T) -> Option<&N> + Send + Sync,
{
    fn check(&self, target: &T, prefix: &str, scope: &mut Scope<'_>) -> ControlFlow<()> {
        match (self.extract)(target) {
            Some(child) => {
                let path = scope.path(prefix, &self.name);
                self.validator.run(child, &path, scope)
            }
            None => ControlFlow::Continue(()),
        }
    }
}
