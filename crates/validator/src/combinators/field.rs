//! Plain field rules: constraint rules over one extracted value

use std::marker::PhantomData;
use std::ops::ControlFlow;

use crate::combinators::{FieldCheck, Scope};
use crate::core::ConstraintRule;

/// Evaluates `rules` in order against the value `extract` yields.
///
/// # Type Parameters
///
/// * `T` - The target type
/// * `V` - The field type (can be `?Sized`)
/// * `E` - The extractor, returning `None` for an absent value
pub(crate) struct Field<T: ?Sized, V: ?Sized, E> {
    name: String,
    extract: E,
    rules: Vec<ConstraintRule<V>>,
    _phantom: PhantomData<fn(&T) -> &V>,
}

impl<T: ?Sized, V: ?Sized, E> Field<T, V, E> {
    pub(crate) fn new(name: impl Into<String>, extract: E, rules: Vec<ConstraintRule<V>>) -> Self {
        Self {
            name: name.into(),
            extract,
            rules,
            _phantom: PhantomData,
        }
    }
}

impl<T, V, E> FieldCheck<T> for Field<T, V, E>
where
    T: ?Sized,
    V: ?Sized,
    E: Fn(&T) -> Option<&V> + Send + Sync,
{
    fn check(&self, target: &T, prefix: &str, scope: &mut Scope<'_>) -> ControlFlow<()> {
        let value = (self.extract)(target);
        let mut path: Option<String> = None;

        for rule in &self.rules {
            if let Some(violated) = rule.evaluate(value) {
                let name = path.get_or_insert_with(|| scope.path(prefix, &self.name));
                let violation = rule.violation(name, violated, scope.locale, scope.formatter);
                scope.report(violation)?;
            }
        }

        ControlFlow::Continue(())
    }
}

/// Pins the higher-ranked signature of an extractor closure.
pub(crate) fn extractor<T: ?Sized, V: ?Sized, E>(extract: E) -> E
where
    E: Fn(&T) -> Option<&V>,
{
    extract
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::foundation::{ConstraintContext, Locale, MessageFormatter, SimpleMessageFormatter};
    use crate::validators::Constraint;
    use std::sync::Arc;

    struct User {
        name: Option<String>,
    }

    fn run(
        field: &Field<User, str, impl Fn(&User) -> Option<&str> + Send + Sync>,
        user: &User,
        fail_fast: bool,
    ) -> Vec<String> {
        let formatter: Arc<dyn MessageFormatter> = Arc::new(SimpleMessageFormatter);
        let context = ConstraintContext::default();
        let locale = Locale::ROOT;
        let mut scope = Scope::new(&locale, &context, &formatter, ".");
        scope.fail_fast = fail_fast;
        let _ = field.check(user, "user", &mut scope);
        scope.into_violations().messages()
    }

    fn name_field() -> Field<User, str, impl Fn(&User) -> Option<&str> + Send + Sync> {
        let rules = Constraint::<str>::new().not_blank().min_length(3).into_rules();
        Field::new("name", extractor(|u: &User| u.name.as_deref()), rules)
    }

    #[test]
    fn test_collects_every_failing_rule() {
        let user = User { name: Some(" ".into()) };
        assert_eq!(
            run(&name_field(), &user, false),
            vec![
                "\"user.name\" must not be blank".to_owned(),
                "The size of \"user.name\" must be greater than or equal to 3. The given size is 1"
                    .to_owned(),
            ]
        );
    }

    #[test]
    fn test_fail_fast_stops_after_first() {
        let user = User { name: Some(" ".into()) };
        assert_eq!(run(&name_field(), &user, true).len(), 1);
    }

    #[test]
    fn test_absent_value_only_fails_null_invalid_rules() {
        let user = User { name: None };
        assert_eq!(
            run(&name_field(), &user, false),
            vec!["\"user.name\" must not be blank".to_owned()]
        );
    }
}
