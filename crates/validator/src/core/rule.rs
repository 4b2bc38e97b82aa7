//! Constraint rules
//!
//! A [`ConstraintRule`] is the smallest unit of validation: a predicate over
//! a field value, the message to report when it fails, the rule's own message
//! arguments and a policy for absent values.

use std::fmt;
use std::sync::Arc;

use smallvec::SmallVec;

use crate::core::ConstraintViolation;
use crate::foundation::{Arg, Args, Locale, MessageFormatter, ViolationMessage};

// ============================================================================
// NULL POLICY
// ============================================================================

/// How a rule treats an absent (`None`) field value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum NullPolicy {
    /// An absent value violates the rule; the predicate is not called.
    NullIsInvalid,
    /// An absent value satisfies the rule; the predicate is not called.
    #[default]
    NullIsValid,
}

// ============================================================================
// CONSTRAINT RULE
// ============================================================================

type Predicate<V> = Arc<dyn Fn(&V) -> bool + Send + Sync>;
pub(crate) type Projection<V> = Arc<dyn Fn(&V) -> Arg + Send + Sync>;

/// A predicate over a single value plus everything needed to report it.
///
/// Rules are immutable and cheap to clone.
///
/// # Examples
///
/// ```rust,ignore
/// use warden_validator::core::ConstraintRule;
/// use warden_validator::foundation::{ToArg, ViolationMessage};
///
/// let rule = ConstraintRule::new(
///     |s: &str| s.starts_with("+"),
///     ViolationMessage::of("phone.e164", "\"{0}\" must start with +"),
///     |s: &str| s.to_arg(),
/// );
/// ```
pub struct ConstraintRule<V: ?Sized> {
    predicate: Predicate<V>,
    message: ViolationMessage,
    args: Args,
    null_policy: NullPolicy,
    violated: Projection<V>,
}

impl<V: ?Sized> ConstraintRule<V> {
    /// Creates a rule that treats absent values as valid.
    ///
    /// `violated` projects the value into the argument reported as the
    /// violated value.
    pub fn new<P, F>(predicate: P, message: ViolationMessage, violated: F) -> Self
    where
        P: Fn(&V) -> bool + Send + Sync + 'static,
        F: Fn(&V) -> Arg + Send + Sync + 'static,
    {
        Self::from_parts(Arc::new(predicate), message, Arc::new(violated))
    }

    pub(crate) fn from_parts(
        predicate: Predicate<V>,
        message: ViolationMessage,
        violated: Projection<V>,
    ) -> Self {
        Self {
            predicate,
            message,
            args: SmallVec::new(),
            null_policy: NullPolicy::NullIsValid,
            violated,
        }
    }

    /// Sets the rule's message arguments, which sit between the field name
    /// and the violated value.
    #[must_use = "builder methods must be chained or built"]
    pub fn with_args(mut self, args: impl IntoIterator<Item = Arg>) -> Self {
        self.args = args.into_iter().collect();
        self
    }

    /// Sets the null policy.
    #[must_use = "builder methods must be chained or built"]
    pub fn with_null_policy(mut self, policy: NullPolicy) -> Self {
        self.null_policy = policy;
        self
    }

    /// Replaces the message.
    #[must_use = "builder methods must be chained or built"]
    pub fn with_message(mut self, message: ViolationMessage) -> Self {
        self.message = message;
        self
    }

    /// Replaces the violated-value projection.
    #[must_use = "builder methods must be chained or built"]
    pub fn with_violated<F>(mut self, violated: F) -> Self
    where
        F: Fn(&V) -> Arg + Send + Sync + 'static,
    {
        self.violated = Arc::new(violated);
        self
    }

    /// Returns the message.
    pub fn message(&self) -> &ViolationMessage {
        &self.message
    }

    /// Returns the rule's own message arguments.
    pub fn args(&self) -> &[Arg] {
        &self.args
    }

    /// Returns the null policy.
    pub fn null_policy(&self) -> NullPolicy {
        self.null_policy
    }

    /// Evaluates the rule, returning the violated value on failure.
    pub fn evaluate(&self, value: Option<&V>) -> Option<Arg> {
        match value {
            None => match self.null_policy {
                NullPolicy::NullIsValid => None,
                NullPolicy::NullIsInvalid => Some(Arg::Null),
            },
            Some(value) if (self.predicate)(value) => None,
            Some(value) => Some((self.violated)(value)),
        }
    }

    /// Evaluates the rule and builds the violation for field `name` on
    /// failure.
    pub fn check(
        &self,
        name: &str,
        value: Option<&V>,
        locale: &Locale,
        formatter: &Arc<dyn MessageFormatter>,
    ) -> Option<ConstraintViolation> {
        self.evaluate(value)
            .map(|violated| self.violation(name, violated, locale, formatter))
    }

    /// Builds the violation for field `name` with the given violated value.
    pub fn violation(
        &self,
        name: &str,
        violated: Arg,
        locale: &Locale,
        formatter: &Arc<dyn MessageFormatter>,
    ) -> ConstraintViolation {
        let mut args = Args::with_capacity(self.args.len() + 2);
        args.push(Arg::string(name.to_owned()));
        args.extend(self.args.iter().cloned());
        args.push(violated);
        ConstraintViolation::new(
            name,
            &self.message,
            args,
            locale.clone(),
            Arc::clone(formatter),
        )
    }
}

impl<V: ?Sized> Clone for ConstraintRule<V> {
    fn clone(&self) -> Self {
        Self {
            predicate: Arc::clone(&self.predicate),
            message: self.message.clone(),
            args: self.args.clone(),
            null_policy: self.null_policy,
            violated: Arc::clone(&self.violated),
        }
    }
}

impl<V: ?Sized> fmt::Debug for ConstraintRule<V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ConstraintRule")
            .field("message", &self.message)
            .field("args", &self.args)
            .field("null_policy", &self.null_policy)
            .field("predicate", &"<function>")
            .finish()
    }
}
