//! Numeric comparison rules

use crate::core::NullPolicy;
use crate::foundation::{Arg, ToArg, ViolationMessage};
use crate::validators::Constraint;

const GREATER_THAN: ViolationMessage =
    ViolationMessage::of("numeric.greater_than", "\"{0}\" must be greater than {1}");
const GREATER_THAN_OR_EQUAL: ViolationMessage = ViolationMessage::of(
    "numeric.greater_than_or_equal",
    "\"{0}\" must be greater than or equal to {1}",
);
const LESS_THAN: ViolationMessage =
    ViolationMessage::of("numeric.less_than", "\"{0}\" must be less than {1}");
const LESS_THAN_OR_EQUAL: ViolationMessage = ViolationMessage::of(
    "numeric.less_than_or_equal",
    "\"{0}\" must be less than or equal to {1}",
);
const BETWEEN: ViolationMessage =
    ViolationMessage::of("numeric.between", "\"{0}\" must be between {1} and {2}");
const POSITIVE: ViolationMessage =
    ViolationMessage::of("numeric.positive", "\"{0}\" must be positive");
const POSITIVE_OR_ZERO: ViolationMessage =
    ViolationMessage::of("numeric.positive_or_zero", "\"{0}\" must be positive or 0");
const NEGATIVE: ViolationMessage =
    ViolationMessage::of("numeric.negative", "\"{0}\" must be negative");
const NEGATIVE_OR_ZERO: ViolationMessage =
    ViolationMessage::of("numeric.negative_or_zero", "\"{0}\" must be negative or 0");

// ============================================================================
// NUMERIC
// ============================================================================

/// Primitive numbers. `Default::default()` is zero.
pub trait Numeric: PartialOrd + Copy + Default + ToArg + Send + Sync + 'static {}

macro_rules! impl_numeric {
    ($($t:ty),+) => {
        $(impl Numeric for $t {})+
    };
}

impl_numeric!(i8, i16, i32, i64, isize, u8, u16, u32, u64, usize, f32, f64);

// ============================================================================
// NUMERIC RULES
// ============================================================================

impl<V: Numeric> Constraint<V> {
    /// The value must be greater than `min`.
    pub fn greater_than(self, min: V) -> Self {
        self.compare(move |v| v > min, GREATER_THAN, [min.to_arg()])
    }

    /// The value must be greater than or equal to `min`.
    pub fn greater_than_or_equal(self, min: V) -> Self {
        self.compare(move |v| v >= min, GREATER_THAN_OR_EQUAL, [min.to_arg()])
    }

    /// The value must be less than `max`.
    pub fn less_than(self, max: V) -> Self {
        self.compare(move |v| v < max, LESS_THAN, [max.to_arg()])
    }

    /// The value must be less than or equal to `max`.
    pub fn less_than_or_equal(self, max: V) -> Self {
        self.compare(move |v| v <= max, LESS_THAN_OR_EQUAL, [max.to_arg()])
    }

    /// The value must lie in `min..=max`.
    pub fn between(self, min: V, max: V) -> Self {
        self.compare(
            move |v| min <= v && v <= max,
            BETWEEN,
            [min.to_arg(), max.to_arg()],
        )
    }

    /// The value must be greater than zero.
    pub fn positive(self) -> Self {
        self.compare(|v| v > V::default(), POSITIVE, [])
    }

    /// The value must be zero or greater.
    pub fn positive_or_zero(self) -> Self {
        self.compare(|v| v >= V::default(), POSITIVE_OR_ZERO, [])
    }

    /// The value must be less than zero.
    pub fn negative(self) -> Self {
        self.compare(|v| v < V::default(), NEGATIVE, [])
    }

    /// The value must be zero or less.
    pub fn negative_or_zero(self) -> Self {
        self.compare(|v| v <= V::default(), NEGATIVE_OR_ZERO, [])
    }

    fn compare<P, const N: usize>(
        self,
        predicate: P,
        message: ViolationMessage,
        args: [Arg; N],
    ) -> Self
    where
        P: Fn(V) -> bool + Send + Sync + 'static,
    {
        self.push(
            move |value: &V| predicate(*value),
            message,
            args,
            NullPolicy::NullIsValid,
        )
    }
}
