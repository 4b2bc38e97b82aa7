//! Rule builder and built-in rule catalog
//!
//! [`Constraint`] is the fluent builder every field declaration receives.
//! The built-in catalog:
//!
//! - **Generic**: `not_null`, `is_null`, `equal_to`, `not_equal_to`, `one_of`,
//!   `predicate`, `predicate_nullable`, `rule`
//! - **Length** ([`HasLength`]): `not_empty`, `min_length`, `max_length`,
//!   `fixed_length`, `length_between`
//! - **Text** ([`CharSequence`]): `not_blank`, `contains`, `starts_with`,
//!   `ends_with`, `pattern`, `email`
//! - **Numeric** ([`Numeric`]): `greater_than`, `greater_than_or_equal`,
//!   `less_than`, `less_than_or_equal`, `between`, `positive`,
//!   `positive_or_zero`, `negative`, `negative_or_zero`
//! - **Boolean**: `is_true`, `is_false`
//!
//! Anything else plugs in through [`Constraint::predicate`] or a prebuilt
//! [`ConstraintRule`](crate::core::ConstraintRule).

mod boolean;
mod constraint;
mod length;
mod numeric;
mod string;

pub use constraint::Constraint;
pub(crate) use constraint::NOT_NULL;
pub use length::HasLength;
pub use numeric::Numeric;
pub use string::{CharSequence, is_email, matches_fully};
