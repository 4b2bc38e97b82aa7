//! Applicative validation
//!
//! - [`Validated`]: a value or accumulated violations, combinable with
//!   `combine(..).apply(..)` or the free `applyN` functions, up to 16 parts
//! - [`ValueValidator`]: validates an owned input into an output, lifted
//!   over collections and options with [`ValueValidatorExt`] and combined
//!   over tuple inputs of up to 16 values
//!
//! [`Validator::applicative`](crate::Validator::applicative) bridges the
//! field-rule engine into this API.

pub mod validated;
pub mod value;

pub use validated::{
    Combining2, Combining3, Combining4, Combining5, Combining6, Combining7, Combining8, Combining9,
    Combining10, Combining11, Combining12, Combining13, Combining14, Combining15, Combining16,
    Validated, apply2, apply3, apply4, apply5, apply6, apply7, apply8, apply9, apply10, apply11,
    apply12, apply13, apply14, apply15, apply16, sequence, traverse, traverse_indexed,
    traverse_optional,
};
pub use value::{
    AndThen, Applicative, Applied2, Applied3, Applied4, Applied5, Applied6, Applied7, Applied8,
    Applied9, Applied10, Applied11, Applied12, Applied13, Applied14, Applied15, Applied16, Compose,
    FromFn, Indexed, Lift, LiftOptional, Map, ValueCombining2, ValueCombining3, ValueCombining4,
    ValueCombining5, ValueCombining6, ValueCombining7, ValueCombining8, ValueCombining9,
    ValueCombining10, ValueCombining11, ValueCombining12, ValueCombining13, ValueCombining14,
    ValueCombining15, ValueCombining16, ValueValidator, ValueValidatorExt, from_fn,
};
