//! Foundation types shared by every layer of the validator
//!
//! - **Arguments**: [`Arg`], [`Args`], [`ToArg`]
//! - **Locale**: [`Locale`]
//! - **Messages**: [`ViolationMessage`], [`MessageFormatter`],
//!   [`SimpleMessageFormatter`], [`CatalogMessageFormatter`]
//! - **Context**: [`ConstraintContext`], [`ConstraintGroup`],
//!   [`ConstraintCondition`]

pub mod arg;
pub mod context;
pub mod locale;
pub mod message;

pub use arg::{Arg, Args, ToArg};
pub use context::{
    ConstraintCondition, ConstraintContext, ConstraintGroup, has_attribute,
    has_attribute_with_value,
};
pub use locale::Locale;
pub use message::{
    CatalogMessageFormatter, MessageFormatter, SimpleMessageFormatter, ViolationMessage,
};
