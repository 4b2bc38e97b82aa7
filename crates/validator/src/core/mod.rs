//! Core validation data model
//!
//! - **Rules**: [`ConstraintRule`], [`NullPolicy`]
//! - **Results**: [`ConstraintViolation`], [`ConstraintViolations`],
//!   [`ViolationDetail`]
//! - **Errors**: [`ConstraintViolationsError`]

pub mod error;
pub mod rule;
pub mod violation;

pub use error::ConstraintViolationsError;
pub use rule::{ConstraintRule, NullPolicy};
pub use violation::{ConstraintViolation, ConstraintViolations, ViolationDetail};
