//! Prelude module for convenient imports.
//!
//! Provides a single `use warden_validator::prelude::*;` import that brings
//! in the builder, the result types, and the traits the rule catalog hangs
//! off.
//!
//! # Examples
//!
//! ```rust,ignore
//! use warden_validator::prelude::*;
//!
//! let validator = ValidatorBuilder::<Signup>::new()
//!     .constraint(|s| &s.email, "email", |c| c.not_blank().email())
//!     .build();
//! ```

// ============================================================================
// ENGINE: Builder, validator, field rules
// ============================================================================

pub use crate::{
    ConflictStrategy, FieldKind, FieldRule, Validator, ValidatorBuilder, ValidatorOptions,
};

// ============================================================================
// FOUNDATION: Arguments, messages, locale, context
// ============================================================================

pub use crate::foundation::{
    Arg, CatalogMessageFormatter, ConstraintContext, ConstraintGroup, Locale, MessageFormatter,
    SimpleMessageFormatter, ToArg, ViolationMessage, has_attribute, has_attribute_with_value,
};

// ============================================================================
// CORE: Rules, violations, errors
// ============================================================================

pub use crate::core::{
    ConstraintRule, ConstraintViolation, ConstraintViolations, ConstraintViolationsError,
    NullPolicy, ViolationDetail,
};

// ============================================================================
// VALIDATORS: Rule builder and category traits
// ============================================================================

pub use crate::validators::{CharSequence, Constraint, HasLength, Numeric};

// ============================================================================
// APPLICATIVE: Validated values and value validators
// ============================================================================

pub use crate::applicative::{
    Validated, ValueValidator, ValueValidatorExt, apply2, apply3, apply4, apply5, apply6, apply7,
    apply8, apply9, apply10, apply11, apply12, apply13, apply14, apply15, apply16, from_fn,
    sequence, traverse, traverse_indexed, traverse_optional,
};
