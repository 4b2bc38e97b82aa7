//! # warden-validator
//!
//! Fluent, reflection-free constraint validation.
//!
//! Validators are declared once with [`ValidatorBuilder`], are immutable and
//! thread-safe, and return every violation found in declaration order.
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use warden_validator::prelude::*;
//!
//! struct User { name: String, email: String, age: i32 }
//!
//! let validator = ValidatorBuilder::<User>::new()
//!     .constraint(|u| &u.name, "name", |c| c.not_blank().length_between(1, 20))
//!     .constraint(|u| &u.email, "email", |c| c.not_blank().email())
//!     .constraint(|u| &u.age, "age", |c| c.between(0, 150))
//!     .build();
//!
//! let violations = validator.validate(&user);
//! if !violations.is_valid() {
//!     for message in violations.messages() {
//!         eprintln!("{message}");
//!     }
//! }
//! ```
//!
//! ## Composition
//!
//! - [`ValidatorBuilder::nest`] validates a child object under `parent.child`
//! - [`ValidatorBuilder::for_each`] validates elements under `items[i]`
//! - `constraint_on_condition`, `constraint_on_group` and
//!   `constraint_on_variant` activate rule sets conditionally
//! - [`Validator::fail_fast`] stops at the first violation
//!
//! ## Applicative validation
//!
//! [`Validator::applicative`] turns a validator into a
//! [`ValueValidator`](applicative::ValueValidator) whose results
//! ([`Validated`](applicative::Validated)) combine while accumulating every
//! failure:
//!
//! ```rust,ignore
//! let user = name.validate(raw_name)
//!     .combine(email.validate(raw_email))
//!     .apply(User::new);
//! ```

// Type-erased rule closures (`Arc<dyn Fn(&V) -> bool + Send + Sync>`) are
// inherent to the builder architecture.
#![allow(clippy::type_complexity)]

#[macro_use]
mod macros;

pub mod applicative;
pub mod builder;
mod combinators;
pub mod core;
pub mod foundation;
pub mod prelude;
mod validator;
pub mod validators;

pub use builder::{ConflictStrategy, ValidatorBuilder, ValidatorOptions};
pub use combinators::{FieldKind, FieldRule};
pub use validator::Validator;
