//! Macros generating the fixed-arity combinators of the applicative API.
//!
//! - `combining!`: a `CombiningN` holder of N [`Validated`] values, its
//!   `apply`, and the free `applyN` function
//! - `combining_next!`: `CombiningN::combine`, growing N by one
//! - `value_combining!`: the value-validator counterparts
//!   (`ValueCombiningN`, `AppliedN`)
//!
//! [`Validated`]: crate::applicative::Validated

// ============================================================================
// VALIDATED COMBINING
// ============================================================================

macro_rules! combining {
    ($name:ident, $apply:ident, $arity:literal: $($t:ident $v:ident),+) => {
        #[doc = concat!("Holds ", $arity, " validated values until [`apply`](Self::apply) is called.")]
        #[must_use = "combined validations do nothing until applied"]
        #[derive(Clone)]
        pub struct $name<$($t),+> {
            parts: ($(Validated<$t>,)+),
        }

        impl<$($t: fmt::Debug),+> fmt::Debug for $name<$($t),+> {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                let ($($v,)+) = &self.parts;
                f.debug_tuple(stringify!($name))$(.field($v))+.finish()
            }
        }

        impl<$($t),+> $name<$($t),+> {
            /// Applies `f` if every part succeeded. Otherwise returns the
            /// failures of all failing parts, concatenated in argument order.
            pub fn apply<R, F>(self, f: F) -> Validated<R>
            where
                F: FnOnce($($t),+) -> R,
            {
                match self.parts {
                    ($(Validated::Success($v),)+) => Validated::Success(f($($v),+)),
                    ($($v,)+) => {
                        let mut violations = ConstraintViolations::new();
                        $(
                            if let Validated::Failure(errors) = $v {
                                violations.extend(errors);
                            }
                        )+
                        Validated::Failure(violations)
                    }
                }
            }
        }

        #[doc = concat!("Combines ", $arity, " validated values with `f`, accumulating every failure.")]
        pub fn $apply<$($t,)+ R, F>(f: F, $($v: Validated<$t>),+) -> Validated<R>
        where
            F: FnOnce($($t),+) -> R,
        {
            $name { parts: ($($v,)+) }.apply(f)
        }
    };
}

macro_rules! combining_next {
    ($name:ident => $next:ident: $($t:ident $v:ident),+) => {
        impl<$($t),+> $name<$($t),+> {
            /// Adds one more validated value.
            pub fn combine<U>(self, next: Validated<U>) -> $next<$($t,)+ U> {
                let ($($v,)+) = self.parts;
                $next { parts: ($($v,)+ next) }
            }
        }
    };
}

// ============================================================================
// VALUE COMBINING
// ============================================================================

macro_rules! value_combining {
    (
        $combining:ident, $applied:ident, $apply:ident, $arity:literal:
        $($t:ident $w:ident $v:ident $x:ident),+
    ) => {
        #[doc = concat!("Holds ", $arity, " value validators until [`apply`](Self::apply) is called.")]
        #[must_use = "combined validators do nothing until applied"]
        #[derive(Clone)]
        pub struct $combining<$($w),+> {
            validators: ($($w,)+),
        }

        impl<$($w: fmt::Debug),+> fmt::Debug for $combining<$($w),+> {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                let ($($x,)+) = &self.validators;
                f.debug_tuple(stringify!($combining))$(.field($x))+.finish()
            }
        }

        impl<$($w),+> $combining<$($w),+> {
            /// Builds a validator over the tuple of inputs that runs every
            /// validator and passes the outputs to `f` when all succeed.
            pub fn apply<F>(self, f: F) -> $applied<$($w,)+ F> {
                $applied {
                    validators: self.validators,
                    f,
                }
            }
        }

        #[doc = concat!("A value validator over a ", $arity, "-tuple, built by [`", stringify!($combining), "::apply`].")]
        #[derive(Clone)]
        pub struct $applied<$($w,)+ F> {
            validators: ($($w,)+),
            f: F,
        }

        impl<$($w: fmt::Debug,)+ F> fmt::Debug for $applied<$($w,)+ F> {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                let ($($x,)+) = &self.validators;
                f.debug_tuple(stringify!($applied))
                    $(.field($x))+
                    .field(&"<function>")
                    .finish()
            }
        }

        impl<$($t,)+ $($w,)+ F, R> ValueValidator<($($t,)+)> for $applied<$($w,)+ F>
        where
            $($w: ValueValidator<$t>,)+
            F: Fn($($w::Output),+) -> R + Send + Sync,
        {
            type Output = R;

            fn validate_with(
                &self,
                value: ($($t,)+),
                locale: &Locale,
                context: &ConstraintContext,
            ) -> Validated<R> {
                let ($($v,)+) = value;
                let ($($x,)+) = &self.validators;
                $(
                    let $v = $x.validate_with($v, locale, context);
                )+
                $apply(&self.f, $($v),+)
            }
        }
    };
}

macro_rules! value_combining_next {
    ($name:ident => $next:ident: $($w:ident $x:ident),+) => {
        impl<$($w),+> $name<$($w),+> {
            /// Adds one more value validator.
            pub fn combine<W>(self, next: W) -> $next<$($w,)+ W> {
                let ($($x,)+) = self.validators;
                $next {
                    validators: ($($x,)+ next),
                }
            }
        }
    };
}
