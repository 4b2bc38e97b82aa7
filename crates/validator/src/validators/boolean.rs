//! Boolean rules

use crate::core::NullPolicy;
use crate::foundation::ViolationMessage;
use crate::validators::Constraint;

const IS_TRUE: ViolationMessage = ViolationMessage::of("boolean.is_true", "\"{0}\" must be true");
const IS_FALSE: ViolationMessage =
    ViolationMessage::of("boolean.is_false", "\"{0}\" must be false");

impl Constraint<bool> {
    /// The value must be `true`. Absent values pass.
    pub fn is_true(self) -> Self {
        self.push(|v: &bool| *v, IS_TRUE, [], NullPolicy::NullIsValid)
    }

    /// The value must be `false`. Absent values pass.
    pub fn is_false(self) -> Self {
        self.push(|v: &bool| !*v, IS_FALSE, [], NullPolicy::NullIsValid)
    }
}
