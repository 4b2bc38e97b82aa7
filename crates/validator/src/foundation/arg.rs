//! Message arguments and violated values
//!
//! Every violation carries an ordered list of [`Arg`]s: the field name first,
//! then the rule's own arguments, then the violated value. Message templates
//! refer to them positionally (`{0}`, `{1}`, ...).

use std::borrow::Cow;
use std::collections::{BTreeSet, HashSet, VecDeque};
use std::fmt;

use serde::Serialize;
use smallvec::SmallVec;

// ============================================================================
// ARG
// ============================================================================

/// A dynamically typed message argument.
///
/// Serializes untagged, so `Arg::Int(3)` becomes `3` and `Arg::Null`
/// becomes `null` in JSON.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
#[non_exhaustive]
pub enum Arg {
    /// An absent value.
    Null,
    /// A boolean.
    Bool(bool),
    /// A signed integer.
    Int(i64),
    /// An unsigned integer.
    UInt(u64),
    /// A floating point number.
    Float(f64),
    /// A single character.
    Char(char),
    /// A string.
    Str(Cow<'static, str>),
    /// An ordered list of arguments.
    List(Vec<Arg>),
}

/// Argument storage for a single violation.
///
/// Most violations carry between two and four arguments.
pub type Args = SmallVec<[Arg; 4]>;

impl Arg {
    /// Creates a string argument.
    pub fn string(value: impl Into<Cow<'static, str>>) -> Self {
        Self::Str(value.into())
    }

    /// Returns `true` for [`Arg::Null`].
    pub fn is_null(&self) -> bool {
        matches!(self, Self::Null)
    }

    /// Returns the string content, if this is a string argument.
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Self::Str(s) => Some(s),
            _ => None,
        }
    }

    /// Returns the value as a signed integer, if it fits.
    pub fn as_i64(&self) -> Option<i64> {
        match self {
            Self::Int(n) => Some(*n),
            Self::UInt(n) => i64::try_from(*n).ok(),
            _ => None,
        }
    }
}

impl fmt::Display for Arg {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Null => f.write_str("null"),
            Self::Bool(b) => write!(f, "{b}"),
            Self::Int(n) => write!(f, "{n}"),
            Self::UInt(n) => write!(f, "{n}"),
            Self::Float(n) => write!(f, "{n}"),
            Self::Char(c) => write!(f, "{c}"),
            Self::Str(s) => f.write_str(s),
            Self::List(items) => {
                f.write_str("[")?;
                for (i, item) in items.iter().enumerate() {
                    if i > 0 {
                        f.write_str(", ")?;
                    }
                    write!(f, "{item}")?;
                }
                f.write_str("]")
            }
        }
    }
}

impl From<&'static str> for Arg {
    fn from(value: &'static str) -> Self {
        Self::Str(Cow::Borrowed(value))
    }
}

impl From<String> for Arg {
    fn from(value: String) -> Self {
        Self::Str(Cow::Owned(value))
    }
}

impl From<Cow<'static, str>> for Arg {
    fn from(value: Cow<'static, str>) -> Self {
        Self::Str(value)
    }
}

impl<T: Into<Arg>> From<Option<T>> for Arg {
    fn from(value: Option<T>) -> Self {
        value.map_or(Self::Null, Into::into)
    }
}

impl<T: Into<Arg>> From<Vec<T>> for Arg {
    fn from(value: Vec<T>) -> Self {
        Self::List(value.into_iter().map(Into::into).collect())
    }
}

// ============================================================================
// TO ARG
// ============================================================================

/// Converts a borrowed value into an [`Arg`].
///
/// Implemented for primitives, strings, options and common collections.
/// Field rules use it to record the violated value.
pub trait ToArg {
    /// Returns the argument form of `self`.
    fn to_arg(&self) -> Arg;
}

macro_rules! impl_to_arg {
    ($variant:ident as $repr:ty: $($t:ty),+) => {
        $(
            impl ToArg for $t {
                fn to_arg(&self) -> Arg {
                    Arg::$variant(<$repr>::from(*self))
                }
            }

            impl From<$t> for Arg {
                fn from(value: $t) -> Self {
                    Arg::$variant(<$repr>::from(value))
                }
            }
        )+
    };
}

impl_to_arg!(Int as i64: i8, i16, i32, i64);
impl_to_arg!(UInt as u64: u8, u16, u32, u64);
impl_to_arg!(Float as f64: f32, f64);
impl_to_arg!(Bool as bool: bool);
impl_to_arg!(Char as char: char);

impl ToArg for isize {
    fn to_arg(&self) -> Arg {
        Arg::Int(*self as i64)
    }
}

impl From<isize> for Arg {
    fn from(value: isize) -> Self {
        Self::Int(value as i64)
    }
}

impl ToArg for usize {
    fn to_arg(&self) -> Arg {
        Arg::UInt(*self as u64)
    }
}

impl From<usize> for Arg {
    fn from(value: usize) -> Self {
        Self::UInt(value as u64)
    }
}

impl ToArg for Arg {
    fn to_arg(&self) -> Arg {
        self.clone()
    }
}

impl ToArg for str {
    fn to_arg(&self) -> Arg {
        Arg::Str(Cow::Owned(self.to_owned()))
    }
}

impl ToArg for String {
    fn to_arg(&self) -> Arg {
        Arg::Str(Cow::Owned(self.clone()))
    }
}

impl ToArg for Cow<'static, str> {
    fn to_arg(&self) -> Arg {
        Arg::Str(self.clone())
    }
}

impl<T: ToArg + ?Sized> ToArg for &T {
    fn to_arg(&self) -> Arg {
        (**self).to_arg()
    }
}

impl<T: ToArg + ?Sized> ToArg for Box<T> {
    fn to_arg(&self) -> Arg {
        (**self).to_arg()
    }
}

impl<T: ToArg> ToArg for Option<T> {
    fn to_arg(&self) -> Arg {
        self.as_ref().map_or(Arg::Null, ToArg::to_arg)
    }
}

impl<T: ToArg> ToArg for [T] {
    fn to_arg(&self) -> Arg {
        Arg::List(self.iter().map(ToArg::to_arg).collect())
    }
}

impl<T: ToArg, const N: usize> ToArg for [T; N] {
    fn to_arg(&self) -> Arg {
        self.as_slice().to_arg()
    }
}

impl<T: ToArg> ToArg for Vec<T> {
    fn to_arg(&self) -> Arg {
        self.as_slice().to_arg()
    }
}

impl<T: ToArg> ToArg for VecDeque<T> {
    fn to_arg(&self) -> Arg {
        Arg::List(self.iter().map(ToArg::to_arg).collect())
    }
}

impl<T: ToArg> ToArg for BTreeSet<T> {
    fn to_arg(&self) -> Arg {
        Arg::List(self.iter().map(ToArg::to_arg).collect())
    }
}

impl<T: ToArg, S> ToArg for HashSet<T, S> {
    fn to_arg(&self) -> Arg {
        Arg::List(self.iter().map(ToArg::to_arg).collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_scalars() {
        assert_eq!(Arg::Null.to_string(), "null");
        assert_eq!(Arg::from(42i32).to_string(), "42");
        assert_eq!(Arg::from(7usize).to_string(), "7");
        assert_eq!(Arg::from("abc").to_string(), "abc");
        assert_eq!(Arg::from(true).to_string(), "true");
        assert_eq!(Arg::from('x').to_string(), "x");
    }

    #[test]
    fn test_display_list() {
        let arg = vec![1i64, 2, 3].to_arg();
        assert_eq!(arg.to_string(), "[1, 2, 3]");
    }

    #[test]
    fn test_option_to_arg() {
        assert_eq!(None::<i32>.to_arg(), Arg::Null);
        assert_eq!(Some("a").to_arg(), Arg::string("a"));
    }

    #[test]
    fn test_serialize_untagged() {
        let args = vec![Arg::from("name"), Arg::from(3u32), Arg::Null];
        let json = serde_json::to_string(&args).unwrap();
        assert_eq!(json, r#"["name",3,null]"#);
    }

    #[test]
    fn test_as_i64() {
        assert_eq!(Arg::UInt(5).as_i64(), Some(5));
        assert_eq!(Arg::UInt(u64::MAX).as_i64(), None);
        assert_eq!(Arg::string("5").as_i64(), None);
    }
}
