//! Argument values carried by the plain and formatted call shapes.
//!
//! Rust has no variadic argument lists, so every emission carries a slice of
//! [`Arg`] values. Strings stay distinguishable from other values because
//! masking applies to string arguments only; everything else is captured
//! eagerly through its `Display` rendering and passes through untouched.

use std::borrow::Cow;
use std::fmt;

/// A single diagnostic argument.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Arg<'a> {
    /// A string argument; subject to mask replacement.
    Str(Cow<'a, str>),
    /// Any other value, captured via its `Display` rendering; never masked.
    Value(Cow<'a, str>),
}

impl Arg<'_> {
    /// Captures an arbitrary displayable value as a non-string argument.
    ///
    /// Use this for values whose type has no [`From`] conversion, such as
    /// durations or user-defined types.
    #[must_use]
    pub fn value<T: fmt::Display>(value: &T) -> Arg<'static> {
        Arg::Value(Cow::Owned(value.to_string()))
    }

    /// The rendered text of this argument.
    #[must_use]
    pub fn as_str(&self) -> &str {
        match self {
            Arg::Str(text) | Arg::Value(text) => text,
        }
    }

    /// Whether this argument is a string, and therefore maskable.
    #[must_use]
    pub fn is_str(&self) -> bool {
        matches!(self, Arg::Str(_))
    }
}

impl fmt::Display for Arg<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl<'a> From<&'a str> for Arg<'a> {
    fn from(text: &'a str) -> Self {
        Arg::Str(Cow::Borrowed(text))
    }
}

impl From<String> for Arg<'_> {
    fn from(text: String) -> Self {
        Arg::Str(Cow::Owned(text))
    }
}

impl<'a> From<Cow<'a, str>> for Arg<'a> {
    fn from(text: Cow<'a, str>) -> Self {
        Arg::Str(text)
    }
}

macro_rules! scalar_arg {
    ($($ty:ty),* $(,)?) => {$(
        impl From<$ty> for Arg<'_> {
            fn from(value: $ty) -> Self {
                Arg::Value(Cow::Owned(value.to_string()))
            }
        }
    )*};
}

scalar_arg!(i8, i16, i32, i64, i128, isize);
scalar_arg!(u8, u16, u32, u64, u128, usize);
scalar_arg!(f32, f64, bool, char);

/// Builds an argument slice from a mixed list of values.
///
/// Each element goes through [`Arg::from`], so string types become maskable
/// [`Arg::Str`] entries and scalars become [`Arg::Value`] entries.
///
/// ```
/// use diagrelay::{args, join};
///
/// assert_eq!(join(args!["a", "b", 2, 3]), "a b 2 3");
/// ```
#[macro_export]
macro_rules! args {
    () => { &[] as &[$crate::Arg<'_>] };
    ($($arg:expr),+ $(,)?) => { &[$($crate::Arg::from($arg)),+][..] };
}

/// Joins rendered arguments with single spaces.
///
/// This is the plain-path join convention. Every synthesized fallback in the
/// dispatcher renders through it, so plain and formatted output agree on how
/// composite values read.
#[must_use]
pub fn join(args: &[Arg<'_>]) -> String {
    let mut out = String::new();
    for (i, arg) in args.iter().enumerate() {
        if i > 0 {
            out.push(' ');
        }
        out.push_str(arg.as_str());
    }
    out
}
