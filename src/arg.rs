//! Loosely-typed logging arguments.
//!
//! Logging entry points accept a slice of `&dyn LogArg`. Every argument must
//! render through [`Display`](fmt::Display); [`LogArg::is_textual`] tells the
//! print formatter whether an operand is already text so it can decide where
//! separating spaces go.

use std::borrow::Cow;
use std::error::Error;
use std::fmt;
use std::rc::Rc;
use std::sync::Arc;

/// A value that can be passed to the logger's `print` family.
pub trait LogArg: fmt::Display {
    /// Whether the operand is text rather than a value rendered as text.
    ///
    /// Adjacent operands are separated by a space only when neither is
    /// textual.
    fn is_textual(&self) -> bool {
        false
    }
}

macro_rules! textual_arg {
    ($($ty:ty),* $(,)?) => {
        $(
            impl LogArg for $ty {
                fn is_textual(&self) -> bool {
                    true
                }
            }
        )*
    };
}

macro_rules! value_arg {
    ($($ty:ty),* $(,)?) => {
        $(impl LogArg for $ty {})*
    };
}

textual_arg!(str, String, char, Rc<str>, Arc<str>);
textual_arg!(fmt::Arguments<'_>);
value_arg!(bool, i8, i16, i32, i64, i128, isize, u8, u16, u32, u64, u128, usize, f32, f64);
value_arg!(std::io::Error, std::num::ParseIntError, std::num::ParseFloatError);

impl LogArg for Cow<'_, str> {
    fn is_textual(&self) -> bool {
        true
    }
}

impl LogArg for dyn Error + '_ {}

impl LogArg for dyn Error + Send + Sync + '_ {}

impl<T: LogArg + ?Sized> LogArg for &T {
    fn is_textual(&self) -> bool {
        (**self).is_textual()
    }
}

impl<T: LogArg + ?Sized> LogArg for Box<T> {
    fn is_textual(&self) -> bool {
        (**self).is_textual()
    }
}

/// Wrapper passing any [`Display`](fmt::Display) value as a non-textual
/// operand.
///
/// ```
/// use mouseion::{LogArg, Shown};
///
/// let addr: std::net::Ipv4Addr = "127.0.0.1".parse().unwrap();
/// let arg = Shown(addr);
/// assert!(!arg.is_textual());
/// assert_eq!(arg.to_string(), "127.0.0.1");
/// ```
#[derive(Clone, Copy, Debug)]
pub struct Shown<T>(pub T);

impl<T: fmt::Display> fmt::Display for Shown<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

impl<T: fmt::Display> LogArg for Shown<T> {}
