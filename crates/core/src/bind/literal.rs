//! Literal coercion: values parsed from a single string.
//!
//! Built-in literals cover the primitive numbers, `char`, `String` and
//! paths. Other types join through two macros:
//!
//! - [`literal_from_str!`](crate::literal_from_str) for any `FromStr` type;
//!   parse failures surface as [`SwitchError::Conversion`] with the parser's
//!   own error as the source.
//! - [`literal_enum!`](crate::literal_enum) for fieldless enums; names match
//!   case-insensitively and unknown names fail with
//!   [`SwitchError::TypeMismatch`].

use std::path::PathBuf;

use crate::bind::{Bind, Binder, Shape, Slot};
use crate::error::{Result, SwitchError};
use crate::index::SwitchIndex;

/// A type parsed from a single string.
pub trait Literal: Sized {
    /// Parse `text`; `member` names the slot for error messages.
    fn parse_literal(text: &str, member: &str) -> Result<Self>;
}

/// Literal rule: parse the slot's raw value, or keep `current` when the slot
/// has none.
pub fn bind_literal<T: Literal>(index: &SwitchIndex, slot: Slot<'_>, current: T) -> Result<T> {
    match slot.raw(index) {
        Some(text) => T::parse_literal(text, &slot.label()),
        None => Ok(current),
    }
}

/// Case-insensitive enum name lookup.
///
/// Surrounding whitespace is ignored. Unknown names fail with
/// [`SwitchError::TypeMismatch`].
pub fn parse_enum<T: Clone>(
    text: &str,
    member: &str,
    type_name: &'static str,
    variants: &[(&str, T)],
) -> Result<T> {
    let wanted = text.trim().to_lowercase();
    variants
        .iter()
        .find(|(name, _)| name.to_lowercase() == wanted)
        .map(|(_, value)| value.clone())
        .ok_or_else(|| SwitchError::mismatch(member, type_name, text))
}

/// Implement [`Literal`] and [`Bind`] for types that implement `FromStr`.
///
/// ```
/// use std::str::FromStr;
///
/// #[derive(Debug, Default, PartialEq)]
/// struct Hex(u32);
///
/// impl FromStr for Hex {
///     type Err = std::num::ParseIntError;
///     fn from_str(s: &str) -> Result<Self, Self::Err> {
///         u32::from_str_radix(s.trim_start_matches("0x"), 16).map(Hex)
///     }
/// }
///
/// switchbind_core::literal_from_str!(Hex);
///
/// let ix = switchbind_core::SwitchIndex::parse(&["-mask:0xff"]).unwrap();
/// let mask: Hex = switchbind_core::Binder::new().named(&ix, "mask", 1).unwrap();
/// assert_eq!(mask, Hex(255));
/// ```
#[macro_export]
macro_rules! literal_from_str {
    ($($ty:ty),+ $(,)?) => {$(
        impl $crate::bind::Literal for $ty {
            fn parse_literal(text: &str, member: &str) -> $crate::Result<Self> {
                <$ty as ::std::str::FromStr>::from_str(text).map_err(|e| {
                    $crate::SwitchError::conversion(
                        member,
                        ::std::any::type_name::<$ty>(),
                        text,
                        e,
                    )
                })
            }
        }

        $crate::__literal_bind!($ty);
    )+};
}

/// Implement [`Literal`] and [`Bind`] for a fieldless enum.
///
/// The enum must implement `Clone` and `Default`; the default variant is the
/// fallback when a switch carries no value.
///
/// ```
/// #[derive(Debug, Clone, Copy, Default, PartialEq)]
/// enum Level { #[default] Info, Warn, Error }
///
/// switchbind_core::literal_enum!(Level { Info, Warn, Error });
///
/// let ix = switchbind_core::SwitchIndex::parse(&["-level:WARN"]).unwrap();
/// let level: Level = switchbind_core::Binder::new().named(&ix, "level", 1).unwrap();
/// assert_eq!(level, Level::Warn);
/// ```
#[macro_export]
macro_rules! literal_enum {
    ($ty:ident { $($variant:ident),+ $(,)? }) => {
        impl $crate::bind::Literal for $ty {
            fn parse_literal(text: &str, member: &str) -> $crate::Result<Self> {
                $crate::bind::parse_enum(
                    text,
                    member,
                    ::std::any::type_name::<$ty>(),
                    &[$((stringify!($variant), $ty::$variant)),+],
                )
            }
        }

        $crate::__literal_bind!($ty);
    };
}

#[doc(hidden)]
#[macro_export]
macro_rules! __literal_bind {
    ($ty:ty) => {
        impl $crate::bind::Bind for $ty {
            fn shape() -> $crate::bind::Shape {
                $crate::bind::Shape::Literal {
                    type_name: ::std::any::type_name::<$ty>(),
                }
            }

            fn bind_slot(
                _binder: &$crate::bind::Binder,
                index: &$crate::SwitchIndex,
                slot: $crate::bind::Slot<'_>,
                current: Self,
            ) -> $crate::Result<Self> {
                $crate::bind::literal::bind_literal(index, slot, current)
            }
        }
    };
}

literal_from_str!(
    i8, i16, i32, i64, i128, isize, u8, u16, u32, u64, u128, usize, f32, f64, char, String,
    PathBuf,
);

impl Literal for bool {
    fn parse_literal(text: &str, member: &str) -> Result<Self> {
        text.trim()
            .to_ascii_lowercase()
            .parse::<bool>()
            .map_err(|e| SwitchError::conversion(member, "bool", text, e))
    }
}

impl Bind for bool {
    fn shape() -> Shape {
        Shape::Boolean
    }

    fn bind_member(
        _binder: &Binder,
        index: &SwitchIndex,
        key: &str,
        namespace: usize,
        _current: Self,
    ) -> Result<Self> {
        Ok(index.is_set(key, namespace))
    }

    fn bind_slot(_binder: &Binder, index: &SwitchIndex, slot: Slot<'_>, current: Self) -> Result<Self> {
        bind_literal(index, slot, current)
    }
}
