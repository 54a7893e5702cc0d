//! Value-to-text rendering policies.
//!
//! A [`Representation`] turns a [`Value`] into the text shown inside failure
//! messages. Three policies are provided:
//!
//! - [`StandardRepresentation`]: quoted strings, suffixed numbers, bracketed
//!   collections, multi-line layout for long collections.
//! - [`HexadecimalRepresentation`]: integers and chars as grouped hex literals.
//! - [`BinaryRepresentation`]: integers and chars as grouped binary literals.
//!
//! Custom per-type rendering is done by registering formatter functions on a
//! [`StandardRepresentation`] instead of writing a new policy:
//!
//! ```rust
//! use fluent_errors::representation::{FormatterKey, Representation, StandardRepresentation};
//! use fluent_errors::value::{ObjectRef, Value};
//!
//! let repr = StandardRepresentation::default().with_formatter(
//!     FormatterKey::type_name("Jedi"),
//!     |value: &Value| {
//!         let name = value.as_object().and_then(|o| o.field("name"));
//!         format!("Jedi {}", name.and_then(|n| n.as_str().map(str::to_owned)).unwrap_or_default())
//!     },
//! );
//! let yoda = Value::from(ObjectRef::new("Jedi").with_field("name", "Yoda"));
//! assert_eq!(repr.to_string_of(&yoda), "Jedi Yoda");
//! ```

mod binary;
mod hexadecimal;
mod standard;

use std::fmt;
use std::sync::Arc;

use crate::value::{Value, ValueCategory};

pub use binary::BinaryRepresentation;
pub use hexadecimal::HexadecimalRepresentation;
pub use standard::{
    DEFAULT_MAX_ELEMENTS_FOR_PRINTING, DEFAULT_MAX_LENGTH_FOR_SINGLE_LINE_DESCRIPTION,
    StandardRepresentation,
};

/// Rendering policy mapping values to display strings.
///
/// Implementations must be stateless from the caller's point of view: the
/// same value always renders the same way, and a policy can be shared across
/// threads behind an `Arc`.
pub trait Representation: Send + Sync + fmt::Debug {
    /// Render a value.
    fn to_string_of(&self, value: &Value) -> String;

    /// Render a value followed by its type and identity, `"repr (Type@hex)"`.
    ///
    /// Used when two unequal values render identically.
    fn unambiguous_to_string_of(&self, value: &Value) -> String {
        format!(
            "{} ({}@{})",
            self.to_string_of(value),
            value.type_name(),
            value.identity_hex()
        )
    }
}

/// Shared handle to a representation policy.
pub type SharedRepresentation = Arc<dyn Representation>;

/// The default policy as a shared handle.
#[must_use]
pub fn standard() -> SharedRepresentation {
    Arc::new(StandardRepresentation::default())
}

/// Key under which a custom formatter is registered.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum FormatterKey {
    /// Every value of a runtime category.
    Category(ValueCategory),
    /// Values whose [`Value::type_name`] matches exactly. Wins over categories.
    Type(String),
}

impl FormatterKey {
    #[must_use]
    pub fn type_name(name: impl Into<String>) -> Self {
        Self::Type(name.into())
    }
}

/// A registered custom formatter.
pub type FormatterFn = Arc<dyn Fn(&Value) -> String + Send + Sync>;

/// Numeric rendering used by the built-in policies.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub(crate) enum Radix {
    #[default]
    Decimal,
    Hexadecimal,
    Binary,
}

/// Group the digits of `bits` (the low `width` bits) in the given radix.
///
/// Hex digits are grouped by four, binary digits by eight; a single group
/// is printed without separator.
pub(crate) fn grouped_digits(bits: u64, width: u32, radix: Radix) -> String {
    let (prefix, digits_per_unit, group) = match radix {
        Radix::Hexadecimal => ("0x", width / 4, 4),
        Radix::Binary => ("0b", width, 8),
        Radix::Decimal => return bits.to_string(),
    };
    let raw = match radix {
        Radix::Hexadecimal => format!("{bits:0digits$X}", digits = digits_per_unit as usize),
        _ => format!("{bits:0digits$b}", digits = digits_per_unit as usize),
    };
    let mut out = String::with_capacity(raw.len() + raw.len() / group + 2);
    out.push_str(prefix);
    for (i, ch) in raw.chars().enumerate() {
        if i > 0 && i % group == 0 {
            out.push('_');
        }
        out.push(ch);
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_grouped_hex() {
        assert_eq!(grouped_digits(2, 8, Radix::Hexadecimal), "0x02");
        assert_eq!(grouped_digits(2, 16, Radix::Hexadecimal), "0x0002");
        assert_eq!(grouped_digits(2, 32, Radix::Hexadecimal), "0x0000_0002");
        assert_eq!(
            grouped_digits(u64::MAX, 64, Radix::Hexadecimal),
            "0xFFFF_FFFF_FFFF_FFFF"
        );
    }

    #[test]
    fn test_grouped_binary() {
        assert_eq!(grouped_digits(2, 8, Radix::Binary), "0b00000010");
        assert_eq!(grouped_digits(2, 16, Radix::Binary), "0b00000000_00000010");
    }

    #[test]
    fn test_unambiguous_suffix_uses_type_and_identity() {
        let repr = StandardRepresentation::default();
        let value = Value::Int(7);
        let text = repr.unambiguous_to_string_of(&value);
        assert_eq!(text, format!("7 (i32@{})", value.identity_hex()));
    }
}
