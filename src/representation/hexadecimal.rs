//! Hexadecimal rendering of numbers and characters.

use super::{Radix, Representation, StandardRepresentation};
use crate::value::Value;

/// Renders integers, floats and chars as grouped two's-complement hex.
///
/// Everything else (strings aside, which become a list of char codes) is
/// rendered as by [`StandardRepresentation`], so collections of numbers read
/// as `[0x0000_0001, 0x0000_0002]`.
///
/// ```rust
/// use fluent_errors::representation::{HexadecimalRepresentation, Representation};
/// use fluent_errors::value::Value;
///
/// let hex = HexadecimalRepresentation::new();
/// assert_eq!(hex.to_string_of(&Value::Byte(-2)), "0xFE");
/// assert_eq!(hex.to_string_of(&Value::Int(2)), "0x0000_0002");
/// ```
#[derive(Debug, Clone)]
pub struct HexadecimalRepresentation {
    inner: StandardRepresentation,
}

impl Default for HexadecimalRepresentation {
    fn default() -> Self {
        Self::from_standard(StandardRepresentation::default())
    }
}

impl HexadecimalRepresentation {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Reuse the limits and custom formatters of a standard policy.
    #[must_use]
    pub fn from_standard(standard: StandardRepresentation) -> Self {
        Self {
            inner: standard.with_radix(Radix::Hexadecimal),
        }
    }
}

impl Representation for HexadecimalRepresentation {
    fn to_string_of(&self, value: &Value) -> String {
        self.inner.to_string_of(value)
    }
}
