//! Binary rendering of numbers and characters.

use super::{Radix, Representation, StandardRepresentation};
use crate::value::Value;

/// Renders integers, floats and chars as two's-complement binary in groups
/// of eight bits, e.g. `0b00000000_00000010` for a 16-bit `2`.
#[derive(Debug, Clone)]
pub struct BinaryRepresentation {
    inner: StandardRepresentation,
}

impl Default for BinaryRepresentation {
    fn default() -> Self {
        Self::from_standard(StandardRepresentation::default())
    }
}

impl BinaryRepresentation {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn from_standard(standard: StandardRepresentation) -> Self {
        Self {
            inner: standard.with_radix(Radix::Binary),
        }
    }
}

impl Representation for BinaryRepresentation {
    fn to_string_of(&self, value: &Value) -> String {
        self.inner.to_string_of(value)
    }
}
