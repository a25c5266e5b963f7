//! Status flags.
//!
//! Three independent bits written by the execute stage when an instruction's
//! control word requests a flags update. They persist unchanged otherwise.

use std::fmt;

/// Carry, zero and overflow flags.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct StatusFlags {
    /// Unsigned carry out of the ALU.
    pub carry: bool,
    /// ALU result was zero.
    pub zero: bool,
    /// Signed overflow.
    pub overflow: bool,
}

impl StatusFlags {
    /// Creates a flag set.
    pub fn new(carry: bool, zero: bool, overflow: bool) -> Self {
        Self {
            carry,
            zero,
            overflow,
        }
    }

    /// Every flag combination, in address order (`carry` is the most
    /// significant bit).
    pub fn all() -> impl Iterator<Item = StatusFlags> {
        (0u8..8).map(|bits| Self::new(bits & 0b100 != 0, bits & 0b010 != 0, bits & 0b001 != 0))
    }
}

impl fmt::Display for StatusFlags {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "c={} z={} v={}",
            self.carry as u8, self.zero as u8, self.overflow as u8
        )
    }
}
