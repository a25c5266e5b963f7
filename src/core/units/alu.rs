//! Arithmetic Logic Unit (ALU).
//!
//! Models the 16-bit ALU chip used in the execute stage. The chip computes
//! one of eight functions of its `R` and `S` inputs and reports carry,
//! zero and overflow alongside the result.

use crate::core::arch::flags::StatusFlags;
use crate::core::pipeline::signals::{AluFunction, OperandSource};

const SIGN: u16 = 0x8000;

/// Result of one ALU evaluation.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct AluOutput {
    /// Function output.
    pub result: u16,
    /// Carry, zero and overflow for this result.
    pub flags: StatusFlags,
}

/// Arithmetic Logic Unit (ALU) for 16-bit integer operations.
pub struct Alu;

impl Alu {
    /// Executes an ALU operation.
    ///
    /// # Arguments
    ///
    /// * `func` - The ALU function to compute
    /// * `source` - Operand gating applied before the function
    /// * `carry_in` - Carry input, added by the three arithmetic functions
    /// * `a` - Left operand as read from the register file
    /// * `b` - Right operand after right-operand selection
    ///
    /// # Returns
    ///
    /// The result and its flags. Carry and overflow are only produced by the
    /// arithmetic functions. Overflow is judged on the operands the adder
    /// actually sums, i.e. after the subtract forms invert one side.
    pub fn execute(
        func: AluFunction,
        source: OperandSource,
        carry_in: bool,
        a: u16,
        b: u16,
    ) -> AluOutput {
        let (r, s) = match source {
            OperandSource::Registers => (a, b),
            OperandSource::ZeroLeft => (0, b),
            OperandSource::ZeroRight => (a, 0),
            OperandSource::ZeroBoth => (0, 0),
        };
        let c0 = carry_in as u32;

        let (result, carry, overflow) = match func {
            AluFunction::Clear => (0x0000, false, false),
            AluFunction::SubReverse => Self::add17(!r, s, c0),
            AluFunction::Sub => Self::add17(r, !s, c0),
            AluFunction::Add => Self::add17(r, s, c0),
            AluFunction::Xor => (r ^ s, false, false),
            AluFunction::Or => (r | s, false, false),
            AluFunction::And => (r & s, false, false),
            AluFunction::Preset => (0xffff, false, false),
        };

        AluOutput {
            result,
            flags: StatusFlags::new(carry, result == 0, overflow),
        }
    }

    /// Sums two adder inputs and the carry, returning the result, the carry
    /// out of bit 15 and signed overflow.
    fn add17(x: u16, y: u16, c0: u32) -> (u16, bool, bool) {
        let wide = x as u32 + y as u32 + c0;
        let result = wide as u16;
        // Same-signed inputs with a differently signed sum.
        let overflow = (!(x ^ y) & (x ^ result) & SIGN) != 0;
        (result, wide > 0xffff, overflow)
    }
}
