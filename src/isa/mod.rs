//! Instruction set of the 16-bit machine.
//!
//! Every instruction is a single 16-bit word. The top five bits select one of
//! 32 opcodes and the low eleven bits carry an opcode-specific payload:
//! register selects, a sign-extended immediate, or a branch displacement.

/// Instruction format encoders used by tests and tooling.
pub mod encoding;

/// Field extraction and disassembly of a raw instruction word.
pub mod instruction;

/// The closed set of opcodes.
pub mod opcode;

pub use instruction::Instruction;
pub use opcode::Opcode;

/// Number of general-purpose registers addressable by a 3-bit select.
pub const NUM_REGISTERS: usize = 8;
