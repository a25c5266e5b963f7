//! Decode table generation.
//!
//! Each opcode is described by the signals it asserts. Most opcodes behave
//! the same under every flag combination; the conditional branches and the
//! carry arithmetic pick between two words with a predicate over the flags.

use log::debug;

use super::table::DecodeTable;
use crate::core::arch::flags::StatusFlags;
use crate::core::pipeline::signals::{
    AluFunction, ControlWord, OperandSource, RightOperand, Signal as S, StoreOperand,
    WriteBackSource,
};
use crate::isa::Opcode;

/// How an opcode's control word depends on the status flags.
#[derive(Clone, Copy, Debug)]
pub enum Behavior {
    /// Same word under every flag combination.
    Fixed(ControlWord),
    /// `taken` where `predicate` holds, `otherwise` elsewhere.
    Conditional {
        /// Word for a taken branch, or carry-honoring arithmetic.
        taken: ControlWord,
        /// Word for a not-taken branch, or carry-less arithmetic.
        otherwise: ControlWord,
        /// Selects between the two.
        predicate: fn(StatusFlags) -> bool,
    },
}

impl Behavior {
    /// Resolves the word for one flag combination.
    pub fn resolve(&self, flags: StatusFlags) -> ControlWord {
        match *self {
            Behavior::Fixed(word) => word,
            Behavior::Conditional {
                taken,
                otherwise,
                predicate,
            } => {
                if predicate(flags) {
                    taken
                } else {
                    otherwise
                }
            }
        }
    }
}

const WRITE_ALU: [S; 4] = [
    S::WriteBackSource(WriteBackSource::AluResult),
    S::WriteLow,
    S::WriteHigh,
    S::WriteEnable,
];

const WRITE_STORE_OP: [S; 4] = [
    S::WriteBackSource(WriteBackSource::StoreOperand),
    S::WriteLow,
    S::WriteHigh,
    S::WriteEnable,
];

/// ALU operation on `rA` and `right`, optionally committing flags and
/// writing the result back.
fn alu_op(
    right: RightOperand,
    func: AluFunction,
    carry_in: bool,
    flags: bool,
    write: bool,
) -> ControlWord {
    let mut word = ControlWord::from_signals(&[S::RightOperand(right), S::Alu(func)]);
    if carry_in {
        word = word.with(S::CarryIn);
    }
    if flags {
        word = word.with(S::FlagsUpdate);
    }
    if write {
        word = WRITE_ALU.iter().fold(word, |w, &s| w.with(s));
    }
    word
}

fn relative_jump() -> ControlWord {
    ControlWord::from_signals(&[
        S::RightOperand(RightOperand::Imm10_0),
        S::Alu(AluFunction::Add),
        S::OperandSource(OperandSource::ZeroLeft),
        S::Jump,
    ])
}

fn branch(predicate: fn(StatusFlags) -> bool) -> Behavior {
    Behavior::Conditional {
        taken: relative_jump(),
        otherwise: ControlWord::NOP,
        predicate,
    }
}

/// Returns the declarative description of `op`.
///
/// The match is exhaustive, so adding an opcode without describing it is a
/// compile error.
pub fn behavior(op: Opcode) -> Behavior {
    use AluFunction::{Add, And, Or, Sub, SubReverse, Xor};
    use RightOperand::{Imm4_0, RegisterB};

    let word = match op {
        Opcode::Nop | Opcode::Unused19 | Opcode::Unused23 => ControlWord::NOP,
        Opcode::Hlt => ControlWord::from_signals(&[S::Halt]),
        Opcode::Load => WRITE_STORE_OP.iter().fold(
            ControlWord::from_signals(&[S::RightOperand(Imm4_0), S::Alu(Add), S::MemLoad]),
            |w, &s| w.with(s),
        ),
        Opcode::Store => ControlWord::from_signals(&[
            S::StoreOperand(StoreOperand::RegisterB),
            S::RightOperand(RightOperand::Imm10_8_1_0),
            S::Alu(Add),
            S::MemStore,
            S::AssertStoreOp,
        ]),
        Opcode::Li => WRITE_STORE_OP.iter().fold(
            ControlWord::from_signals(&[
                S::StoreOperand(StoreOperand::Immediate8),
                S::AssertStoreOp,
            ]),
            |w, &s| w.with(s),
        ),
        Opcode::Lui => ControlWord::from_signals(&[
            S::StoreOperand(StoreOperand::UpperImmediate8),
            S::AssertStoreOp,
            S::WriteBackSource(WriteBackSource::StoreOperand),
            S::WriteHigh,
            S::WriteEnable,
        ]),
        Opcode::Cmp => alu_op(RegisterB, Sub, true, true, false),
        Opcode::Add => alu_op(RegisterB, Add, false, true, true),
        Opcode::Sub => alu_op(RegisterB, Sub, true, true, true),
        Opcode::And => alu_op(RegisterB, And, false, true, true),
        Opcode::Or => alu_op(RegisterB, Or, false, true, true),
        Opcode::Xor => alu_op(RegisterB, Xor, false, true, true),
        Opcode::Not => alu_op(RegisterB, SubReverse, false, false, true)
            .with(S::OperandSource(OperandSource::ZeroRight)),
        Opcode::Cmpi => alu_op(Imm4_0, Sub, true, true, false),
        Opcode::Addi => alu_op(Imm4_0, Add, false, true, true),
        Opcode::Subi => alu_op(Imm4_0, Sub, true, true, true),
        Opcode::Andi => alu_op(Imm4_0, And, false, true, true),
        Opcode::Ori => alu_op(Imm4_0, Or, false, true, true),
        Opcode::Xori => alu_op(Imm4_0, Xor, false, true, true),
        Opcode::Jmp => ControlWord::from_signals(&[
            S::RightOperand(RightOperand::Imm10_0),
            S::Alu(Or),
            S::OperandSource(OperandSource::ZeroLeft),
            S::Jump,
        ]),
        Opcode::Jr => ControlWord::from_signals(&[
            S::RightOperand(Imm4_0),
            S::Alu(Add),
            S::Jump,
            S::JumpAbsolute,
        ]),
        Opcode::Jalr => WRITE_STORE_OP.iter().fold(
            ControlWord::from_signals(&[
                S::StoreOperand(StoreOperand::ProgramCounter),
                S::RightOperand(Imm4_0),
                S::Alu(Add),
                S::Jump,
                S::JumpAbsolute,
                S::AssertStoreOp,
            ]),
            |w, &s| w.with(s),
        ),
        Opcode::Beq => return branch(|f| f.zero),
        Opcode::Bne => return branch(|f| !f.zero),
        Opcode::Blt => return branch(|f| f.overflow),
        Opcode::Bge => return branch(|f| !f.overflow),
        Opcode::Bltu => return branch(|f| f.carry),
        Opcode::Bgeu => return branch(|f| !f.carry),
        Opcode::Adc => {
            return Behavior::Conditional {
                taken: alu_op(RegisterB, Add, true, true, true),
                otherwise: alu_op(RegisterB, Add, false, true, true),
                predicate: |f| f.carry,
            }
        }
        // The borrow is the inverted carry, so honoring it clears c0.
        Opcode::Sbc => {
            return Behavior::Conditional {
                taken: alu_op(RegisterB, Sub, false, true, true),
                otherwise: alu_op(RegisterB, Sub, true, true, true),
                predicate: |f| f.carry,
            }
        }
    };
    Behavior::Fixed(word)
}

/// Builds the decoder lookup table.
pub struct ControlWordTableBuilder;

impl ControlWordTableBuilder {
    /// Generates a fresh decode table.
    ///
    /// Every row starts as the no-op word. Each opcode then writes all
    /// sixteen of its rows, and finally every reset row is forced back to
    /// the no-op word so nothing an opcode writes can survive reset.
    pub fn generate() -> DecodeTable {
        let mut rows = vec![ControlWord::NOP; DecodeTable::ROWS];

        for op in Opcode::ALL {
            let desc = behavior(op);
            for index in DecodeTable::indices_for_all_conditions(op) {
                let (_, flags, _) = DecodeTable::decode_index(index);
                rows[index] = desc.resolve(flags);
            }
        }

        for index in DecodeTable::indices_for_reset() {
            rows[index] = ControlWord::NOP;
        }

        debug!(
            "decode table generated: {} rows, {} non-nop",
            rows.len(),
            rows.iter().filter(|w| !w.is_nop()).count()
        );
        DecodeTable::from_rows(rows)
    }
}
