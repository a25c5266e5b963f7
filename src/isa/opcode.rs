//! Opcode definitions.
//!
//! The opcode occupies bits [15:11] of the instruction word. The set is
//! closed: all 32 encodings map to a variant, two of which are reserved and
//! decode as no-ops.

use std::fmt;

/// Machine opcodes in encoding order.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[repr(u8)]
pub enum Opcode {
    /// No operation.
    Nop = 0,
    /// Stop the machine once the instruction reaches write-back.
    Hlt = 1,
    /// `rC <- mem[rA + imm_4_0]`
    Load = 2,
    /// `mem[rA + imm_10_8_1_0] <- rB`
    Store = 3,
    /// `rC <- sext(imm8)`
    Li = 4,
    /// `rC[15:8] <- imm8`
    Lui = 5,
    /// Set flags from `rA - rB`.
    Cmp = 6,
    Add = 7,
    Sub = 8,
    And = 9,
    Or = 10,
    Xor = 11,
    /// `rC <- !rA`
    Not = 12,
    /// Set flags from `rA - imm_4_0`.
    Cmpi = 13,
    Addi = 14,
    Subi = 15,
    Andi = 16,
    Ori = 17,
    Xori = 18,
    /// Reserved encoding.
    Unused19 = 19,
    /// `pc <- pc + imm_10_0`
    Jmp = 20,
    /// `pc <- rA + imm_4_0`
    Jr = 21,
    /// `rC <- pc; pc <- rA + imm_4_0`
    Jalr = 22,
    /// Reserved encoding.
    Unused23 = 23,
    Beq = 24,
    Bne = 25,
    /// Signed less-than, taken on overflow.
    Blt = 26,
    Bge = 27,
    /// Unsigned less-than, taken on carry.
    Bltu = 28,
    Bgeu = 29,
    /// Add with carry.
    Adc = 30,
    /// Subtract with borrow.
    Sbc = 31,
}

impl Opcode {
    /// Number of opcodes in the instruction set.
    pub const COUNT: usize = 32;

    /// All opcodes in encoding order.
    pub const ALL: [Opcode; Opcode::COUNT] = [
        Opcode::Nop,
        Opcode::Hlt,
        Opcode::Load,
        Opcode::Store,
        Opcode::Li,
        Opcode::Lui,
        Opcode::Cmp,
        Opcode::Add,
        Opcode::Sub,
        Opcode::And,
        Opcode::Or,
        Opcode::Xor,
        Opcode::Not,
        Opcode::Cmpi,
        Opcode::Addi,
        Opcode::Subi,
        Opcode::Andi,
        Opcode::Ori,
        Opcode::Xori,
        Opcode::Unused19,
        Opcode::Jmp,
        Opcode::Jr,
        Opcode::Jalr,
        Opcode::Unused23,
        Opcode::Beq,
        Opcode::Bne,
        Opcode::Blt,
        Opcode::Bge,
        Opcode::Bltu,
        Opcode::Bgeu,
        Opcode::Adc,
        Opcode::Sbc,
    ];

    /// Converts the low five bits of `bits` to an opcode.
    ///
    /// Every 5-bit value names an opcode, so this never fails.
    pub fn from_bits(bits: u8) -> Self {
        Self::ALL[(bits & 0x1f) as usize]
    }

    /// Returns the 5-bit encoding.
    pub fn bits(self) -> u8 {
        self as u8
    }

    /// Returns true for opcodes whose control word depends on the status flags.
    ///
    /// These occupy the upper quarter of the opcode space: the six
    /// conditional branches plus ADC and SBC.
    pub fn reads_flags(self) -> bool {
        self.bits() >= Opcode::Beq.bits()
    }

    /// Returns true for encodings with no assigned instruction.
    pub fn is_reserved(self) -> bool {
        matches!(self, Opcode::Unused19 | Opcode::Unused23)
    }

    /// Assembly mnemonic.
    pub fn mnemonic(self) -> &'static str {
        match self {
            Opcode::Nop => "NOP",
            Opcode::Hlt => "HLT",
            Opcode::Load => "LOAD",
            Opcode::Store => "STORE",
            Opcode::Li => "LI",
            Opcode::Lui => "LUI",
            Opcode::Cmp => "CMP",
            Opcode::Add => "ADD",
            Opcode::Sub => "SUB",
            Opcode::And => "AND",
            Opcode::Or => "OR",
            Opcode::Xor => "XOR",
            Opcode::Not => "NOT",
            Opcode::Cmpi => "CMPI",
            Opcode::Addi => "ADDI",
            Opcode::Subi => "SUBI",
            Opcode::Andi => "ANDI",
            Opcode::Ori => "ORI",
            Opcode::Xori => "XORI",
            Opcode::Unused19 => "UNUSED19",
            Opcode::Jmp => "JMP",
            Opcode::Jr => "JR",
            Opcode::Jalr => "JALR",
            Opcode::Unused23 => "UNUSED23",
            Opcode::Beq => "BEQ",
            Opcode::Bne => "BNE",
            Opcode::Blt => "BLT",
            Opcode::Bge => "BGE",
            Opcode::Bltu => "BLTU",
            Opcode::Bgeu => "BGEU",
            Opcode::Adc => "ADC",
            Opcode::Sbc => "SBC",
        }
    }
}

// The decode table reserves five address bits for the opcode.
const _: () = assert!(Opcode::COUNT <= 32);

impl fmt::Display for Opcode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.mnemonic())
    }
}
