//! Raw instruction words and their operand fields.

use std::fmt;

use super::opcode::Opcode;

/// Sign-extends the low `bits` bits of `value` to 16 bits.
fn sign_extend(value: u16, bits: u32) -> u16 {
    let shift = 16 - bits;
    (((value << shift) as i16) >> shift) as u16
}

/// A 16-bit instruction word.
///
/// Field accessors are pure bit slices; which of them are meaningful depends
/// on the opcode.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct Instruction(pub u16);

impl Instruction {
    /// The all-zero word, which decodes as NOP.
    pub const NOP: Instruction = Instruction(0);

    /// Builds an instruction from an opcode and an 11-bit payload.
    pub fn new(opcode: Opcode, payload: u16) -> Self {
        Self(((opcode.bits() as u16) << 11) | (payload & 0x07ff))
    }

    /// Returns the raw word.
    pub fn raw(self) -> u16 {
        self.0
    }

    /// Returns the opcode in bits [15:11].
    pub fn opcode(self) -> Opcode {
        Opcode::from_bits((self.0 >> 11) as u8)
    }

    /// Returns the operand payload in bits [10:0].
    pub fn payload(self) -> u16 {
        self.0 & 0x07ff
    }

    /// Destination register select, bits [10:8].
    pub fn sel_c(self) -> u8 {
        ((self.0 >> 8) & 0x7) as u8
    }

    /// First source register select, bits [7:5].
    pub fn sel_a(self) -> u8 {
        ((self.0 >> 5) & 0x7) as u8
    }

    /// Second source register select, bits [4:2].
    pub fn sel_b(self) -> u8 {
        ((self.0 >> 2) & 0x7) as u8
    }

    /// Bits [4:0] sign-extended.
    pub fn imm_4_0(self) -> u16 {
        sign_extend(self.0 & 0x1f, 5)
    }

    /// Bits [10:8] and [1:0] concatenated and sign-extended.
    ///
    /// STORE uses this split immediate so both register selects stay free.
    pub fn imm_10_8_1_0(self) -> u16 {
        sign_extend(((self.0 >> 6) & 0b11100) | (self.0 & 0b11), 5)
    }

    /// Bits [10:0] sign-extended.
    pub fn imm_10_0(self) -> u16 {
        sign_extend(self.0 & 0x07ff, 11)
    }

    /// Bits [7:0] sign-extended, as loaded by LI.
    pub fn imm8(self) -> u16 {
        sign_extend(self.0 & 0xff, 8)
    }

    /// Bits [7:0] placed in the high byte, as loaded by LUI.
    pub fn upper_imm8(self) -> u16 {
        (self.0 & 0xff) << 8
    }
}

impl From<u16> for Instruction {
    fn from(word: u16) -> Self {
        Self(word)
    }
}

impl fmt::Display for Instruction {
    /// Writes a one-line disassembly.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let op = self.opcode();
        let (c, a, b) = (self.sel_c(), self.sel_a(), self.sel_b());
        let simm5 = self.imm_4_0() as i16;
        match op {
            Opcode::Nop | Opcode::Hlt => write!(f, "{}", op),
            Opcode::Unused19 | Opcode::Unused23 => write!(f, ".word {:#06x}", self.0),
            Opcode::Load => write!(f, "{} r{}, {}(r{})", op, c, simm5, a),
            Opcode::Store => write!(
                f,
                "{} r{}, {}(r{})",
                op,
                b,
                self.imm_10_8_1_0() as i16,
                a
            ),
            Opcode::Li => write!(f, "{} r{}, {}", op, c, self.imm8() as i16),
            Opcode::Lui => write!(f, "{} r{}, {:#04x}", op, c, self.0 & 0xff),
            Opcode::Cmp => write!(f, "{} r{}, r{}", op, a, b),
            Opcode::Cmpi => write!(f, "{} r{}, {}", op, a, simm5),
            Opcode::Not => write!(f, "{} r{}, r{}", op, c, a),
            Opcode::Add
            | Opcode::Sub
            | Opcode::And
            | Opcode::Or
            | Opcode::Xor
            | Opcode::Adc
            | Opcode::Sbc => write!(f, "{} r{}, r{}, r{}", op, c, a, b),
            Opcode::Addi | Opcode::Subi | Opcode::Andi | Opcode::Ori | Opcode::Xori => {
                write!(f, "{} r{}, r{}, {}", op, c, a, simm5)
            }
            Opcode::Jr => write!(f, "{} r{}, {}", op, a, simm5),
            Opcode::Jalr => write!(f, "{} r{}, r{}, {}", op, c, a, simm5),
            Opcode::Jmp
            | Opcode::Beq
            | Opcode::Bne
            | Opcode::Blt
            | Opcode::Bge
            | Opcode::Bltu
            | Opcode::Bgeu => write!(f, "{} {}", op, self.imm_10_0() as i16),
        }
    }
}
