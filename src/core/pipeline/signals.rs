//! Pipeline control signals.
//!
//! A [`ControlWord`] is the 21-bit value the decode table produces for every
//! instruction. It travels with the instruction through execute, memory and
//! write-back, and each stage reads only the fields it owns.
//!
//! Fields are held in their logical sense: a `true` flag or non-zero
//! selector means the signal is asserted, and the no-op word is all zero.
//! The hardware drives these lines active-low, which only matters when the
//! table is burned to ROM (see [`ControlWord::to_rom_word`]).

use serde::Serialize;

/// Bit positions of each field in the packed control word.
pub mod bit {
    /// Halt.
    pub const HLT: u32 = 0;
    /// Store operand select, two bits.
    pub const SEL_STORE_OP: u32 = 1;
    /// Right operand select, two bits.
    pub const SEL_RIGHT_OP: u32 = 3;
    /// Flags update.
    pub const FI: u32 = 5;
    /// ALU carry input.
    pub const C0: u32 = 6;
    /// ALU function, three bits.
    pub const I0: u32 = 7;
    /// Operand source, two bits.
    pub const RS0: u32 = 10;
    /// Jump.
    pub const J: u32 = 12;
    /// Absolute jump.
    pub const JABS: u32 = 13;
    /// Memory load.
    pub const MEM_LOAD: u32 = 14;
    /// Memory store.
    pub const MEM_STORE: u32 = 15;
    /// Drive the store operand bus.
    pub const ASSERT_STORE_OP: u32 = 16;
    /// Write-back source select.
    pub const WRITE_BACK_SRC: u32 = 17;
    /// Write low byte.
    pub const WRL: u32 = 18;
    /// Write high byte.
    pub const WRH: u32 = 19;
    /// Register file write enable.
    pub const WBEN: u32 = 20;
}

/// Value driven onto the store operand bus in the execute stage.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize)]
pub enum StoreOperand {
    /// Second register operand.
    #[default]
    RegisterB = 0,
    /// Program counter of the fetch stage (link value).
    ProgramCounter = 1,
    /// Sign-extended `imm8`.
    Immediate8 = 2,
    /// `imm8 << 8`.
    UpperImmediate8 = 3,
}

impl StoreOperand {
    fn from_bits(bits: u32) -> Self {
        match bits & 0b11 {
            0 => StoreOperand::RegisterB,
            1 => StoreOperand::ProgramCounter,
            2 => StoreOperand::Immediate8,
            _ => StoreOperand::UpperImmediate8,
        }
    }
}

/// Right-hand ALU operand.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize)]
pub enum RightOperand {
    /// Second register operand.
    #[default]
    RegisterB = 0,
    /// `imm_4_0`
    Imm4_0 = 1,
    /// `imm_10_8_1_0`
    Imm10_8_1_0 = 2,
    /// `imm_10_0`
    Imm10_0 = 3,
}

impl RightOperand {
    fn from_bits(bits: u32) -> Self {
        match bits & 0b11 {
            0 => RightOperand::RegisterB,
            1 => RightOperand::Imm4_0,
            2 => RightOperand::Imm10_8_1_0,
            _ => RightOperand::Imm10_0,
        }
    }
}

/// ALU function select, using the function codes of the 16-bit ALU chip.
///
/// `R` is the left operand and `S` the right one.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize)]
pub enum AluFunction {
    /// Output zero.
    #[default]
    Clear = 0,
    /// `S - R`, computed as `!R + S + c0`.
    SubReverse = 1,
    /// `R - S`, computed as `R + !S + c0`.
    Sub = 2,
    /// `R + S + c0`
    Add = 3,
    Xor = 4,
    Or = 5,
    And = 6,
    /// Output all ones.
    Preset = 7,
}

impl AluFunction {
    fn from_bits(bits: u32) -> Self {
        match bits & 0b111 {
            0 => AluFunction::Clear,
            1 => AluFunction::SubReverse,
            2 => AluFunction::Sub,
            3 => AluFunction::Add,
            4 => AluFunction::Xor,
            5 => AluFunction::Or,
            6 => AluFunction::And,
            _ => AluFunction::Preset,
        }
    }
}

/// ALU operand gating.
///
/// JMP and the relative branches zero the left operand so the ALU passes the
/// displacement through; NOT zeroes the right operand.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize)]
pub enum OperandSource {
    /// `R = A`, `S = right operand`.
    #[default]
    Registers = 0,
    /// `R = 0`
    ZeroLeft = 1,
    /// `S = 0`
    ZeroRight = 2,
    /// `R = 0`, `S = 0`
    ZeroBoth = 3,
}

impl OperandSource {
    fn from_bits(bits: u32) -> Self {
        match bits & 0b11 {
            0 => OperandSource::Registers,
            1 => OperandSource::ZeroLeft,
            2 => OperandSource::ZeroRight,
            _ => OperandSource::ZeroBoth,
        }
    }
}

/// Value committed by the write-back stage.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize)]
pub enum WriteBackSource {
    /// ALU result `y`.
    #[default]
    AluResult = 0,
    /// Store operand, replaced by the loaded word on LOAD.
    StoreOperand = 1,
}

/// One named control signal, used to describe control words declaratively.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Signal {
    Halt,
    StoreOperand(StoreOperand),
    RightOperand(RightOperand),
    FlagsUpdate,
    CarryIn,
    Alu(AluFunction),
    OperandSource(OperandSource),
    Jump,
    JumpAbsolute,
    MemLoad,
    MemStore,
    AssertStoreOp,
    WriteBackSource(WriteBackSource),
    WriteLow,
    WriteHigh,
    WriteEnable,
}

/// Decoded control signals for one instruction.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize)]
pub struct ControlWord {
    /// Stop the machine when this word reaches write-back.
    pub halt: bool,
    /// Store operand bus source.
    pub store_op: StoreOperand,
    /// Right ALU operand source.
    pub right_op: RightOperand,
    /// Commit ALU flags in execute.
    pub flags_update: bool,
    /// ALU carry input.
    pub carry_in: bool,
    /// ALU function.
    pub alu: AluFunction,
    /// ALU operand gating.
    pub operand_source: OperandSource,
    /// Redirect fetch.
    pub jump: bool,
    /// Jump target is the ALU result rather than pc-relative.
    pub jump_absolute: bool,
    /// Load from data memory.
    pub mem_load: bool,
    /// Store to data memory.
    pub mem_store: bool,
    /// Drive the store operand bus.
    pub assert_store_op: bool,
    /// Write-back value select.
    pub write_back_src: WriteBackSource,
    /// Write bits [7:0] of the destination.
    pub write_low: bool,
    /// Write bits [15:8] of the destination.
    pub write_high: bool,
    /// Register file write enable.
    pub write_enable: bool,
}

impl ControlWord {
    /// Number of bits in a packed control word.
    pub const WIDTH: u32 = 21;

    /// Mask covering every control word bit.
    pub const MASK: u32 = (1 << Self::WIDTH) - 1;

    /// The no-op control word.
    pub const NOP: ControlWord = ControlWord {
        halt: false,
        store_op: StoreOperand::RegisterB,
        right_op: RightOperand::RegisterB,
        flags_update: false,
        carry_in: false,
        alu: AluFunction::Clear,
        operand_source: OperandSource::Registers,
        jump: false,
        jump_absolute: false,
        mem_load: false,
        mem_store: false,
        assert_store_op: false,
        write_back_src: WriteBackSource::AluResult,
        write_low: false,
        write_high: false,
        write_enable: false,
    };

    /// Builds a control word with exactly the listed signals asserted.
    ///
    /// Later signals override earlier ones for the same field.
    pub fn from_signals(signals: &[Signal]) -> Self {
        signals.iter().fold(Self::NOP, |word, &s| word.with(s))
    }

    /// Returns a copy with `signal` asserted.
    pub fn with(mut self, signal: Signal) -> Self {
        match signal {
            Signal::Halt => self.halt = true,
            Signal::StoreOperand(src) => self.store_op = src,
            Signal::RightOperand(src) => self.right_op = src,
            Signal::FlagsUpdate => self.flags_update = true,
            Signal::CarryIn => self.carry_in = true,
            Signal::Alu(func) => self.alu = func,
            Signal::OperandSource(src) => self.operand_source = src,
            Signal::Jump => self.jump = true,
            Signal::JumpAbsolute => self.jump_absolute = true,
            Signal::MemLoad => self.mem_load = true,
            Signal::MemStore => self.mem_store = true,
            Signal::AssertStoreOp => self.assert_store_op = true,
            Signal::WriteBackSource(src) => self.write_back_src = src,
            Signal::WriteLow => self.write_low = true,
            Signal::WriteHigh => self.write_high = true,
            Signal::WriteEnable => self.write_enable = true,
        }
        self
    }

    /// Returns true if this is the no-op word.
    pub fn is_nop(&self) -> bool {
        *self == Self::NOP
    }

    /// Packs the fields into their fixed bit positions.
    pub fn to_bits(&self) -> u32 {
        let flag = |on: bool, pos: u32| (on as u32) << pos;
        flag(self.halt, bit::HLT)
            | (self.store_op as u32) << bit::SEL_STORE_OP
            | (self.right_op as u32) << bit::SEL_RIGHT_OP
            | flag(self.flags_update, bit::FI)
            | flag(self.carry_in, bit::C0)
            | (self.alu as u32) << bit::I0
            | (self.operand_source as u32) << bit::RS0
            | flag(self.jump, bit::J)
            | flag(self.jump_absolute, bit::JABS)
            | flag(self.mem_load, bit::MEM_LOAD)
            | flag(self.mem_store, bit::MEM_STORE)
            | flag(self.assert_store_op, bit::ASSERT_STORE_OP)
            | (self.write_back_src as u32) << bit::WRITE_BACK_SRC
            | flag(self.write_low, bit::WRL)
            | flag(self.write_high, bit::WRH)
            | flag(self.write_enable, bit::WBEN)
    }

    /// Unpacks a control word. Bits above bit 20 are ignored.
    pub fn from_bits(bits: u32) -> Self {
        let flag = |pos: u32| (bits >> pos) & 1 == 1;
        Self {
            halt: flag(bit::HLT),
            store_op: StoreOperand::from_bits(bits >> bit::SEL_STORE_OP),
            right_op: RightOperand::from_bits(bits >> bit::SEL_RIGHT_OP),
            flags_update: flag(bit::FI),
            carry_in: flag(bit::C0),
            alu: AluFunction::from_bits(bits >> bit::I0),
            operand_source: OperandSource::from_bits(bits >> bit::RS0),
            jump: flag(bit::J),
            jump_absolute: flag(bit::JABS),
            mem_load: flag(bit::MEM_LOAD),
            mem_store: flag(bit::MEM_STORE),
            assert_store_op: flag(bit::ASSERT_STORE_OP),
            write_back_src: if flag(bit::WRITE_BACK_SRC) {
                WriteBackSource::StoreOperand
            } else {
                WriteBackSource::AluResult
            },
            write_low: flag(bit::WRL),
            write_high: flag(bit::WRH),
            write_enable: flag(bit::WBEN),
        }
    }

    /// Encodes the word as burned into the decoder ROM.
    ///
    /// Every control line is active-low on the board, so the ROM holds the
    /// complement of the logical word. The no-op word burns as `0x1FFFFF`.
    pub fn to_rom_word(&self) -> u32 {
        !self.to_bits() & Self::MASK
    }

    /// Inverse of [`ControlWord::to_rom_word`].
    pub fn from_rom_word(word: u32) -> Self {
        Self::from_bits(!word & Self::MASK)
    }

    /// Returns the destination register this word writes, if any.
    pub fn destination(&self, sel_c: u8) -> Option<u8> {
        self.write_enable.then_some(sel_c)
    }
}
