//! Pipeline latch structures for inter-stage communication.
//!
//! Each latch holds one instruction. All four are captured at the start of a
//! clock edge and replaced wholesale at the end of it, so no stage sees
//! another stage's output from the same edge.

use crate::core::pipeline::signals::ControlWord;
use crate::core::pipeline::traits::PipelineLatch;
use crate::isa::Instruction;

/// IF/ID latch (Fetch to Decode stage).
#[derive(Clone, Copy, Default, Debug, PartialEq, Eq)]
pub struct IfIdEntry {
    /// Address the instruction was fetched from.
    pub pc: u16,
    /// Fetched instruction word.
    pub ins: Instruction,
}

/// ID/EX latch (Decode to Execute stage).
#[derive(Clone, Copy, Default, Debug, PartialEq, Eq)]
pub struct IdExEntry {
    /// Address of the instruction.
    pub pc: u16,
    /// Instruction word, for its immediates and destination select.
    pub ins: Instruction,
    /// Value of register `selA`.
    pub a: u16,
    /// Value of register `selB`.
    pub b: u16,
    /// Control word from the decode table.
    pub ctrl: ControlWord,
}

/// EX/MEM latch (Execute to Memory stage).
#[derive(Clone, Copy, Default, Debug, PartialEq, Eq)]
pub struct ExMemEntry {
    /// Address of the instruction.
    pub pc: u16,
    /// Instruction word.
    pub ins: Instruction,
    /// ALU result, also the data memory address.
    pub y: u16,
    /// Store operand selected in execute.
    pub store_op: u16,
    /// Control word.
    pub ctrl: ControlWord,
}

/// MEM/WB latch (Memory to Writeback stage).
#[derive(Clone, Copy, Default, Debug, PartialEq, Eq)]
pub struct MemWbEntry {
    /// Address of the instruction.
    pub pc: u16,
    /// Instruction word.
    pub ins: Instruction,
    /// ALU result.
    pub y: u16,
    /// Store operand, or the loaded word for LOAD.
    pub store_op: u16,
    /// Control word.
    pub ctrl: ControlWord,
}

impl PipelineLatch for IfIdEntry {
    fn flush(&mut self) {
        *self = Self::default();
    }

    fn is_bubble(&self) -> bool {
        self.ins == Instruction::NOP
    }
}

macro_rules! impl_control_latch {
    ($($t:ty),*) => {$(
        impl PipelineLatch for $t {
            fn flush(&mut self) {
                *self = Self::default();
            }

            fn is_bubble(&self) -> bool {
                self.ctrl.is_nop()
            }
        }

        impl $t {
            /// Destination register written by this instruction, if any.
            pub fn destination(&self) -> Option<u8> {
                self.ctrl.destination(self.ins.sel_c())
            }
        }
    )*};
}

impl_control_latch!(IdExEntry, ExMemEntry, MemWbEntry);

/// The full latch set between the five stages.
#[derive(Clone, Copy, Default, Debug, PartialEq, Eq)]
pub struct PipelineLatches {
    /// Fetch to decode.
    pub if_id: IfIdEntry,
    /// Decode to execute.
    pub id_ex: IdExEntry,
    /// Execute to memory.
    pub ex_mem: ExMemEntry,
    /// Memory to write-back.
    pub mem_wb: MemWbEntry,
}

impl PipelineLatches {
    /// Resets every latch to a bubble.
    pub fn flush(&mut self) {
        self.if_id.flush();
        self.id_ex.flush();
        self.ex_mem.flush();
        self.mem_wb.flush();
    }

    /// Returns true if no instruction is in flight.
    pub fn is_empty(&self) -> bool {
        self.if_id.is_bubble()
            && self.id_ex.is_bubble()
            && self.ex_mem.is_bubble()
            && self.mem_wb.is_bubble()
    }
}
