//! Instruction Decode (ID) stage.
//!
//! Decode looks the instruction up in the decode table, reads both source
//! registers and decides whether the instruction may proceed. There is no
//! forwarding, so an instruction whose sources are still being produced is
//! held in place while a bubble goes down the pipe.

use log::{debug, trace};

use crate::core::arch::flags::StatusFlags;
use crate::core::arch::gpr::Gpr;
use crate::core::control::DecodeTable;
use crate::core::pipeline::hazards::{self, StallReason};
use crate::core::pipeline::latches::{ExMemEntry, IdExEntry, IfIdEntry};
use crate::core::pipeline::signals::ControlWord;

/// Inputs to decode for one edge, all captured at the start of the edge.
#[derive(Clone, Copy, Debug, Default)]
pub struct DecodeInput {
    /// IF/ID latch: the instruction to decode.
    pub fetched: IfIdEntry,
    /// Reset line.
    pub reset: bool,
    /// Status flags.
    pub flags: StatusFlags,
    /// ID/EX latch: the instruction now in execute.
    pub ex: IdExEntry,
    /// EX/MEM latch: the instruction now in memory.
    pub mem: ExMemEntry,
    /// Execute resolved a taken jump this edge.
    pub jump_taken: bool,
}

/// Result of decoding one instruction.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct DecodeOutput {
    /// New ID/EX latch contents.
    pub id_ex: IdExEntry,
    /// Hold the program counter.
    pub stall_pc: bool,
    /// Hold the IF/ID latch.
    pub stall_if: bool,
    /// The instruction was squashed by a taken jump.
    pub flush: bool,
    /// Why a bubble was inserted, if one was.
    pub stall: Option<StallReason>,
}

/// The decode stage and the decode table it owns.
#[derive(Clone, Debug)]
pub struct DecodeStage {
    table: DecodeTable,
}

impl DecodeStage {
    /// Creates a decode stage around `table`.
    pub fn new(table: DecodeTable) -> Self {
        Self { table }
    }

    /// The decode table.
    pub fn table(&self) -> &DecodeTable {
        &self.table
    }

    /// Looks up the control word for the current condition.
    pub fn control_word(&self, input: &DecodeInput) -> ControlWord {
        self.table
            .lookup(input.reset, input.flags, input.fetched.ins.opcode())
    }

    /// Decodes one instruction.
    ///
    /// # Arguments
    ///
    /// * `input` - Latches, flags and reset at the start of the edge
    /// * `regs` - The register file, already updated by this edge's write-back
    ///
    /// # Returns
    ///
    /// The next ID/EX contents and the stall and flush signals. A taken
    /// jump flushes regardless of hazards; otherwise a hazard stalls both
    /// the program counter and the IF/ID latch.
    pub fn decode(&self, input: &DecodeInput, regs: &Gpr) -> DecodeOutput {
        let ins = input.fetched.ins;
        let mut out = DecodeOutput {
            id_ex: IdExEntry {
                pc: input.fetched.pc,
                ins,
                a: regs.read(ins.sel_a()),
                b: regs.read(ins.sel_b()),
                ctrl: self.control_word(input),
            },
            ..DecodeOutput::default()
        };

        if input.jump_taken {
            debug!("ID  pc={:#06x} flushed by taken jump", input.fetched.pc);
            out.id_ex.ctrl = ControlWord::NOP;
            out.flush = true;
            return out;
        }

        if let Some(reason) = hazards::detect(ins, &input.ex, &input.mem) {
            debug!(
                "ID  pc={:#06x} {} stalled ({:?} hazard)",
                input.fetched.pc, ins, reason
            );
            out.id_ex.ctrl = ControlWord::NOP;
            out.stall_pc = true;
            out.stall_if = true;
            out.stall = Some(reason);
            return out;
        }

        trace!(
            "ID  pc={:#06x} {} ctl={:#08x}",
            input.fetched.pc,
            ins,
            out.id_ex.ctrl.to_bits()
        );
        out
    }
}
