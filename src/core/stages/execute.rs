//! Execute (EX) stage.
//!
//! Selects the right-hand ALU operand and the store operand, runs the ALU,
//! and resolves jumps. Flags are reported to the sequencer, which commits
//! them only when the control word asks for it.

use log::trace;

use crate::core::arch::flags::StatusFlags;
use crate::core::pipeline::latches::{ExMemEntry, IdExEntry};
use crate::core::pipeline::signals::{RightOperand, StoreOperand};
use crate::core::units::alu::Alu;

/// Result of executing one instruction.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct ExecuteOutput {
    /// New EX/MEM latch contents.
    pub ex_mem: ExMemEntry,
    /// Flags to commit, if the instruction updates them.
    pub flags: Option<StatusFlags>,
    /// Jump target, if the instruction jumps.
    pub jump: Option<u16>,
}

/// Program counter values visible to execute during an edge.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct ExecutePc {
    /// Fetch program counter; base of relative jumps.
    pub fetch: u16,
    /// Address of the instruction following the one in execute; the link
    /// value stored by JALR.
    pub link: u16,
}

/// Executes the instruction in the ID/EX latch.
///
/// # Arguments
///
/// * `id_ex` - ID/EX latch at the start of the edge
/// * `pc` - Fetch and link program counters at the start of the edge
///
/// # Returns
///
/// The EX/MEM contents, the flags to commit and the jump target. A relative
/// jump lands at the fetch counter plus the ALU result, which is two words
/// past the jump itself.
pub fn execute_stage(id_ex: &IdExEntry, pc: ExecutePc) -> ExecuteOutput {
    let ctrl = id_ex.ctrl;
    let ins = id_ex.ins;

    let right = match ctrl.right_op {
        RightOperand::RegisterB => id_ex.b,
        RightOperand::Imm4_0 => ins.imm_4_0(),
        RightOperand::Imm10_8_1_0 => ins.imm_10_8_1_0(),
        RightOperand::Imm10_0 => ins.imm_10_0(),
    };

    let store_op = match ctrl.store_op {
        StoreOperand::RegisterB => id_ex.b,
        StoreOperand::ProgramCounter => pc.link,
        StoreOperand::Immediate8 => ins.imm8(),
        StoreOperand::UpperImmediate8 => ins.upper_imm8(),
    };

    let alu = Alu::execute(ctrl.alu, ctrl.operand_source, ctrl.carry_in, id_ex.a, right);

    let jump = ctrl.jump.then(|| {
        if ctrl.jump_absolute {
            alu.result
        } else {
            pc.fetch.wrapping_add(alu.result)
        }
    });

    if !ctrl.is_nop() {
        trace!(
            "EX  pc={:#06x} {} y={:#06x} {}",
            id_ex.pc,
            ins,
            alu.result,
            alu.flags
        );
    }

    ExecuteOutput {
        ex_mem: ExMemEntry {
            pc: id_ex.pc,
            ins,
            y: alu.result,
            store_op,
            ctrl,
        },
        flags: ctrl.flags_update.then_some(alu.flags),
        jump,
    }
}
