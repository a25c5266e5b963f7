//! Instruction Fetch (IF) stage.

use log::trace;

use crate::core::pipeline::latches::IfIdEntry;
use crate::isa::Instruction;

/// Control inputs to fetch for one edge.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct FetchControl {
    /// Reset is asserted; the counter is held at zero.
    pub reset: bool,
    /// Hold the program counter.
    pub stall_pc: bool,
    /// Hold the IF/ID latch.
    pub stall_if: bool,
    /// A jump resolved in execute this edge, with its target.
    pub jump: Option<u16>,
}

/// New program counter and IF/ID latch produced by fetch.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct FetchOutput {
    /// Program counter after this edge.
    pub pc: u16,
    /// Latch contents after this edge.
    pub if_id: IfIdEntry,
}

/// Reads one word of program memory. Addresses past the end read as NOP.
pub fn read_program(program: &[u16], addr: u16) -> Instruction {
    Instruction(program.get(addr as usize).copied().unwrap_or(0))
}

/// Advances the fetch stage by one edge.
///
/// # Arguments
///
/// * `program` - Instruction memory
/// * `pc` - Program counter at the start of the edge
/// * `current` - IF/ID latch at the start of the edge
/// * `ctl` - Reset, stall and jump inputs
///
/// # Returns
///
/// The next program counter and IF/ID contents. A jump takes priority over
/// a stall: the counter is loaded with the target and the latch receives a
/// bubble in place of the instruction fetched down the wrong path.
pub fn fetch_stage(program: &[u16], pc: u16, current: IfIdEntry, ctl: FetchControl) -> FetchOutput {
    if ctl.reset {
        return FetchOutput {
            pc: 0,
            if_id: IfIdEntry::default(),
        };
    }

    if let Some(target) = ctl.jump {
        trace!("IF  pc={:#06x} redirect -> {:#06x}", pc, target);
        return FetchOutput {
            pc: target,
            if_id: IfIdEntry::default(),
        };
    }

    let next_pc = if ctl.stall_pc { pc } else { pc.wrapping_add(1) };
    let if_id = if ctl.stall_if {
        current
    } else {
        let ins = read_program(program, pc);
        trace!("IF  pc={:#06x} ins={:#06x} {}", pc, ins.raw(), ins);
        IfIdEntry { pc, ins }
    };

    FetchOutput { pc: next_pc, if_id }
}
