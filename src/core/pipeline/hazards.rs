//! Data and Flags Hazard Detection.
//!
//! The pipeline has no forwarding network. Decode reads the register file
//! as it stands, so any instruction that still has a pending write to one
//! of its source registers must wait. Likewise a flag-reading instruction
//! waits for a flag-setting predecessor to leave the execute stage.

use crate::core::pipeline::latches::{ExMemEntry, IdExEntry};
use crate::core::pipeline::signals::ControlWord;
use crate::isa::Instruction;

/// Why decode inserted a bubble.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum StallReason {
    /// A source register has a write pending in execute or memory.
    Data,
    /// The decoding instruction reads flags that execute is about to change.
    Flags,
}

/// Checks one in-flight instruction against the decoding instruction.
///
/// # Arguments
///
/// * `in_flight_dest` - Register the in-flight instruction will write, or
///   `None` if it writes nothing
/// * `sources` - The `selA` and `selB` fields of the decoding instruction
///
/// # Returns
///
/// `true` if either source matches the pending destination.
pub fn hazard(in_flight_dest: Option<u8>, sources: [u8; 2]) -> bool {
    match in_flight_dest {
        Some(dest) => sources.contains(&dest),
        None => false,
    }
}

/// Checks whether `ins` reads flags that `ex_ctrl` is about to update.
pub fn flags_hazard(ins: Instruction, ex_ctrl: &ControlWord) -> bool {
    ins.opcode().reads_flags() && ex_ctrl.flags_update
}

/// Runs all hazard checks for the instruction in decode.
///
/// # Arguments
///
/// * `ins` - The instruction being decoded
/// * `ex` - The ID/EX latch, i.e. the instruction in execute
/// * `mem` - The EX/MEM latch, i.e. the instruction in memory
///
/// # Returns
///
/// The reason to stall, or `None` if decode may proceed. Both register
/// selects are compared whatever the opcode, matching the comparators on
/// the board.
pub fn detect(ins: Instruction, ex: &IdExEntry, mem: &ExMemEntry) -> Option<StallReason> {
    let sources = [ins.sel_a(), ins.sel_b()];
    if hazard(ex.destination(), sources) || hazard(mem.destination(), sources) {
        return Some(StallReason::Data);
    }
    if flags_hazard(ins, &ex.ctrl) {
        return Some(StallReason::Flags);
    }
    None
}
