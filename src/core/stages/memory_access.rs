//! Memory Access (MEM) stage.

use log::trace;

use crate::core::pipeline::latches::{ExMemEntry, MemWbEntry};
use crate::soc::DataBus;

/// Performs the data memory access for the instruction in the EX/MEM latch.
///
/// The store operand bus carries a value only when the control word drives
/// it. A store writes that value to address `y`; a load replaces it with the
/// word read from `y`.
///
/// # Arguments
///
/// * `ex_mem` - EX/MEM latch at the start of the edge
/// * `bus` - Data memory
///
/// # Returns
///
/// The new MEM/WB latch contents.
pub fn memory_stage(ex_mem: &ExMemEntry, bus: &mut dyn DataBus) -> MemWbEntry {
    let ctrl = ex_mem.ctrl;
    let mut store_op = if ctrl.assert_store_op {
        ex_mem.store_op
    } else {
        0
    };

    if ctrl.mem_store {
        trace!("MEM store [{:#06x}] <- {:#06x}", ex_mem.y, store_op);
        bus.store(store_op, ex_mem.y);
    }

    if ctrl.mem_load {
        store_op = bus.load(ex_mem.y);
        trace!("MEM load  [{:#06x}] -> {:#06x}", ex_mem.y, store_op);
    }

    MemWbEntry {
        pc: ex_mem.pc,
        ins: ex_mem.ins,
        y: ex_mem.y,
        store_op,
        ctrl,
    }
}

/// Passes the EX/MEM latch through without touching memory.
///
/// Used while reset is asserted, when the data bus must stay idle.
pub fn bypass_memory(ex_mem: &ExMemEntry) -> MemWbEntry {
    MemWbEntry {
        pc: ex_mem.pc,
        ins: ex_mem.ins,
        y: ex_mem.y,
        store_op: 0,
        ctrl: ex_mem.ctrl,
    }
}
