//! Writeback (WB) stage.
//!
//! The register file has independent write strobes for the low and high
//! byte, both gated by a global write enable. [`WriteBackSelector`] turns a
//! control word into those strobes and picks the value to write.

use log::trace;

use crate::core::arch::gpr::Gpr;
use crate::core::pipeline::latches::MemWbEntry;
use crate::core::pipeline::signals::{ControlWord, WriteBackSource};

/// Resolved register file write for one edge.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct WriteBack {
    /// Value presented to the register file.
    pub value: u16,
    /// Low byte strobe.
    pub write_low: bool,
    /// High byte strobe.
    pub write_high: bool,
    /// Global write enable.
    pub write_enable: bool,
}

impl WriteBack {
    /// Bits of the destination register this write changes.
    pub fn mask(&self) -> u16 {
        if !self.write_enable {
            return 0;
        }
        let low = if self.write_low { 0x00ff } else { 0 };
        let high = if self.write_high { 0xff00 } else { 0 };
        low | high
    }

    /// Merges this write into `old`.
    pub fn merge(&self, old: u16) -> u16 {
        let mask = self.mask();
        (old & !mask) | (self.value & mask)
    }

    /// Commits this write to register `dest`.
    pub fn apply(&self, regs: &mut Gpr, dest: u8) {
        let mask = self.mask();
        if mask != 0 {
            regs.write_masked(dest, self.value, mask);
        }
    }
}

/// Combinational write-back selection.
pub struct WriteBackSelector;

impl WriteBackSelector {
    /// Derives the register write for a control word.
    ///
    /// # Arguments
    ///
    /// * `ctrl` - Control word of the retiring instruction
    /// * `y` - ALU result
    /// * `store_op` - Store operand, or the loaded word
    pub fn select(ctrl: &ControlWord, y: u16, store_op: u16) -> WriteBack {
        let value = match ctrl.write_back_src {
            WriteBackSource::AluResult => y,
            WriteBackSource::StoreOperand => store_op,
        };
        WriteBack {
            value,
            write_low: ctrl.write_low,
            write_high: ctrl.write_high,
            write_enable: ctrl.write_enable,
        }
    }
}

/// Retires the instruction in the MEM/WB latch into the register file.
///
/// # Returns
///
/// The write that was performed.
pub fn write_back_stage(mem_wb: &MemWbEntry, regs: &mut Gpr) -> WriteBack {
    let wb = WriteBackSelector::select(&mem_wb.ctrl, mem_wb.y, mem_wb.store_op);
    let dest = mem_wb.ins.sel_c();
    wb.apply(regs, dest);
    if wb.mask() != 0 {
        trace!(
            "WB  pc={:#06x} r{} <- {:#06x} (mask {:#06x})",
            mem_wb.pc,
            dest,
            regs.read(dest),
            wb.mask()
        );
    }
    wb
}
