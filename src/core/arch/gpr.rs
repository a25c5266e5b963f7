//! General-Purpose Register File.
//!
//! Eight 16-bit registers addressed by the 3-bit select fields of the
//! instruction. Unlike many RISC designs there is no hardwired zero
//! register; r0 is an ordinary register.

use crate::isa::NUM_REGISTERS;

/// General-Purpose Register file.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Gpr {
    regs: [u16; NUM_REGISTERS],
}

impl Gpr {
    /// Creates a register file with all registers cleared.
    pub fn new() -> Self {
        Self {
            regs: [0; NUM_REGISTERS],
        }
    }

    /// Reads a register.
    ///
    /// # Arguments
    ///
    /// * `idx` - Register select; only the low three bits are used
    ///
    /// # Returns
    ///
    /// The 16-bit value currently stored.
    pub fn read(&self, idx: u8) -> u16 {
        self.regs[(idx & 0x7) as usize]
    }

    /// Writes a full register.
    ///
    /// # Arguments
    ///
    /// * `idx` - Register select; only the low three bits are used
    /// * `val` - The 16-bit value to write
    pub fn write(&mut self, idx: u8, val: u16) {
        self.regs[(idx & 0x7) as usize] = val;
    }

    /// Writes the bytes of `val` selected by `mask`, keeping the rest.
    ///
    /// The register file has separate write strobes for each byte; a mask
    /// of `0xff00` updates only the high byte.
    pub fn write_masked(&mut self, idx: u8, val: u16, mask: u16) {
        let old = self.read(idx);
        self.write(idx, (old & !mask) | (val & mask));
    }

    /// Returns a copy of all register values.
    pub fn snapshot(&self) -> [u16; NUM_REGISTERS] {
        self.regs
    }

    /// Dumps the contents of all registers to stdout, four per line.
    pub fn dump(&self) {
        for i in (0..NUM_REGISTERS).step_by(4) {
            println!(
                "r{}={:#06x} r{}={:#06x} r{}={:#06x} r{}={:#06x}",
                i,
                self.regs[i],
                i + 1,
                self.regs[i + 1],
                i + 2,
                self.regs[i + 2],
                i + 3,
                self.regs[i + 3]
            );
        }
    }
}
