//! Data Memory Interface.
//!
//! The pipeline reaches data memory only through this trait, and only from
//! the memory stage. Hosts plug in RAM, memory-mapped peripherals or test
//! doubles.

/// Word-addressed data memory seen by the memory stage.
pub trait DataBus {
    /// Reads the word at `addr`.
    fn load(&mut self, addr: u16) -> u16;

    /// Writes `value` to `addr`.
    fn store(&mut self, value: u16, addr: u16);
}
