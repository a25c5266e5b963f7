//! Architectural state of the machine.
//!
//! The register file, status flags and run state owned by the sequencer.

/// Carry, zero and overflow flags.
pub mod flags;

/// General-Purpose Register file implementation.
pub mod gpr;

/// Reset, running and halted states.
pub mod state;
