//! The five pipeline stages.
//!
//! Each stage is a function of the latches captured at the start of a clock
//! edge. The sequencer in [`crate::core::cpu`] calls them in reverse order
//! (write-back first) and commits their outputs together.

/// Instruction decode, register read and hazard checks.
pub mod decode;

/// ALU evaluation and jump resolution.
pub mod execute;

/// Program counter update and instruction fetch.
pub mod fetch;

/// Data memory access.
pub mod memory_access;

/// Register file write-back.
pub mod write_back;
