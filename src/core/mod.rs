//! CPU core implementation.
//!
//! Architectural state, the decode table, the pipeline latches and stages,
//! and the sequencer that ties them together.

/// Register file, flags and run state.
pub mod arch;

/// Decode table generation and lookup.
pub mod control;

/// The pipeline sequencer.
pub mod cpu;

/// Control words, latches and hazard detection.
pub mod pipeline;

/// The five pipeline stages.
pub mod stages;

/// Functional units.
pub mod units;

pub use cpu::Cpu;
