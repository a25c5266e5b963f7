//! Instruction pipeline plumbing.
//!
//! This module contains the control word carried by every instruction, the
//! latches between the five stages, and the hazard checks that decide when
//! decode must insert a bubble.

/// Read-after-write and flags hazard detection.
pub mod hazards;

/// Inter-stage pipeline latches (IF/ID, ID/EX, EX/MEM, MEM/WB).
pub mod latches;

/// Control word fields generated by the decode table.
pub mod signals;

/// Traits for pipeline latches.
pub mod traits;
