//! Functional units used by the execute stage.

/// 16-bit arithmetic logic unit.
pub mod alu;
