//! Instruction decoder microcode.
//!
//! The decoder is a 512-row lookup table indexed by the reset line, the
//! three status flags and the opcode. [`ControlWordTableBuilder`] produces
//! the table from a declarative description of every opcode, and the decode
//! stage owns the result as an immutable [`DecodeTable`].

/// Declarative per-opcode control signals and table generation.
pub mod builder;

/// The generated table and its addressing scheme.
pub mod table;

pub use builder::ControlWordTableBuilder;
pub use table::{DecodeTable, TableEntry};
