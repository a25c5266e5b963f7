//! Memory Access Types.
//!
//! Classifies the accesses the pipeline makes to its two memories. The
//! statistics collector and trace output use this to attribute traffic.

use std::fmt;

/// Type of memory access operation.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum AccessType {
    /// Instruction fetch from program memory.
    Fetch,

    /// Data load issued by the memory stage.
    Read,

    /// Data store issued by the memory stage.
    Write,
}

impl fmt::Display for AccessType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            AccessType::Fetch => "fetch",
            AccessType::Read => "load",
            AccessType::Write => "store",
        };
        f.pad(name)
    }
}
