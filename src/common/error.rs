//! Error types.
//!
//! Stepping the pipeline is total and never fails. Errors only arise at the
//! edges of the simulator: reading program images and configuration files,
//! encoding instructions, and bounding a run.

use std::io;
use std::path::PathBuf;

use thiserror::Error;

/// Errors raised while encoding an instruction word.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum EncodeError {
    /// Register select outside `r0..=r7`.
    #[error("register r{0} does not exist")]
    RegisterOutOfRange(u8),

    /// Immediate does not fit its field.
    #[error("immediate {value} outside [{min}, {max}]")]
    ImmediateOutOfRange {
        /// Requested value.
        value: i32,
        /// Smallest encodable value.
        min: i32,
        /// Largest encodable value.
        max: i32,
    },
}

/// Errors raised by the simulator harness.
#[derive(Debug, Error)]
pub enum SimError {
    /// A file could not be read.
    #[error("could not read '{}': {source}", path.display())]
    Io {
        /// File being read.
        path: PathBuf,
        /// Underlying I/O error.
        #[source]
        source: io::Error,
    },

    /// The configuration file is not valid TOML for [`crate::config::Config`].
    #[error("invalid configuration: {0}")]
    ConfigParse(#[from] toml::de::Error),

    /// The configuration parsed but holds unusable values.
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),

    /// The program image is malformed.
    #[error("invalid program image at line {line}: {reason}")]
    ProgramFormat {
        /// One-based line number, or 0 for binary images.
        line: usize,
        /// What was wrong.
        reason: String,
    },

    /// The program does not fit the 16-bit instruction address space.
    #[error("program has {0} words, more than the 65536 addressable")]
    ProgramTooLarge(usize),

    /// A table export could not be serialized.
    #[error("export failed: {0}")]
    Export(#[from] serde_json::Error),

    /// The machine did not halt within the cycle budget.
    #[error("machine did not halt within {0} cycles")]
    CycleLimit(u64),
}
