//! Common types shared across the simulator.
//!
//! This module provides the memory access classification and the error
//! types used by the loader, configuration and instruction encoders.

/// Memory access type definitions.
pub mod data;

/// Error types.
pub mod error;

pub use data::AccessType;
pub use error::{EncodeError, SimError};
