//! Memory attached to the core.
//!
//! Data memory is supplied by the host through [`DataBus`]. Program memory
//! is a separate read-only array owned by the CPU.

/// Data memory implementations.
pub mod memory;

/// Data bus interface.
pub mod traits;

pub use memory::{CallbackBus, Ram};
pub use traits::DataBus;
