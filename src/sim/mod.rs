//! Simulation harness support.

/// Program image loaders.
pub mod loader;
