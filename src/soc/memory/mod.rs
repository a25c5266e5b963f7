//! Data memory implementations.

/// Adapter from host closures to [`crate::soc::DataBus`].
pub mod callback;

/// Plain word-addressed RAM.
pub mod ram;

pub use callback::CallbackBus;
pub use ram::Ram;
