//! Closure-backed data bus.

use std::fmt;

use crate::soc::traits::DataBus;

/// A [`DataBus`] that forwards every access to host closures.
///
/// Lets a host model memory-mapped devices, or a test observe exactly when
/// the pipeline touches memory.
pub struct CallbackBus<L, S>
where
    L: FnMut(u16) -> u16,
    S: FnMut(u16, u16),
{
    load: L,
    store: S,
}

impl<L, S> CallbackBus<L, S>
where
    L: FnMut(u16) -> u16,
    S: FnMut(u16, u16),
{
    /// Creates a bus from a load closure `addr -> word` and a store closure
    /// `(word, addr)`.
    pub fn new(load: L, store: S) -> Self {
        Self { load, store }
    }
}

impl<L, S> DataBus for CallbackBus<L, S>
where
    L: FnMut(u16) -> u16,
    S: FnMut(u16, u16),
{
    fn load(&mut self, addr: u16) -> u16 {
        (self.load)(addr)
    }

    fn store(&mut self, value: u16, addr: u16) {
        (self.store)(value, addr)
    }
}

impl<L, S> fmt::Debug for CallbackBus<L, S>
where
    L: FnMut(u16) -> u16,
    S: FnMut(u16, u16),
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("CallbackBus")
    }
}
