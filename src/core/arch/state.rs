//! Sequencer run states.

/// Run state of the pipeline sequencer.
///
/// The machine powers up in `Resetting`, drains for a fixed number of
/// cycles, then runs until a halt instruction retires. `Halted` is terminal
/// until the next reset.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum RunState {
    /// Reset is asserted. Carries the number of cycles left to drain.
    Resetting(u32),
    /// Executing instructions.
    Running,
    /// A halt instruction reached write-back.
    Halted,
}

impl RunState {
    /// Returns true while reset is asserted.
    pub fn is_resetting(self) -> bool {
        matches!(self, RunState::Resetting(_))
    }

    /// Returns true once the machine has halted.
    pub fn is_halted(self) -> bool {
        self == RunState::Halted
    }
}
