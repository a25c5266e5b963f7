//! Pipeline Latch Interface.

/// Represents a pipeline latch (inter-stage buffer).
///
/// Latches hold the state of one instruction as it moves between stages.
/// They must support flushing on reset and taken jumps.
pub trait PipelineLatch {
    /// Replaces the contents with a bubble.
    fn flush(&mut self);

    /// Checks if the latch holds a bubble.
    ///
    /// # Returns
    ///
    /// `true` if the latch carries nothing that will change machine state.
    fn is_bubble(&self) -> bool;
}
