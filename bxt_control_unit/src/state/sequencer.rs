//! Step sequencer: position in the fixed, cyclic step order.
//!
//! The index is always in `[0, N)`. Forward motion wraps modulo `N`; the
//! operator's step-back saturates at the first step. Every index change is
//! reported once through [`StepSequencer::consume_transition_edge`].

use bxt_common::control_unit::steps::CycleStep;
use thiserror::Error;

/// Rejected sequencer operation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum SequencerError {
    #[error("step index {index} out of range [0, {len})")]
    StepOutOfRange { index: usize, len: usize },
}

/// Sequencer over a cycle of `N` steps.
#[derive(Debug, Clone)]
pub struct StepSequencer<const N: usize> {
    index: usize,
    /// Index seen by the last `consume_transition_edge` call.
    observed: usize,
}

/// Sequencer over the strapping cycle.
pub type RigSequencer = StepSequencer<{ CycleStep::COUNT }>;

impl<const N: usize> StepSequencer<N> {
    /// Number of steps in the cycle.
    pub const LEN: usize = N;

    /// Create a sequencer at step 0 with no pending transition.
    pub const fn new() -> Self {
        const { assert!(N > 0, "a step cycle needs at least one step") };
        Self {
            index: 0,
            observed: 0,
        }
    }

    #[inline]
    pub const fn current_index(&self) -> usize {
        self.index
    }

    /// Move to the next step, wrapping to 0 after the last one.
    #[inline]
    pub fn advance(&mut self) {
        self.index = (self.index + 1) % N;
    }

    /// Jump directly to `index`.
    ///
    /// # Errors
    /// `StepOutOfRange` if `index >= N`; the position is left unchanged.
    pub fn jump_to(&mut self, index: usize) -> Result<(), SequencerError> {
        if index >= N {
            return Err(SequencerError::StepOutOfRange { index, len: N });
        }
        self.index = index;
        Ok(())
    }

    /// Operator step-back. Stays on step 0.
    #[inline]
    pub fn step_back(&mut self) {
        self.index = self.index.saturating_sub(1);
    }

    /// Rewind to step 0.
    #[inline]
    pub fn reset_to_start(&mut self) {
        self.index = 0;
    }

    /// `true` exactly once after each change of the index.
    ///
    /// Changes that return to the previously observed index before the call
    /// are not reported.
    pub fn consume_transition_edge(&mut self) -> bool {
        let changed = self.index != self.observed;
        self.observed = self.index;
        changed
    }
}

impl<const N: usize> Default for StepSequencer<N> {
    fn default() -> Self {
        Self::new()
    }
}

impl RigSequencer {
    /// Current step of the strapping cycle.
    #[inline]
    pub const fn current_step(&self) -> CycleStep {
        CycleStep::ALL[self.index]
    }
}
