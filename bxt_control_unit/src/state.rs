//! Sequencing and operator-mode state.

pub mod mode;
pub mod sequencer;
