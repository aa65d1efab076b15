//! Step actuation.
//!
//! The orchestrator never touches cylinders for a step itself: it hands the
//! current step to a [`StepActuator`] every tick while running and advances
//! the sequencer when the actuator reports [`StepProgress::Complete`].

pub mod strap_cycle;

use std::time::Duration;

use bxt_common::control_unit::config::CoolingTime;
use bxt_common::control_unit::events::Logbook;
use bxt_common::control_unit::steps::CycleStep;
use bxt_common::hal::types::RigIo;

/// Collaborators and per-tick facts available to a step handler.
pub struct StepContext<'a> {
    pub now: Duration,
    /// Right end switch closed.
    pub tension_end_reached: bool,
    /// Current weld cool-down.
    pub cooling_time: CoolingTime,
    pub io: &'a mut dyn RigIo,
    pub logbook: &'a mut dyn Logbook,
}

/// Outcome of one actuation tick.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StepProgress {
    InProgress,
    /// Weld cool-down running.
    Cooling { remaining: Duration },
    /// Step finished; advance to the next one.
    Complete,
}

/// Per-step actuation logic.
pub trait StepActuator {
    /// Run `step` for one tick.
    fn actuate(&mut self, step: CycleStep, ctx: &mut StepContext<'_>) -> StepProgress;

    /// Forget any partially executed step (reset, stop, manual step change).
    fn abort(&mut self);
}
