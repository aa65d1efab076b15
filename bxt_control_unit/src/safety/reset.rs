//! Physical reset sequence.
//!
//! 1. `Quiesce` - every cylinder released, rewind to step 0.
//! 2. `HomeStroke` - stroke the rocker lever until it reports completion.
//! 3. `Finalize` - back to normal, restore the requested run state.
//!
//! The sequencer only commands cylinders; the orchestrator applies the
//! returned [`ResetAction`] to the state it owns (step index, run state,
//! faults, info field).

use std::time::Duration;

use bxt_common::control_unit::config::StrokeTiming;
use bxt_common::control_unit::state::{ResetStage, ResetState};
use bxt_common::hal::types::{CylinderId, RigIo};
use tracing::{debug, info};

/// Cylinder whose stroke defines the home position.
pub const HOME_CYLINDER: CylinderId = CylinderId::RockerLever;

/// Result of one [`ResetSequencer::drive`] call.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResetAction {
    /// Not resetting.
    Idle,
    /// Cylinders released this tick: clear faults, rewind to step 0.
    Quiesced,
    /// Home stroke running.
    Homing,
    /// Reset done: rewind to step 0 and apply `resume` as run state.
    Completed { resume: bool },
}

#[derive(Debug, Clone)]
pub struct ResetSequencer {
    state: ResetState,
    stage: ResetStage,
    run_after_reset: bool,
    home_stroke: StrokeTiming,
}

impl ResetSequencer {
    pub const fn new(home_stroke: StrokeTiming) -> Self {
        Self {
            state: ResetState::Normal,
            stage: ResetStage::Quiesce,
            run_after_reset: false,
            home_stroke,
        }
    }

    #[inline]
    pub const fn state(&self) -> ResetState {
        self.state
    }

    #[inline]
    pub const fn stage(&self) -> ResetStage {
        self.stage
    }

    #[inline]
    pub const fn is_resetting(&self) -> bool {
        matches!(self.state, ResetState::Resetting)
    }

    #[inline]
    pub const fn run_after_reset(&self) -> bool {
        self.run_after_reset
    }

    /// Request a reset.
    ///
    /// While a reset is already running the stage is kept and only the
    /// resume flag is updated; the latest request wins.
    pub fn request_reset(&mut self, run_after_reset: bool) {
        self.run_after_reset = run_after_reset;
        if self.is_resetting() {
            debug!("Reset already running (stage {:?}), resume={run_after_reset}", self.stage);
            return;
        }
        info!("Reset requested, resume={run_after_reset}");
        self.state = ResetState::Resetting;
        self.stage = ResetStage::Quiesce;
    }

    /// Drive one tick of the sequence.
    pub fn drive(&mut self, now: Duration, io: &mut dyn RigIo) -> ResetAction {
        if !self.is_resetting() {
            return ResetAction::Idle;
        }

        match self.stage {
            ResetStage::Quiesce => {
                io.release_all();
                self.command_home_stroke(now, io);
                self.stage = ResetStage::HomeStroke;
                debug!("Reset: cylinders released, homing");
                ResetAction::Quiesced
            }
            ResetStage::HomeStroke => {
                self.command_home_stroke(now, io);
                if io.is_stroke_complete(HOME_CYLINDER) {
                    self.stage = ResetStage::Finalize;
                    self.finalize()
                } else {
                    ResetAction::Homing
                }
            }
            ResetStage::Finalize => self.finalize(),
        }
    }

    fn command_home_stroke(&self, now: Duration, io: &mut dyn RigIo) {
        io.command_stroke(
            HOME_CYLINDER,
            self.home_stroke.extend(),
            self.home_stroke.retract(),
            now,
        );
    }

    fn finalize(&mut self) -> ResetAction {
        self.state = ResetState::Normal;
        self.stage = ResetStage::Quiesce;
        info!("Reset complete, resume={}", self.run_after_reset);
        ResetAction::Completed {
            resume: self.run_after_reset,
        }
    }
}
