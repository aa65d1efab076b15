//! Run mode (Auto/Step) and run state (Running/Paused).
//!
//! The pause-on-step-change policy is not enforced here; the orchestrator
//! applies it once per tick.

use bxt_common::control_unit::state::{RunMode, RunState};

#[derive(Debug, Clone)]
pub struct ModeController {
    mode: RunMode,
    run_state: RunState,
}

impl ModeController {
    /// Create a controller in `mode`, paused.
    pub const fn new(mode: RunMode) -> Self {
        Self {
            mode,
            run_state: RunState::Paused,
        }
    }

    #[inline]
    pub const fn mode(&self) -> RunMode {
        self.mode
    }

    #[inline]
    pub const fn run_state(&self) -> RunState {
        self.run_state
    }

    #[inline]
    pub const fn is_running(&self) -> bool {
        self.run_state.is_running()
    }

    #[inline]
    pub const fn is_step_mode(&self) -> bool {
        matches!(self.mode, RunMode::Step)
    }

    /// Running in Auto mode: the only state in which inactivity counts
    /// toward a timeout.
    #[inline]
    pub const fn is_autonomous(&self) -> bool {
        self.run_state.is_running() && matches!(self.mode, RunMode::Auto)
    }

    pub fn set_auto_mode(&mut self) {
        self.mode = RunMode::Auto;
    }

    pub fn set_step_mode(&mut self) {
        self.mode = RunMode::Step;
    }

    pub fn toggle_mode(&mut self) {
        self.mode = self.mode.toggled();
    }

    pub fn set_running(&mut self, running: bool) {
        self.run_state = RunState::from_running(running);
    }

    /// Flip Running/Paused and return the new state.
    pub fn toggle_running(&mut self) -> RunState {
        self.set_running(!self.is_running());
        self.run_state
    }
}
