//! Per-tick coordinator of the rig control core.
//!
//! ## Tick order
//! 0. Drain operator commands, evaluate strap supply.
//! 1. Progress signal → restart the timeout deadline, clear the tier.
//! 2. Not running in Auto → hold the deadline. Evaluate the escalator and
//!    apply its decision.
//! 3. Reset pending → drive the reset sequence only (step dispatch skipped).
//! 4. Running → actuate the current step, advance when it completes.
//! 5. Step transition edge consumed once; in Step mode it pauses the rig.
//! 6. Fault lamp and beacon update.
//!
//! All state is owned here and mutated only from [`CycleOrchestrator::tick`]
//! and the explicit operations; collaborators are lent per call.

use std::time::Duration;

use bxt_common::control_unit::command::{JogAction, OperatorCommand};
use bxt_common::control_unit::config::{CoolingTime, RigConfig, TimingConfig};
use bxt_common::control_unit::display::{DisplaySnapshot, InfoField, remaining_secs};
use bxt_common::control_unit::events::{LogEventKind, Logbook};
use bxt_common::control_unit::safety::FaultFlags;
use bxt_common::control_unit::state::{RunMode, RunState};
use bxt_common::control_unit::steps::CycleStep;
use bxt_common::hal::types::{RigIo, TickInputs};
use tracing::{debug, info};

use crate::command::queue::{CommandError, CommandQueue};
use crate::control::strap_cycle::StrapCycle;
use crate::control::{StepActuator, StepContext, StepProgress};
use crate::safety::indicator::FaultIndicator;
use crate::safety::material::{MaterialMonitor, MaterialStatus};
use crate::safety::reset::{ResetAction, ResetSequencer};
use crate::safety::timeout::{TimeoutAction, TimeoutEscalator};
use crate::state::mode::ModeController;
use crate::state::sequencer::{RigSequencer, SequencerError};

/// Collaborators lent to the orchestrator for one call.
pub struct Collaborators<'a> {
    pub io: &'a mut dyn RigIo,
    pub logbook: &'a mut dyn Logbook,
}

impl<'a> Collaborators<'a> {
    pub fn new(io: &'a mut dyn RigIo, logbook: &'a mut dyn Logbook) -> Self {
        Self { io, logbook }
    }

    fn record(&mut self, kind: LogEventKind, now: Duration) {
        let cycles = self.logbook.cycle_count();
        self.logbook.record_event(kind, cycles, now);
    }
}

/// What happened during one tick.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TickReport {
    /// Step that completed and was advanced past.
    pub completed: Option<CycleStep>,
    pub timeout: TimeoutAction,
    pub reset: ResetAction,
    pub material: MaterialStatus,
    /// Rig paused by the step-mode rule this tick.
    pub paused_on_step: bool,
}

pub struct CycleOrchestrator<A: StepActuator = StrapCycle> {
    sequencer: RigSequencer,
    mode: ModeController,
    escalator: TimeoutEscalator,
    reset: ResetSequencer,
    indicator: FaultIndicator,
    material: MaterialMonitor,
    commands: CommandQueue,
    actuator: A,
    timing: TimingConfig,
    cooling: CoolingTime,
    faults: FaultFlags,
    info: InfoField,
    cycle_count: u64,
    /// Time of the last boot or tick.
    now: Duration,
}

impl CycleOrchestrator<StrapCycle> {
    /// Orchestrator for the strapping rig described by `config`.
    pub fn from_config(config: &RigConfig) -> Self {
        Self::new(config, StrapCycle::new(config.strokes.clone()))
    }
}

impl<A: StepActuator> CycleOrchestrator<A> {
    /// Boot state: step 0, Step mode, paused, no faults.
    pub fn new(config: &RigConfig, actuator: A) -> Self {
        let timing = config.timing.clone();
        let cooling = timing.cooling_time();
        Self {
            sequencer: RigSequencer::new(),
            mode: ModeController::new(RunMode::Step),
            escalator: TimeoutEscalator::new(
                timing.timeout_deadline(cooling),
                timing.long_timeout_wait(),
            ),
            reset: ResetSequencer::new(config.strokes.home),
            indicator: FaultIndicator::new(timing.fast_blink(), timing.slow_blink()),
            material: MaterialMonitor::new(),
            commands: CommandQueue::new(),
            actuator,
            timing,
            cooling,
            faults: FaultFlags::empty(),
            info: InfoField::Hidden,
            cycle_count: 0,
            now: Duration::ZERO,
        }
    }

    // ─── Accessors ──────────────────────────────────────────────────

    #[inline]
    pub const fn sequencer(&self) -> &RigSequencer {
        &self.sequencer
    }

    #[inline]
    pub const fn mode(&self) -> &ModeController {
        &self.mode
    }

    #[inline]
    pub const fn escalator(&self) -> &TimeoutEscalator {
        &self.escalator
    }

    #[inline]
    pub const fn reset_sequencer(&self) -> &ResetSequencer {
        &self.reset
    }

    #[inline]
    pub const fn faults(&self) -> FaultFlags {
        self.faults
    }

    #[inline]
    pub const fn info(&self) -> InfoField {
        self.info
    }

    #[inline]
    pub const fn cooling_time(&self) -> CoolingTime {
        self.cooling
    }

    #[inline]
    pub const fn current_step(&self) -> CycleStep {
        self.sequencer.current_step()
    }

    pub fn snapshot(&self) -> DisplaySnapshot {
        DisplaySnapshot {
            step: self.sequencer.current_step(),
            mode: self.mode.mode(),
            run_state: self.mode.run_state(),
            resetting: self.reset.is_resetting(),
            tier: self.escalator.tier(),
            faults: self.faults,
            info: self.info,
            cooling_time_s: self.cooling.secs(),
            remaining_cooldown_s: self
                .escalator
                .remaining_cooldown(self.now)
                .map(remaining_secs),
            cycle_count: self.cycle_count,
        }
    }

    // ─── Operations ─────────────────────────────────────────────────

    /// Power-on bookkeeping: log the start, beacon on, outputs home.
    pub fn boot(&mut self, now: Duration, collab: &mut Collaborators<'_>) {
        self.now = now;
        collab.io.release_all();
        collab.io.set_fault_lamp(false);
        collab.io.set_beacon(true);
        collab.record(LogEventKind::ControllerOn, now);
        self.cycle_count = collab.logbook.cycle_count();
        info!(
            "Rig core booted: step {}, mode {}, cooling {} s",
            self.sequencer.current_step(),
            self.mode.mode().label(),
            self.cooling.secs()
        );
    }

    /// Switch to Auto and start running.
    pub fn start_auto(&mut self) {
        self.mode.set_auto_mode();
        self.mode.set_running(true);
    }

    /// Jump to a step by index, discarding any partially executed step.
    pub fn jump_to(&mut self, index: usize) -> Result<(), SequencerError> {
        self.sequencer.jump_to(index)?;
        self.actuator.abort();
        Ok(())
    }

    /// Queue an operator command for the next tick.
    pub fn submit(&mut self, command: OperatorCommand) -> Result<(), CommandError> {
        self.commands.push(command)
    }

    /// Run one control tick.
    pub fn tick(&mut self, inputs: &TickInputs, collab: &mut Collaborators<'_>) -> TickReport {
        let now = inputs.now;
        self.now = now;

        // 0. Operator commands and strap supply.
        while let Some(command) = self.commands.pop() {
            self.apply_command(command, now, collab);
        }
        let material = self.material.observe(inputs.strap_present);
        self.faults
            .set(FaultFlags::MATERIAL_ABSENT, material.is_absent());
        if material == MaterialStatus::Lost {
            self.stop_rig(collab.io);
            self.info = InfoField::MaterialEmpty;
            collab.record(LogEventKind::MaterialEmpty, now);
        }

        // 1. Progress.
        if inputs.progress_edge {
            self.escalator.observe_progress(now);
        }

        // 2. Timeout.
        if !self.mode.is_autonomous() {
            self.escalator.hold(now);
        }
        let timeout = self.escalator.check(now);
        self.apply_timeout(timeout, now, collab);

        // 3./4. Reset or step dispatch.
        let mut completed = None;
        let reset = if self.reset.is_resetting() {
            self.drive_reset(now, collab)
        } else {
            if self.mode.is_running() {
                completed = self.dispatch_step(inputs, collab);
            }
            ResetAction::Idle
        };

        // 5. Step-mode pause.
        let mut paused_on_step = false;
        if self.sequencer.consume_transition_edge() {
            debug!(
                "Step {} {}",
                self.sequencer.current_index() + 1,
                self.sequencer.current_step()
            );
            if self.mode.is_step_mode() && self.mode.is_running() {
                self.mode.set_running(false);
                paused_on_step = true;
            }
        }

        // 6. Fault outputs.
        self.indicator.update(self.faults, now, collab.io);
        self.cycle_count = collab.logbook.cycle_count();

        TickReport {
            completed,
            timeout,
            reset,
            material,
            paused_on_step,
        }
    }

    // ─── Tick Phases ────────────────────────────────────────────────

    fn apply_command(&mut self, command: OperatorCommand, now: Duration, collab: &mut Collaborators<'_>) {
        debug!("Operator command {command:?}");
        match command {
            OperatorCommand::StepBack => {
                self.sequencer.step_back();
                self.actuator.abort();
            }
            OperatorCommand::StepForward => {
                self.sequencer.advance();
                self.actuator.abort();
            }
            OperatorCommand::RequestReset => {
                self.escalator.cancel(now);
                self.faults.remove(FaultFlags::TIMEOUT_WAIT);
                self.mode.set_step_mode();
                self.reset.request_reset(false);
                self.info = InfoField::Hidden;
            }
            OperatorCommand::ToggleRunning => {
                let state = self.mode.toggle_running();
                if self.mode.mode() == RunMode::Auto {
                    let kind = match state {
                        RunState::Running => LogEventKind::ManualStart,
                        RunState::Paused => LogEventKind::ManualStop,
                    };
                    info!("{kind}");
                    collab.record(kind, now);
                }
            }
            OperatorCommand::ToggleMode => {
                self.mode.toggle_mode();
                info!("Mode {}", self.mode.mode().label());
            }
            OperatorCommand::CoolingTimeUp => self.set_cooling(self.cooling.increased()),
            OperatorCommand::CoolingTimeDown => self.set_cooling(self.cooling.decreased()),
            OperatorCommand::ResetCounter(counter) => {
                info!("Counter {counter:?} reset");
                collab.logbook.reset_counter(counter);
            }
            OperatorCommand::ClearLog => {
                info!("Event log cleared");
                collab.logbook.clear_events();
            }
            OperatorCommand::Jog { cylinder, action } => match action {
                JogAction::Toggle => collab.io.toggle(cylinder),
                JogAction::Press => collab.io.command_state(cylinder, true),
                JogAction::Release => collab.io.command_state(cylinder, false),
            },
        }
    }

    fn apply_timeout(&mut self, action: TimeoutAction, now: Duration, collab: &mut Collaborators<'_>) {
        match action {
            TimeoutAction::None => {}
            TimeoutAction::ResetAndResume => {
                collab.record(LogEventKind::ShortTimeout, now);
                self.reset.request_reset(true);
            }
            TimeoutAction::CooldownStarted { remaining } => {
                collab.record(LogEventKind::LongTimeout, now);
                self.mode.set_running(false);
                self.actuator.abort();
                self.faults.insert(FaultFlags::TIMEOUT_WAIT);
                self.info = InfoField::TimeoutWait {
                    remaining_s: remaining_secs(remaining),
                };
            }
            TimeoutAction::CoolingDown { remaining } => {
                self.info = InfoField::TimeoutWait {
                    remaining_s: remaining_secs(remaining),
                };
            }
            TimeoutAction::CooldownElapsed => {
                self.faults.remove(FaultFlags::TIMEOUT_WAIT);
                self.reset.request_reset(true);
            }
            TimeoutAction::Shutdown => {
                collab.record(LogEventKind::Shutdown, now);
                self.stop_rig(collab.io);
                self.sequencer.reset_to_start();
                self.faults.insert(FaultFlags::TIMEOUT_SHUTDOWN);
                self.info = InfoField::Shutdown;
            }
        }
    }

    fn drive_reset(&mut self, now: Duration, collab: &mut Collaborators<'_>) -> ResetAction {
        self.mode.set_running(false);
        let action = self.reset.drive(now, collab.io);
        match action {
            ResetAction::Quiesced => {
                self.actuator.abort();
                self.faults
                    .remove(FaultFlags::TIMEOUT_WAIT | FaultFlags::TIMEOUT_SHUTDOWN);
                self.info = InfoField::Hidden;
                self.sequencer.reset_to_start();
            }
            ResetAction::Completed { resume } => {
                self.sequencer.reset_to_start();
                self.mode.set_running(resume);
            }
            ResetAction::Idle | ResetAction::Homing => {}
        }
        action
    }

    fn dispatch_step(&mut self, inputs: &TickInputs, collab: &mut Collaborators<'_>) -> Option<CycleStep> {
        let step = self.sequencer.current_step();
        let mut ctx = StepContext {
            now: inputs.now,
            tension_end_reached: inputs.tension_end_reached,
            cooling_time: self.cooling,
            io: &mut *collab.io,
            logbook: &mut *collab.logbook,
        };
        match self.actuator.actuate(step, &mut ctx) {
            StepProgress::InProgress => None,
            StepProgress::Cooling { remaining } => {
                if matches!(self.info, InfoField::Hidden | InfoField::Cooling { .. }) {
                    self.info = InfoField::Cooling {
                        remaining_s: remaining_secs(remaining),
                    };
                }
                None
            }
            StepProgress::Complete => {
                if matches!(self.info, InfoField::Cooling { .. }) {
                    self.info = InfoField::Hidden;
                }
                self.sequencer.advance();
                Some(step)
            }
        }
    }

    /// Home every cylinder and drop to paused Step mode.
    fn stop_rig(&mut self, io: &mut dyn RigIo) {
        io.release_all();
        self.actuator.abort();
        self.mode.set_step_mode();
        self.mode.set_running(false);
    }

    fn set_cooling(&mut self, cooling: CoolingTime) {
        self.cooling = cooling;
        self.escalator
            .set_deadline(self.timing.timeout_deadline(cooling));
        info!("Cooling time {} s", cooling.secs());
    }
}
