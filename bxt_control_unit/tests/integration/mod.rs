//! Shared simulated-rig harness.

mod full_cycle;
mod material;
mod reset_sequence;
mod step_mode;
mod timeout_escalation;

use std::time::Duration;

use bxt_common::control_unit::command::OperatorCommand;
use bxt_common::control_unit::events::LogEventKind;
use bxt_common::hal::driver::RigDriver;
use bxt_control_unit::config::load_config_from_str;
use bxt_control_unit::orchestrator::{Collaborators, CycleOrchestrator, TickReport};
use bxt_hal::{MemoryLogbook, SimulationDriver};

/// Cooling 4 s and a 1 s estimate give a 5 s inactivity deadline; the
/// second-tier wait is 10 s.
pub const FAST_TIMING: &str = "\
[timing]
cooling_time_s = 4
cycle_time_estimate_s = 1
long_timeout_wait_s = 10
";

pub const TICK: Duration = Duration::from_millis(10);

pub fn ms(v: u64) -> Duration {
    Duration::from_millis(v)
}

/// Orchestrator wired to a simulation driver and logbook.
pub struct SimRig {
    pub driver: SimulationDriver,
    pub logbook: MemoryLogbook,
    pub orch: CycleOrchestrator,
    pub now: Duration,
}

impl SimRig {
    pub fn new(toml: &str) -> Self {
        let loaded = load_config_from_str(toml).expect("test config must be valid");
        let mut driver = SimulationDriver::new();
        driver.init(&loaded.rig).expect("simulation init");
        let mut logbook = MemoryLogbook::new();
        let mut orch = CycleOrchestrator::from_config(&loaded.rig);
        orch.boot(Duration::ZERO, &mut Collaborators::new(&mut driver, &mut logbook));
        Self {
            driver,
            logbook,
            orch,
            now: Duration::ZERO,
        }
    }

    pub fn tick(&mut self) -> TickReport {
        self.now += TICK;
        let inputs = self.driver.cycle(self.now);
        let mut collab = Collaborators::new(&mut self.driver, &mut self.logbook);
        self.orch.tick(&inputs, &mut collab)
    }

    pub fn run_for(&mut self, duration: Duration) {
        let end = self.now + duration;
        while self.now < end {
            self.tick();
        }
    }

    /// Tick until `done` holds or `limit` elapses; returns the report of
    /// the matching tick.
    pub fn run_until(
        &mut self,
        limit: Duration,
        mut done: impl FnMut(&TickReport, &CycleOrchestrator) -> bool,
    ) -> Option<TickReport> {
        let end = self.now + limit;
        while self.now < end {
            let report = self.tick();
            if done(&report, &self.orch) {
                return Some(report);
            }
        }
        None
    }

    pub fn submit(&mut self, command: OperatorCommand) {
        self.orch.submit(command).expect("command queue has room");
    }

    pub fn log_kinds(&self) -> Vec<LogEventKind> {
        self.logbook.entries().map(|e| e.kind).collect()
    }
}
