//! Paced control loop: sample → tick → actuate.
//!
//! `CycleRunner` owns the driver, the logbook and the orchestrator. Each
//! tick it asks the driver for a debounced input sample, runs one
//! orchestrator tick against the driver's actuators and the logbook, and
//! traces display changes.
//!
//! [`CycleRunner::step`] runs one tick at a caller-supplied time and is what
//! tests and benches drive. [`CycleRunner::run`] paces ticks on the wall
//! clock with `std::thread::sleep` until the `running` flag drops.

use std::sync::atomic::{AtomicBool, Ordering};
use std::time::{Duration, Instant};

use bxt_common::control_unit::command::OperatorCommand;
use bxt_common::control_unit::display::DisplaySnapshot;
use bxt_common::control_unit::events::Logbook;
use bxt_common::hal::driver::{HalError, RigDriver};
use thiserror::Error;
use tracing::{debug, info, warn};

use crate::command::queue::CommandError;
use crate::config::LoadedConfig;
use crate::orchestrator::{Collaborators, CycleOrchestrator, TickReport};

// ─── Cycle Statistics ───────────────────────────────────────────────

/// O(1) per-tick timing statistics.
#[derive(Debug, Clone)]
pub struct CycleStats {
    /// Total ticks executed.
    pub cycle_count: u64,
    /// Last tick duration [ns].
    pub last_cycle_ns: u64,
    /// Minimum tick duration [ns].
    pub min_cycle_ns: u64,
    /// Maximum tick duration [ns].
    pub max_cycle_ns: u64,
    /// Running sum for average computation.
    pub sum_cycle_ns: u128,
    /// Ticks that took longer than the tick period.
    pub overruns: u64,
}

impl CycleStats {
    /// Create a new zeroed stats instance.
    pub const fn new() -> Self {
        Self {
            cycle_count: 0,
            last_cycle_ns: 0,
            min_cycle_ns: u64::MAX,
            max_cycle_ns: 0,
            sum_cycle_ns: 0,
            overruns: 0,
        }
    }

    /// Record a tick duration.
    #[inline]
    pub fn record(&mut self, duration_ns: u64) {
        self.cycle_count += 1;
        self.last_cycle_ns = duration_ns;
        self.min_cycle_ns = self.min_cycle_ns.min(duration_ns);
        self.max_cycle_ns = self.max_cycle_ns.max(duration_ns);
        self.sum_cycle_ns += u128::from(duration_ns);
    }

    /// Average tick time [ns] (returns 0 if no ticks).
    #[inline]
    pub fn avg_cycle_ns(&self) -> u64 {
        if self.cycle_count == 0 {
            0
        } else {
            (self.sum_cycle_ns / u128::from(self.cycle_count)) as u64
        }
    }
}

impl Default for CycleStats {
    fn default() -> Self {
        Self::new()
    }
}

// ─── Errors ─────────────────────────────────────────────────────────

/// Errors raised while starting, feeding or stopping the control loop.
#[derive(Debug, Error)]
pub enum CycleError {
    /// Driver init or shutdown failed.
    #[error("driver error: {0}")]
    Hal(#[from] HalError),

    /// Operator command rejected.
    #[error("command error: {0}")]
    Command(#[from] CommandError),
}

// ─── Runner ─────────────────────────────────────────────────────────

pub struct CycleRunner<L: Logbook> {
    driver: Box<dyn RigDriver>,
    orchestrator: CycleOrchestrator,
    logbook: L,
    tick_period: Duration,
    stats: CycleStats,
    last_snapshot: Option<DisplaySnapshot>,
    last_now: Duration,
}

impl<L: Logbook> CycleRunner<L> {
    /// Initialize the driver and boot the control core at time zero.
    pub fn new(loaded: &LoadedConfig, mut driver: Box<dyn RigDriver>, mut logbook: L) -> Result<Self, CycleError> {
        driver.init(&loaded.rig)?;
        info!("Driver '{}' v{} initialized", driver.name(), driver.version());

        let mut orchestrator = CycleOrchestrator::from_config(&loaded.rig);
        {
            let mut collab = Collaborators::new(driver.io(), &mut logbook);
            orchestrator.boot(Duration::ZERO, &mut collab);
        }

        Ok(Self {
            driver,
            orchestrator,
            logbook,
            tick_period: loaded.rig.timing.tick_period(),
            stats: CycleStats::new(),
            last_snapshot: None,
            last_now: Duration::ZERO,
        })
    }

    #[inline]
    pub const fn orchestrator(&self) -> &CycleOrchestrator {
        &self.orchestrator
    }

    pub fn orchestrator_mut(&mut self) -> &mut CycleOrchestrator {
        &mut self.orchestrator
    }

    #[inline]
    pub const fn logbook(&self) -> &L {
        &self.logbook
    }

    pub fn driver(&self) -> &dyn RigDriver {
        self.driver.as_ref()
    }

    #[inline]
    pub const fn stats(&self) -> &CycleStats {
        &self.stats
    }

    #[inline]
    pub const fn tick_period(&self) -> Duration {
        self.tick_period
    }

    /// Time of the last tick.
    #[inline]
    pub const fn now(&self) -> Duration {
        self.last_now
    }

    /// Switch to Auto and start running.
    pub fn start_auto(&mut self) {
        info!("Auto start");
        self.orchestrator.start_auto();
    }

    /// Queue an operator command for the next tick.
    pub fn submit(&mut self, command: OperatorCommand) -> Result<(), CycleError> {
        self.orchestrator.submit(command)?;
        Ok(())
    }

    /// Run one tick at `now` (monotonic time since boot).
    pub fn step(&mut self, now: Duration) -> TickReport {
        self.last_now = now;
        let inputs = self.driver.cycle(now);
        let report = {
            let mut collab = Collaborators::new(self.driver.io(), &mut self.logbook);
            self.orchestrator.tick(&inputs, &mut collab)
        };

        let snapshot = self.orchestrator.snapshot();
        if self.last_snapshot != Some(snapshot) {
            debug!(
                "[{:>2}] {:<20} {} {:?} tier {} {}",
                snapshot.step_number(),
                snapshot.step_name(),
                snapshot.mode.label(),
                snapshot.run_state,
                snapshot.tier.level(),
                snapshot.info.text()
            );
            self.last_snapshot = Some(snapshot);
        }
        report
    }

    /// Run `count` ticks of one tick period each on a virtual clock.
    pub fn advance(&mut self, count: u64) {
        for _ in 0..count {
            let now = self.last_now + self.tick_period;
            self.step(now);
        }
    }

    /// Paced loop until `running` drops or `max_ticks` ticks have run.
    pub fn run(&mut self, running: &AtomicBool, max_ticks: Option<u64>) {
        let start = Instant::now();
        let mut ticks = 0u64;

        while running.load(Ordering::SeqCst) {
            if max_ticks.is_some_and(|max| ticks >= max) {
                info!("Tick limit {ticks} reached");
                break;
            }

            let tick_start = Instant::now();
            self.step(start.elapsed());
            ticks += 1;

            let elapsed = tick_start.elapsed();
            self.stats.record(elapsed.as_nanos() as u64);
            if elapsed > self.tick_period {
                self.stats.overruns += 1;
                warn!("Tick overrun: {elapsed:?} > {:?}", self.tick_period);
            }

            if let Some(remaining) = self.tick_period.checked_sub(elapsed) {
                std::thread::sleep(remaining);
            }
        }

        info!(
            "Loop stopped after {} ticks: avg {} ns, max {} ns, {} overruns",
            self.stats.cycle_count,
            self.stats.avg_cycle_ns(),
            self.stats.max_cycle_ns,
            self.stats.overruns
        );
    }

    /// Release all outputs and shut the driver down.
    pub fn shutdown(&mut self) -> Result<(), CycleError> {
        self.driver.io().release_all();
        if let Some(diag) = self.driver.diagnostics() {
            info!(
                "Driver diagnostics: {} cycles, {} strokes{}",
                diag.cycle_count,
                diag.strokes_completed,
                diag.custom.map(|c| format!(", {c}")).unwrap_or_default()
            );
        }
        info!("Completed cycles: {}", self.logbook.cycle_count());
        self.driver.shutdown()?;
        Ok(())
    }
}
