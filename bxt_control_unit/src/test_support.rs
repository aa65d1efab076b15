//! In-crate fakes for unit tests.

use std::time::Duration;

use bxt_common::control_unit::events::{CounterKind, LogEventKind, Logbook};
use bxt_common::hal::types::{CylinderId, RigIo};

#[derive(Debug, Clone, Copy, Default)]
struct FakeCylinder {
    extended: bool,
    /// `(started, extend, retract)` of the running stroke.
    stroke: Option<(Duration, Duration, Duration)>,
    complete: bool,
}

/// Actuator fake with timed-stroke semantics and output recording.
#[derive(Debug, Default)]
pub struct RecordingIo {
    cylinders: [FakeCylinder; CylinderId::COUNT],
    pub releases: usize,
    pub fault_lamp: bool,
    pub beacon: bool,
    pub toggles: Vec<CylinderId>,
}

impl RecordingIo {
    pub fn set_extended(&mut self, cylinder: CylinderId, extended: bool) {
        self.command_state(cylinder, extended);
    }
}

impl RigIo for RecordingIo {
    fn command_stroke(&mut self, cylinder: CylinderId, extend: Duration, retract: Duration, now: Duration) {
        let c = &mut self.cylinders[cylinder.index()];
        if c.stroke.is_none() {
            c.stroke = Some((now, extend, retract));
            c.complete = false;
            c.extended = true;
        }
        if let Some((started, extend, retract)) = c.stroke {
            let elapsed = now.saturating_sub(started);
            if elapsed >= extend {
                c.extended = false;
            }
            if elapsed >= extend + retract {
                c.stroke = None;
                c.complete = true;
            }
        }
    }

    fn command_state(&mut self, cylinder: CylinderId, extended: bool) {
        let c = &mut self.cylinders[cylinder.index()];
        c.stroke = None;
        c.extended = extended;
    }

    fn toggle(&mut self, cylinder: CylinderId) {
        self.toggles.push(cylinder);
        let extended = self.cylinders[cylinder.index()].extended;
        self.command_state(cylinder, !extended);
    }

    fn is_stroke_complete(&self, cylinder: CylinderId) -> bool {
        self.cylinders[cylinder.index()].complete
    }

    fn is_extended(&self, cylinder: CylinderId) -> bool {
        self.cylinders[cylinder.index()].extended
    }

    fn release_all(&mut self) {
        self.releases += 1;
        for cylinder in CylinderId::ALL {
            self.command_state(cylinder, false);
        }
    }

    fn set_fault_lamp(&mut self, on: bool) {
        self.fault_lamp = on;
    }

    fn set_beacon(&mut self, on: bool) {
        self.beacon = on;
    }
}

/// Logbook fake keeping every event in order.
#[derive(Debug, Default)]
pub struct RecordingLogbook {
    pub events: Vec<(LogEventKind, u64, Duration)>,
    pub cycles: u64,
    pub session: u64,
}

impl RecordingLogbook {
    pub fn kinds(&self) -> Vec<LogEventKind> {
        self.events.iter().map(|(kind, _, _)| *kind).collect()
    }
}

impl Logbook for RecordingLogbook {
    fn record_event(&mut self, kind: LogEventKind, cycle_count: u64, timestamp: Duration) {
        self.events.push((kind, cycle_count, timestamp));
    }

    fn cycle_count(&self) -> u64 {
        self.cycles
    }

    fn count_cycle(&mut self) {
        self.cycles += 1;
        self.session += 1;
    }

    fn reset_counter(&mut self, counter: CounterKind) {
        match counter {
            CounterKind::Session => self.session = 0,
            CounterKind::Lifetime => self.cycles = 0,
        }
    }

    fn clear_events(&mut self) {
        self.events.clear();
    }
}
