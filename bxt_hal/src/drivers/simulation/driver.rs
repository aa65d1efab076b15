//! Simulation driver implementation.
//!
//! The `SimulationDriver` implements `RigDriver` and `RigIo` on top of timed
//! cylinders, a plant model and debounced inputs, so the control core can run
//! without physical hardware.

use super::cylinder::CylinderBank;
use super::io::DebouncedInput;
use super::plant::RigPlant;
use bxt_common::control_unit::config::RigConfig;
use bxt_common::hal::driver::{DriverDiagnostics, HalError, RigDriver};
use bxt_common::hal::types::{CylinderId, RigIo, TickInputs};
use std::time::Duration;
use tracing::{debug, info, trace};

/// Plant plus input filtering, built on `init()`.
#[derive(Debug)]
struct SensorModel {
    plant: RigPlant,
    end_switch: DebouncedInput,
    strap_sensor: DebouncedInput,
}

/// Simulation driver implementing `RigDriver`.
pub struct SimulationDriver {
    name: &'static str,
    version: &'static str,
    bank: CylinderBank,
    sensors: Option<SensorModel>,
    fault_lamp: bool,
    beacon: bool,
    cycle_count: u64,
}

impl SimulationDriver {
    /// Create a new simulation driver instance.
    pub fn new() -> Self {
        Self {
            name: "simulation",
            version: env!("CARGO_PKG_VERSION"),
            bank: CylinderBank::default(),
            sensors: None,
            fault_lamp: false,
            beacon: false,
            cycle_count: 0,
        }
    }

    #[inline]
    pub const fn fault_lamp(&self) -> bool {
        self.fault_lamp
    }

    #[inline]
    pub const fn beacon(&self) -> bool {
        self.beacon
    }

    /// Cuts left on the simulated coil; `None` for endless or before `init()`.
    pub fn strap_supply(&self) -> Option<u32> {
        self.sensors.as_ref().and_then(|s| s.plant.supply())
    }

    /// Load a new simulated strap coil.
    pub fn refill_strap(&mut self, cycles: u32) {
        if let Some(sensors) = self.sensors.as_mut() {
            sensors.plant.refill(cycles);
        }
    }
}

impl Default for SimulationDriver {
    fn default() -> Self {
        Self::new()
    }
}

impl RigDriver for SimulationDriver {
    fn name(&self) -> &'static str {
        self.name
    }

    fn version(&self) -> &'static str {
        self.version
    }

    fn init(&mut self, config: &RigConfig) -> Result<(), HalError> {
        let sim = &config.simulation;
        if sim.tension_travel_ms == 0 {
            return Err(HalError::InitFailed(
                "simulation.tension_travel_ms must be > 0".to_string(),
            ));
        }

        info!(
            "Initializing simulation driver: tension travel {} ms, strap supply {}",
            sim.tension_travel_ms,
            match sim.strap_supply_cycles {
                0 => "endless".to_string(),
                n => format!("{n} cycles"),
            }
        );

        self.bank = CylinderBank::default();
        self.sensors = Some(SensorModel {
            plant: RigPlant::new(sim),
            end_switch: DebouncedInput::new(Duration::from_millis(sim.end_switch_debounce_ms), false),
            strap_sensor: DebouncedInput::new(
                Duration::from_millis(sim.strap_sensor_debounce_ms),
                true,
            ),
        });
        self.cycle_count = 0;
        Ok(())
    }

    fn cycle(&mut self, now: Duration) -> TickInputs {
        self.cycle_count += 1;
        self.bank.settle(now);

        let Some(sensors) = self.sensors.as_mut() else {
            return TickInputs::idle(now);
        };

        let raw = sensors.plant.update(
            self.bank.get(CylinderId::TensionButton).is_extended(),
            self.bank.get(CylinderId::Knife).is_extended(),
            now,
        );
        sensors.end_switch.update(raw.end_switch, now);
        sensors.strap_sensor.update(raw.strap_present, now);

        if sensors.end_switch.switched_high() {
            trace!("End switch closed at {now:?}");
        }

        TickInputs {
            now,
            progress_edge: sensors.end_switch.switched_high(),
            tension_end_reached: sensors.end_switch.is_high(),
            strap_present: sensors.strap_sensor.is_high(),
        }
    }

    fn io(&mut self) -> &mut dyn RigIo {
        self
    }

    fn shutdown(&mut self) -> Result<(), HalError> {
        self.bank.release_all();
        self.fault_lamp = false;
        self.beacon = false;
        info!(
            "Simulation driver shutdown after {} cycles, {} strokes",
            self.cycle_count,
            self.bank.strokes_completed()
        );
        Ok(())
    }

    fn diagnostics(&self) -> Option<DriverDiagnostics> {
        Some(DriverDiagnostics {
            cycle_count: self.cycle_count,
            strokes_completed: self.bank.strokes_completed(),
            custom: self
                .strap_supply()
                .map(|left| format!("strap supply: {left} cycles")),
        })
    }
}

impl RigIo for SimulationDriver {
    fn command_stroke(&mut self, cylinder: CylinderId, extend: Duration, retract: Duration, now: Duration) {
        self.bank.stroke(cylinder, extend, retract, now);
    }

    fn command_state(&mut self, cylinder: CylinderId, extended: bool) {
        self.bank.set(cylinder, extended);
    }

    fn toggle(&mut self, cylinder: CylinderId) {
        self.bank.toggle(cylinder);
        debug!(
            "Jog {} -> {}",
            cylinder.label(),
            self.bank.get(cylinder).is_extended()
        );
    }

    fn is_stroke_complete(&self, cylinder: CylinderId) -> bool {
        self.bank.get(cylinder).is_stroke_complete()
    }

    fn is_extended(&self, cylinder: CylinderId) -> bool {
        self.bank.get(cylinder).is_extended()
    }

    fn release_all(&mut self) {
        self.bank.release_all();
    }

    fn set_fault_lamp(&mut self, on: bool) {
        self.fault_lamp = on;
    }

    fn set_beacon(&mut self, on: bool) {
        self.beacon = on;
    }
}
