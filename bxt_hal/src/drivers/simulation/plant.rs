//! Rig plant model: what the sensors see given the cylinder outputs.
//!
//! - Right end switch: closes once the tension button has been held
//!   continuously for the tension travel time; opens when it is released.
//! - Strap sensor: reads present while strap supply is left. Each knife
//!   cut consumes one cycle of supply.

use std::time::Duration;

use bxt_common::control_unit::config::SimulationConfig;
use tracing::{debug, warn};

/// Raw (undebounced) sensor levels.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RawInputs {
    pub end_switch: bool,
    pub strap_present: bool,
}

#[derive(Debug, Clone)]
pub struct RigPlant {
    tension_travel: Duration,
    tension_since: Option<Duration>,
    /// `None` means endless supply.
    supply: Option<u32>,
    knife_was_extended: bool,
}

impl RigPlant {
    pub fn new(config: &SimulationConfig) -> Self {
        Self {
            tension_travel: Duration::from_millis(config.tension_travel_ms),
            tension_since: None,
            supply: (config.strap_supply_cycles > 0).then_some(config.strap_supply_cycles),
            knife_was_extended: false,
        }
    }

    /// Cuts left, `None` for endless supply.
    #[inline]
    pub const fn supply(&self) -> Option<u32> {
        self.supply
    }

    /// Load a new strap coil.
    pub fn refill(&mut self, cycles: u32) {
        self.supply = (cycles > 0).then_some(cycles);
        debug!("Strap refilled: {cycles} cycles");
    }

    /// Advance the plant to `now` given the current cylinder outputs.
    pub fn update(&mut self, tension_extended: bool, knife_extended: bool, now: Duration) -> RawInputs {
        if tension_extended {
            self.tension_since.get_or_insert(now);
        } else {
            self.tension_since = None;
        }
        let end_switch = self
            .tension_since
            .is_some_and(|since| now.saturating_sub(since) >= self.tension_travel);

        if knife_extended && !self.knife_was_extended {
            if let Some(left) = self.supply.as_mut() {
                *left = left.saturating_sub(1);
                if *left == 0 {
                    warn!("Simulated strap coil empty");
                }
            }
        }
        self.knife_was_extended = knife_extended;

        RawInputs {
            end_switch,
            strap_present: self.supply != Some(0),
        }
    }
}
