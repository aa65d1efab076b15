//! Fault lamp and beacon driver.
//!
//! Without faults the blink relay is off and the beacon is lit steadily.
//! With any fault both outputs toggle in antiphase, slowly after a shutdown
//! and fast otherwise.

use std::time::Duration;

use bxt_common::control_unit::safety::FaultFlags;
use bxt_common::hal::types::RigIo;

#[derive(Debug, Clone)]
pub struct FaultIndicator {
    fast: Duration,
    slow: Duration,
    lamp_on: bool,
    last_toggle: Duration,
    blinking: bool,
}

impl FaultIndicator {
    pub const fn new(fast: Duration, slow: Duration) -> Self {
        Self {
            fast,
            slow,
            lamp_on: false,
            last_toggle: Duration::ZERO,
            blinking: false,
        }
    }

    #[inline]
    pub const fn lamp_on(&self) -> bool {
        self.lamp_on
    }

    #[inline]
    pub const fn is_blinking(&self) -> bool {
        self.blinking
    }

    /// Blink half-period for the given faults.
    #[inline]
    pub const fn period(&self, faults: FaultFlags) -> Duration {
        if faults.wants_slow_blink() { self.slow } else { self.fast }
    }

    /// Update outputs for this tick.
    pub fn update(&mut self, faults: FaultFlags, now: Duration, io: &mut dyn RigIo) {
        if faults.is_empty() {
            self.blinking = false;
            self.lamp_on = false;
        } else {
            if !self.blinking {
                self.blinking = true;
                self.last_toggle = now;
            }
            if now.saturating_sub(self.last_toggle) >= self.period(faults) {
                self.lamp_on = !self.lamp_on;
                self.last_toggle = now;
            }
        }
        io.set_fault_lamp(self.lamp_on);
        io.set_beacon(!self.lamp_on);
    }
}
