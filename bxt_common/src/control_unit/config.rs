//! Configuration structures for the rig control core.
//!
//! All config types use `serde::Deserialize` for TOML loading and every field
//! has a default, so an empty document yields the factory setup of the rig.
//! Numeric parameters have const `MIN`/`MAX` bounds checked by `validate()`.

use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::config::SharedConfig;

// ─── Bounds & Defaults ──────────────────────────────────────────────

/// Default control tick period [ms].
pub const TICK_PERIOD_MS_DEFAULT: u64 = 10;
pub const TICK_PERIOD_MS_MIN: u64 = 1;
pub const TICK_PERIOD_MS_MAX: u64 = 100;

/// Estimated duration of one cycle excluding the weld cool-down [s].
pub const CYCLE_TIME_ESTIMATE_S_DEFAULT: u32 = 30;
pub const CYCLE_TIME_ESTIMATE_S_MIN: u32 = 1;
pub const CYCLE_TIME_ESTIMATE_S_MAX: u32 = 3600;

/// Weld cool-down default [s].
pub const COOLING_TIME_S_DEFAULT: u32 = 10;
pub const COOLING_TIME_S_MIN: u32 = 4;
pub const COOLING_TIME_S_MAX: u32 = 120;

/// Mandatory wait after the second consecutive timeout [s].
pub const LONG_TIMEOUT_WAIT_S_DEFAULT: u32 = 3 * 60;

/// Fault lamp half-period while waiting out a timeout [ms].
pub const FAST_BLINK_MS_DEFAULT: u64 = 600;
/// Fault lamp half-period after a shutdown [ms].
pub const SLOW_BLINK_MS_DEFAULT: u64 = 2000;

// ─── Top-Level Config ───────────────────────────────────────────────

/// Complete rig configuration, one TOML document.
///
/// # TOML Example
///
/// ```toml
/// [shared]
/// service_name = "bxt-rig-01"
///
/// [timing]
/// cooling_time_s = 15
///
/// [strokes.knife]
/// extend_ms = 2500
/// retract_ms = 2000
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct RigConfig {
    #[serde(default)]
    pub shared: SharedConfig,
    #[serde(default)]
    pub timing: TimingConfig,
    #[serde(default)]
    pub strokes: StrokeConfig,
    #[serde(default)]
    pub simulation: SimulationConfig,
}

impl RigConfig {
    /// Validate parameter bounds.
    pub fn validate(&self) -> Result<(), String> {
        self.shared.validate().map_err(|e| e.to_string())?;
        self.timing.validate()?;
        self.strokes.validate()?;
        Ok(())
    }
}

// ─── Timing ─────────────────────────────────────────────────────────

/// Loop pacing, timeout and fault-indicator timing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct TimingConfig {
    /// Control tick period [ms].
    pub tick_period_ms: u64,
    /// Expected cycle duration without cool-down [s].
    pub cycle_time_estimate_s: u32,
    /// Initial weld cool-down [s], adjustable at runtime.
    pub cooling_time_s: u32,
    /// Wait imposed by the second timeout tier [s].
    pub long_timeout_wait_s: u32,
    /// Fault lamp toggle period during timeout handling [ms].
    pub fast_blink_ms: u64,
    /// Fault lamp toggle period after a shutdown [ms].
    pub slow_blink_ms: u64,
}

impl Default for TimingConfig {
    fn default() -> Self {
        Self {
            tick_period_ms: TICK_PERIOD_MS_DEFAULT,
            cycle_time_estimate_s: CYCLE_TIME_ESTIMATE_S_DEFAULT,
            cooling_time_s: COOLING_TIME_S_DEFAULT,
            long_timeout_wait_s: LONG_TIMEOUT_WAIT_S_DEFAULT,
            fast_blink_ms: FAST_BLINK_MS_DEFAULT,
            slow_blink_ms: SLOW_BLINK_MS_DEFAULT,
        }
    }
}

impl TimingConfig {
    pub fn validate(&self) -> Result<(), String> {
        if self.tick_period_ms < TICK_PERIOD_MS_MIN || self.tick_period_ms > TICK_PERIOD_MS_MAX {
            return Err(format!(
                "tick_period_ms {} out of range [{}, {}]",
                self.tick_period_ms, TICK_PERIOD_MS_MIN, TICK_PERIOD_MS_MAX
            ));
        }
        if self.cooling_time_s < COOLING_TIME_S_MIN || self.cooling_time_s > COOLING_TIME_S_MAX {
            return Err(format!(
                "cooling_time_s {} out of range [{}, {}]",
                self.cooling_time_s, COOLING_TIME_S_MIN, COOLING_TIME_S_MAX
            ));
        }
        if self.cycle_time_estimate_s < CYCLE_TIME_ESTIMATE_S_MIN
            || self.cycle_time_estimate_s > CYCLE_TIME_ESTIMATE_S_MAX
        {
            return Err(format!(
                "cycle_time_estimate_s {} out of range [{}, {}]",
                self.cycle_time_estimate_s, CYCLE_TIME_ESTIMATE_S_MIN, CYCLE_TIME_ESTIMATE_S_MAX
            ));
        }
        if self.fast_blink_ms == 0 || self.slow_blink_ms == 0 {
            return Err("blink periods must be positive".to_string());
        }
        Ok(())
    }

    #[inline]
    pub const fn tick_period(&self) -> Duration {
        Duration::from_millis(self.tick_period_ms)
    }

    #[inline]
    pub const fn long_timeout_wait(&self) -> Duration {
        Duration::from_secs(self.long_timeout_wait_s as u64)
    }

    #[inline]
    pub const fn fast_blink(&self) -> Duration {
        Duration::from_millis(self.fast_blink_ms)
    }

    #[inline]
    pub const fn slow_blink(&self) -> Duration {
        Duration::from_millis(self.slow_blink_ms)
    }

    /// Initial cool-down, clamped into the adjustable range.
    pub fn cooling_time(&self) -> CoolingTime {
        CoolingTime::new(self.cooling_time_s)
    }

    /// Inactivity deadline for a given cool-down.
    #[inline]
    pub const fn timeout_deadline(&self, cooling: CoolingTime) -> Duration {
        Duration::from_secs(cooling.secs() as u64 + self.cycle_time_estimate_s as u64)
    }
}

// ─── Cooling Time ───────────────────────────────────────────────────

/// Weld cool-down in whole seconds, kept inside
/// `[COOLING_TIME_S_MIN, COOLING_TIME_S_MAX]`.
///
/// Operator adjustment uses coarse steps at long times and fine steps near
/// the lower end: 10 s above 20 s, 5 s down to 10 s, then 1 s.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct CoolingTime(u32);

impl CoolingTime {
    pub const MIN: Self = Self(COOLING_TIME_S_MIN);
    pub const MAX: Self = Self(COOLING_TIME_S_MAX);

    /// Clamp `secs` into range.
    pub const fn new(secs: u32) -> Self {
        if secs < COOLING_TIME_S_MIN {
            Self::MIN
        } else if secs > COOLING_TIME_S_MAX {
            Self::MAX
        } else {
            Self(secs)
        }
    }

    #[inline]
    pub const fn secs(self) -> u32 {
        self.0
    }

    #[inline]
    pub const fn as_duration(self) -> Duration {
        Duration::from_secs(self.0 as u64)
    }

    /// One operator "minus" press.
    pub const fn decreased(self) -> Self {
        let step = if self.0 <= 10 {
            1
        } else if self.0 <= 20 {
            5
        } else {
            10
        };
        Self::new(self.0.saturating_sub(step))
    }

    /// One operator "plus" press.
    pub const fn increased(self) -> Self {
        let step = if self.0 < 10 {
            1
        } else if self.0 < 20 {
            5
        } else {
            10
        };
        Self::new(self.0 + step)
    }
}

impl Default for CoolingTime {
    fn default() -> Self {
        Self(COOLING_TIME_S_DEFAULT)
    }
}

// ─── Strokes ────────────────────────────────────────────────────────

/// Timed cylinder stroke: output on for `extend_ms`, then off for
/// `retract_ms` before the stroke counts as complete.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct StrokeTiming {
    pub extend_ms: u64,
    pub retract_ms: u64,
}

impl StrokeTiming {
    pub const fn new(extend_ms: u64, retract_ms: u64) -> Self {
        Self {
            extend_ms,
            retract_ms,
        }
    }

    #[inline]
    pub const fn extend(&self) -> Duration {
        Duration::from_millis(self.extend_ms)
    }

    #[inline]
    pub const fn retract(&self) -> Duration {
        Duration::from_millis(self.retract_ms)
    }

    #[inline]
    pub const fn total(&self) -> Duration {
        Duration::from_millis(self.extend_ms + self.retract_ms)
    }
}

/// Stroke timing for every timed actuation of the cycle and the reset.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct StrokeConfig {
    pub rocker_lever: StrokeTiming,
    pub clamp_release: StrokeTiming,
    pub sled_retract: StrokeTiming,
    pub strap_feed: StrokeTiming,
    pub knife: StrokeTiming,
    /// Short hold after the end switch closes, lets tension build up.
    pub tension_hold: StrokeTiming,
    pub weld_press: StrokeTiming,
    /// Rocker lever stroke used by the reset sequence.
    pub home: StrokeTiming,
}

impl Default for StrokeConfig {
    fn default() -> Self {
        Self {
            rocker_lever: StrokeTiming::new(1500, 1000),
            clamp_release: StrokeTiming::new(0, 1000),
            sled_retract: StrokeTiming::new(2000, 0),
            strap_feed: StrokeTiming::new(1300, 0),
            knife: StrokeTiming::new(2500, 2000),
            tension_hold: StrokeTiming::new(800, 0),
            weld_press: StrokeTiming::new(500, 0),
            home: StrokeTiming::new(1500, 0),
        }
    }
}

impl StrokeConfig {
    /// Longest single stroke accepted [ms].
    pub const STROKE_MS_MAX: u64 = 60_000;

    pub fn validate(&self) -> Result<(), String> {
        let all = [
            ("rocker_lever", self.rocker_lever),
            ("clamp_release", self.clamp_release),
            ("sled_retract", self.sled_retract),
            ("strap_feed", self.strap_feed),
            ("knife", self.knife),
            ("tension_hold", self.tension_hold),
            ("weld_press", self.weld_press),
            ("home", self.home),
        ];
        for (name, stroke) in all {
            if stroke.extend_ms + stroke.retract_ms > Self::STROKE_MS_MAX {
                return Err(format!(
                    "stroke {name} lasts {} ms, limit is {} ms",
                    stroke.extend_ms + stroke.retract_ms,
                    Self::STROKE_MS_MAX
                ));
            }
        }
        Ok(())
    }
}

// ─── Simulation ─────────────────────────────────────────────────────

/// Parameters of the host-side rig simulation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SimulationConfig {
    /// Debounce of the right end switch [ms].
    pub end_switch_debounce_ms: u64,
    /// Debounce of the strap detection sensor [ms].
    pub strap_sensor_debounce_ms: u64,
    /// Time the tension button must be held before the end switch closes [ms].
    pub tension_travel_ms: u64,
    /// Cuts available before the strap runs out; `0` means endless.
    pub strap_supply_cycles: u32,
}

impl Default for SimulationConfig {
    fn default() -> Self {
        Self {
            end_switch_debounce_ms: 100,
            strap_sensor_debounce_ms: 500,
            tension_travel_ms: 1500,
            strap_supply_cycles: 0,
        }
    }
}
