//! Read-only view of the control core for the operator panel.

use std::time::Duration;

use super::safety::FaultFlags;
use super::state::{RunMode, RunState, TimeoutTier};
use super::steps::CycleStep;

/// Content of the panel's info text field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum InfoField {
    #[default]
    Hidden,
    /// Weld cool-down countdown.
    Cooling { remaining_s: u32 },
    /// Second-tier timeout countdown.
    TimeoutWait { remaining_s: u32 },
    /// Third-tier timeout stopped the rig.
    Shutdown,
    /// Strap supply ran out.
    MaterialEmpty,
}

impl InfoField {
    /// Text for the info field; empty when hidden.
    pub fn text(&self) -> String {
        match self {
            Self::Hidden => String::new(),
            Self::Cooling { remaining_s } => format!("COOLING {remaining_s} s"),
            Self::TimeoutWait { remaining_s } => format!("TIMEOUT {remaining_s} s"),
            Self::Shutdown => "SHUT DOWN!".to_string(),
            Self::MaterialEmpty => "STRAP EMPTY".to_string(),
        }
    }

    #[inline]
    pub const fn is_visible(&self) -> bool {
        !matches!(self, Self::Hidden)
    }
}

/// Whole seconds left, rounded up so a countdown never shows 0 early.
#[inline]
pub fn remaining_secs(remaining: Duration) -> u32 {
    let secs = remaining.as_secs() + u64::from(remaining.subsec_nanos() > 0);
    u32::try_from(secs).unwrap_or(u32::MAX)
}

/// Snapshot published once per tick.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DisplaySnapshot {
    pub step: CycleStep,
    pub mode: RunMode,
    pub run_state: RunState,
    pub resetting: bool,
    pub tier: TimeoutTier,
    pub faults: FaultFlags,
    pub info: InfoField,
    /// Weld cool-down setting.
    pub cooling_time_s: u32,
    /// Countdown of the second-tier timeout wait, while it runs.
    pub remaining_cooldown_s: Option<u32>,
    pub cycle_count: u64,
}

impl DisplaySnapshot {
    /// 1-based step number as shown on the panel.
    #[inline]
    pub const fn step_number(&self) -> usize {
        self.step.index() + 1
    }

    #[inline]
    pub const fn step_name(&self) -> &'static str {
        self.step.display_name()
    }
}
