//! State enums for the rig control core.
//!
//! All enums use `#[repr(u8)]` so they can be exported to a display panel
//! or log record as a single byte.

use serde::{Deserialize, Serialize};

// ─── Operator Modes ─────────────────────────────────────────────────

/// Run mode selected by the operator.
///
/// `Auto` and `Step` are mutually exclusive. There is no `Default`: the
/// caller picks the boot mode explicitly.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[repr(u8)]
pub enum RunMode {
    /// Continuous cycling.
    Auto = 0,
    /// Pause after every step transition.
    Step = 1,
}

impl RunMode {
    /// The other mode.
    #[inline]
    pub const fn toggled(self) -> Self {
        match self {
            Self::Auto => Self::Step,
            Self::Step => Self::Auto,
        }
    }

    /// Display label.
    pub const fn label(self) -> &'static str {
        match self {
            Self::Auto => "AUTO",
            Self::Step => "STEP",
        }
    }
}

/// Whether the rig is executing steps.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[repr(u8)]
pub enum RunState {
    /// Holding position, no step dispatch.
    #[default]
    Paused = 0,
    /// Dispatching the current step each tick.
    Running = 1,
}

impl RunState {
    #[inline]
    pub const fn from_running(running: bool) -> Self {
        if running { Self::Running } else { Self::Paused }
    }

    #[inline]
    pub const fn is_running(self) -> bool {
        matches!(self, Self::Running)
    }
}

// ─── Timeout Escalation ─────────────────────────────────────────────

/// Severity reached by consecutive inactivity timeouts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, Default)]
#[repr(u8)]
pub enum TimeoutTier {
    /// No timeout since the last progress signal.
    #[default]
    Idle = 0,
    /// Reset and resume immediately.
    First = 1,
    /// Cool-down wait, then reset and resume.
    Second = 2,
    /// Stop the rig.
    Third = 3,
}

impl TimeoutTier {
    /// Next tier after one more expiry. `Third` is terminal.
    #[inline]
    pub const fn escalated(self) -> Self {
        match self {
            Self::Idle => Self::First,
            Self::First => Self::Second,
            Self::Second | Self::Third => Self::Third,
        }
    }

    #[inline]
    pub const fn level(self) -> u8 {
        self as u8
    }
}

// ─── Reset ──────────────────────────────────────────────────────────

/// Whether a physical reset is in progress.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[repr(u8)]
pub enum ResetState {
    #[default]
    Normal = 0,
    Resetting = 1,
}

/// Stage of the reset sequence.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[repr(u8)]
pub enum ResetStage {
    /// Release every actuator, clear faults, rewind to the first step.
    #[default]
    Quiesce = 0,
    /// Stroke the home-defining actuator until it reports completion.
    HomeStroke = 1,
    /// Restore normal state and the requested run state.
    ///
    /// Transient: entered and left in the tick the home stroke completes,
    /// so `ResetSequencer::stage()` never reports it.
    Finalize = 2,
}
