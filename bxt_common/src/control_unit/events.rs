//! Logbook event kinds and cycle counters.

use std::time::Duration;

use serde::{Deserialize, Serialize};

/// Event recorded in the rig logbook.
///
/// Codes are stable: they are what a persistent logbook stores. Code `0`
/// marks an empty slot and is never produced by the core.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[repr(u8)]
pub enum LogEventKind {
    /// Controller powered on.
    ControllerOn = 1,
    /// First timeout: automatic reset.
    ShortTimeout = 2,
    /// Second timeout: cool-down pause before reset.
    LongTimeout = 3,
    /// Third timeout: rig stopped.
    Shutdown = 4,
    /// Strap supply ran out.
    MaterialEmpty = 5,
    /// Operator started the rig in auto mode.
    ManualStart = 6,
    /// Operator stopped the rig in auto mode.
    ManualStop = 7,
}

impl LogEventKind {
    /// Code reserved for unused logbook slots.
    pub const EMPTY_CODE: u8 = 0;

    #[inline]
    pub const fn code(self) -> u8 {
        self as u8
    }

    #[inline]
    pub const fn from_code(code: u8) -> Option<Self> {
        match code {
            1 => Some(Self::ControllerOn),
            2 => Some(Self::ShortTimeout),
            3 => Some(Self::LongTimeout),
            4 => Some(Self::Shutdown),
            5 => Some(Self::MaterialEmpty),
            6 => Some(Self::ManualStart),
            7 => Some(Self::ManualStop),
            _ => None,
        }
    }

    /// Label shown in the logbook view.
    pub const fn label(self) -> &'static str {
        match self {
            Self::ControllerOn => "CONTROL ON",
            Self::ShortTimeout => "AUTO RESET",
            Self::LongTimeout => "AUTO PAUSE",
            Self::Shutdown => "AUTO STOP",
            Self::MaterialEmpty => "STRAP EMPTY",
            Self::ManualStart => "MANUAL START",
            Self::ManualStop => "MANUAL STOP",
        }
    }
}

impl std::fmt::Display for LogEventKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

/// Completed-cycle counters kept by the logbook.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[repr(u8)]
pub enum CounterKind {
    /// Resettable counter for the current test run.
    Session = 0,
    /// Lifetime counter; only reset deliberately.
    Lifetime = 1,
}

/// Counter and event storage collaborator.
///
/// Recording is fire-and-forget: the core never waits on or inspects the
/// outcome of a write.
pub trait Logbook {
    /// Append an event stamped with the current lifetime cycle count and
    /// monotonic time since boot.
    fn record_event(&mut self, kind: LogEventKind, cycle_count: u64, timestamp: Duration);

    /// Lifetime completed-cycle count.
    fn cycle_count(&self) -> u64;

    /// Count one completed cycle on every counter.
    fn count_cycle(&mut self);

    /// Zero one counter.
    fn reset_counter(&mut self, counter: CounterKind);

    /// Drop every recorded event. Counters are kept.
    fn clear_events(&mut self);
}
