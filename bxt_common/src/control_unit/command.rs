//! Operator commands issued by the touch panel.
//!
//! Each command maps onto exactly one control-core operation. Commands are
//! queued by the display layer and drained at the start of the next tick.

use serde::{Deserialize, Serialize};

use super::events::CounterKind;
use crate::hal::types::CylinderId;

/// Manual cylinder button behavior.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum JogAction {
    /// Latching button: flip the output.
    Toggle,
    /// Momentary button pressed: output on.
    Press,
    /// Momentary button released: output off.
    Release,
}

/// A single operator command.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum OperatorCommand {
    /// Go back one step; stays on the first step.
    StepBack,
    /// Go forward one step; wraps after the last step.
    StepForward,
    /// Abort whatever is running and home the rig, staying paused afterwards.
    RequestReset,
    /// Play/pause.
    ToggleRunning,
    /// Auto/step.
    ToggleMode,
    /// Lengthen the weld cool-down by one adjustment step.
    CoolingTimeUp,
    /// Shorten the weld cool-down by one adjustment step.
    CoolingTimeDown,
    /// Zero a cycle counter.
    ResetCounter(CounterKind),
    /// Empty the event log.
    ClearLog,
    /// Manual cylinder control.
    Jog {
        cylinder: CylinderId,
        action: JogAction,
    },
}
