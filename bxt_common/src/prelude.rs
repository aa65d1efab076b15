//! Prelude module for common re-exports.
//!
//! ```rust
//! use bxt_common::prelude::*;
//! ```

// ─── Configuration ──────────────────────────────────────────────────
pub use crate::config::{ConfigError, ConfigLoader, LogLevel, SharedConfig};
pub use crate::control_unit::config::{CoolingTime, RigConfig, StrokeTiming};

// ─── Control Core Types ─────────────────────────────────────────────
pub use crate::control_unit::command::{JogAction, OperatorCommand};
pub use crate::control_unit::display::{DisplaySnapshot, InfoField};
pub use crate::control_unit::events::{CounterKind, LogEventKind, Logbook};
pub use crate::control_unit::safety::FaultFlags;
pub use crate::control_unit::state::{ResetStage, ResetState, RunMode, RunState, TimeoutTier};
pub use crate::control_unit::steps::CycleStep;

// ─── Hardware ───────────────────────────────────────────────────────
pub use crate::hal::driver::{HalError, RigDriver};
pub use crate::hal::types::{CylinderId, RigIo, TickInputs};
