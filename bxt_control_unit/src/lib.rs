//! # BXT Control Unit Library
//!
//! Control core of the BXT strapping test rig. A periodic tick samples the
//! debounced inputs, advances the strapping cycle step by step, supervises
//! inactivity with a three-tier timeout escalation, drives the physical
//! reset (home) sequence and updates the fault lamp.
//!
//! ## Layers
//!
//! 1. **StepSequencer** - position in the fixed step list, transition edge
//! 2. **ModeController** - Auto/Step mode and Running/Paused state
//! 3. **TimeoutEscalator** - progress watchdog with three escalating tiers
//! 4. **ResetSequencer** - quiesce, home stroke, finalize
//! 5. **CycleOrchestrator** - composes the above into one tick
//!
//! Hardware, logbook storage and the operator panel are collaborators
//! behind traits from `bxt_common`; `bxt_hal` ships host implementations.

pub mod command;
pub mod config;
pub mod control;
pub mod cycle;
pub mod orchestrator;
pub mod safety;
pub mod state;

#[cfg(test)]
mod test_support;
