//! Control-core shared types.
//!
//! Everything the control core exchanges with its collaborators (operator
//! panel, logbook, hardware layer) lives here: state enums, the step
//! catalog, operator commands, fault flags, the display snapshot, and the
//! rig configuration.

pub mod command;
pub mod config;
pub mod display;
pub mod events;
pub mod safety;
pub mod state;
pub mod steps;
