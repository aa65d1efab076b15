//! Hardware abstraction types.
//!
//! The control core talks to the rig only through the traits defined here,
//! so the same core runs against real I/O or the host simulation.

pub mod driver;
pub mod types;
