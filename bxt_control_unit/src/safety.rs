//! Fault supervision: inactivity timeouts, physical reset, strap supply,
//! and the fault lamp.

pub mod indicator;
pub mod material;
pub mod reset;
pub mod timeout;
