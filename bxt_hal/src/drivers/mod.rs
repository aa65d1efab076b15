//! Rig driver implementations.
//!
//! - [`simulation`] - Software simulation driver for development and testing
//!
//! # Adding New Drivers
//!
//! 1. Create a new submodule under `drivers/`
//! 2. Implement the `RigDriver` trait from `bxt_common::hal::driver`
//! 3. Register it in [`register_all_drivers`]

pub mod simulation;

use crate::driver_registry::DriverRegistry;
use bxt_common::hal::driver::HalError;

/// Register all built-in drivers.
///
/// # Errors
/// Returns `HalError::DuplicateDriver` if `registry` already holds one of them.
pub fn register_all_drivers(registry: &mut DriverRegistry) -> Result<(), HalError> {
    registry.register("simulation", simulation::create_driver)?;
    Ok(())
}
