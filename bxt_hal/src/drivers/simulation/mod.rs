//! Simulation driver module.
//!
//! Software model of the strapping rig for development and testing without
//! physical hardware.

mod cylinder;
mod driver;
mod io;
mod plant;

pub use cylinder::{CylinderBank, SimCylinder};
pub use driver::SimulationDriver;
pub use io::DebouncedInput;
pub use plant::{RawInputs, RigPlant};

use bxt_common::hal::driver::RigDriver;

/// Factory function to create a simulation driver instance.
pub fn create_driver() -> Box<dyn RigDriver> {
    Box::new(SimulationDriver::new())
}
