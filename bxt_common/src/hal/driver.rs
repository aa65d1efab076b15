//! Rig driver trait and error types.
//!
//! This module defines:
//! - `RigDriver` trait - Interface for pluggable rig I/O backends
//! - `HalError` enum - Error types for driver operations
//! - `DriverFactory` type alias - Factory function type
//! - `DriverDiagnostics` struct - Optional driver diagnostics

use crate::control_unit::config::RigConfig;
use crate::hal::types::{RigIo, TickInputs};
use std::time::Duration;
use thiserror::Error;

/// Error types for driver operations.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum HalError {
    /// Driver initialization failed
    #[error("Initialization failed: {0}")]
    InitFailed(String),

    /// Configuration error
    #[error("Configuration error: {0}")]
    ConfigError(String),

    /// Hardware communication error
    #[error("Hardware communication error: {0}")]
    CommunicationError(String),

    /// Driver not found
    #[error("Driver not found: {0}")]
    DriverNotFound(String),

    /// Driver name registered twice
    #[error("Driver already registered: {0}")]
    DuplicateDriver(String),
}

/// Factory function type for creating driver instances.
pub type DriverFactory = fn() -> Box<dyn RigDriver>;

/// Optional driver diagnostics.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DriverDiagnostics {
    /// Number of cycles executed
    pub cycle_count: u64,
    /// Number of completed cylinder strokes
    pub strokes_completed: u64,
    /// Driver-specific note
    pub custom: Option<String>,
}

/// Trait defining the interface for rig drivers.
///
/// # Lifecycle
///
/// 1. `init()` - Called once before the control loop starts
/// 2. `cycle()` - Called at the start of every tick, returns the debounced
///    input sample
/// 3. `io()` - Actuator access for the rest of the tick
/// 4. `shutdown()` - Called when the control loop stops
pub trait RigDriver: Send {
    /// Returns the driver's unique identifier (e.g., "simulation").
    fn name(&self) -> &'static str;

    /// Returns the driver's semantic version.
    fn version(&self) -> &'static str;

    /// Initialize the driver with the rig configuration.
    ///
    /// # Errors
    /// Return `HalError::InitFailed` if initialization cannot complete.
    fn init(&mut self, config: &RigConfig) -> Result<(), HalError>;

    /// Advance the driver to `now` and sample inputs.
    fn cycle(&mut self, now: Duration) -> TickInputs;

    /// Actuator interface used by the control core during a tick.
    fn io(&mut self) -> &mut dyn RigIo;

    /// Release outputs and close hardware connections.
    fn shutdown(&mut self) -> Result<(), HalError>;

    /// Get driver-specific diagnostics.
    /// Default: None
    fn diagnostics(&self) -> Option<DriverDiagnostics> {
        None
    }
}
