//! BXT Common Library
//!
//! Shared types and configuration loading for all BXT workspace crates.
//!
//! # Module Structure
//!
//! - [`control_unit`] - State enums, step catalog, commands, rig configuration
//! - [`hal`] - Driver trait and actuator/sensor interface
//! - [`config`] - Configuration loading traits and types
//! - [`prelude`] - Common re-exports for convenience
//!
//! # Usage
//!
//! ```rust
//! use bxt_common::prelude::*;
//!
//! let config = RigConfig::default();
//! assert_eq!(CycleStep::ALL.len(), CycleStep::COUNT);
//! assert!(config.validate().is_ok());
//! ```

pub mod config;
pub mod control_unit;
pub mod hal;
pub mod prelude;
