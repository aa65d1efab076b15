//! # BXT HAL Library
//!
//! Host-side collaborators for the strapping rig control core.
//!
//! # Module Structure
//!
//! - [`driver_registry`] - Driver factory registration
//! - [`drivers`] - Rig driver implementations (simulation)
//! - [`logbook`] - In-memory cycle counters and event log
//!
//! # Architecture
//!
//! ```text
//! ┌──────────────────────────────────────────────────────────┐
//! │                    bxt_hal (library)                     │
//! │  ┌──────────────────┐      ┌──────────────────────────┐  │
//! │  │ Driver Registry  │─────►│ RigDriver (trait object) │  │
//! │  └──────────────────┘      │  └─ SimulationDriver     │  │
//! │                            │     cylinders, plant,    │  │
//! │  ┌──────────────────┐      │     debounced inputs     │  │
//! │  │  MemoryLogbook   │      └──────────────────────────┘  │
//! │  └──────────────────┘                                    │
//! └──────────────────────────────────────────────────────────┘
//! ```

pub mod driver_registry;
pub mod drivers;
pub mod logbook;

pub use crate::driver_registry::DriverRegistry;
pub use crate::drivers::simulation::SimulationDriver;
pub use crate::logbook::{LogEntry, MemoryLogbook, PackedTime};
