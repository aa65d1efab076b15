//! Hardware-facing types exchanged between the control core and a driver.

use std::time::Duration;

use serde::{Deserialize, Serialize};

/// Pneumatic cylinders of the strapping rig.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[repr(u8)]
pub enum CylinderId {
    /// Moves the tool sled.
    Sled = 0,
    /// Holds the strap in place.
    StrapClamp = 1,
    /// Presses the tool's tension button (also feeds strap).
    TensionButton = 2,
    /// Presses the tool's weld button.
    WeldButton = 3,
    /// Pulls the rocker lever; its stroke defines the home position.
    RockerLever = 4,
    /// Cuts the strap.
    Knife = 5,
}

impl CylinderId {
    pub const COUNT: usize = 6;

    pub const ALL: [Self; Self::COUNT] = [
        Self::Sled,
        Self::StrapClamp,
        Self::TensionButton,
        Self::WeldButton,
        Self::RockerLever,
        Self::Knife,
    ];

    #[inline]
    pub const fn index(self) -> usize {
        self as usize
    }

    pub const fn label(self) -> &'static str {
        match self {
            Self::Sled => "sled",
            Self::StrapClamp => "strap_clamp",
            Self::TensionButton => "tension_button",
            Self::WeldButton => "weld_button",
            Self::RockerLever => "rocker_lever",
            Self::Knife => "knife",
        }
    }
}

/// Debounced sensor sample taken once per tick.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TickInputs {
    /// Monotonic time since boot.
    pub now: Duration,
    /// Right end switch closed since the previous sample.
    pub progress_edge: bool,
    /// Right end switch currently closed.
    pub tension_end_reached: bool,
    /// Strap detection sensor sees strap.
    pub strap_present: bool,
}

impl TickInputs {
    /// Quiet sample at `now`: strap present, no switch activity.
    pub const fn idle(now: Duration) -> Self {
        Self {
            now,
            progress_edge: false,
            tension_end_reached: false,
            strap_present: true,
        }
    }
}

/// Actuator collaborator.
///
/// Stroke semantics: the first `command_stroke` on an idle cylinder starts
/// a stroke (output on for `extend`, then off for `retract`). Repeated calls
/// while the stroke runs only advance it. Once finished the cylinder reports
/// `is_stroke_complete()` until the next stroke starts.
pub trait RigIo {
    fn command_stroke(&mut self, cylinder: CylinderId, extend: Duration, retract: Duration, now: Duration);

    /// Drive the output directly, cancelling any running stroke.
    fn command_state(&mut self, cylinder: CylinderId, extended: bool);

    fn toggle(&mut self, cylinder: CylinderId);

    fn is_stroke_complete(&self, cylinder: CylinderId) -> bool;

    fn is_extended(&self, cylinder: CylinderId) -> bool;

    /// All cylinders to their home (retracted) command.
    fn release_all(&mut self);

    /// Fault blink relay.
    fn set_fault_lamp(&mut self, on: bool);

    /// Emergency beacon; lit steadily when no fault is active.
    fn set_beacon(&mut self, on: bool);
}
