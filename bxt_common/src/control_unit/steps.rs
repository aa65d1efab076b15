//! Fixed step catalog of the strapping test cycle.
//!
//! The cycle is a closed loop: after `Weld` the sequencer wraps back to
//! `PullRockerLever`.

use serde::{Deserialize, Serialize};
use static_assertions::const_assert;

/// One physical step of the strapping cycle, in execution order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[repr(u8)]
pub enum CycleStep {
    /// Pull the rocker lever to open the tool.
    PullRockerLever = 0,
    /// Release the strap clamp and give it time to open.
    ReleaseStrapClamp = 1,
    /// Drive the sled back to its start position.
    RetractSled = 2,
    /// Feed strap through the tool via the tension button.
    FeedStrap = 3,
    /// Cut the strap with the knife cylinder.
    CutStrap = 4,
    /// Close the strap clamp.
    ClampStrap = 5,
    /// Tension the strap until the right end switch closes.
    TensionStrap = 6,
    /// Press the weld button, then wait for the weld to cool.
    Weld = 7,
}

impl CycleStep {
    /// Number of steps in one cycle.
    pub const COUNT: usize = 8;

    /// All steps in execution order.
    pub const ALL: [Self; Self::COUNT] = [
        Self::PullRockerLever,
        Self::ReleaseStrapClamp,
        Self::RetractSled,
        Self::FeedStrap,
        Self::CutStrap,
        Self::ClampStrap,
        Self::TensionStrap,
        Self::Weld,
    ];

    #[inline]
    pub const fn index(self) -> usize {
        self as usize
    }

    /// Step at `index`, or `None` past the end of the cycle.
    #[inline]
    pub const fn from_index(index: usize) -> Option<Self> {
        if index < Self::COUNT {
            Some(Self::ALL[index])
        } else {
            None
        }
    }

    /// Upper-case name shown on the operator panel.
    pub const fn display_name(self) -> &'static str {
        match self {
            Self::PullRockerLever => "ROCKER LEVER",
            Self::ReleaseStrapClamp => "RELEASE CLAMP",
            Self::RetractSled => "RETRACT SLED",
            Self::FeedStrap => "FEED STRAP",
            Self::CutStrap => "CUT",
            Self::ClampStrap => "CLAMP",
            Self::TensionStrap => "TENSION",
            Self::Weld => "WELD",
        }
    }
}

impl std::fmt::Display for CycleStep {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.display_name())
    }
}

const_assert!(CycleStep::COUNT > 0);
const_assert!(CycleStep::Weld as usize == CycleStep::COUNT - 1);
