//! Fault flags driving the rig's fault lamp.

use bitflags::bitflags;

bitflags! {
    /// Active fault conditions. Any set flag makes the fault lamp blink.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
    pub struct FaultFlags: u8 {
        /// Strap detection sensor reports no strap.
        const MATERIAL_ABSENT  = 0x01;
        /// Second timeout tier: waiting out the cool-down.
        const TIMEOUT_WAIT     = 0x02;
        /// Third timeout tier: rig stopped, slow blink until reset.
        const TIMEOUT_SHUTDOWN = 0x04;
    }
}

impl FaultFlags {
    /// Whether the lamp should use the slow shutdown pattern.
    #[inline]
    pub const fn wants_slow_blink(self) -> bool {
        self.contains(Self::TIMEOUT_SHUTDOWN)
    }
}
