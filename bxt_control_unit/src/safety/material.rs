//! Strap supply monitoring.

use tracing::warn;

/// Per-tick strap status.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MaterialStatus {
    Present,
    /// Strap missing, already reported.
    Absent,
    /// Strap disappeared this tick.
    Lost,
}

impl MaterialStatus {
    #[inline]
    pub const fn is_absent(self) -> bool {
        !matches!(self, Self::Present)
    }
}

/// Edge detector over the debounced strap sensor.
#[derive(Debug, Clone)]
pub struct MaterialMonitor {
    present: bool,
}

impl MaterialMonitor {
    /// Assumes strap is loaded at boot, so an empty magazine is reported on
    /// the first sample.
    pub const fn new() -> Self {
        Self { present: true }
    }

    pub fn observe(&mut self, strap_present: bool) -> MaterialStatus {
        let was_present = self.present;
        self.present = strap_present;
        match (was_present, strap_present) {
            (_, true) => MaterialStatus::Present,
            (true, false) => {
                warn!("Strap supply empty");
                MaterialStatus::Lost
            }
            (false, false) => MaterialStatus::Absent,
        }
    }
}

impl Default for MaterialMonitor {
    fn default() -> Self {
        Self::new()
    }
}
