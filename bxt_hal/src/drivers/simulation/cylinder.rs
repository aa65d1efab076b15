//! Timed pneumatic cylinder model.

use std::time::Duration;

use bxt_common::hal::types::CylinderId;
use tracing::trace;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct ActiveStroke {
    started: Duration,
    extend: Duration,
    retract: Duration,
}

/// One cylinder: output state plus an optional running stroke.
#[derive(Debug, Clone, Copy, Default)]
pub struct SimCylinder {
    extended: bool,
    stroke: Option<ActiveStroke>,
    stroke_complete: bool,
}

impl SimCylinder {
    #[inline]
    pub const fn is_extended(&self) -> bool {
        self.extended
    }

    #[inline]
    pub const fn is_stroke_complete(&self) -> bool {
        self.stroke_complete
    }

    #[inline]
    pub const fn is_stroking(&self) -> bool {
        self.stroke.is_some()
    }

    /// Start a stroke if idle, then advance it to `now`.
    ///
    /// Returns `true` when the stroke finished during this call.
    pub fn stroke(&mut self, extend: Duration, retract: Duration, now: Duration) -> bool {
        if self.stroke.is_none() {
            self.stroke = Some(ActiveStroke {
                started: now,
                extend,
                retract,
            });
            self.stroke_complete = false;
            self.extended = true;
        }
        self.advance(now)
    }

    /// Drop the output once the extend time of a running stroke is over.
    ///
    /// Completion is only registered by [`stroke`](Self::stroke), so a
    /// finished stroke is never restarted within the same tick.
    pub fn settle(&mut self, now: Duration) {
        if let Some(stroke) = self.stroke {
            if now.saturating_sub(stroke.started) >= stroke.extend {
                self.extended = false;
            }
        }
    }

    fn advance(&mut self, now: Duration) -> bool {
        let Some(stroke) = self.stroke else {
            return false;
        };
        let elapsed = now.saturating_sub(stroke.started);
        if elapsed >= stroke.extend {
            self.extended = false;
        }
        if elapsed >= stroke.extend + stroke.retract {
            self.stroke = None;
            self.stroke_complete = true;
            return true;
        }
        false
    }

    /// Set the output directly, cancelling any running stroke.
    pub fn set(&mut self, extended: bool) {
        self.stroke = None;
        self.extended = extended;
    }
}

/// All cylinders of the rig.
#[derive(Debug, Clone, Default)]
pub struct CylinderBank {
    cylinders: [SimCylinder; CylinderId::COUNT],
    strokes_completed: u64,
}

impl CylinderBank {
    #[inline]
    pub fn get(&self, id: CylinderId) -> &SimCylinder {
        &self.cylinders[id.index()]
    }

    #[inline]
    pub const fn strokes_completed(&self) -> u64 {
        self.strokes_completed
    }

    pub fn stroke(&mut self, id: CylinderId, extend: Duration, retract: Duration, now: Duration) {
        if self.cylinders[id.index()].stroke(extend, retract, now) {
            self.strokes_completed += 1;
            trace!("{} stroke complete", id.label());
        }
    }

    pub fn set(&mut self, id: CylinderId, extended: bool) {
        self.cylinders[id.index()].set(extended);
    }

    pub fn toggle(&mut self, id: CylinderId) {
        let extended = self.cylinders[id.index()].is_extended();
        self.set(id, !extended);
    }

    pub fn release_all(&mut self) {
        for cylinder in &mut self.cylinders {
            cylinder.set(false);
        }
    }

    /// Settle the outputs of every running stroke.
    pub fn settle(&mut self, now: Duration) {
        for cylinder in &mut self.cylinders {
            cylinder.settle(now);
        }
    }
}
