//! Actuation of the strapping cycle.
//!
//! | Step | Actuation |
//! |------|-----------|
//! | PullRockerLever | rocker lever stroke |
//! | ReleaseStrapClamp | clamp stroke with zero extend (release, then wait) |
//! | RetractSled | sled stroke |
//! | FeedStrap | tension button stroke |
//! | CutStrap | knife stroke |
//! | ClampStrap | clamp on |
//! | TensionStrap | hold tension button until the end switch closes, then a short hold stroke |
//! | Weld | weld button stroke, then cool-down; counts the cycle |

use std::time::Duration;

use bxt_common::control_unit::config::{StrokeConfig, StrokeTiming};
use bxt_common::control_unit::steps::CycleStep;
use bxt_common::hal::types::CylinderId;
use tracing::{debug, info};

use super::{StepActuator, StepContext, StepProgress};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum TensionPhase {
    /// Tension button held until the end switch closes.
    Pulling,
    /// Short hold stroke for force build-up.
    Holding,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum WeldPhase {
    Pressing,
    Cooling { since: Duration },
}

#[derive(Debug, Clone)]
pub struct StrapCycle {
    strokes: StrokeConfig,
    tension: TensionPhase,
    weld: WeldPhase,
}

impl StrapCycle {
    pub const fn new(strokes: StrokeConfig) -> Self {
        Self {
            strokes,
            tension: TensionPhase::Pulling,
            weld: WeldPhase::Pressing,
        }
    }

    fn stroke(ctx: &mut StepContext<'_>, cylinder: CylinderId, timing: StrokeTiming) -> StepProgress {
        ctx.io
            .command_stroke(cylinder, timing.extend(), timing.retract(), ctx.now);
        if ctx.io.is_stroke_complete(cylinder) {
            StepProgress::Complete
        } else {
            StepProgress::InProgress
        }
    }

    fn tension(&mut self, ctx: &mut StepContext<'_>) -> StepProgress {
        if self.tension == TensionPhase::Pulling {
            ctx.io.command_state(CylinderId::TensionButton, true);
            if !ctx.tension_end_reached {
                return StepProgress::InProgress;
            }
            debug!("End switch reached, holding tension");
            self.tension = TensionPhase::Holding;
        }

        let progress = Self::stroke(ctx, CylinderId::TensionButton, self.strokes.tension_hold);
        if progress == StepProgress::Complete {
            self.tension = TensionPhase::Pulling;
        }
        progress
    }

    fn weld(&mut self, ctx: &mut StepContext<'_>) -> StepProgress {
        if self.weld == WeldPhase::Pressing {
            if Self::stroke(ctx, CylinderId::WeldButton, self.strokes.weld_press)
                != StepProgress::Complete
            {
                return StepProgress::InProgress;
            }
            self.weld = WeldPhase::Cooling { since: ctx.now };
        }

        let WeldPhase::Cooling { since } = self.weld else {
            return StepProgress::InProgress;
        };
        let cooling = ctx.cooling_time.as_duration();
        let elapsed = ctx.now.saturating_sub(since);
        if elapsed < cooling {
            return StepProgress::Cooling {
                remaining: cooling - elapsed,
            };
        }

        self.weld = WeldPhase::Pressing;
        ctx.logbook.count_cycle();
        info!("Cycle complete, total {}", ctx.logbook.cycle_count());
        StepProgress::Complete
    }
}

impl StepActuator for StrapCycle {
    fn actuate(&mut self, step: CycleStep, ctx: &mut StepContext<'_>) -> StepProgress {
        match step {
            CycleStep::PullRockerLever => {
                Self::stroke(ctx, CylinderId::RockerLever, self.strokes.rocker_lever)
            }
            CycleStep::ReleaseStrapClamp => {
                Self::stroke(ctx, CylinderId::StrapClamp, self.strokes.clamp_release)
            }
            CycleStep::RetractSled => Self::stroke(ctx, CylinderId::Sled, self.strokes.sled_retract),
            CycleStep::FeedStrap => {
                Self::stroke(ctx, CylinderId::TensionButton, self.strokes.strap_feed)
            }
            CycleStep::CutStrap => Self::stroke(ctx, CylinderId::Knife, self.strokes.knife),
            CycleStep::ClampStrap => {
                ctx.io.command_state(CylinderId::StrapClamp, true);
                StepProgress::Complete
            }
            CycleStep::TensionStrap => self.tension(ctx),
            CycleStep::Weld => self.weld(ctx),
        }
    }

    fn abort(&mut self) {
        self.tension = TensionPhase::Pulling;
        self.weld = WeldPhase::Pressing;
    }
}
