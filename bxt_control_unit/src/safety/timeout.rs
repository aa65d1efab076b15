//! Inactivity timeout with three escalation tiers.
//!
//! A deadline runs from the last progress signal (right end switch closing).
//! Each expiry without progress in between raises the tier:
//!
//! 1. **First** - reset the rig and resume.
//! 2. **Second** - hold a cool-down wait, then reset and resume.
//! 3. **Third** - stop the rig; the tier counter starts over at `Idle`.
//!
//! While the second-tier wait runs the escalator is *latched*: the deadline
//! is held re-armed and progress signals are ignored.

use std::time::Duration;

use bxt_common::control_unit::state::TimeoutTier;
use tracing::{debug, info, warn};

/// Decision returned by [`TimeoutEscalator::check`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TimeoutAction {
    /// Deadline not reached.
    None,
    /// First expiry: reset the rig and resume afterwards.
    ResetAndResume,
    /// Second expiry: cool-down wait started.
    CooldownStarted { remaining: Duration },
    /// Cool-down wait still running.
    CoolingDown { remaining: Duration },
    /// Cool-down wait over: reset the rig and resume afterwards.
    CooldownElapsed,
    /// Third expiry: stop the rig, no automatic resume.
    Shutdown,
}

#[derive(Debug, Clone)]
pub struct TimeoutEscalator {
    deadline: Duration,
    cooldown: Duration,
    armed_at: Duration,
    tier: TimeoutTier,
    /// Start of the second-tier wait; `Some` while latched.
    cooldown_since: Option<Duration>,
}

impl TimeoutEscalator {
    /// Create an idle escalator armed at time zero.
    pub const fn new(deadline: Duration, cooldown: Duration) -> Self {
        Self {
            deadline,
            cooldown,
            armed_at: Duration::ZERO,
            tier: TimeoutTier::Idle,
            cooldown_since: None,
        }
    }

    #[inline]
    pub const fn tier(&self) -> TimeoutTier {
        self.tier
    }

    #[inline]
    pub const fn deadline(&self) -> Duration {
        self.deadline
    }

    /// Mid-escalation latch (second-tier wait running).
    #[inline]
    pub const fn is_timeout_active(&self) -> bool {
        self.cooldown_since.is_some()
    }

    /// Time left in the second-tier wait, if it runs.
    pub fn remaining_cooldown(&self, now: Duration) -> Option<Duration> {
        self.cooldown_since
            .map(|since| self.cooldown.saturating_sub(now.saturating_sub(since)))
    }

    /// Change the deadline length. The running deadline is not restarted.
    pub fn set_deadline(&mut self, deadline: Duration) {
        debug!("Timeout deadline set to {} s", deadline.as_secs());
        self.deadline = deadline;
    }

    /// Progress signal: restart the deadline and clear the tier.
    ///
    /// Ignored while latched. Returns whether the signal was accepted.
    pub fn observe_progress(&mut self, now: Duration) -> bool {
        if self.is_timeout_active() {
            debug!("Progress ignored during timeout wait");
            return false;
        }
        if self.tier != TimeoutTier::Idle {
            info!("Progress after timeout tier {}, escalation cleared", self.tier.level());
        }
        self.armed_at = now;
        self.tier = TimeoutTier::Idle;
        true
    }

    /// Keep the deadline re-armed (rig not running autonomously).
    #[inline]
    pub fn hold(&mut self, now: Duration) {
        self.armed_at = now;
    }

    /// Drop the latch and any running wait. The tier count is kept so a
    /// later expiry still escalates.
    pub fn cancel(&mut self, now: Duration) {
        if self.cooldown_since.take().is_some() {
            info!("Timeout wait cancelled");
        }
        self.armed_at = now;
    }

    /// Evaluate the deadline at `now`.
    pub fn check(&mut self, now: Duration) -> TimeoutAction {
        if let Some(since) = self.cooldown_since {
            self.armed_at = now;
            let elapsed = now.saturating_sub(since);
            if elapsed >= self.cooldown {
                self.cooldown_since = None;
                info!("Timeout wait elapsed, resetting rig");
                return TimeoutAction::CooldownElapsed;
            }
            return TimeoutAction::CoolingDown {
                remaining: self.cooldown - elapsed,
            };
        }

        if now.saturating_sub(self.armed_at) < self.deadline {
            return TimeoutAction::None;
        }

        self.armed_at = now;
        self.tier = self.tier.escalated();
        match self.tier {
            TimeoutTier::Idle => TimeoutAction::None,
            TimeoutTier::First => {
                warn!("TIMEOUT 1 > RESET");
                TimeoutAction::ResetAndResume
            }
            TimeoutTier::Second => {
                warn!("TIMEOUT 2 > WAIT & RESET");
                self.cooldown_since = Some(now);
                TimeoutAction::CooldownStarted {
                    remaining: self.cooldown,
                }
            }
            TimeoutTier::Third => {
                warn!("TIMEOUT 3 > STOP");
                self.tier = TimeoutTier::Idle;
                TimeoutAction::Shutdown
            }
        }
    }
}
