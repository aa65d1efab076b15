//! Debounced digital inputs.
//!
//! A raw level must hold for the debounce time before the stable level
//! follows it. Edges are reported for exactly one `update()` call.

use std::time::Duration;

/// One debounced switch or sensor.
#[derive(Debug, Clone, Copy)]
pub struct DebouncedInput {
    debounce: Duration,
    stable: bool,
    /// Time the raw level first disagreed with `stable`.
    pending_since: Option<Duration>,
    rose: bool,
    fell: bool,
}

impl DebouncedInput {
    pub const fn new(debounce: Duration, initial: bool) -> Self {
        Self {
            debounce,
            stable: initial,
            pending_since: None,
            rose: false,
            fell: false,
        }
    }

    /// Feed the raw level sampled at `now`.
    pub fn update(&mut self, raw: bool, now: Duration) {
        self.rose = false;
        self.fell = false;

        if raw == self.stable {
            self.pending_since = None;
            return;
        }

        let since = *self.pending_since.get_or_insert(now);
        if now.saturating_sub(since) >= self.debounce {
            self.stable = raw;
            self.pending_since = None;
            self.rose = raw;
            self.fell = !raw;
        }
    }

    #[inline]
    pub const fn is_high(&self) -> bool {
        self.stable
    }

    /// Stable level went high during the last update.
    #[inline]
    pub const fn switched_high(&self) -> bool {
        self.rose
    }

    /// Stable level went low during the last update.
    #[inline]
    pub const fn switched_low(&self) -> bool {
        self.fell
    }
}
