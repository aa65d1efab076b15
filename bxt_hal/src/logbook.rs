//! In-memory logbook: cycle counters plus a bounded event ring.
//!
//! Stands in for the rig's persistent counter and event storage. When the
//! ring is full the oldest entry is dropped.

use std::fmt;
use std::time::Duration;

use bxt_common::control_unit::events::{CounterKind, LogEventKind, Logbook};
use heapless::Deque;
use tracing::{debug, info};

/// Number of events kept.
pub const LOGBOOK_CAPACITY: usize = 50;

const SECS_PER_DAY: u64 = 24 * 60 * 60;

/// Time of day packed as `hour:5 | minute:6 | second:6`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct PackedTime(u32);

impl PackedTime {
    /// Pack the time of day of `uptime`, wrapping every 24 h.
    pub const fn from_uptime(uptime: Duration) -> Self {
        let secs = uptime.as_secs() % SECS_PER_DAY;
        let hour = (secs / 3600) as u32;
        let minute = ((secs / 60) % 60) as u32;
        let second = (secs % 60) as u32;
        Self((hour << 12) | (minute << 6) | second)
    }

    #[inline]
    pub const fn raw(self) -> u32 {
        self.0
    }

    #[inline]
    pub const fn hour(self) -> u8 {
        ((self.0 >> 12) & 0x1F) as u8
    }

    #[inline]
    pub const fn minute(self) -> u8 {
        ((self.0 >> 6) & 0x3F) as u8
    }

    #[inline]
    pub const fn second(self) -> u8 {
        (self.0 & 0x3F) as u8
    }
}

impl fmt::Display for PackedTime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:02}:{:02}", self.hour(), self.minute())
    }
}

/// One logbook line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LogEntry {
    pub kind: LogEventKind,
    pub cycle_count: u64,
    pub time: PackedTime,
}

impl fmt::Display for LogEntry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {:<12} {:>8}", self.time, self.kind.label(), self.cycle_count)
    }
}

#[derive(Debug)]
pub struct MemoryLogbook {
    entries: Deque<LogEntry, LOGBOOK_CAPACITY>,
    lifetime: u64,
    session: u64,
}

impl MemoryLogbook {
    pub fn new() -> Self {
        Self {
            entries: Deque::new(),
            lifetime: 0,
            session: 0,
        }
    }

    /// Logbook restored with a lifetime count, e.g. from a previous run.
    pub fn with_lifetime(lifetime: u64) -> Self {
        Self {
            lifetime,
            ..Self::new()
        }
    }

    #[inline]
    pub const fn session_count(&self) -> u64 {
        self.session
    }

    /// Entries, oldest first.
    pub fn entries(&self) -> impl Iterator<Item = &LogEntry> {
        self.entries.iter()
    }

    /// Entries, newest first, as shown in the logbook view.
    pub fn recent(&self) -> impl Iterator<Item = &LogEntry> {
        self.entries.iter().rev()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn last(&self) -> Option<&LogEntry> {
        self.entries.back()
    }
}

impl Default for MemoryLogbook {
    fn default() -> Self {
        Self::new()
    }
}

impl Logbook for MemoryLogbook {
    fn record_event(&mut self, kind: LogEventKind, cycle_count: u64, timestamp: Duration) {
        if self.entries.is_full() {
            self.entries.pop_front();
        }
        let entry = LogEntry {
            kind,
            cycle_count,
            time: PackedTime::from_uptime(timestamp),
        };
        // Cannot fail, a slot was freed above.
        let _ = self.entries.push_back(entry);
        info!("LOG {entry}");
    }

    fn cycle_count(&self) -> u64 {
        self.lifetime
    }

    fn count_cycle(&mut self) {
        self.lifetime = self.lifetime.saturating_add(1);
        self.session = self.session.saturating_add(1);
    }

    fn reset_counter(&mut self, counter: CounterKind) {
        match counter {
            CounterKind::Session => self.session = 0,
            CounterKind::Lifetime => self.lifetime = 0,
        }
        debug!("{counter:?} counter reset");
    }

    fn clear_events(&mut self) {
        self.entries.clear();
        debug!("Event log cleared");
    }
}
