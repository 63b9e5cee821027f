//! Fixed-rate logic tick

use std::time::{Duration, Instant};

/// Rate used when the configured one is zero or unset
pub const DEFAULT_REFRESH_RATE: u32 = 60;

/// Highest accepted rate. Keeps the period at one millisecond or more.
pub const MAX_REFRESH_RATE: u32 = 1000;

/// Fixed-rate tick source.
///
/// Ticks are coalesced: however many periods passed since the last poll, at
/// most one tick is reported per poll.
#[derive(Debug, Clone)]
pub struct Ticker {
    period: Duration,
    next: Instant,
}

impl Ticker {
    /// `rate_hz` is an effective rate (see `LauncherConfig::refresh_rate`)
    /// and is clamped to `1..=MAX_REFRESH_RATE`.
    pub fn new(rate_hz: u32, start: Instant) -> Self {
        let period = Duration::from_secs(1) / rate_hz.clamp(1, MAX_REFRESH_RATE);
        Self {
            period,
            next: start + period,
        }
    }

    /// Returns true if a tick is due at `now`, and schedules the next one
    pub fn poll(&mut self, now: Instant) -> bool {
        if now < self.next {
            return false;
        }

        // Skip every missed period so a stall does not produce a burst.
        while self.next <= now {
            self.next += self.period;
        }
        true
    }

    /// How long until the next tick is due
    pub fn time_until_next(&self, now: Instant) -> Duration {
        self.next.saturating_duration_since(now)
    }
}
