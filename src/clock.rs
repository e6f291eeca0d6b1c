//! Fixed-period sample clock
//!
//! Paces a sampling loop by sleeping the calling thread until at least one
//! period has passed since the previous tick. The next deadline is anchored to
//! the moment a tick is actually handed out, so an overrun never causes a
//! burst of catch-up ticks.

use std::thread;
use std::time::{Duration, Instant};

/// Timing of one completed wait
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Tick {
    /// Time since the previous tick (or since the clock started)
    pub interval: Duration,
    /// The caller was already past the deadline when it asked for the tick
    pub overrun: bool,
}

/// Blocking periodic clock
#[derive(Debug, Clone)]
pub struct SampleClock {
    period: Duration,
    last_tick: Option<Instant>,
}

impl SampleClock {
    /// Create a clock ticking every `period`
    #[must_use]
    pub const fn new(period: Duration) -> Self {
        Self {
            period,
            last_tick: None,
        }
    }

    /// Create a clock from a rate in Hz
    ///
    /// Returns `None` for a zero rate.
    #[must_use]
    pub fn from_rate_hz(rate_hz: u32) -> Option<Self> {
        if rate_hz == 0 {
            return None;
        }
        Some(Self::new(Duration::from_secs(1) / rate_hz))
    }

    /// Tick period
    #[must_use]
    pub const fn period(&self) -> Duration {
        self.period
    }

    /// Forget the previous tick; the next wait is measured from its own start
    pub fn reset(&mut self) {
        self.last_tick = None;
    }

    /// Block until at least one period has elapsed since the previous tick
    ///
    /// The first call after construction or [`reset`](Self::reset) waits one
    /// full period from the moment of the call.
    pub fn wait_for_next_tick(&mut self) -> Tick {
        let now = Instant::now();
        let previous = *self.last_tick.get_or_insert(now);
        let deadline = previous + self.period;
        let overrun = now > deadline;

        let mut now = now;
        while now < deadline {
            thread::sleep(deadline - now);
            now = Instant::now();
        }

        self.last_tick = Some(now);
        Tick {
            interval: now - previous,
            overrun,
        }
    }
}
