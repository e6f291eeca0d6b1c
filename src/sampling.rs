//! Fixed-rate sampling loop
//!
//! [`SampleLoop`] reads one sample per [`SampleClock`] tick and hands it to a
//! consumer closure. Cycles never overlap. The loop stops when its sample
//! budget is spent, when its [`CancelToken`] is cancelled (checked between
//! cycles), or on the first bus error, which is returned.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::{Duration, Instant};

use crate::clock::SampleClock;
use crate::device::Mpu9250Driver;
use crate::interface::Transport;
use crate::sample::ScaledSample;
use crate::Error;

/// Cooperative stop signal shared between threads
#[derive(Debug, Clone, Default)]
pub struct CancelToken(Arc<AtomicBool>);

impl CancelToken {
    /// Create a token that is not cancelled
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Request the loop to stop after the current cycle
    pub fn cancel(&self) {
        self.0.store(true, Ordering::Release);
    }

    /// True once [`cancel`](Self::cancel) has been called on any clone
    #[must_use]
    pub fn is_cancelled(&self) -> bool {
        self.0.load(Ordering::Acquire)
    }
}

/// Outcome of a completed [`SampleLoop::run`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LoopSummary {
    /// Samples delivered to the consumer
    pub samples: u64,
    /// Wall time spent in the loop
    pub elapsed: Duration,
    /// Ticks where the cycle took longer than one period
    pub overruns: u64,
}

/// Periodic read-and-deliver loop
#[derive(Debug, Clone)]
pub struct SampleLoop {
    clock: SampleClock,
    max_samples: Option<u64>,
    cancel: CancelToken,
}

impl SampleLoop {
    /// Create a loop with the given period, no sample limit and a fresh token
    #[must_use]
    pub fn new(period: Duration) -> Self {
        Self {
            clock: SampleClock::new(period),
            max_samples: None,
            cancel: CancelToken::new(),
        }
    }

    /// Stop after `samples` samples have been delivered
    #[must_use]
    pub fn with_max_samples(mut self, samples: u64) -> Self {
        self.max_samples = Some(samples);
        self
    }

    /// Use an existing cancellation token
    #[must_use]
    pub fn with_cancel_token(mut self, token: CancelToken) -> Self {
        self.cancel = token;
        self
    }

    /// Token that stops this loop
    #[must_use]
    pub fn cancel_token(&self) -> CancelToken {
        self.cancel.clone()
    }

    /// Sampling period
    #[must_use]
    pub const fn period(&self) -> Duration {
        self.clock.period()
    }

    /// Run until the sample limit, cancellation, or the first error
    ///
    /// Each cycle reads one sample with [`Mpu9250Driver::read_sample`], passes
    /// it to `consumer`, then waits for the next tick.
    ///
    /// # Errors
    ///
    /// Returns the first driver error; no further cycles run after it.
    pub fn run<T, F>(
        &mut self,
        driver: &mut Mpu9250Driver<T>,
        mut consumer: F,
    ) -> Result<LoopSummary, Error<T::Error>>
    where
        T: Transport,
        F: FnMut(&ScaledSample),
    {
        let latency = Duration::from_micros(u64::from(driver.config().max_latency_us()));
        if self.clock.period() < latency {
            warn!(
                "sampling period {} us is shorter than filter latency {} us",
                self.clock.period().as_micros() as u64,
                latency.as_micros() as u64
            );
        }

        self.clock.reset();
        let start = Instant::now();
        let mut samples = 0u64;
        let mut overruns = 0u64;

        while !self.cancel.is_cancelled() {
            if self.max_samples.is_some_and(|max| samples >= max) {
                break;
            }

            let sample = driver.read_sample().inspect_err(|_| {
                error!("sample {} failed, stopping", samples);
            })?;
            consumer(&sample);
            samples += 1;

            if self.max_samples.is_some_and(|max| samples >= max) {
                break;
            }
            if self.clock.wait_for_next_tick().overrun {
                overruns += 1;
            }
        }

        let summary = LoopSummary {
            samples,
            elapsed: start.elapsed(),
            overruns,
        };
        debug!(
            "sampling stopped after {} samples, {} overruns",
            summary.samples, summary.overruns
        );
        Ok(summary)
    }
}
