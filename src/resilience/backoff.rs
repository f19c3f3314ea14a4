//! Exponential backoff with jitter.
//!
//! Strategies are immutable values. Recording a failure or a success
//! produces a new strategy; the old one is left untouched, so a host can
//! swap its whole backoff state in one step.

use std::fmt::Debug;
use std::time::Duration;
use rand::Rng;

/// Policy that decides how long a failing host stays out of rotation.
pub trait BackoffStrategy: Clone + Debug + Send + Sync + 'static {
    /// Delay for the current failure count.
    ///
    /// May return a different value on every call when the strategy uses
    /// jitter. Never mutates the strategy.
    fn delay(&self) -> Duration;

    /// A strategy with one more consecutive failure recorded.
    fn next(&self) -> Self;

    /// A strategy with the failure count cleared and the same configuration.
    fn reset(&self) -> Self;

    /// Number of consecutive failures since the last reset.
    fn failures(&self) -> u32;
}

/// Configuration for [`ExponentialBackoff`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BackoffOptions {
    /// Delay after the first failure.
    pub initial: Duration,
    /// Upper bound for any delay.
    pub max: Duration,
    /// Jitter magnitude. Up to `round(jitter)` doublings are randomly skipped.
    pub jitter: f64,
}

impl Default for BackoffOptions {
    fn default() -> Self {
        Self {
            initial: Duration::from_millis(300),
            max: Duration::from_secs(10),
            jitter: 1.0,
        }
    }
}

/// Doubles the delay on every consecutive failure, capped at `max`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ExponentialBackoff {
    options: BackoffOptions,
    counter: u32,
}

impl ExponentialBackoff {
    /// Create a strategy with no recorded failures.
    pub fn new(options: BackoffOptions) -> Self {
        Self { options, counter: 0 }
    }

    /// The configuration this strategy was built with.
    pub fn options(&self) -> &BackoffOptions {
        &self.options
    }

    /// Delay for a given jitter sample in `[0, 1)`.
    fn delay_with_sample(&self, sample: f64) -> Duration {
        let skipped = (sample * self.options.jitter).round();
        // f64 -> u32 casts saturate, negative values clamp to 0
        let exponent = (f64::from(self.counter) - skipped).max(0.0) as u32;
        let multiplier = 2u32.saturating_pow(exponent);

        self.options
            .initial
            .saturating_mul(multiplier)
            .min(self.options.max)
    }
}

impl Default for ExponentialBackoff {
    fn default() -> Self {
        Self::new(BackoffOptions::default())
    }
}

impl BackoffStrategy for ExponentialBackoff {
    fn delay(&self) -> Duration {
        let sample = if self.options.jitter > 0.0 {
            rand::thread_rng().gen::<f64>()
        } else {
            0.0
        };
        self.delay_with_sample(sample)
    }

    fn next(&self) -> Self {
        Self {
            options: self.options,
            counter: self.counter.saturating_add(1),
        }
    }

    fn reset(&self) -> Self {
        Self::new(self.options)
    }

    fn failures(&self) -> u32 {
        self.counter
    }
}
