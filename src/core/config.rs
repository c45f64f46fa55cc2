//! # Global runtime configuration.
//!
//! Provides [`Config`] — centralized settings for the simulator runtime.
//!
//! Every default mirrors the demo constants the frontend shipped with
//! (10-entry feed, 15s generation period with probability 0.3, 8s status
//! jitter). None of those values encode a business rule; treat them as
//! starting points, not contracts.
//!
//! ## Sentinel values
//! - `seed = None` → generator seeds from OS entropy
//! - `grace = 0s` → no wait on shutdown, abandon loops immediately

use std::time::Duration;

use crate::status::StatusBounds;

/// Global configuration for the simulator runtime.
#[derive(Clone, Debug)]
pub struct Config {
    /// Maximum number of updates the feed retains (oldest evicted first).
    ///
    /// Clamped to a minimum of 1 by the feed.
    pub feed_capacity: usize,

    /// Period between feed generation rolls.
    pub feed_period: Duration,

    /// Probability that one roll synthesizes an update.
    ///
    /// Clamped to `0.0..=1.0` by the generator; `0.0` disables generation
    /// (manual injection still works), `1.0` generates every period.
    pub generation_probability: f64,

    /// Period between network status jitter steps.
    pub status_period: Duration,

    /// Floors and ceilings for the status random walk.
    pub status_bounds: StatusBounds,

    /// Capacity of the event bus broadcast ring buffer.
    ///
    /// Receivers that lag behind more than this many events observe `Lagged`
    /// and skip older items. Minimum value is 1 (enforced by the bus).
    pub bus_capacity: usize,

    /// Maximum time to wait for the timer loops to stop after cancellation
    /// before giving up with
    /// [`RuntimeError::GraceExceeded`](crate::RuntimeError::GraceExceeded).
    ///
    /// Subscriber outboxes are drained after the loops stop; the drain waits
    /// for already-queued events and is not bounded by this window.
    pub grace: Duration,

    /// Explicit generator seed for deterministic runs.
    ///
    /// `None` seeds from OS entropy.
    pub seed: Option<u64>,
}

impl Config {
    /// Returns a bus capacity clamped to a minimum of 1.
    #[inline]
    pub fn bus_capacity_clamped(&self) -> usize {
        self.bus_capacity.max(1)
    }

    /// Returns the generation probability clamped to `0.0..=1.0`.
    #[inline]
    pub fn probability_clamped(&self) -> f64 {
        self.generation_probability.clamp(0.0, 1.0)
    }
}

impl Default for Config {
    /// Default configuration:
    ///
    /// - `feed_capacity = 10`
    /// - `feed_period = 15s`, `generation_probability = 0.3`
    /// - `status_period = 8s`, default [`StatusBounds`]
    /// - `bus_capacity = 1024`
    /// - `grace = 5s`
    /// - `seed = None` (OS entropy)
    fn default() -> Self {
        Self {
            feed_capacity: 10,
            feed_period: Duration::from_secs(15),
            generation_probability: 0.3,
            status_period: Duration::from_secs(8),
            status_bounds: StatusBounds::default(),
            bus_capacity: 1024,
            grace: Duration::from_secs(5),
            seed: None,
        }
    }
}
