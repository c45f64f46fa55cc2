//! # Timer loops driving the simulators.
//!
//! Two loops, one per piece of state: [`FeedTicker`] rolls the generator
//! every `feed_period`, [`StatusTicker`] re-jitters the network status every
//! `status_period`. Each loop owns its randomness source outright — the state
//! is reached only through a handle, so there is exactly one logical writer
//! per feed and insertion order matches timer-fire order.
//!
//! ## Cancellation
//! Every wait point selects on the runtime [`CancellationToken`]; when the
//! hosting view tears the runtime down, the loops exit before the state is
//! dropped, so nothing mutates after disposal.
//!
//! The first fire happens one full period after start (the feed begins with
//! its seed data, not with a burst of synthetic updates).

use std::time::Duration;

use log::debug;
use rand::rngs::StdRng;
use tokio::time::{self, Instant, MissedTickBehavior};
use tokio_util::sync::CancellationToken;

use super::handle::{FeedHandle, StatusHandle};
use crate::generator::UpdateGenerator;

/// Periodically rolls the generator against the feed.
pub(crate) struct FeedTicker {
    pub handle: FeedHandle,
    pub generator: UpdateGenerator,
    pub period: Duration,
}

impl FeedTicker {
    /// Runs until the token is cancelled.
    pub async fn run(mut self, token: CancellationToken) {
        let mut interval = time::interval_at(Instant::now() + self.period, self.period);
        interval.set_missed_tick_behavior(MissedTickBehavior::Delay);

        loop {
            tokio::select! {
                _ = token.cancelled() => break,
                _ = interval.tick() => {
                    if let Some(update) = self.handle.tick(&mut self.generator) {
                        debug!("generated update id={} kind={}", update.id, update.kind);
                    }
                }
            }
        }
        debug!("feed ticker stopped");
    }
}

/// Periodically re-jitters the network status snapshot.
pub(crate) struct StatusTicker {
    pub handle: StatusHandle,
    pub rng: StdRng,
    pub period: Duration,
}

impl StatusTicker {
    /// Runs until the token is cancelled.
    pub async fn run(mut self, token: CancellationToken) {
        let mut interval = time::interval_at(Instant::now() + self.period, self.period);
        interval.set_missed_tick_behavior(MissedTickBehavior::Delay);

        loop {
            tokio::select! {
                _ = token.cancelled() => break,
                _ = interval.tick() => {
                    self.handle.jitter(&mut self.rng);
                }
            }
        }
        debug!("status ticker stopped");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::events::Bus;
    use crate::generator::StaticDirectory;
    use crate::status::{NetworkStatus, StatusBounds};
    use crate::updates::UpdateFeed;
    use rand::SeedableRng;
    use std::sync::Arc;

    #[tokio::test(start_paused = true)]
    async fn test_feed_ticker_generates_once_per_period() {
        let bus = Bus::new(64);
        let handle = FeedHandle::new(UpdateFeed::with_capacity(10), bus);
        let generator = UpdateGenerator::from_seed(
            11,
            1.0,
            Arc::new(StaticDirectory::demo_fleet()),
        );
        let token = CancellationToken::new();
        let ticker = FeedTicker {
            handle: handle.clone(),
            generator,
            period: Duration::from_secs(15),
        };
        let worker = tokio::spawn(ticker.run(token.clone()));
        tokio::task::yield_now().await;

        // Nothing before the first period elapses.
        time::advance(Duration::from_secs(14)).await;
        tokio::task::yield_now().await;
        assert_eq!(handle.len(), 0);

        time::advance(Duration::from_secs(1)).await;
        tokio::task::yield_now().await;
        assert_eq!(handle.len(), 1);

        for _ in 0..3 {
            time::advance(Duration::from_secs(15)).await;
            tokio::task::yield_now().await;
        }
        assert_eq!(handle.len(), 4);

        token.cancel();
        worker.await.expect("ticker task join");

        // No mutation after teardown.
        time::advance(Duration::from_secs(60)).await;
        assert_eq!(handle.len(), 4);
    }

    #[tokio::test(start_paused = true)]
    async fn test_status_ticker_walks_within_bounds() {
        let bus = Bus::new(64);
        let handle = StatusHandle::new(NetworkStatus::default(), StatusBounds::default(), bus);
        let token = CancellationToken::new();
        let ticker = StatusTicker {
            handle: handle.clone(),
            rng: StdRng::seed_from_u64(2),
            period: Duration::from_secs(8),
        };
        let worker = tokio::spawn(ticker.run(token.clone()));

        time::advance(Duration::from_secs(8 * 20)).await;
        tokio::task::yield_now().await;
        let status = handle.current();
        let bounds = StatusBounds::default();
        assert!(status.active_vehicles >= bounds.active.0);
        assert!(status.active_vehicles <= bounds.active.1);

        token.cancel();
        worker.await.expect("ticker task join");
    }
}
