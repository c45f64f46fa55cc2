//! # Simulator: wires the feed, status walk, fan-out, and teardown.
//!
//! The [`Simulator`] owns the event bus, a [`SubscriberSet`], and the shared
//! handles. It spawns the timer loops, forwards bus events to subscribers,
//! and guarantees the one piece of resource discipline this system needs:
//! the timers are cancelled before the state is torn down.
//!
//! ## High-level architecture
//! ```text
//! SimulatorBuilder::build()
//!   - Bus, SubscriberSet (one worker per subscriber)
//!   - FeedHandle (seeded), StatusHandle
//!
//! Simulator::run():
//!   - subscriber_listener(): Bus.subscribe() ─► SubscriberSet::emit(&ev)
//!   - spawn FeedTicker  ── every feed_period ──► FeedHandle::tick()
//!   - spawn StatusTicker ─ every status_period ─► StatusHandle::jitter()
//!
//! Event flow:
//!   tickers / user ops ── publish(FeedEvent) ──► Bus ──► listener ──► SubscriberSet
//!
//! Shutdown path (OS signal or stop()):
//!   - Bus.publish(ShutdownRequested)
//!   - token.cancel()           → tickers exit at their next wait point
//!   - wait up to cfg.grace:
//!       ├─ all joined  → Bus.publish(AllStoppedWithin)
//!       └─ timeout     → Bus.publish(GraceExceeded) + RuntimeError
//!   - subs.drain()             → queued subscriber events are flushed
//! ```
//!
//! ## Example
//! ```rust,no_run
//! use fleetpulse::{Config, Simulator};
//!
//! #[tokio::main(flavor = "current_thread")]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let sim = Simulator::builder(Config::default()).build();
//!
//!     // Hand the feed to the UI layer.
//!     let feed = sim.feed();
//!     let _unread = feed.unread_count();
//!
//!     // Runs until Ctrl-C (or sim.stop() from another task).
//!     sim.run().await?;
//!     Ok(())
//! }
//! ```

use std::sync::Arc;

use rand::rngs::StdRng;
use rand::SeedableRng;
use tokio::task::JoinSet;
use tokio_util::sync::CancellationToken;

use super::builder::SimulatorBuilder;
use super::config::Config;
use super::handle::{FeedHandle, StatusHandle};
use super::shutdown;
use super::ticker::{FeedTicker, StatusTicker};
use crate::error::RuntimeError;
use crate::events::{Bus, EventKind, FeedEvent};
use crate::generator::{UpdateGenerator, VehicleDirectory};
use crate::subscribers::SubscriberSet;

/// Coordinates the timer loops, event delivery, and graceful teardown.
pub struct Simulator {
    pub(crate) cfg: Config,
    pub(crate) bus: Bus,
    pub(crate) subs: Arc<SubscriberSet>,
    pub(crate) feed: FeedHandle,
    pub(crate) status: StatusHandle,
    pub(crate) directory: Arc<dyn VehicleDirectory>,
    pub(crate) token: CancellationToken,
}

impl std::fmt::Debug for Simulator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Simulator")
            .field("cfg", &self.cfg)
            .finish_non_exhaustive()
    }
}

impl Simulator {
    /// Starts building a simulator with the given configuration.
    pub fn builder(cfg: Config) -> SimulatorBuilder {
        SimulatorBuilder::new(cfg)
    }

    /// Handle to the update feed (acknowledge, snapshot, inject).
    pub fn feed(&self) -> FeedHandle {
        self.feed.clone()
    }

    /// Handle to the network status snapshot.
    pub fn status(&self) -> StatusHandle {
        self.status.clone()
    }

    /// The event bus; `subscribe()` for a raw event stream.
    pub fn bus(&self) -> Bus {
        self.bus.clone()
    }

    /// Requests teardown: timers stop at their next wait point and
    /// [`Simulator::run`] winds down.
    pub fn stop(&self) {
        self.token.cancel();
    }

    /// Runs the timer loops until a termination signal arrives or
    /// [`Simulator::stop`] is called, then tears down within
    /// [`Config::grace`].
    pub async fn run(&self) -> Result<(), RuntimeError> {
        self.subscriber_listener();

        let mut set = JoinSet::new();
        self.spawn_tickers(&mut set);
        let result = self.drive_shutdown(&mut set).await;

        // Flush whatever the subscribers still have queued before reporting
        // the run as finished.
        self.subs.drain().await;
        result
    }

    /// Subscribes to the bus and forwards events to the subscriber set
    /// (fire-and-forget).
    fn subscriber_listener(&self) {
        let mut rx = self.bus.subscribe();
        let set = Arc::clone(&self.subs);
        let token = self.token.clone();
        tokio::spawn(async move {
            loop {
                tokio::select! {
                    _ = token.cancelled() => break,
                    ev = rx.recv() => match ev {
                        Ok(ev) => set.emit_arc(Arc::new(ev)),
                        Err(tokio::sync::broadcast::error::RecvError::Lagged(_)) => continue,
                        Err(tokio::sync::broadcast::error::RecvError::Closed) => break,
                    },
                }
            }
        });
    }

    /// Spawns the feed and status tickers into the join set.
    fn spawn_tickers(&self, set: &mut JoinSet<()>) {
        let generator = match self.cfg.seed {
            Some(seed) => UpdateGenerator::from_seed(
                seed,
                self.cfg.probability_clamped(),
                Arc::clone(&self.directory),
            ),
            None => UpdateGenerator::new(
                self.cfg.probability_clamped(),
                Arc::clone(&self.directory),
            ),
        };
        let feed_ticker = FeedTicker {
            handle: self.feed.clone(),
            generator,
            period: self.cfg.feed_period,
        };
        set.spawn(feed_ticker.run(self.token.clone()));

        let rng = match self.cfg.seed {
            // Offset so feed and status draw from distinct streams.
            Some(seed) => StdRng::seed_from_u64(seed.wrapping_add(1)),
            None => StdRng::from_os_rng(),
        };
        let status_ticker = StatusTicker {
            handle: self.status.clone(),
            rng,
            period: self.cfg.status_period,
        };
        set.spawn(status_ticker.run(self.token.clone()));
    }

    /// Waits until a shutdown is requested, then winds the loops down.
    async fn drive_shutdown(&self, set: &mut JoinSet<()>) -> Result<(), RuntimeError> {
        tokio::select! {
            _ = shutdown::wait_for_shutdown_signal() => {
                self.bus.publish(FeedEvent::new(EventKind::ShutdownRequested));
                self.token.cancel();
                self.wait_all_with_grace(set).await
            }
            _ = self.token.cancelled() => {
                self.bus.publish(FeedEvent::new(EventKind::ShutdownRequested));
                self.wait_all_with_grace(set).await
            }
        }
    }

    /// Waits for the timer loops to finish within the configured grace
    /// period.
    ///
    /// Publishes [`EventKind::AllStoppedWithin`] on success, or
    /// [`EventKind::GraceExceeded`] on timeout and returns
    /// [`RuntimeError::GraceExceeded`].
    async fn wait_all_with_grace(&self, set: &mut JoinSet<()>) -> Result<(), RuntimeError> {
        let grace = self.cfg.grace;
        let done = async { while set.join_next().await.is_some() {} };

        match tokio::time::timeout(grace, done).await {
            Ok(()) => {
                self.bus.publish(FeedEvent::new(EventKind::AllStoppedWithin));
                Ok(())
            }
            Err(_) => {
                self.bus.publish(FeedEvent::new(EventKind::GraceExceeded));
                Err(RuntimeError::GraceExceeded { grace })
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::subscribers::Subscribe;
    use crate::updates::{Severity, UpdateDraft, UpdateKind};
    use async_trait::async_trait;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::time::Duration;

    fn test_config() -> Config {
        Config {
            feed_period: Duration::from_secs(15),
            generation_probability: 1.0,
            seed: Some(42),
            grace: Duration::from_secs(5),
            ..Config::default()
        }
    }

    #[tokio::test(start_paused = true)]
    async fn test_run_generates_then_stops_cleanly() {
        let sim = Arc::new(Simulator::builder(test_config()).build());
        let feed = sim.feed();

        let driver = {
            let sim = Arc::clone(&sim);
            tokio::spawn(async move { sim.run().await })
        };
        tokio::task::yield_now().await;

        for _ in 0..2 {
            tokio::time::advance(Duration::from_secs(16)).await;
            tokio::task::yield_now().await;
        }
        assert_eq!(feed.len(), 2);

        sim.stop();
        let result = driver.await.expect("driver join");
        assert!(result.is_ok());

        // Timers are gone; nothing mutates after teardown.
        tokio::time::advance(Duration::from_secs(120)).await;
        tokio::task::yield_now().await;
        assert_eq!(feed.len(), 2);
    }

    struct PublishedCounter(Arc<AtomicUsize>);

    #[async_trait]
    impl Subscribe for PublishedCounter {
        async fn on_event(&self, _ev: &FeedEvent) {
            self.0.fetch_add(1, Ordering::SeqCst);
        }
        fn name(&self) -> &'static str {
            "published_counter"
        }
        fn accepts(&self, kind: EventKind) -> bool {
            kind == EventKind::UpdatePublished
        }
    }

    #[tokio::test(start_paused = true)]
    async fn test_subscribers_flushed_before_run_returns() {
        let seen = Arc::new(AtomicUsize::new(0));
        let subs: Vec<Arc<dyn Subscribe>> =
            vec![Arc::new(PublishedCounter(Arc::clone(&seen)))];
        let sim = Arc::new(
            Simulator::builder(test_config())
                .with_subscribers(subs)
                .build(),
        );

        let driver = {
            let sim = Arc::clone(&sim);
            tokio::spawn(async move { sim.run().await })
        };
        tokio::task::yield_now().await;

        for _ in 0..2 {
            tokio::time::advance(Duration::from_secs(16)).await;
            tokio::task::yield_now().await;
        }
        tokio::task::yield_now().await;

        sim.stop();
        driver
            .await
            .expect("driver join")
            .expect("clean shutdown");

        // Both generated updates made it through the fan-out before run()
        // returned; nothing was stranded in an outbox.
        assert_eq!(seen.load(Ordering::SeqCst), 2);
    }

    #[tokio::test(start_paused = true)]
    async fn test_seeded_feed_visible_before_run() {
        let seeds = vec![
            UpdateDraft::new(UpdateKind::Delay, Severity::Medium, "Bus Delayed", "seed 1"),
            UpdateDraft::new(UpdateKind::Arrival, Severity::Low, "Bus Arriving Soon", "seed 2"),
            UpdateDraft::new(UpdateKind::Alert, Severity::High, "Route Change", "seed 3"),
        ];
        let sim = Simulator::builder(test_config())
            .with_seed_updates(seeds, 2)
            .build();

        assert_eq!(sim.feed().len(), 3);
        assert_eq!(sim.feed().unread_count(), 2);
    }
}
