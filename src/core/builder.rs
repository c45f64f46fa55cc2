//! Builder wiring for the simulator runtime.

use std::sync::Arc;

use tokio_util::sync::CancellationToken;

use super::config::Config;
use super::handle::{FeedHandle, StatusHandle};
use super::simulator::Simulator;
use crate::events::Bus;
use crate::generator::{StaticDirectory, VehicleDirectory};
use crate::status::NetworkStatus;
use crate::subscribers::{Subscribe, SubscriberSet};
use crate::updates::{UpdateDraft, UpdateFeed};

/// Builder for constructing a [`Simulator`].
///
/// ## Example
/// ```rust,no_run
/// use std::sync::Arc;
/// use fleetpulse::{Config, Simulator, StaticDirectory};
///
/// # async fn build() {
/// let sim = Simulator::builder(Config::default())
///     .with_directory(Arc::new(StaticDirectory::demo_fleet()))
///     .build();
/// # let _ = sim;
/// # }
/// ```
pub struct SimulatorBuilder {
    cfg: Config,
    subscribers: Vec<Arc<dyn Subscribe>>,
    directory: Arc<dyn VehicleDirectory>,
    seed_updates: Vec<UpdateDraft>,
    seed_unread: usize,
    initial_status: NetworkStatus,
}

impl SimulatorBuilder {
    /// Creates a new builder with the given configuration.
    ///
    /// Defaults: no subscribers, the demo fleet directory, an empty feed,
    /// and the default [`NetworkStatus`].
    pub fn new(cfg: Config) -> Self {
        Self {
            cfg,
            subscribers: Vec::new(),
            directory: Arc::new(StaticDirectory::demo_fleet()),
            seed_updates: Vec::new(),
            seed_unread: 0,
            initial_status: NetworkStatus::default(),
        }
    }

    /// Sets event subscribers (render callbacks, loggers, metrics).
    ///
    /// Subscribers receive every [`FeedEvent`](crate::events::FeedEvent)
    /// through dedicated workers with bounded queues.
    pub fn with_subscribers(mut self, subscribers: Vec<Arc<dyn Subscribe>>) -> Self {
        self.subscribers = subscribers;
        self
    }

    /// Sets the vehicle/route directory the generator consults.
    pub fn with_directory(mut self, directory: Arc<dyn VehicleDirectory>) -> Self {
        self.directory = directory;
        self
    }

    /// Seeds the feed with initial updates so the panel opens with history.
    ///
    /// `unread` limits how many of the seeded entries stay unacknowledged
    /// (the newest first); the rest are pre-acknowledged. Seeding happens at
    /// build time and publishes no events.
    pub fn with_seed_updates(mut self, drafts: Vec<UpdateDraft>, unread: usize) -> Self {
        self.seed_updates = drafts;
        self.seed_unread = unread;
        self
    }

    /// Overrides the initial network status snapshot.
    pub fn with_initial_status(mut self, status: NetworkStatus) -> Self {
        self.initial_status = status;
        self
    }

    /// Builds the simulator: bus, subscriber workers, and seeded handles.
    ///
    /// The timer loops start only when [`Simulator::run`](Simulator::run)
    /// is called.
    pub fn build(self) -> Simulator {
        let bus = Bus::new(self.cfg.bus_capacity_clamped());
        let subs = Arc::new(SubscriberSet::new(self.subscribers, bus.clone()));
        let token = CancellationToken::new();

        let feed = FeedHandle::new(UpdateFeed::with_capacity(self.cfg.feed_capacity), bus.clone());
        if !self.seed_updates.is_empty() {
            feed.seed(self.seed_updates, self.seed_unread);
        }

        let status = StatusHandle::new(self.initial_status, self.cfg.status_bounds, bus.clone());

        Simulator {
            cfg: self.cfg,
            bus,
            subs,
            feed,
            status,
            directory: self.directory,
            token,
        }
    }
}
