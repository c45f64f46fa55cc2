//! # fleetpulse
//!
//! **fleetpulse** is the live-update machinery of a bus-tracking frontend,
//! packaged as an embeddable simulation runtime.
//!
//! It maintains a bounded, newest-first feed of synthesized status updates
//! (delays, arrivals, departures, alerts) with acknowledge/unread semantics,
//! perturbs a small network-status dashboard on a second timer, and fans
//! every change out to registered subscribers so a UI can repaint without
//! polling. There is no backend and no persistence — all data is synthesized
//! from a seedable randomness source on fixed timers.
//!
//! ## Architecture
//! ### Overview
//! ```text
//!              ┌────────────────┐          ┌─────────────────┐
//!              │   FeedTicker   │          │  StatusTicker   │
//!              │ (every 15s:    │          │ (every 8s:      │
//!              │  roll p=0.3)   │          │  clamped walk)  │
//!              └───────┬────────┘          └────────┬────────┘
//!                      ▼                            ▼
//!              ┌────────────────┐          ┌─────────────────┐
//!   user ops ─►│   FeedHandle   │          │  StatusHandle   │
//!  (ack, ack-  │  UpdateFeed    │          │  NetworkStatus  │
//!   all, ...)  │  (bounded, 10) │          │  (snapshot)     │
//!              └───────┬────────┘          └────────┬────────┘
//!                      │   publish(FeedEvent)       │
//!                      └──────────┬─────────────────┘
//!                                 ▼
//!                ┌───────────────────────────────┐
//!                │     Bus (broadcast channel)   │
//!                └───────────────┬───────────────┘
//!                                ▼
//!                      subscriber_listener
//!                        (in Simulator)
//!                                ▼
//!                         SubscriberSet
//!                      ┌─────────┼─────────┐
//!                      ▼         ▼         ▼
//!                   render    logger    custom
//!                 .on_event() .on_event() ...
//! ```
//!
//! ### Lifecycle
//! ```text
//! Simulator::builder(cfg) ──► build() ──► Simulator::run()
//!
//! run():
//!   ├─► spawn subscriber listener
//!   ├─► spawn FeedTicker + StatusTicker (CancellationToken per runtime)
//!   └─► wait for OS signal or stop()
//!         ├─► publish ShutdownRequested
//!         ├─► token.cancel()  → tickers exit at next wait point
//!         ├─► join within cfg.grace
//!         │     ├─ Ok      → publish AllStoppedWithin
//!         │     └─ timeout → publish GraceExceeded → RuntimeError
//!         └─► drain subscriber outboxes (queued events still delivered)
//! ```
//!
//! ## Guarantees
//! - **Bounded feed**: never more than `feed_capacity` updates; oldest
//!   evicted first.
//! - **Ordering**: events are published under the feed's write lock, so
//!   ascending `seq` always matches mutation order.
//! - **Derived unread count**: counted under the same lock as every
//!   mutation; no cached staleness.
//! - **Total operations**: acknowledge/unread operations cannot fail;
//!   acknowledging an absent id is a defined no-op.
//! - **Teardown discipline**: timers are cancelled before state is dropped;
//!   nothing mutates after disposal.
//!
//! ## Features
//! | Area             | Description                                             | Key types                              |
//! |------------------|---------------------------------------------------------|----------------------------------------|
//! | **Feed**         | Bounded newest-first updates with acknowledge/unread.   | [`UpdateFeed`], [`Update`], [`FeedHandle`] |
//! | **Generation**   | Seedable, probability-gated synthesis.                  | [`UpdateGenerator`], [`VehicleDirectory`]  |
//! | **Status**       | Clamped random-walk dashboard snapshot.                 | [`NetworkStatus`], [`StatusHandle`]    |
//! | **Events**       | Broadcast bus + subscriber fan-out.                     | [`Bus`], [`FeedEvent`], [`Subscribe`]  |
//! | **Runtime**      | Timer loops, wiring, graceful teardown.                 | [`Simulator`], [`Config`]              |
//!
//! ## Optional features
//! - `logging`: exports a simple built-in [`LogWriter`] _(demo/reference only)_.
//!
//! ## Example
//! ```rust,no_run
//! use std::sync::Arc;
//! use fleetpulse::{Config, Severity, Simulator, UpdateDraft, UpdateKind};
//!
//! #[tokio::main(flavor = "current_thread")]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let mut cfg = Config::default();
//!     cfg.seed = Some(42); // deterministic stream
//!
//!     let seeds = vec![
//!         UpdateDraft::new(
//!             UpdateKind::Delay,
//!             Severity::Medium,
//!             "Bus Delayed",
//!             "BUS001 is running 5 minutes late due to traffic",
//!         )
//!         .with_vehicle("BUS001"),
//!     ];
//!
//!     let sim = Simulator::builder(cfg)
//!         .with_seed_updates(seeds, 1)
//!         .build();
//!
//!     let feed = sim.feed();
//!     assert_eq!(feed.unread_count(), 1);
//!
//!     // Acknowledge from the UI thread; effect is immediate.
//!     if let Some(first) = feed.snapshot().first() {
//!         feed.acknowledge(first.id);
//!     }
//!
//!     sim.run().await?; // until Ctrl-C or sim.stop()
//!     Ok(())
//! }
//! ```

mod core;
mod error;
mod events;
mod generator;
mod status;
mod subscribers;
mod updates;

// ---- Public re-exports ----

pub use core::{Config, FeedHandle, Simulator, SimulatorBuilder, StatusHandle};
pub use error::RuntimeError;
pub use events::{Bus, EventKind, FeedEvent};
pub use generator::{StaticDirectory, UpdateGenerator, VehicleDirectory};
pub use status::{Health, NetworkStatus, StatusBounds};
pub use subscribers::{Subscribe, SubscriberSet};
pub use updates::{Pushed, Severity, Update, UpdateDraft, UpdateFeed, UpdateId, UpdateKind};

// Optional: expose a simple built-in logger subscriber (demo/reference).
// Enable with: `--features logging`
#[cfg(feature = "logging")]
pub use subscribers::LogWriter;
