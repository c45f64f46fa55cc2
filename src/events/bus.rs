//! # Event bus for broadcasting feed events.
//!
//! [`Bus`] is a thin wrapper around [`tokio::sync::broadcast`] that provides
//! non-blocking publishing from the timer loops and the user-facing handles.
//!
//! ## Architecture
//! ```text
//! Publishers (few):                   Subscriber (one):
//!   FeedTicker  ──┐
//!   StatusTicker ─┼─────► Bus ──────► subscriber_listener ────► SubscriberSet
//!   FeedHandle  ──┘  (broadcast chan)   (in Simulator)
//! ```
//!
//! The runtime uses a single bus receiver (`Simulator`'s listener) that fans
//! events out to user subscribers via [`SubscriberSet`](crate::SubscriberSet).
//! Embedders that want a raw stream can call [`Bus::subscribe`] directly.
//!
//! ## Rules
//! - **Non-blocking publish**: `publish()` never blocks or suspends.
//! - **Bounded capacity**: a single ring buffer stores recent events.
//! - **Lag handling**: slow receivers get `RecvError::Lagged(n)` and skip
//!   the `n` oldest items.
//! - **No persistence**: events sent while no receiver exists are dropped.

use tokio::sync::broadcast;

use super::event::FeedEvent;

/// Broadcast channel for feed events.
///
/// Cheap to clone (internally holds an `Arc`-backed sender); receivers are
/// independent and only observe events sent after they subscribe.
#[derive(Clone, Debug)]
pub struct Bus {
    tx: broadcast::Sender<FeedEvent>,
}

impl Bus {
    /// Creates a new bus with the given ring capacity (minimum 1).
    pub fn new(capacity: usize) -> Self {
        let (tx, _rx) = broadcast::channel::<FeedEvent>(capacity.max(1));
        Self { tx }
    }

    /// Publishes an event to all active receivers; never blocks.
    ///
    /// With no receiver attached the event is simply dropped, which happens
    /// before `Simulator::run` starts its listener or after it exits.
    pub fn publish(&self, ev: FeedEvent) {
        if self.tx.send(ev).is_err() {
            log::trace!("[bus] no receivers, event dropped");
        }
    }

    /// Creates a new receiver that observes events published from now on.
    pub fn subscribe(&self) -> broadcast::Receiver<FeedEvent> {
        self.tx.subscribe()
    }
}
