//! # Runtime events emitted by the feed, the status simulator, and the runtime.
//!
//! The [`EventKind`] enum classifies event types across four categories:
//! - **Feed events**: the update sequence changed (published, acknowledged,
//!   evicted, cleared)
//! - **Status events**: the network status snapshot was re-jittered
//! - **Subscriber events**: fan-out problems (overflow, panic)
//! - **Runtime events**: shutdown progression
//!
//! The [`FeedEvent`] struct carries the payload: the update involved, the
//! unread count after the operation, the new status snapshot, and so on.
//!
//! ## Ordering guarantees
//! Each event has a globally unique sequence number (`seq`) that increases
//! monotonically. Feed events are published while the feed's write lock is
//! held, so ascending `seq` matches mutation order; observers can rely on it
//! to replay state.

use std::sync::atomic::{AtomicU64, Ordering as AtomicOrdering};
use std::sync::Arc;
use std::time::SystemTime;

use crate::status::NetworkStatus;
use crate::updates::{Update, UpdateId};

/// Global sequence counter for event ordering.
static EVENT_SEQ: AtomicU64 = AtomicU64::new(0);

/// Classification of runtime events.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EventKind {
    // === Feed events ===
    /// A new update entered the feed at index 0.
    ///
    /// Sets: `update`, `unread`, `at`, `seq`.
    UpdatePublished,

    /// An update was acknowledged by the rider.
    ///
    /// Sets: `update_id`, `unread`, `at`, `seq`.
    UpdateAcknowledged,

    /// Every retained update was acknowledged at once.
    ///
    /// Sets: `unread` (always 0), `at`, `seq`.
    AllAcknowledged,

    /// An update fell off the tail to honor the capacity bound.
    ///
    /// Sets: `update`, `at`, `seq`.
    UpdateEvicted,

    /// The feed was reset to empty.
    ///
    /// Sets: `at`, `seq`.
    FeedCleared,

    // === Status events ===
    /// The network status snapshot was re-jittered.
    ///
    /// Sets: `status`, `at`, `seq`.
    StatusChanged,

    // === Subscriber events ===
    /// Subscriber dropped an event (queue full or worker closed).
    ///
    /// Sets: `subscriber`, `reason`, `at`, `seq`.
    SubscriberOverflow,

    /// Subscriber panicked during event processing.
    ///
    /// Sets: `subscriber`, `reason` (panic info), `at`, `seq`.
    SubscriberPanicked,

    // === Runtime events ===
    /// Shutdown requested (OS signal observed or `stop()` called).
    ///
    /// Sets: `at`, `seq`.
    ShutdownRequested,

    /// All timer loops stopped within the configured grace period.
    ///
    /// Sets: `at`, `seq`.
    AllStoppedWithin,

    /// Grace period exceeded; some loops did not stop in time.
    ///
    /// Sets: `at`, `seq`.
    GraceExceeded,
}

/// Runtime event with optional payload.
///
/// - `seq`: monotonic global sequence for ordering
/// - `at`: wall-clock timestamp (for logs)
/// - other optional fields are set depending on the [`EventKind`]
#[derive(Debug, Clone)]
pub struct FeedEvent {
    /// Globally unique, monotonically increasing sequence number.
    pub seq: u64,
    /// Wall-clock timestamp.
    pub at: SystemTime,
    /// Event classification.
    pub kind: EventKind,

    /// The update involved (published or evicted).
    pub update: Option<Arc<Update>>,
    /// Id of the update involved, when the full record is not needed.
    pub update_id: Option<UpdateId>,
    /// Unread count observed immediately after the operation.
    pub unread: Option<usize>,
    /// New network status snapshot.
    pub status: Option<NetworkStatus>,
    /// Name of the subscriber involved, if applicable.
    pub subscriber: Option<&'static str>,
    /// Human-readable reason (overflow details, panic info).
    pub reason: Option<Arc<str>>,
}

impl FeedEvent {
    /// Creates a new event of the given kind with the current timestamp and
    /// the next global sequence number.
    pub fn new(kind: EventKind) -> Self {
        Self {
            seq: EVENT_SEQ.fetch_add(1, AtomicOrdering::Relaxed),
            at: SystemTime::now(),
            kind,
            update: None,
            update_id: None,
            unread: None,
            status: None,
            subscriber: None,
            reason: None,
        }
    }

    /// Attaches the full update record (also sets `update_id`).
    #[inline]
    pub fn with_update(mut self, update: Arc<Update>) -> Self {
        self.update_id = Some(update.id);
        self.update = Some(update);
        self
    }

    /// Attaches just an update id.
    #[inline]
    pub fn with_update_id(mut self, id: UpdateId) -> Self {
        self.update_id = Some(id);
        self
    }

    /// Attaches the unread count observed after the operation.
    #[inline]
    pub fn with_unread(mut self, unread: usize) -> Self {
        self.unread = Some(unread);
        self
    }

    /// Attaches a network status snapshot.
    #[inline]
    pub fn with_status(mut self, status: NetworkStatus) -> Self {
        self.status = Some(status);
        self
    }

    /// Attaches a human-readable reason.
    #[inline]
    pub fn with_reason(mut self, reason: impl Into<Arc<str>>) -> Self {
        self.reason = Some(reason.into());
        self
    }

    /// Creates a subscriber overflow event.
    #[inline]
    pub fn subscriber_overflow(subscriber: &'static str, reason: &'static str) -> Self {
        let mut ev = FeedEvent::new(EventKind::SubscriberOverflow).with_reason(reason);
        ev.subscriber = Some(subscriber);
        ev
    }

    /// Creates a subscriber panic event.
    #[inline]
    pub fn subscriber_panicked(subscriber: &'static str, info: String) -> Self {
        let mut ev = FeedEvent::new(EventKind::SubscriberPanicked).with_reason(info);
        ev.subscriber = Some(subscriber);
        ev
    }

    #[inline]
    pub fn is_subscriber_overflow(&self) -> bool {
        matches!(self.kind, EventKind::SubscriberOverflow)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_seq_is_monotonic() {
        let a = FeedEvent::new(EventKind::FeedCleared);
        let b = FeedEvent::new(EventKind::FeedCleared);
        let c = FeedEvent::new(EventKind::FeedCleared);
        assert!(a.seq < b.seq);
        assert!(b.seq < c.seq);
    }

    #[test]
    fn test_builders_set_payload() {
        let ev = FeedEvent::new(EventKind::UpdateAcknowledged)
            .with_update_id(UpdateId(7))
            .with_unread(3);
        assert_eq!(ev.kind, EventKind::UpdateAcknowledged);
        assert_eq!(ev.update_id, Some(UpdateId(7)));
        assert_eq!(ev.unread, Some(3));
        assert!(ev.update.is_none());
    }
}
