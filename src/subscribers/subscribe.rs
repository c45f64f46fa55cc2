//! # Core subscriber trait.
//!
//! `Subscribe` is the extension point for plugging render callbacks and other
//! event handlers into the runtime. Each subscriber is driven by a dedicated
//! worker loop fed by a bounded queue owned by the
//! [`SubscriberSet`](crate::subscribers::SubscriberSet).
//!
//! ## Contract
//! - Implementations may be slow (repaints, I/O, batching) — they do **not**
//!   block the timer loops nor other subscribers.
//! - Each subscriber **declares** its preferred queue capacity via
//!   [`Subscribe::queue_capacity`]. If a queue overflows, events for that
//!   subscriber are dropped and a `SubscriberOverflow` event is published.
//! - Subscribers can narrow their event diet via [`Subscribe::accepts`];
//!   declined kinds never reach the queue.

use async_trait::async_trait;

use crate::events::{EventKind, FeedEvent};

/// Contract for event subscribers.
///
/// Called from a subscriber-dedicated worker task. Implementations should
/// avoid blocking the async runtime (prefer async I/O and cooperative waits).
#[async_trait]
pub trait Subscribe: Send + Sync + 'static {
    /// Handle a single event for this subscriber.
    async fn on_event(&self, event: &FeedEvent);

    /// Human-readable name (for logs/metrics).
    fn name(&self) -> &'static str {
        std::any::type_name::<Self>()
    }

    /// Whether this subscriber wants events of the given kind.
    ///
    /// Defaults to everything. A repaint callback that only cares about the
    /// feed panel can decline `StatusChanged` here instead of filtering
    /// inside `on_event`; declined events are never queued.
    fn accepts(&self, kind: EventKind) -> bool {
        let _ = kind;
        true
    }

    /// Preferred capacity of this subscriber's queue.
    ///
    /// On overflow, events for this subscriber are dropped.
    fn queue_capacity(&self) -> usize {
        1024
    }
}
