//! # Non-blocking event fan-out to render callbacks and other observers.
//!
//! [`SubscriberSet`] owns one bounded outbox and one worker task per
//! subscriber. The simulator's bus listener hands every event to
//! [`SubscriberSet::emit_arc`], which copies the `Arc` into each outbox whose
//! subscriber wants that event kind.
//!
//! ```text
//! emit_arc(event)
//!   │  accepts(kind)?
//!   ├─ yes ─► [outbox] ─► worker ─► subscriber.on_event()
//!   │        (bounded)      └─ panic → SubscriberPanicked on the bus
//!   └─ no ──► skipped for that subscriber
//! ```
//!
//! ## Rules
//! - **Per-subscriber FIFO**; no ordering across subscribers (a repaint
//!   callback may process event N while a logger is still on N-5).
//! - **Non-blocking**: delivery uses `try_send`. A full or closed outbox
//!   drops the event for that subscriber and reports `SubscriberOverflow`;
//!   overflow reports themselves are never re-reported.
//! - **Isolation**: a panicking subscriber is reported on the bus and its
//!   worker keeps running; other subscribers never notice.
//! - **Teardown**: [`SubscriberSet::drain`] closes the outboxes and waits for
//!   the workers to finish whatever is still queued.

use std::any::Any;
use std::sync::{Arc, Mutex};

use futures::future::join_all;
use futures::FutureExt;
use tokio::sync::mpsc;
use tokio::task::JoinHandle;

use crate::events::{Bus, FeedEvent};
use crate::subscribers::Subscribe;

/// One subscriber's delivery endpoint.
struct Outbox {
    sub: Arc<dyn Subscribe>,
    tx: mpsc::Sender<Arc<FeedEvent>>,
}

/// Fan-out coordinator for event subscribers.
///
/// Every subscriber sits behind its own bounded outbox and worker task, so a
/// slow repaint or a panicking handler cannot stall the timer loops or the
/// other subscribers.
pub struct SubscriberSet {
    outboxes: Mutex<Vec<Outbox>>,
    workers: Mutex<Vec<JoinHandle<()>>>,
    bus: Bus,
}

impl SubscriberSet {
    /// Builds the set and spawns one worker per subscriber.
    ///
    /// Outbox capacity comes from [`Subscribe::queue_capacity`], clamped to a
    /// minimum of 1.
    #[must_use]
    pub fn new(subs: Vec<Arc<dyn Subscribe>>, bus: Bus) -> Self {
        let mut outboxes = Vec::with_capacity(subs.len());
        let mut workers = Vec::with_capacity(subs.len());

        for sub in subs {
            let (tx, rx) = mpsc::channel(sub.queue_capacity().max(1));
            workers.push(spawn_worker(Arc::clone(&sub), rx, bus.clone()));
            outboxes.push(Outbox { sub, tx });
        }
        Self {
            outboxes: Mutex::new(outboxes),
            workers: Mutex::new(workers),
            bus,
        }
    }

    /// Emits an event to all interested subscribers (clones the event).
    pub fn emit(&self, event: &FeedEvent) {
        self.emit_arc(Arc::new(event.clone()));
    }

    /// Emits a pre-allocated `Arc<FeedEvent>` to all interested subscribers.
    ///
    /// Subscribers whose [`Subscribe::accepts`] declines the event kind are
    /// skipped. Delivery never blocks: a full or closed outbox drops the
    /// event for that subscriber and publishes `SubscriberOverflow`.
    pub fn emit_arc(&self, event: Arc<FeedEvent>) {
        let outboxes = self.lock_outboxes();
        for outbox in outboxes.iter() {
            if !outbox.sub.accepts(event.kind) {
                continue;
            }
            let Err(err) = outbox.tx.try_send(Arc::clone(&event)) else {
                continue;
            };
            // An overflow report that itself overflows must not loop.
            if event.is_subscriber_overflow() {
                continue;
            }
            let reason = match err {
                mpsc::error::TrySendError::Full(_) => "queue full",
                mpsc::error::TrySendError::Closed(_) => "worker gone",
            };
            self.bus
                .publish(FeedEvent::subscriber_overflow(outbox.sub.name(), reason));
        }
    }

    /// Closes the outboxes and waits for every worker to flush its queue.
    ///
    /// Queued events are still delivered; only events emitted after the
    /// drain are lost. Idempotent: later calls return immediately and later
    /// `emit` calls become no-ops.
    pub async fn drain(&self) {
        self.lock_outboxes().clear();

        let workers = std::mem::take(&mut *self.lock_workers());
        // Worker panics are already reported per event; a join error here
        // means the task was torn down externally.
        let _ = join_all(workers).await;
    }

    fn lock_outboxes(&self) -> std::sync::MutexGuard<'_, Vec<Outbox>> {
        self.outboxes
            .lock()
            .expect("subscriber set lock poisoned - unrecoverable state")
    }

    fn lock_workers(&self) -> std::sync::MutexGuard<'_, Vec<JoinHandle<()>>> {
        self.workers
            .lock()
            .expect("subscriber set lock poisoned - unrecoverable state")
    }
}

/// Runs one subscriber until its outbox closes, catching panics per event.
fn spawn_worker(
    sub: Arc<dyn Subscribe>,
    mut rx: mpsc::Receiver<Arc<FeedEvent>>,
    bus: Bus,
) -> JoinHandle<()> {
    tokio::spawn(async move {
        while let Some(ev) = rx.recv().await {
            let handled = std::panic::AssertUnwindSafe(sub.on_event(&ev))
                .catch_unwind()
                .await;
            if let Err(payload) = handled {
                bus.publish(FeedEvent::subscriber_panicked(sub.name(), panic_note(payload)));
            }
        }
    })
}

/// Renders a panic payload into a loggable note.
fn panic_note(payload: Box<dyn Any + Send>) -> String {
    match payload.downcast::<String>() {
        Ok(text) => *text,
        Err(payload) => match payload.downcast::<&'static str>() {
            Ok(text) => (*text).to_string(),
            Err(_) => "opaque panic payload".to_string(),
        },
    }
}
