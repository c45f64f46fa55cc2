//! # Shared handles over the feed and status state.
//!
//! [`FeedHandle`] and [`StatusHandle`] wrap the owned state values in
//! `Arc<RwLock<...>>` and pair every mutation with the matching event on the
//! bus. They are the only write paths: the ticker drives [`FeedHandle::tick`]
//! and [`StatusHandle::jitter`], user actions go through the acknowledge
//! methods, and everything else is read-only observation.
//!
//! ## Rules
//! - All operations are **synchronous and immediate-effect**; no method
//!   suspends, and the lock is never held across an await.
//! - Events are published **while the write guard is still held** (broadcast
//!   `send` never blocks), so bus order always matches mutation order even
//!   when several threads mutate through clones of the same handle.
//! - The unread count attached to events is read under the same lock as the
//!   mutation, so observers never see a stale count.

use std::sync::{Arc, RwLock};

use crate::events::{Bus, EventKind, FeedEvent};
use crate::generator::UpdateGenerator;
use crate::status::{NetworkStatus, StatusBounds};
use crate::updates::{Update, UpdateDraft, UpdateFeed, UpdateId};

/// Cloneable, thread-safe handle to the update feed.
#[derive(Clone)]
pub struct FeedHandle {
    inner: Arc<RwLock<UpdateFeed>>,
    bus: Bus,
}

impl std::fmt::Debug for FeedHandle {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FeedHandle").finish_non_exhaustive()
    }
}

impl FeedHandle {
    /// Wraps a feed and a bus into a shared handle.
    pub(crate) fn new(feed: UpdateFeed, bus: Bus) -> Self {
        Self {
            inner: Arc::new(RwLock::new(feed)),
            bus,
        }
    }

    /// One generation roll: asks the generator for a draft and, if one comes
    /// back, inserts it and publishes `UpdatePublished` plus one
    /// `UpdateEvicted` per entry that fell off the tail.
    ///
    /// Returns the stored update when the roll generated one.
    pub fn tick(&self, generator: &mut UpdateGenerator) -> Option<Update> {
        let draft = generator.roll()?;
        Some(self.inject(draft))
    }

    /// Inserts a draft directly, bypassing the probability gate.
    ///
    /// This is the manual test injector: demos and tests use it to place
    /// deterministic updates in the feed.
    pub fn inject(&self, draft: UpdateDraft) -> Update {
        let mut feed = self.write();
        let pushed = feed.push(draft);
        let unread = feed.unread_count();

        self.bus.publish(
            FeedEvent::new(EventKind::UpdatePublished)
                .with_update(Arc::new(pushed.update.clone()))
                .with_unread(unread),
        );
        for old in pushed.evicted {
            self.bus
                .publish(FeedEvent::new(EventKind::UpdateEvicted).with_update(Arc::new(old)));
        }
        pushed.update
    }

    /// Marks the update matching `id` as acknowledged.
    ///
    /// Publishes `UpdateAcknowledged` only when the flag actually flipped;
    /// an absent or already-acknowledged id is a silent no-op. Returns
    /// whether the flag flipped.
    pub fn acknowledge(&self, id: UpdateId) -> bool {
        let mut feed = self.write();
        let flipped = feed.acknowledge(id);
        if flipped {
            self.bus.publish(
                FeedEvent::new(EventKind::UpdateAcknowledged)
                    .with_update_id(id)
                    .with_unread(feed.unread_count()),
            );
        }
        flipped
    }

    /// Marks every retained update as acknowledged and publishes
    /// `AllAcknowledged`. Returns how many entries flipped.
    pub fn acknowledge_all(&self) -> usize {
        let mut feed = self.write();
        let flipped = feed.acknowledge_all();
        self.bus
            .publish(FeedEvent::new(EventKind::AllAcknowledged).with_unread(0));
        flipped
    }

    /// Number of unacknowledged updates.
    pub fn unread_count(&self) -> usize {
        self.read().unread_count()
    }

    /// Current number of retained updates.
    pub fn len(&self) -> usize {
        self.read().len()
    }

    /// Returns `true` if the feed holds no updates.
    pub fn is_empty(&self) -> bool {
        self.read().is_empty()
    }

    /// Clones the current sequence, newest first.
    pub fn snapshot(&self) -> Vec<Update> {
        self.read().snapshot()
    }

    /// Discards every update and publishes `FeedCleared`.
    pub fn clear(&self) {
        let mut feed = self.write();
        feed.clear();
        self.bus.publish(FeedEvent::new(EventKind::FeedCleared));
    }

    /// Seeds the feed without publishing events.
    ///
    /// Used once at startup so the panel opens with history already in place,
    /// like the frontend's mock seed data. `unread` limits how many of the
    /// seeded entries stay unacknowledged (newest first).
    pub(crate) fn seed(&self, drafts: Vec<UpdateDraft>, unread: usize) {
        let mut feed = self.write();
        let total = drafts.len();
        let acked = total.saturating_sub(unread);
        for (n, draft) in drafts.into_iter().enumerate() {
            let id = feed.push(draft).update.id;
            if n < acked {
                feed.acknowledge(id);
            }
        }
    }

    fn read(&self) -> std::sync::RwLockReadGuard<'_, UpdateFeed> {
        self.inner
            .read()
            .expect("feed lock poisoned - unrecoverable state")
    }

    fn write(&self) -> std::sync::RwLockWriteGuard<'_, UpdateFeed> {
        self.inner
            .write()
            .expect("feed lock poisoned - unrecoverable state")
    }
}

/// Cloneable, thread-safe handle to the network status snapshot.
#[derive(Clone)]
pub struct StatusHandle {
    inner: Arc<RwLock<NetworkStatus>>,
    bounds: StatusBounds,
    bus: Bus,
}

impl std::fmt::Debug for StatusHandle {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("StatusHandle").finish_non_exhaustive()
    }
}

impl StatusHandle {
    pub(crate) fn new(status: NetworkStatus, bounds: StatusBounds, bus: Bus) -> Self {
        Self {
            inner: Arc::new(RwLock::new(status)),
            bounds,
            bus,
        }
    }

    /// One random-walk step; publishes `StatusChanged` with the new snapshot.
    pub fn jitter<R: rand::Rng>(&self, rng: &mut R) -> NetworkStatus {
        let mut status = self
            .inner
            .write()
            .expect("status lock poisoned - unrecoverable state");
        status.jitter(rng, &self.bounds);
        let next = *status;
        self.bus
            .publish(FeedEvent::new(EventKind::StatusChanged).with_status(next));
        next
    }

    /// Current snapshot.
    pub fn current(&self) -> NetworkStatus {
        *self
            .inner
            .read()
            .expect("status lock poisoned - unrecoverable state")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::generator::StaticDirectory;
    use crate::updates::{Severity, UpdateKind};
    use rand::SeedableRng;

    fn handle(capacity: usize) -> (FeedHandle, tokio::sync::broadcast::Receiver<FeedEvent>) {
        let bus = Bus::new(64);
        let rx = bus.subscribe();
        (FeedHandle::new(UpdateFeed::with_capacity(capacity), bus), rx)
    }

    fn draft(n: u64) -> UpdateDraft {
        UpdateDraft::new(
            UpdateKind::Delay,
            Severity::Medium,
            "Bus Delayed",
            format!("delay #{n}"),
        )
    }

    #[tokio::test]
    async fn test_inject_publishes_update_and_evictions() {
        let (handle, mut rx) = handle(2);
        handle.inject(draft(0));
        handle.inject(draft(1));
        let third = handle.inject(draft(2));

        let mut published = Vec::new();
        while let Ok(ev) = rx.try_recv() {
            published.push(ev);
        }

        let kinds: Vec<EventKind> = published.iter().map(|e| e.kind).collect();
        assert_eq!(
            kinds,
            vec![
                EventKind::UpdatePublished,
                EventKind::UpdatePublished,
                EventKind::UpdatePublished,
                EventKind::UpdateEvicted,
            ]
        );
        // The eviction reports the oldest entry, the publish the newest.
        assert_eq!(published[2].update_id, Some(third.id));
        assert_eq!(published[3].update.as_ref().map(|u| u.message.as_ref()), Some("delay #0"));
        // Sequence numbers observe mutation order.
        assert!(published.windows(2).all(|w| w[0].seq < w[1].seq));
    }

    #[tokio::test]
    async fn test_acknowledge_publishes_only_on_change() {
        let (handle, mut rx) = handle(10);
        let u = handle.inject(draft(0));
        let _ = rx.try_recv();

        assert!(handle.acknowledge(u.id));
        let ev = rx.try_recv().expect("ack event");
        assert_eq!(ev.kind, EventKind::UpdateAcknowledged);
        assert_eq!(ev.unread, Some(0));

        // Second acknowledge and an absent id both stay silent.
        assert!(!handle.acknowledge(u.id));
        assert!(!handle.acknowledge(UpdateId(999)));
        assert!(rx.try_recv().is_err());
    }

    #[test]
    fn test_concurrent_injects_publish_in_mutation_order() {
        let bus = Bus::new(64);
        let mut rx = bus.subscribe();
        let handle = FeedHandle::new(UpdateFeed::with_capacity(32), bus);

        let writers: Vec<_> = (0..4u64)
            .map(|t| {
                let handle = handle.clone();
                std::thread::spawn(move || {
                    for n in 0..4 {
                        handle.inject(draft(t * 4 + n));
                    }
                })
            })
            .collect();
        for w in writers {
            w.join().expect("writer thread");
        }

        let mut events = Vec::new();
        while let Ok(ev) = rx.try_recv() {
            events.push(ev);
        }
        events.sort_by_key(|e| e.seq);

        // No acknowledgements, so each insert bumps unread by one. Ascending
        // seq must therefore show 1..=16 regardless of thread interleaving.
        let unreads: Vec<usize> = events
            .iter()
            .filter(|e| e.kind == EventKind::UpdatePublished)
            .map(|e| e.unread.expect("publish carries unread"))
            .collect();
        assert_eq!(unreads, (1..=16).collect::<Vec<usize>>());
    }

    #[tokio::test]
    async fn test_unread_count_tracks_operations() {
        let (handle, _rx) = handle(10);
        let a = handle.inject(draft(0));
        handle.inject(draft(1));
        handle.inject(draft(2));
        assert_eq!(handle.unread_count(), 3);

        handle.acknowledge(a.id);
        assert_eq!(handle.unread_count(), 2);

        assert_eq!(handle.acknowledge_all(), 2);
        assert_eq!(handle.unread_count(), 0);
    }

    #[tokio::test]
    async fn test_tick_respects_probability_gate() {
        let (handle, _rx) = handle(10);
        let dir = std::sync::Arc::new(StaticDirectory::demo_fleet());

        let mut never = UpdateGenerator::from_seed(1, 0.0, dir.clone());
        for _ in 0..20 {
            assert!(handle.tick(&mut never).is_none());
        }
        assert!(handle.is_empty());

        let mut always = UpdateGenerator::from_seed(1, 1.0, dir);
        for _ in 0..12 {
            assert!(handle.tick(&mut always).is_some());
        }
        assert_eq!(handle.len(), 10);
    }

    #[tokio::test]
    async fn test_seed_is_silent_and_limits_unread() {
        let (handle, mut rx) = handle(10);
        handle.seed(vec![draft(0), draft(1), draft(2)], 2);

        assert_eq!(handle.len(), 3);
        assert_eq!(handle.unread_count(), 2);
        assert!(rx.try_recv().is_err(), "seeding must not publish events");
    }

    #[tokio::test]
    async fn test_status_jitter_publishes_snapshot() {
        let bus = Bus::new(16);
        let mut rx = bus.subscribe();
        let handle = StatusHandle::new(NetworkStatus::default(), StatusBounds::default(), bus);

        let mut rng = rand::rngs::StdRng::seed_from_u64(5);
        let next = handle.jitter(&mut rng);

        assert_eq!(handle.current(), next);
        let ev = rx.try_recv().expect("status event");
        assert_eq!(ev.kind, EventKind::StatusChanged);
        assert_eq!(ev.status, Some(next));
    }
}
