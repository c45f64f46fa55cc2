//! # Bounded, newest-first feed of updates.
//!
//! [`UpdateFeed`] is the single owner of the update sequence. It is a plain
//! synchronous value with no interior locking: the runtime passes it into the
//! timer callback explicitly (see [`FeedHandle`](crate::core::FeedHandle)),
//! which keeps the unit independently testable.
//!
//! ## Rules
//! - **Bounded**: the feed retains at most `capacity` entries; inserting
//!   beyond that evicts from the tail (oldest first).
//! - **Newest first**: a freshly pushed update is always at index 0.
//! - **Monotonic acknowledgement**: `acknowledged` flips false→true only;
//!   nothing un-acknowledges an entry short of [`UpdateFeed::clear`].
//! - **Derived unread count**: [`UpdateFeed::unread_count`] counts on every
//!   call; there is no cached value that could go stale.
//! - **Total operations**: nothing here has an error path. Acknowledging an
//!   absent id is a defined no-op.

use std::collections::VecDeque;
use std::time::SystemTime;

use super::update::{Update, UpdateDraft, UpdateId};

/// Result of pushing a draft into the feed.
#[derive(Debug, Clone)]
pub struct Pushed {
    /// The stamped update as stored (index 0 of the feed).
    pub update: Update,
    /// Entries evicted from the tail to honor the capacity bound,
    /// oldest last.
    pub evicted: Vec<Update>,
}

/// Bounded, time-ordered sequence of [`Update`] records (newest first).
///
/// # Example
/// ```
/// use fleetpulse::{Severity, UpdateDraft, UpdateFeed, UpdateKind};
///
/// let mut feed = UpdateFeed::with_capacity(10);
/// let pushed = feed.push(UpdateDraft::new(
///     UpdateKind::Delay,
///     Severity::Medium,
///     "Bus Delayed",
///     "BUS001 is running 5 minutes late due to traffic",
/// ));
///
/// assert_eq!(feed.len(), 1);
/// assert_eq!(feed.unread_count(), 1);
///
/// assert!(feed.acknowledge(pushed.update.id));
/// assert_eq!(feed.unread_count(), 0);
/// ```
#[derive(Debug)]
pub struct UpdateFeed {
    items: VecDeque<Update>,
    capacity: usize,
    next_id: u64,
}

impl UpdateFeed {
    /// Creates an empty feed retaining at most `capacity` entries.
    ///
    /// Capacity is clamped to a minimum of 1.
    pub fn with_capacity(capacity: usize) -> Self {
        let capacity = capacity.max(1);
        Self {
            items: VecDeque::with_capacity(capacity),
            capacity,
            next_id: 0,
        }
    }

    /// Stamps the draft with the next id and the current wall-clock time,
    /// inserts it at the front, and truncates the tail to `capacity`.
    ///
    /// Returns the stored update together with any evicted entries.
    pub fn push(&mut self, draft: UpdateDraft) -> Pushed {
        let update = Update {
            id: UpdateId(self.next_id),
            kind: draft.kind,
            severity: draft.severity,
            title: draft.title,
            message: draft.message,
            created_at: SystemTime::now(),
            vehicle_id: draft.vehicle_id,
            route_label: draft.route_label,
            acknowledged: false,
        };
        self.next_id += 1;

        self.items.push_front(update.clone());

        let mut evicted = Vec::new();
        while self.items.len() > self.capacity {
            if let Some(old) = self.items.pop_back() {
                evicted.push(old);
            }
        }

        Pushed { update, evicted }
    }

    /// Marks the update matching `id` as acknowledged.
    ///
    /// Returns `true` if the flag actually flipped. An absent id, or an id
    /// that is already acknowledged, is a no-op returning `false` — calling
    /// this twice with the same id has the same effect as calling it once.
    pub fn acknowledge(&mut self, id: UpdateId) -> bool {
        match self.items.iter_mut().find(|u| u.id == id) {
            Some(u) if !u.acknowledged => {
                u.acknowledged = true;
                true
            }
            _ => false,
        }
    }

    /// Marks every update as acknowledged.
    ///
    /// Returns how many entries actually flipped.
    pub fn acknowledge_all(&mut self) -> usize {
        let mut flipped = 0;
        for u in self.items.iter_mut() {
            if !u.acknowledged {
                u.acknowledged = true;
                flipped += 1;
            }
        }
        flipped
    }

    /// Number of updates the rider has not acknowledged yet.
    ///
    /// Derived on every call; always consistent with what [`UpdateFeed::iter`]
    /// observes.
    pub fn unread_count(&self) -> usize {
        self.items.iter().filter(|u| !u.acknowledged).count()
    }

    /// Current number of retained updates.
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Returns `true` if the feed holds no updates.
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Configured retention bound.
    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Iterates newest first.
    pub fn iter(&self) -> impl Iterator<Item = &Update> {
        self.items.iter()
    }

    /// Returns the update matching `id`, if retained.
    pub fn get(&self, id: UpdateId) -> Option<&Update> {
        self.items.iter().find(|u| u.id == id)
    }

    /// Clones the current sequence, newest first.
    pub fn snapshot(&self) -> Vec<Update> {
        self.items.iter().cloned().collect()
    }

    /// Discards every update.
    ///
    /// This is the only operation that loses acknowledgement state; id
    /// assignment keeps counting, so ids stay unique across a clear.
    pub fn clear(&mut self) {
        self.items.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::updates::update::{Severity, UpdateKind};

    fn draft(n: u64) -> UpdateDraft {
        UpdateDraft::new(
            UpdateKind::Arrival,
            Severity::Low,
            "Bus Arriving",
            format!("synthetic update #{n}"),
        )
        .with_vehicle("BUS001")
    }

    #[test]
    fn test_push_inserts_at_front() {
        let mut feed = UpdateFeed::with_capacity(10);
        for n in 0..5 {
            let pushed = feed.push(draft(n));
            let front = feed.iter().next().map(|u| u.id);
            assert_eq!(front, Some(pushed.update.id), "new update must be at index 0");
        }
    }

    #[test]
    fn test_length_never_exceeds_capacity() {
        let mut feed = UpdateFeed::with_capacity(10);
        for n in 0..100 {
            feed.push(draft(n));
            assert!(feed.len() <= 10, "feed grew past capacity at push #{n}");
        }
        assert_eq!(feed.len(), 10);
    }

    #[test]
    fn test_eviction_is_oldest_first() {
        let mut feed = UpdateFeed::with_capacity(3);
        let first = feed.push(draft(0)).update.id;
        feed.push(draft(1));
        feed.push(draft(2));

        let pushed = feed.push(draft(3));
        assert_eq!(pushed.evicted.len(), 1);
        assert_eq!(pushed.evicted[0].id, first);
        assert!(feed.get(first).is_none());
    }

    #[test]
    fn test_acknowledge_flips_once() {
        let mut feed = UpdateFeed::with_capacity(10);
        let id = feed.push(draft(0)).update.id;

        assert!(feed.acknowledge(id));
        assert_eq!(feed.unread_count(), 0);

        // Idempotent: second call reports no change.
        assert!(!feed.acknowledge(id));
        assert_eq!(feed.unread_count(), 0);
    }

    #[test]
    fn test_acknowledge_absent_id_is_noop() {
        let mut feed = UpdateFeed::with_capacity(10);
        feed.push(draft(0));
        feed.push(draft(1));
        let before = feed.snapshot();

        assert!(!feed.acknowledge(UpdateId(999)));

        assert_eq!(feed.unread_count(), 2);
        let after = feed.snapshot();
        assert_eq!(before.len(), after.len());
        for (a, b) in before.iter().zip(after.iter()) {
            assert_eq!(a.id, b.id);
            assert_eq!(a.acknowledged, b.acknowledged);
        }
    }

    #[test]
    fn test_acknowledge_all_zeroes_unread() {
        let mut feed = UpdateFeed::with_capacity(10);
        for n in 0..7 {
            feed.push(draft(n));
        }
        assert_eq!(feed.unread_count(), 7);
        assert_eq!(feed.acknowledge_all(), 7);
        assert_eq!(feed.unread_count(), 0);
        // Second sweep finds nothing to flip.
        assert_eq!(feed.acknowledge_all(), 0);
    }

    #[test]
    fn test_seeded_scenario() {
        // Feed starts with 3 seeded updates, 2 unread.
        let mut feed = UpdateFeed::with_capacity(10);
        let a = feed.push(draft(0)).update.id;
        let b = feed.push(draft(1)).update.id;
        let c = feed.push(draft(2)).update.id;
        feed.acknowledge(c);
        assert_eq!(feed.unread_count(), 2);

        // Acknowledge one unread id.
        assert!(feed.acknowledge(a));
        assert_eq!(feed.unread_count(), 1);

        // Acknowledge all.
        feed.acknowledge_all();
        assert_eq!(feed.unread_count(), 0);
        assert!(feed.get(b).map(|u| u.acknowledged).unwrap_or(false));

        // 12 further generations: final length is 10 and the retained
        // entries are the 10 most recently created.
        let mut pushed_ids = Vec::new();
        for n in 3..15 {
            pushed_ids.push(feed.push(draft(n)).update.id);
        }
        assert_eq!(feed.len(), 10);
        let retained: Vec<UpdateId> = feed.iter().map(|u| u.id).collect();
        let expected: Vec<UpdateId> = pushed_ids.iter().rev().take(10).copied().collect();
        assert_eq!(retained, expected);
    }

    #[test]
    fn test_ids_stay_unique_across_clear() {
        let mut feed = UpdateFeed::with_capacity(4);
        let before = feed.push(draft(0)).update.id;
        feed.clear();
        assert!(feed.is_empty());
        let after = feed.push(draft(1)).update.id;
        assert!(after > before);
    }

    #[test]
    fn test_capacity_clamped_to_one() {
        let mut feed = UpdateFeed::with_capacity(0);
        feed.push(draft(0));
        let keep = feed.push(draft(1)).update.id;
        assert_eq!(feed.len(), 1);
        assert_eq!(feed.iter().next().map(|u| u.id), Some(keep));
    }
}
