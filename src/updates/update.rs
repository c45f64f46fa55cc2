//! # Update records shown to the rider.
//!
//! An [`Update`] is a single synthesized status/notification entry: a bus is
//! delayed, arriving, departed, or a service alert. Updates carry display
//! strings and optional cross-references to a vehicle and route; the
//! references are informational only, with no referential-integrity
//! requirement against any directory.
//!
//! Updates are created from an [`UpdateDraft`]: the draft holds everything the
//! generator (or a manual injector) decides, while the feed stamps the
//! identity (`id`) and `created_at` on insertion. This keeps id assignment in
//! one place so uniqueness within a feed is structural, not probabilistic.

use std::fmt;
use std::sync::Arc;
use std::time::SystemTime;

/// Classification of an update.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum UpdateKind {
    /// A vehicle is running behind schedule.
    Delay,
    /// A vehicle is about to arrive at a stop.
    Arrival,
    /// A vehicle has left a stop or terminal.
    Departure,
    /// A service-level alert (detour, road work, disruption).
    Alert,
}

impl UpdateKind {
    /// Returns a short stable label (snake_case) for logs and display glue.
    pub fn as_label(&self) -> &'static str {
        match self {
            UpdateKind::Delay => "delay",
            UpdateKind::Arrival => "arrival",
            UpdateKind::Departure => "departure",
            UpdateKind::Alert => "alert",
        }
    }
}

impl fmt::Display for UpdateKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_label())
    }
}

/// Display-only severity attached to an update.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Severity {
    Low,
    Medium,
    High,
}

impl Severity {
    /// Returns a short stable label (snake_case) for logs and display glue.
    pub fn as_label(&self) -> &'static str {
        match self {
            Severity::Low => "low",
            Severity::Medium => "medium",
            Severity::High => "high",
        }
    }
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_label())
    }
}

/// Identity of an update within one feed.
///
/// Assigned monotonically by the feed on insertion; unique for the lifetime
/// of that feed (including already-evicted entries).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct UpdateId(pub u64);

impl fmt::Display for UpdateId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A single status/notification record.
///
/// Strings are `Arc<str>` so records clone cheaply when broadcast to
/// subscribers.
#[derive(Debug, Clone)]
pub struct Update {
    /// Unique within the owning feed; assigned on insertion.
    pub id: UpdateId,
    /// Classification (delay, arrival, departure, alert).
    pub kind: UpdateKind,
    /// Display-only severity.
    pub severity: Severity,
    /// Short display title.
    pub title: Arc<str>,
    /// Longer display message.
    pub message: Arc<str>,
    /// Wall-clock creation timestamp (display-only).
    pub created_at: SystemTime,
    /// Optional cross-reference to a vehicle (e.g. "BUS001").
    pub vehicle_id: Option<Arc<str>>,
    /// Optional cross-reference to a route display label.
    pub route_label: Option<Arc<str>>,
    /// Whether the rider has viewed/dismissed this update.
    ///
    /// False at creation; flips to true exactly once via the acknowledge
    /// operations. Never reset except by a full-feed clear.
    pub acknowledged: bool,
}

/// Everything the generator decides about an update-to-be.
///
/// The feed turns a draft into an [`Update`] by stamping `id` and
/// `created_at` at insertion time.
#[derive(Debug, Clone)]
pub struct UpdateDraft {
    pub kind: UpdateKind,
    pub severity: Severity,
    pub title: Arc<str>,
    pub message: Arc<str>,
    pub vehicle_id: Option<Arc<str>>,
    pub route_label: Option<Arc<str>>,
}

impl UpdateDraft {
    /// Creates a draft with the given kind/severity and display strings.
    pub fn new(
        kind: UpdateKind,
        severity: Severity,
        title: impl Into<Arc<str>>,
        message: impl Into<Arc<str>>,
    ) -> Self {
        Self {
            kind,
            severity,
            title: title.into(),
            message: message.into(),
            vehicle_id: None,
            route_label: None,
        }
    }

    /// Attaches a vehicle cross-reference.
    #[inline]
    pub fn with_vehicle(mut self, vehicle_id: impl Into<Arc<str>>) -> Self {
        self.vehicle_id = Some(vehicle_id.into());
        self
    }

    /// Attaches a route display label.
    #[inline]
    pub fn with_route(mut self, route_label: impl Into<Arc<str>>) -> Self {
        self.route_label = Some(route_label.into());
        self
    }
}
