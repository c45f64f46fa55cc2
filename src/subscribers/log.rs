//! # Simple logging subscriber for debugging and demos.
//!
//! [`LogWriter`] emits one `log` line per event in a compact key=value
//! format. Primarily useful for development and the bundled demos; implement
//! a custom [`Subscribe`](crate::Subscribe) for structured output.
//!
//! ## Output format
//! ```text
//! [update] id=4 kind=delay severity=medium unread=3
//! [ack] id=4 unread=2
//! [ack-all]
//! [evicted] id=0 kind=arrival
//! [status] active=41 on_time=37 delayed=5 avg=3.4m health=operational
//! [shutdown-requested]
//! ```

use async_trait::async_trait;
use log::{info, warn};

use crate::events::{EventKind, FeedEvent};
use crate::subscribers::Subscribe;

/// Log-backed subscriber, enabled via the `logging` feature.
#[derive(Debug, Default)]
pub struct LogWriter;

#[async_trait]
impl Subscribe for LogWriter {
    async fn on_event(&self, e: &FeedEvent) {
        match e.kind {
            EventKind::UpdatePublished => {
                if let Some(u) = &e.update {
                    info!(
                        "[update] id={} kind={} severity={} unread={:?}",
                        u.id, u.kind, u.severity, e.unread
                    );
                }
            }
            EventKind::UpdateAcknowledged => {
                info!("[ack] id={:?} unread={:?}", e.update_id, e.unread);
            }
            EventKind::AllAcknowledged => {
                info!("[ack-all]");
            }
            EventKind::UpdateEvicted => {
                if let Some(u) = &e.update {
                    info!("[evicted] id={} kind={}", u.id, u.kind);
                }
            }
            EventKind::FeedCleared => {
                info!("[cleared]");
            }
            EventKind::StatusChanged => {
                if let Some(s) = &e.status {
                    info!(
                        "[status] active={} on_time={} delayed={} avg={:.1}m health={}",
                        s.active_vehicles,
                        s.on_time,
                        s.delayed,
                        s.average_delay_minutes,
                        s.health.as_label()
                    );
                }
            }
            EventKind::SubscriberOverflow => {
                warn!(
                    "[overflow] subscriber={:?} reason={:?}",
                    e.subscriber, e.reason
                );
            }
            EventKind::SubscriberPanicked => {
                warn!("[panic] subscriber={:?} info={:?}", e.subscriber, e.reason);
            }
            EventKind::ShutdownRequested => {
                info!("[shutdown-requested]");
            }
            EventKind::AllStoppedWithin => {
                info!("[all-stopped-within-grace]");
            }
            EventKind::GraceExceeded => {
                warn!("[grace-exceeded]");
            }
        }
    }

    fn name(&self) -> &'static str {
        "log_writer"
    }
}
