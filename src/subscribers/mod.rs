//! # Event subscribers: the presentation callback surface.
//!
//! A tracking frontend observes the feed by implementing [`Subscribe`] and
//! registering it with the [`SimulatorBuilder`](crate::SimulatorBuilder);
//! the runtime delivers every [`FeedEvent`](crate::events::FeedEvent) to
//! every subscriber through its own bounded queue.
//!
//! ## Architecture
//! ```text
//! FeedHandle/tickers ── publish(FeedEvent) ──► Bus ──► listener ──► SubscriberSet
//!                                                                 ┌──────┼──────┐
//!                                                                 ▼      ▼      ▼
//!                                                              render  logger  ...
//! ```
//!
//! ## Implementing custom subscribers
//! ```rust,ignore
//! use async_trait::async_trait;
//! use fleetpulse::{FeedEvent, Subscribe};
//!
//! struct UnreadBadge;
//!
//! #[async_trait]
//! impl Subscribe for UnreadBadge {
//!     async fn on_event(&self, ev: &FeedEvent) {
//!         if let Some(unread) = ev.unread {
//!             // repaint the badge...
//!             let _ = unread;
//!         }
//!     }
//!     fn name(&self) -> &'static str { "unread_badge" }
//! }
//! ```

#[cfg(feature = "logging")]
mod log;
mod set;
mod subscribe;

#[cfg(feature = "logging")]
pub use log::LogWriter;
pub use set::SubscriberSet;
pub use subscribe::Subscribe;
