//! Feed events: types and broadcast bus.
//!
//! ## Contents
//! - [`EventKind`], [`FeedEvent`] — event classification and payload
//! - [`Bus`] — thin wrapper over `tokio::sync::broadcast`
//!
//! ## Quick reference
//! - **Publishers**: `FeedHandle`, `StatusHandle` (driven by the tickers and
//!   by user actions), `SubscriberSet` workers (overflow/panic), `Simulator`
//!   (shutdown progression).
//! - **Consumers**: `Simulator`'s subscriber listener (fans out to
//!   `SubscriberSet`), plus any raw `Bus::subscribe` receiver.

mod bus;
mod event;

pub use bus::Bus;
pub use event::{EventKind, FeedEvent};
