//! Update data model: records and the bounded feed.
//!
//! ## Contents
//! - [`Update`], [`UpdateDraft`], [`UpdateId`], [`UpdateKind`], [`Severity`] —
//!   the record types
//! - [`UpdateFeed`], [`Pushed`] — the bounded newest-first sequence and its
//!   total operations
//!
//! The feed is a plain owned value; shared access and event publication live
//! in `core::handle`.

mod feed;
mod update;

pub use feed::{Pushed, UpdateFeed};
pub use update::{Severity, Update, UpdateDraft, UpdateId, UpdateKind};
