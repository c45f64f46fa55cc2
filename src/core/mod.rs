//! Runtime core: wiring and lifecycle.
//!
//! The public API from this module is [`Simulator`] (with its builder and
//! [`Config`]) plus the shared handles. Internal modules:
//! - [`ticker`]: the timer loops (one logical writer per feed);
//! - [`simulator`]: wiring, fan-out listener, graceful teardown;
//! - [`handle`]: synchronous shared access paired with event publication;
//! - [`shutdown`]: cross-platform shutdown signal handling.

mod builder;
mod config;
mod handle;
mod shutdown;
mod simulator;
mod ticker;

pub use builder::SimulatorBuilder;
pub use config::Config;
pub use handle::{FeedHandle, StatusHandle};
pub use simulator::Simulator;
