//! Error types used by the fleetpulse runtime.
//!
//! Feed operations themselves are total: pushing, acknowledging (including an
//! absent id), and counting unread entries cannot fail. The only errors in the
//! crate come from the runtime that hosts the timers, defined here as
//! [`RuntimeError`].

use std::time::Duration;

use thiserror::Error;

/// # Errors produced by the fleetpulse runtime.
///
/// These represent failures of the hosting machinery, not of feed operations.
#[non_exhaustive]
#[derive(Error, Debug)]
pub enum RuntimeError {
    /// Shutdown grace period was exceeded; some timer loops or subscriber
    /// workers remained stuck and had to be abandoned.
    #[error("shutdown timeout {grace:?} exceeded; forcing termination")]
    GraceExceeded {
        /// The configured grace duration.
        grace: Duration,
    },
}

impl RuntimeError {
    /// Returns a short stable label (snake_case) for use in logs/metrics.
    ///
    /// # Example
    /// ```
    /// use fleetpulse::RuntimeError;
    /// use std::time::Duration;
    ///
    /// let err = RuntimeError::GraceExceeded { grace: Duration::from_secs(5) };
    /// assert_eq!(err.as_label(), "runtime_grace_exceeded");
    /// ```
    pub fn as_label(&self) -> &'static str {
        match self {
            RuntimeError::GraceExceeded { .. } => "runtime_grace_exceeded",
        }
    }

    /// Returns a human-readable message with details about the error.
    pub fn as_message(&self) -> String {
        match self {
            RuntimeError::GraceExceeded { grace } => {
                format!("grace exceeded after {grace:?}")
            }
        }
    }
}
