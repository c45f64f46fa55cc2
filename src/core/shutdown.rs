//! OS signal handling for the simulator's shutdown path.
//!
//! [`wait_for_shutdown_signal`] resolves once the process receives a
//! termination request. On Unix it listens for `SIGINT`, `SIGTERM`, and
//! `SIGQUIT`; elsewhere it falls back to [`tokio::signal::ctrl_c`].

/// Resolves when a termination signal arrives.
///
/// Listeners are registered per call. Errors only if signal registration
/// fails.
#[cfg(unix)]
pub async fn wait_for_shutdown_signal() -> std::io::Result<()> {
    use tokio::signal::unix::{signal, SignalKind};

    let mut sigint = signal(SignalKind::interrupt())?;
    let mut sigterm = signal(SignalKind::terminate())?;
    let mut sigquit = signal(SignalKind::quit())?;

    let name = tokio::select! {
        _ = tokio::signal::ctrl_c() => "ctrl-c",
        _ = sigint.recv() => "SIGINT",
        _ = sigterm.recv() => "SIGTERM",
        _ = sigquit.recv() => "SIGQUIT",
    };
    log::debug!("[shutdown] received {name}");
    Ok(())
}

/// Resolves when a termination signal arrives.
///
/// Listeners are registered per call. Errors only if signal registration
/// fails.
#[cfg(not(unix))]
pub async fn wait_for_shutdown_signal() -> std::io::Result<()> {
    tokio::signal::ctrl_c().await?;
    log::debug!("[shutdown] received ctrl-c");
    Ok(())
}
