//! Graceful shutdown and signal handling.

use std::time::Duration;

use axum_server::Handle;

use crate::config::SHUTDOWN_GRACE_SECS;

/// Setup graceful shutdown on SIGTERM and SIGINT.
///
/// Signal handlers are registered before this returns, so a signal that
/// arrives once the listener is up always takes the graceful path.
///
/// When either signal is received, the server will:
/// 1. Stop accepting new connections
/// 2. Wait up to `SHUTDOWN_GRACE_SECS` for existing connections to complete
/// 3. Shutdown gracefully
#[cfg(unix)]
pub fn setup_shutdown_handler(handle: Handle) {
    use tokio::signal::unix::{signal, SignalKind};

    let (mut interrupt, mut terminate) =
        match (signal(SignalKind::interrupt()), signal(SignalKind::terminate())) {
            (Ok(interrupt), Ok(terminate)) => (interrupt, terminate),
            (Err(e), _) | (_, Err(e)) => {
                tracing::error!(error = %e, "Failed to install signal handlers");
                return;
            }
        };

    tokio::spawn(async move {
        tokio::select! {
            _ = interrupt.recv() => {
                tracing::info!("Received Ctrl+C, initiating graceful shutdown");
            }
            _ = terminate.recv() => {
                tracing::info!("Received SIGTERM, initiating graceful shutdown");
            }
        }

        begin_shutdown(&handle);
    });
}

/// Setup graceful shutdown on Ctrl+C.
#[cfg(not(unix))]
pub fn setup_shutdown_handler(handle: Handle) {
    tokio::spawn(async move {
        match tokio::signal::ctrl_c().await {
            Ok(()) => tracing::info!("Received Ctrl+C, initiating graceful shutdown"),
            Err(e) => {
                tracing::error!(error = %e, "Failed to install Ctrl+C handler");
                return;
            }
        }

        begin_shutdown(&handle);
    });
}

fn begin_shutdown(handle: &Handle) {
    handle.graceful_shutdown(Some(Duration::from_secs(SHUTDOWN_GRACE_SECS)));
    tracing::info!(
        grace_secs = SHUTDOWN_GRACE_SECS,
        "Graceful shutdown initiated, waiting for connections to close"
    );
}
