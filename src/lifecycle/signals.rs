//! OS signal handling.
//!
//! # Responsibilities
//! - Register signal handlers (SIGTERM, SIGINT, SIGHUP)
//! - Translate signals to internal events
//!
//! # Design Decisions
//! - Uses Tokio's signal handling (async-safe)
//! - SIGHUP triggers config reload, not shutdown

use tokio::signal::unix::{signal, SignalKind};
use tokio::sync::mpsc;

/// What the control loop should do in response to a signal.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SignalEvent {
    Shutdown,
    Reload,
}

/// Spawn a task forwarding OS signals as [`SignalEvent`]s.
pub fn spawn_signal_listener() -> std::io::Result<mpsc::UnboundedReceiver<SignalEvent>> {
    let mut sigterm = signal(SignalKind::terminate())?;
    let mut sigint = signal(SignalKind::interrupt())?;
    let mut sighup = signal(SignalKind::hangup())?;
    let (tx, rx) = mpsc::unbounded_channel();

    tokio::spawn(async move {
        loop {
            let event = tokio::select! {
                _ = sigterm.recv() => SignalEvent::Shutdown,
                _ = sigint.recv() => SignalEvent::Shutdown,
                _ = sighup.recv() => SignalEvent::Reload,
            };
            tracing::info!(?event, "Signal received");
            if tx.send(event).is_err() {
                break;
            }
        }
    });

    Ok(rx)
}
