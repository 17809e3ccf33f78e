//! OS signal listener.
//!
//! Ctrl-C everywhere; SIGTERM and SIGHUP (terminal closed) on Unix. Any of
//! them fires the shared exit trigger with [`ExitReason::Interrupted`].

use tokio::task::JoinHandle;
use tracing::{info, warn};

use crate::application::services::exit::ExitTrigger;
use crate::domain::ExitReason;

/// Spawn the listener. It fires `trigger` once and exits.
#[must_use]
pub fn spawn_listener(trigger: ExitTrigger) -> JoinHandle<()> {
    tokio::spawn(async move {
        wait_for_signal().await;
        info!("received interrupt signal");
        trigger.fire(ExitReason::Interrupted);
    })
}

async fn ctrl_c() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        warn!(error = %e, "cannot listen for Ctrl-C");
        std::future::pending::<()>().await;
    }
}

#[cfg(unix)]
async fn unix_signal(kind: tokio::signal::unix::SignalKind) {
    match tokio::signal::unix::signal(kind) {
        Ok(mut stream) => {
            if stream.recv().await.is_none() {
                std::future::pending::<()>().await;
            }
        }
        Err(e) => {
            warn!(error = %e, "cannot install signal handler");
            std::future::pending::<()>().await;
        }
    }
}

#[cfg(unix)]
async fn wait_for_signal() {
    use tokio::signal::unix::SignalKind;

    tokio::select! {
        () = ctrl_c() => {}
        () = unix_signal(SignalKind::terminate()) => {}
        () = unix_signal(SignalKind::hangup()) => {}
    }
}

#[cfg(not(unix))]
async fn wait_for_signal() {
    ctrl_c().await;
}
