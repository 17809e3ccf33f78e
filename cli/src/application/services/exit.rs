//! Exit trigger shared by every source that can end a session.
//!
//! All sources (signals, operator confirmation, closed input) converge on one
//! [`ExitTrigger`]. The first [`ExitTrigger::fire`] wins; later calls are
//! ignored and every [`ExitToken`] observes the same reason.

use std::sync::Arc;

use tokio::sync::watch;

use crate::domain::ExitReason;

/// Write side of the exit channel. Cheap to clone.
#[derive(Debug, Clone)]
pub struct ExitTrigger {
    tx: Arc<watch::Sender<Option<ExitReason>>>,
}

impl Default for ExitTrigger {
    fn default() -> Self {
        Self::new()
    }
}

impl ExitTrigger {
    #[must_use]
    pub fn new() -> Self {
        let (tx, _rx) = watch::channel(None);
        Self { tx: Arc::new(tx) }
    }

    /// Record `reason` unless a reason was already recorded.
    ///
    /// Returns `true` when this call won.
    pub fn fire(&self, reason: ExitReason) -> bool {
        self.tx.send_if_modified(|current| {
            if current.is_some() {
                return false;
            }
            *current = Some(reason);
            true
        })
    }

    #[must_use]
    pub fn token(&self) -> ExitToken {
        ExitToken {
            rx: self.tx.subscribe(),
        }
    }

    #[must_use]
    pub fn reason(&self) -> Option<ExitReason> {
        *self.tx.borrow()
    }
}

/// Read side of the exit channel.
#[derive(Debug, Clone)]
pub struct ExitToken {
    rx: watch::Receiver<Option<ExitReason>>,
}

impl ExitToken {
    /// The winning reason, if the trigger has fired.
    #[must_use]
    pub fn reason(&self) -> Option<ExitReason> {
        *self.rx.borrow()
    }

    /// Resolves once the trigger fires. Stays pending forever if every
    /// trigger is dropped without firing.
    pub async fn fired(&self) -> ExitReason {
        let mut rx = self.rx.clone();
        let reason = rx.wait_for(Option::is_some).await.ok().and_then(|r| *r);
        match reason {
            Some(reason) => reason,
            None => std::future::pending().await,
        }
    }
}
