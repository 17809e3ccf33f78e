//! Application service: session monitor.
//!
//! While a pod is active, show the account balance and remaining runtime on
//! entry and then on every tick. The monitor never asks for termination; it
//! stops as soon as the exit token fires.

use std::time::Duration;

use tokio::time::{self, MissedTickBehavior};
use tracing::debug;

use crate::application::ports::{ControlPlane, SessionView};
use crate::application::services::exit::ExitToken;

/// Time between two balance updates.
pub const MONITOR_INTERVAL: Duration = Duration::from_secs(5 * 60);

/// Run until `token` fires. Failed queries are skipped.
pub async fn run(
    client: &impl ControlPlane,
    view: &impl SessionView,
    interval: Duration,
    token: &ExitToken,
) {
    let mut ticker = time::interval(interval);
    ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);

    loop {
        let tick = async {
            ticker.tick().await;
            client.query_account().await
        };
        tokio::select! {
            biased;
            reason = token.fired() => {
                debug!(%reason, "session monitor stopped");
                return;
            }
            result = tick => match result {
                Ok(status) => {
                    debug!(
                        balance = status.balance,
                        burn_rate = status.burn_rate_per_hour,
                        "account status"
                    );
                    view.account(&status);
                    view.terminate_hint();
                }
                Err(e) => debug!(error = %e, "account query failed, skipping"),
            },
        }
    }
}
