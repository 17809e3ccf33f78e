//! Application service: two-phase readiness wait.
//!
//! Phase 1 polls the control plane until the pod exposes a public TCP port.
//! Phase 2 probes the desktop gateway until it answers. Both phases are
//! bounded and tolerate transient failures; neither is fatal.
//!
//! Imports only from `crate::domain` and `crate::application::ports`.

use std::time::Duration;

use tracing::debug;

use crate::application::ports::{ControlPlane, EndpointProbe, ProgressReporter};
use crate::domain::readiness::is_listening;
use crate::domain::{Phase, PodId, ProbeTimeout, ReadinessState, ReadinessTimeout};

/// Interval and attempt budget of a polling phase.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PollPolicy {
    pub interval: Duration,
    pub max_attempts: u32,
}

impl PollPolicy {
    /// Status polling: every 5 s for about ten minutes.
    pub const PROVISIONING: Self = Self {
        interval: Duration::from_secs(5),
        max_attempts: 120,
    };

    /// Gateway probing: every 5 s for about five minutes.
    pub const PROBING: Self = Self {
        interval: Duration::from_secs(5),
        max_attempts: 60,
    };
}

/// Poll the pod status until it is [`Phase::Ready`].
///
/// Phase changes are reported through `reporter`. Query errors are retried
/// on the next tick.
///
/// # Errors
///
/// Returns [`ReadinessTimeout`] carrying the last observed state once the
/// attempt budget is spent.
pub async fn wait_provisioned(
    client: &impl ControlPlane,
    pod: &PodId,
    policy: PollPolicy,
    reporter: &impl ProgressReporter,
) -> Result<ReadinessState, ReadinessTimeout> {
    let mut state = ReadinessState::default();
    let mut reported: Option<Phase> = None;

    for attempt in 1..=policy.max_attempts {
        match client.query_status(pod).await {
            Ok(status) => {
                state.observe(&status);
                debug!(pod = %pod, attempt, phase = %state.phase, "status poll");
                if reported != Some(state.phase) {
                    reporter.progress(&format!("Pod {}...", state.phase));
                    reported = Some(state.phase);
                }
                if state.phase == Phase::Ready {
                    return Ok(state);
                }
            }
            Err(e) => debug!(pod = %pod, attempt, error = %e, "status query failed, retrying"),
        }
        if attempt < policy.max_attempts {
            tokio::time::sleep(policy.interval).await;
        }
    }

    Err(ReadinessTimeout {
        attempts: policy.max_attempts,
        last: state,
    })
}

/// Probe `url` until it answers with a listening status.
///
/// Returns the status code that proved the service up.
///
/// # Errors
///
/// Returns [`ProbeTimeout`] once the attempt budget is spent.
pub async fn wait_endpoint(
    probe: &impl EndpointProbe,
    url: &str,
    policy: PollPolicy,
) -> Result<u16, ProbeTimeout> {
    for attempt in 1..=policy.max_attempts {
        match probe.probe(url).await {
            Ok(status) if is_listening(status) => {
                debug!(url, attempt, status, "endpoint is up");
                return Ok(status);
            }
            Ok(status) => debug!(url, attempt, status, "endpoint not ready"),
            Err(e) => debug!(url, attempt, error = %e, "endpoint probe failed"),
        }
        if attempt < policy.max_attempts {
            tokio::time::sleep(policy.interval).await;
        }
    }

    Err(ProbeTimeout {
        url: url.to_string(),
        attempts: policy.max_attempts,
    })
}
