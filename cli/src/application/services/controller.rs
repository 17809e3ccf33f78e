//! Application service: pod lifecycle controller.
//!
//! Owns the pod handle for the whole run and sequences
//! `Creating → AwaitingReady → Active → Terminating → Terminated`.
//! Every path out of the run after a pod exists goes through a single
//! termination routine that deletes the pod at most once.
//!
//! Imports only from `crate::domain` and `crate::application`.

use std::time::Duration;

use tracing::{info, warn};

use crate::application::ports::{
    BrowserLauncher, ConfirmationSource, ControlPlane, EndpointProbe, ProgressReporter,
    SessionView,
};
use crate::application::services::exit::{ExitToken, ExitTrigger};
use crate::application::services::monitor::{self, MONITOR_INTERVAL};
use crate::application::services::readiness::{PollPolicy, wait_endpoint, wait_provisioned};
use crate::domain::{
    ConnectionInfo, CreateError, ExitReason, LifecycleState, PodHandle, PodId, PodSpec,
    ReadinessState,
};

/// Tunables of a launch.
#[derive(Debug, Clone, Copy)]
pub struct LaunchOptions {
    /// Internal port of the web desktop behind the proxy.
    pub desktop_port: u16,
    pub open_browser: bool,
    pub provisioning: PollPolicy,
    pub probing: PollPolicy,
    pub monitor_interval: Duration,
}

impl Default for LaunchOptions {
    fn default() -> Self {
        Self {
            desktop_port: 6080,
            open_browser: true,
            provisioning: PollPolicy::PROVISIONING,
            probing: PollPolicy::PROBING,
            monitor_interval: MONITOR_INTERVAL,
        }
    }
}

/// Everything the controller talks to besides the control plane.
pub struct SessionPorts<'a, P, S, B, V, R> {
    pub probe: &'a P,
    pub confirmation: &'a S,
    pub browser: &'a B,
    pub view: &'a V,
    pub reporter: &'a R,
}

/// What happened to the pod when the run ended.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CleanupOutcome {
    /// No pod existed, or it was already cleaned up.
    NotNeeded,
    Deleted(PodId),
    /// The delete was rejected; the pod may still be billing.
    Failed { pod: PodId, error: String },
}

/// Summary of a completed run.
#[derive(Debug, Clone)]
pub struct RunReport {
    /// `None` when the run ended before a pod was created.
    pub pod: Option<PodId>,
    pub exit: ExitReason,
    /// `None` when the run ended before provisioning finished.
    pub readiness: Option<ReadinessState>,
    pub cleanup: CleanupOutcome,
}

enum Raced<T> {
    Exit(ExitReason),
    Done(T),
}

/// Drives one pod from creation to deletion.
pub struct LifecycleController<'a, C> {
    client: &'a C,
    trigger: ExitTrigger,
    options: LaunchOptions,
    state: LifecycleState,
    handle: Option<PodHandle>,
}

impl<'a, C: ControlPlane> LifecycleController<'a, C> {
    /// `trigger` is the shared exit trigger; signal listeners must fire the
    /// same one.
    pub fn new(client: &'a C, trigger: ExitTrigger, options: LaunchOptions) -> Self {
        Self {
            client,
            trigger,
            options,
            state: LifecycleState::Idle,
            handle: None,
        }
    }

    #[must_use]
    pub fn state(&self) -> LifecycleState {
        self.state
    }

    #[must_use]
    pub fn handle(&self) -> Option<&PodHandle> {
        self.handle.as_ref()
    }

    /// Run the full lifecycle of one pod.
    ///
    /// An exit recorded before the run starts ends it without creating
    /// anything. An exit that arrives while the create call is in flight is
    /// honoured once the call returns: a created pod is deleted straight away.
    ///
    /// # Errors
    ///
    /// Returns [`CreateError`] when the pod could not be created. Nothing
    /// exists remotely in that case. Every later failure is reported through
    /// `ports.reporter` and the run continues towards cleanup.
    pub async fn run<P, S, B, V, R>(
        &mut self,
        spec: &PodSpec,
        ports: SessionPorts<'_, P, S, B, V, R>,
    ) -> Result<RunReport, CreateError>
    where
        P: EndpointProbe,
        S: ConfirmationSource,
        B: BrowserLauncher,
        V: SessionView,
        R: ProgressReporter,
    {
        let token = self.trigger.token();
        let reporter = ports.reporter;

        if let Some(reason) = token.reason() {
            info!(exit = %reason, "exit before create, nothing to clean up");
            self.transition(LifecycleState::Terminating);
            self.transition(LifecycleState::Terminated);
            return Ok(RunReport {
                pod: None,
                exit: reason,
                readiness: None,
                cleanup: CleanupOutcome::NotNeeded,
            });
        }

        self.transition(LifecycleState::Creating);
        reporter.step(&format!("Creating pod {}...", spec.name));
        let handle = match self.client.create(spec).await {
            Ok(handle) => handle,
            Err(e) => {
                self.transition(LifecycleState::Terminated);
                return Err(e);
            }
        };
        let pod = handle.id.clone();
        if handle.gpu_display_name.is_empty() {
            reporter.success(&format!("Pod created: {pod}"));
        } else {
            reporter.success(&format!("Pod created: {pod} ({})", handle.gpu_display_name));
        }
        self.handle = Some(handle);

        if let Some(reason) = token.reason() {
            return Ok(self.finish(pod, reason, None, reporter).await);
        }

        self.transition(LifecycleState::AwaitingReady);
        ports.view.banner(&pod);

        reporter.step("Waiting for pod to start...");
        let provisioned = race(
            &token,
            wait_provisioned(self.client, &pod, self.options.provisioning, reporter),
        )
        .await;
        let readiness = match provisioned {
            Raced::Exit(reason) => return Ok(self.finish(pod, reason, None, reporter).await),
            Raced::Done(Ok(state)) => {
                reporter.success("Pod is running");
                state
            }
            Raced::Done(Err(timeout)) => {
                warn!(pod = %pod, error = %timeout, "provisioning wait exhausted");
                reporter.warn(&format!(
                    "{timeout}. Continuing with the connection details known so far."
                ));
                timeout.last
            }
        };

        let info = ConnectionInfo::new(&pod, self.options.desktop_port, &readiness.endpoints);
        reporter.step("Waiting for desktop to respond...");
        let probed = race(
            &token,
            wait_endpoint(ports.probe, &info.desktop_url, self.options.probing),
        )
        .await;
        match probed {
            Raced::Exit(reason) => {
                return Ok(self.finish(pod, reason, Some(readiness), reporter).await);
            }
            Raced::Done(Ok(_)) => reporter.success("Desktop is ready"),
            Raced::Done(Err(timeout)) => {
                warn!(pod = %pod, error = %timeout, "desktop probe exhausted");
                reporter.warn(&format!("{timeout}. It may still be starting."));
            }
        }

        ports.view.connection(&info);
        if self.options.open_browser {
            if let Err(e) = ports.browser.open(&info.desktop_url) {
                reporter.warn(&format!(
                    "Could not open a browser ({e:#}). Open {} manually.",
                    info.desktop_url
                ));
            }
        }

        self.transition(LifecycleState::Active);
        let reason = self.active(&token, &ports).await;
        Ok(self.finish(pod, reason, Some(readiness), reporter).await)
    }

    /// Delete the pod if one is held. A second call is a no-op.
    pub async fn terminate(&mut self) -> CleanupOutcome {
        let Some(handle) = self.handle.take() else {
            return CleanupOutcome::NotNeeded;
        };
        match self.client.delete(&handle.id).await {
            Ok(()) => {
                info!(pod = %handle.id, "pod deleted");
                CleanupOutcome::Deleted(handle.id)
            }
            Err(e) => {
                warn!(pod = %handle.id, error = %e, "pod delete failed");
                CleanupOutcome::Failed {
                    pod: handle.id,
                    error: e.to_string(),
                }
            }
        }
    }

    /// Wait for an exit while the session monitor ticks alongside.
    async fn active<P, S, B, V, R>(
        &self,
        token: &ExitToken,
        ports: &SessionPorts<'_, P, S, B, V, R>,
    ) -> ExitReason
    where
        S: ConfirmationSource,
        V: SessionView,
    {
        let confirmation = async {
            tokio::select! {
                reason = ports.confirmation.confirmed() => {
                    self.trigger.fire(reason);
                }
                _ = token.fired() => {}
            }
            token.fired().await
        };
        let ((), reason) = tokio::join!(
            monitor::run(self.client, ports.view, self.options.monitor_interval, token),
            confirmation,
        );
        reason
    }

    async fn finish(
        &mut self,
        pod: PodId,
        exit: ExitReason,
        readiness: Option<ReadinessState>,
        reporter: &impl ProgressReporter,
    ) -> RunReport {
        info!(pod = %pod, %exit, from = %self.state, "ending session");
        self.transition(LifecycleState::Terminating);
        reporter.step(&format!("Terminating pod {pod}..."));
        let cleanup = self.terminate().await;
        match &cleanup {
            CleanupOutcome::Deleted(id) => reporter.success(&format!("Pod {id} terminated")),
            CleanupOutcome::Failed { pod, error } => reporter.warn(&format!(
                "{error}. Delete it manually with `podlaunch terminate {pod}` or from the RunPod console."
            )),
            CleanupOutcome::NotNeeded => {}
        }
        self.transition(LifecycleState::Terminated);
        RunReport {
            pod: Some(pod),
            exit,
            readiness,
            cleanup,
        }
    }

    fn transition(&mut self, next: LifecycleState) {
        debug_assert!(
            self.state.can_transition_to(next),
            "invalid transition {} -> {next}",
            self.state
        );
        info!(from = %self.state, to = %next, "lifecycle transition");
        self.state = next;
    }
}

/// Race `work` against the exit token.
async fn race<T>(token: &ExitToken, work: impl Future<Output = T>) -> Raced<T> {
    tokio::select! {
        biased;
        reason = token.fired() => Raced::Exit(reason),
        out = work => Raced::Done(out),
    }
}
