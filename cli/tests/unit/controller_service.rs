//! Lifecycle controller: sequencing, exit paths, and exactly-once cleanup.

#![allow(clippy::expect_used)]

use std::time::Duration;

use podlaunch_cli::application::services::controller::{
    CleanupOutcome, LaunchOptions, LifecycleController, RunReport, SessionPorts,
};
use podlaunch_cli::application::services::exit::ExitTrigger;
use podlaunch_cli::application::services::readiness::PollPolicy;
use podlaunch_cli::domain::{CreateError, ExitReason, LifecycleState, Phase, PodId, QueryError};

use crate::mocks::{
    FakeBrowser, FakeConfirmation, FakeControlPlane, FakeProbe, RecordingReporter, RecordingView,
    pulling, queued, ready, spec,
};

fn options() -> LaunchOptions {
    LaunchOptions::default()
}

struct Harness {
    probe: FakeProbe,
    confirmation: FakeConfirmation,
    browser: FakeBrowser,
    view: RecordingView,
    reporter: RecordingReporter,
}

impl Harness {
    fn new(probe: FakeProbe, confirmation: FakeConfirmation) -> Self {
        Self {
            probe,
            confirmation,
            browser: FakeBrowser::default(),
            view: RecordingView::default(),
            reporter: RecordingReporter::default(),
        }
    }

    fn confirming_after(secs: u64) -> Self {
        Self::new(
            FakeProbe::up(),
            FakeConfirmation::After(Duration::from_secs(secs), ExitReason::Confirmed),
        )
    }

    async fn run(
        &self,
        controller: &mut LifecycleController<'_, FakeControlPlane>,
    ) -> Result<RunReport, CreateError> {
        controller
            .run(
                &spec(),
                SessionPorts {
                    probe: &self.probe,
                    confirmation: &self.confirmation,
                    browser: &self.browser,
                    view: &self.view,
                    reporter: &self.reporter,
                },
            )
            .await
    }
}

#[tokio::test(start_paused = true)]
async fn confirmed_session_runs_every_phase_and_deletes_once() {
    let client = FakeControlPlane::creating("pod-1", "X").with_statuses(vec![
        Ok(queued()),
        Ok(pulling()),
        Ok(ready("1.2.3.4", 22, 31022)),
    ]);
    let harness = Harness::new(
        FakeProbe::answering(vec![Ok(401)]),
        FakeConfirmation::After(Duration::from_secs(1), ExitReason::Confirmed),
    );
    let mut controller = LifecycleController::new(&client, ExitTrigger::new(), options());

    let report = harness.run(&mut controller).await.expect("run");

    assert_eq!(report.pod, Some(PodId::new("pod-1")));
    assert_eq!(report.exit, ExitReason::Confirmed);
    assert_eq!(report.cleanup, CleanupOutcome::Deleted(report.pod.clone().expect("pod")));
    let readiness = report.readiness.expect("readiness");
    assert_eq!(readiness.phase, Phase::Ready);
    assert_eq!(readiness.endpoints.public_ip.as_deref(), Some("1.2.3.4"));
    assert_eq!(readiness.endpoints.tcp_port(22), Some(31022));

    assert_eq!(client.status_calls(), 3);
    assert_eq!(harness.probe.calls(), 1);
    assert_eq!(client.deleted().len(), 1);
    assert_eq!(client.deleted()[0].as_str(), "pod-1");
    assert_eq!(controller.state(), LifecycleState::Terminated);
    assert!(controller.handle().is_none());

    assert_eq!(
        harness.browser.opened(),
        vec!["https://pod-1-6080.proxy.runpod.net".to_string()]
    );
    let events = harness.view.events();
    assert_eq!(events[0], "banner:pod-1");
    assert!(events[1].starts_with("connection:"));
    assert!(events[1].contains("SSH=ssh root@1.2.3.4 -p 31022"));
    assert_eq!(harness.view.count("account:"), 1);
    assert!(harness.reporter.any("success:", "Pod created: pod-1 (X)"));
    assert!(harness.reporter.any("success:", "Pod pod-1 terminated"));
}

#[tokio::test(start_paused = true)]
async fn create_failure_never_deletes() {
    let client = FakeControlPlane::failing_create(CreateError::Api {
        status: 400,
        message: "no GPUs available".to_string(),
    });
    let harness = Harness::confirming_after(1);
    let mut controller = LifecycleController::new(&client, ExitTrigger::new(), options());

    let err = harness.run(&mut controller).await.expect_err("create fails");

    assert!(err.to_string().contains("no GPUs available"));
    assert!(client.deleted().is_empty());
    assert_eq!(client.status_calls(), 0);
    assert_eq!(controller.state(), LifecycleState::Terminated);
    assert!(harness.view.events().is_empty());
}

#[tokio::test(start_paused = true)]
async fn signal_during_provisioning_deletes_the_pod() {
    let client = FakeControlPlane::creating("pod-1", "").with_status_fallback(queued());
    let harness = Harness::new(FakeProbe::up(), FakeConfirmation::Never);
    let trigger = ExitTrigger::new();
    let signal = trigger.clone();
    tokio::spawn(async move {
        tokio::time::sleep(Duration::from_secs(12)).await;
        signal.fire(ExitReason::Interrupted);
    });
    let mut controller = LifecycleController::new(&client, trigger, options());

    let report = harness.run(&mut controller).await.expect("run");

    assert_eq!(report.exit, ExitReason::Interrupted);
    assert!(report.readiness.is_none());
    assert_eq!(client.deleted().len(), 1);
    assert_eq!(client.deleted()[0].as_str(), "pod-1");
    assert!(client.status_calls() >= 2);
    assert!(client.status_calls() < PollPolicy::PROVISIONING.max_attempts);
    assert_eq!(harness.probe.calls(), 0);
    assert!(harness.browser.opened().is_empty());
    assert_eq!(harness.view.count("account:"), 0);
}

#[tokio::test(start_paused = true)]
async fn interrupt_during_create_deletes_the_created_pod() {
    let trigger = ExitTrigger::new();
    let client = FakeControlPlane::creating("pod-7", "")
        .firing_on_create(trigger.clone(), ExitReason::Interrupted);
    let harness = Harness::confirming_after(1);
    let mut controller = LifecycleController::new(&client, trigger, options());

    let report = harness.run(&mut controller).await.expect("run");

    assert_eq!(report.exit, ExitReason::Interrupted);
    assert_eq!(client.status_calls(), 0);
    assert_eq!(client.deleted().len(), 1);
    assert_eq!(client.create_calls(), 1);
    assert_eq!(client.deleted()[0].as_str(), "pod-7");
    assert!(harness.view.events().is_empty());
}

#[tokio::test(start_paused = true)]
async fn exit_before_run_creates_nothing() {
    let trigger = ExitTrigger::new();
    trigger.fire(ExitReason::Interrupted);
    let client = FakeControlPlane::creating("pod-3", "");
    let harness = Harness::confirming_after(1);
    let mut controller = LifecycleController::new(&client, trigger, options());

    let report = harness.run(&mut controller).await.expect("run");

    assert_eq!(report.exit, ExitReason::Interrupted);
    assert_eq!(report.pod, None);
    assert_eq!(report.cleanup, CleanupOutcome::NotNeeded);
    assert_eq!(client.create_calls(), 0);
    assert!(client.deleted().is_empty());
    assert_eq!(client.status_calls(), 0);
    assert_eq!(controller.state(), LifecycleState::Terminated);
    assert!(controller.handle().is_none());
    assert!(harness.view.events().is_empty());
    assert!(harness.reporter.events().is_empty());
}

#[tokio::test(start_paused = true)]
async fn provisioning_timeout_still_reaches_active() {
    let client = FakeControlPlane::creating("pod-1", "").with_status_fallback(queued());
    let harness = Harness::confirming_after(1);
    let opts = LaunchOptions {
        provisioning: PollPolicy {
            interval: Duration::from_secs(5),
            max_attempts: 3,
        },
        ..options()
    };
    let mut controller = LifecycleController::new(&client, ExitTrigger::new(), opts);

    let report = harness.run(&mut controller).await.expect("run");

    assert_eq!(report.exit, ExitReason::Confirmed);
    assert_eq!(report.readiness.expect("partial").phase, Phase::Queued);
    assert_eq!(client.status_calls(), 3);
    assert!(harness.reporter.any("warn:", "3 status checks"));
    assert_eq!(harness.view.count("connection:"), 1);
    assert_eq!(harness.view.count("account:"), 1);
    assert_eq!(client.deleted().len(), 1);
}

#[tokio::test(start_paused = true)]
async fn probe_timeout_opens_browser_anyway() {
    let client = FakeControlPlane::creating("pod-1", "")
        .with_statuses(vec![Ok(ready("1.2.3.4", 22, 31022))]);
    let harness = Harness::new(
        FakeProbe::answering(vec![Err(QueryError::Transport("refused".to_string()))]),
        FakeConfirmation::After(Duration::from_secs(1), ExitReason::Confirmed),
    );
    let opts = LaunchOptions {
        probing: PollPolicy {
            interval: Duration::from_secs(5),
            max_attempts: 4,
        },
        ..options()
    };
    let mut controller = LifecycleController::new(&client, ExitTrigger::new(), opts);

    let report = harness.run(&mut controller).await.expect("run");

    assert_eq!(harness.probe.calls(), 4);
    assert!(harness.reporter.any("warn:", "timeout waiting for"));
    assert_eq!(harness.browser.opened().len(), 1);
    assert_eq!(report.cleanup, CleanupOutcome::Deleted(report.pod.clone().expect("pod")));
}

#[tokio::test(start_paused = true)]
async fn closed_input_ends_the_session() {
    let client = FakeControlPlane::creating("pod-1", "")
        .with_statuses(vec![Ok(ready("1.2.3.4", 22, 31022))]);
    let harness = Harness::new(
        FakeProbe::up(),
        FakeConfirmation::After(Duration::ZERO, ExitReason::InputClosed),
    );
    let mut controller = LifecycleController::new(&client, ExitTrigger::new(), options());

    let report = harness.run(&mut controller).await.expect("run");

    assert_eq!(report.exit, ExitReason::InputClosed);
    assert_eq!(client.deleted().len(), 1);
}

#[tokio::test(start_paused = true)]
async fn signal_while_active_wins_over_later_confirmation() {
    let client = FakeControlPlane::creating("pod-1", "")
        .with_statuses(vec![Ok(ready("1.2.3.4", 22, 31022))]);
    let harness = Harness::confirming_after(3600);
    let trigger = ExitTrigger::new();
    let signal = trigger.clone();
    tokio::spawn(async move {
        tokio::time::sleep(Duration::from_secs(11 * 60)).await;
        signal.fire(ExitReason::Interrupted);
    });
    let mut controller = LifecycleController::new(&client, trigger, options());

    let report = harness.run(&mut controller).await.expect("run");

    assert_eq!(report.exit, ExitReason::Interrupted);
    // Immediate tick plus the ones at 5 and 10 minutes.
    assert_eq!(harness.view.count("account:"), 3);
    assert_eq!(harness.view.count("hint"), 3);
    assert_eq!(client.deleted().len(), 1);
}

#[tokio::test(start_paused = true)]
async fn terminate_twice_deletes_once() {
    let client = FakeControlPlane::creating("pod-1", "")
        .with_statuses(vec![Ok(ready("1.2.3.4", 22, 31022))]);
    let harness = Harness::confirming_after(1);
    let mut controller = LifecycleController::new(&client, ExitTrigger::new(), options());

    harness.run(&mut controller).await.expect("run");
    let again = controller.terminate().await;

    assert_eq!(again, CleanupOutcome::NotNeeded);
    assert_eq!(client.deleted().len(), 1);
}

#[tokio::test(start_paused = true)]
async fn terminate_without_handle_is_noop() {
    let client = FakeControlPlane::creating("pod-1", "");
    let mut controller = LifecycleController::new(&client, ExitTrigger::new(), options());

    assert_eq!(controller.terminate().await, CleanupOutcome::NotNeeded);
    assert!(client.deleted().is_empty());
}

#[tokio::test(start_paused = true)]
async fn failed_delete_is_reported_not_retried() {
    let client = FakeControlPlane::creating("pod-9", "")
        .with_statuses(vec![Ok(ready("1.2.3.4", 22, 31022))])
        .with_failing_delete();
    let harness = Harness::confirming_after(1);
    let mut controller = LifecycleController::new(&client, ExitTrigger::new(), options());

    let report = harness.run(&mut controller).await.expect("run");

    assert!(matches!(
        report.cleanup,
        CleanupOutcome::Failed { ref pod, .. } if pod.as_str() == "pod-9"
    ));
    assert_eq!(client.deleted().len(), 1);
    assert!(harness.reporter.any("warn:", "podlaunch terminate pod-9"));
}

#[tokio::test(start_paused = true)]
async fn no_browser_option_skips_launch() {
    let client = FakeControlPlane::creating("pod-1", "")
        .with_statuses(vec![Ok(ready("1.2.3.4", 22, 31022))]);
    let harness = Harness::confirming_after(1);
    let opts = LaunchOptions {
        open_browser: false,
        ..options()
    };
    let mut controller = LifecycleController::new(&client, ExitTrigger::new(), opts);

    harness.run(&mut controller).await.expect("run");

    assert!(harness.browser.opened().is_empty());
    assert_eq!(harness.view.count("connection:"), 1);
}

#[tokio::test(start_paused = true)]
async fn browser_failure_is_a_warning() {
    let client = FakeControlPlane::creating("pod-1", "")
        .with_statuses(vec![Ok(ready("1.2.3.4", 22, 31022))]);
    let mut harness = Harness::confirming_after(1);
    harness.browser.fails = true;
    let mut controller = LifecycleController::new(&client, ExitTrigger::new(), options());

    let report = harness.run(&mut controller).await.expect("run");

    assert!(harness.reporter.any("warn:", "Open https://pod-1-6080.proxy.runpod.net manually"));
    assert_eq!(report.exit, ExitReason::Confirmed);
}
