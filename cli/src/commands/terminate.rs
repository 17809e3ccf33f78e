//! `podlaunch terminate <pod-id>`: delete a pod left behind by a failed cleanup.

use std::process::ExitCode;

use anyhow::{Context, Result};
use clap::Args;

use crate::app::AppContext;
use crate::application::ports::ControlPlane;
use crate::application::services::config_service;
use crate::domain::PodId;
use crate::infra::runpod::RunpodClient;

/// Arguments for the terminate command.
#[derive(Args, Debug)]
pub struct TerminateArgs {
    /// ID of the pod to delete
    pub pod_id: String,

    /// Ignore the environment and saved key, prompt for a new one
    #[arg(long)]
    pub new_key: bool,
}

/// Run `podlaunch terminate`.
///
/// # Errors
///
/// Returns an error if no API key could be obtained or the delete was
/// rejected.
pub async fn run(app: &AppContext, args: TerminateArgs) -> Result<ExitCode> {
    let pod = PodId::new(args.pod_id.trim());
    anyhow::ensure!(!pod.is_empty(), "pod ID cannot be empty");

    let config = config_service::load_config(&app.config_store)?;
    let client =
        RunpodClient::new(app.api_key(args.new_key)?, &config.rest_url, &config.graphql_url)?;
    app.output.step(&format!("Terminating pod {pod}..."));
    client
        .delete(&pod)
        .await
        .with_context(|| format!("failed to terminate pod {pod}"))?;
    app.output.success(&format!("Pod {pod} terminated"));
    Ok(ExitCode::SUCCESS)
}
