//! `podlaunch launch`: create a pod, wait for it, tear it down on exit.

use std::process::ExitCode;

use anyhow::{Context, Result};
use clap::Args;
use tracing::info;

use crate::app::AppContext;
use crate::application::services::config_service;
use crate::application::services::controller::{
    CleanupOutcome, LaunchOptions, LifecycleController, SessionPorts,
};
use crate::application::services::exit::ExitTrigger;
use crate::domain::LaunchConfig;
use crate::infra::console::{StdinConfirmation, SystemBrowser};
use crate::infra::probe::HttpProbe;
use crate::infra::runpod::RunpodClient;
use crate::infra::signals;

/// Arguments for the launch command.
#[derive(Args, Debug, Default)]
pub struct LaunchArgs {
    /// Ignore the environment and saved key, prompt for a new one
    #[arg(long)]
    pub new_key: bool,

    /// Do not open the desktop in a browser
    #[arg(long)]
    pub no_browser: bool,

    /// GPU type to request (repeatable, overrides config)
    #[arg(long = "gpu-type", value_name = "TYPE")]
    pub gpu_types: Vec<String>,

    /// Number of GPUs (overrides config)
    #[arg(long)]
    pub gpu_count: Option<u32>,

    /// Pod template ID (overrides config)
    #[arg(long)]
    pub template: Option<String>,

    /// Network volume ID (overrides config)
    #[arg(long)]
    pub volume: Option<String>,

    /// Port to expose as <port>/<tcp|http> (repeatable, overrides config)
    #[arg(long = "port", value_name = "PORT/PROTO")]
    pub ports: Vec<String>,
}

impl LaunchArgs {
    /// Apply the one-run overrides on top of the stored configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if an override is invalid.
    pub fn apply(&self, config: &mut LaunchConfig) -> Result<()> {
        if !self.gpu_types.is_empty() {
            config.set("gpu_types", &self.gpu_types.join(","))?;
        }
        if let Some(count) = self.gpu_count {
            config.set("gpu_count", &count.to_string())?;
        }
        if let Some(template) = &self.template {
            config.set("template_id", template)?;
        }
        if let Some(volume) = &self.volume {
            config.set("network_volume_id", volume)?;
        }
        if !self.ports.is_empty() {
            config.set("ports", &self.ports.join(","))?;
        }
        Ok(())
    }
}

/// Run `podlaunch launch`.
///
/// # Errors
///
/// Returns an error if the configuration is invalid, no API key could be
/// obtained, or the pod could not be created. Failures after the pod exists
/// are reported and do not change the exit code.
pub async fn run(app: &AppContext, args: LaunchArgs) -> Result<ExitCode> {
    let mut config = config_service::load_config(&app.config_store)?;
    args.apply(&mut config)?;

    let api_key = app.api_key(args.new_key)?;
    let client = RunpodClient::new(api_key, &config.rest_url, &config.graphql_url)?;
    let probe = HttpProbe::new()?;

    let trigger = ExitTrigger::new();
    let listener = signals::spawn_listener(trigger.clone());

    let spec = config.pod_spec(chrono::Utc::now().timestamp());
    let options = LaunchOptions {
        desktop_port: config.desktop_port,
        open_browser: !args.no_browser,
        ..LaunchOptions::default()
    };

    let view = app.renderer();
    let reporter = app.reporter();
    let mut controller = LifecycleController::new(&client, trigger, options);
    let result = controller
        .run(
            &spec,
            SessionPorts {
                probe: &probe,
                confirmation: &StdinConfirmation,
                browser: &SystemBrowser,
                view: &view,
                reporter: &reporter,
            },
        )
        .await;
    listener.abort();

    let report = result.context("failed to create pod")?;
    info!(pod = ?report.pod, exit = %report.exit, cleanup = ?report.cleanup, "session ended");
    if let CleanupOutcome::Failed { pod, .. } = &report.cleanup {
        app.output.error(&format!("Pod {pod} may still be running and billing."));
    }
    Ok(ExitCode::SUCCESS)
}
